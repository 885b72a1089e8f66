//! Edge snapping
//!
//! Half, quarter and full-viewport target regions, pointer-to-zone
//! detection, and the single preview overlay.

mod engine;
mod zone;

pub use engine::{SnapConfig, SnapEngine, MAXIMIZE_STRIP, SNAP_THRESHOLD};
pub use zone::{SnapZone, SnapZoneKind};
