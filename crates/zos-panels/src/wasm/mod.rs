//! Browser bindings: DOM geometry, console logging and the `PanelDesk` export

mod controller;
mod dom;
mod logger;

pub use controller::PanelDesk;
pub use dom::{DomGeometry, RafFrames};
pub use logger::init_logging;
