//! Window and pointer-interaction core for desktop-like web UIs
//!
//! This crate lets arbitrary surfaces ("panels") be dragged, resized,
//! edge-snapped, maximized/restored and depth-ordered, independent of
//! what each panel renders:
//! - Pointer normalization (mouse, touch and pointer events as one stream)
//! - Drag with axis lock, grid snap and containment
//! - Eight-handle resize with min/max, aspect ratio, grid and containment
//! - Snap zone detection with a single preview overlay
//! - Maximize/restore/snap window state with exact geometry recovery
//! - Focus and z-order, animated scrolling
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`) and total clamping helpers
//! - [`port`]: The [`GeometryPort`] seam every geometry read and write goes through
//! - [`pointer`]: Native events to canonical [`PointerSample`]s
//! - [`drag`] / [`resize`]: The two interaction controllers
//! - [`snap`]: Snap zones and detection
//! - [`window`]: Per-panel window state store
//! - [`scroll`]: Eased scrolling over a [`FrameScheduler`]
//! - [`panel`]: [`Panel`] composition and the [`Desk`] that owns the services
//!
//! ## Example
//!
//! ```rust
//! use zos_panels::{
//!     Desk, MemoryGeometry, NativeKind, NativePointerEvent, PanelConfig, PanelHooks, Rect,
//!     WindowMode,
//! };
//!
//! let mut port = MemoryGeometry::new(1920.0, 1080.0);
//! let element = port.insert(Rect::new(100.0, 100.0, 400.0, 300.0));
//!
//! let mut desk = Desk::new(port);
//! let id = desk
//!     .create_panel("chat", element, PanelConfig::default(), PanelHooks::default())
//!     .unwrap();
//!
//! // Drag the panel against the left edge and release
//! desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0).on(element));
//! desk.dispatch(&NativePointerEvent::new(NativeKind::PointerMove, 5.0, 500.0));
//! desk.dispatch(&NativePointerEvent::new(NativeKind::PointerUp, 5.0, 500.0));
//!
//! assert_eq!(desk.rect(&id).unwrap(), Rect::new(0.0, 0.0, 960.0, 1080.0));
//! assert!(matches!(desk.mode(&id).unwrap(), WindowMode::Snapped(_)));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All geometry and state is pure Rust, testable without a browser
//! 2. **Explicit Services**: No globals; a [`Desk`] owns one of each shared service
//! 3. **Total Math**: Constraint computation never yields NaN or negative sizes

pub mod drag;
pub mod error;
pub mod focus;
pub mod math;
pub mod panel;
pub mod pointer;
pub mod port;
pub mod resize;
pub mod scroll;
pub mod services;
pub mod snap;
pub mod window;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use drag::{drag_position, Axis, DragHooks, DragOptions, DragOutcome, Draggable};
pub use error::PanelError;
pub use focus::ZOrder;
pub use math::{Rect, Size, Vec2};
pub use panel::{Desk, InputResult, Interaction, Panel, PanelConfig, PanelHooks};
pub use pointer::{
    NativeKind, NativePointerEvent, PointerButtons, PointerNormalizer, PointerOrigin,
    PointerPhase, PointerSample,
};
pub use port::{ElementId, GeometryPort, MemoryGeometry};
pub use resize::{calculate_resize, ResizeBounds, ResizeHandle, ResizeHooks, ResizeOptions, Resizable};
pub use scroll::{Easing, FrameScheduler, FrameToken, ManualFrames, ScrollController, ScrollOptions};
pub use services::Services;
pub use snap::{SnapConfig, SnapEngine, SnapZone, SnapZoneKind};
pub use window::{PanelId, WindowMode, WindowState, WindowStateStore};
