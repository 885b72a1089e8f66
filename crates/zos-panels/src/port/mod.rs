//! Geometry port
//!
//! The algorithmic core never touches a rendering surface directly. Every
//! read of an element rect, every style write, the snap preview overlay and
//! the injected style sheet go through [`GeometryPort`], so constraint math,
//! snap detection and the window-state machine run headless against
//! [`MemoryGeometry`] and in the browser against the DOM port.

mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size, Vec2};
use crate::resize::ResizeHandle;

pub use memory::MemoryGeometry;

/// Fixed id of the snap preview overlay element
pub const SNAP_PREVIEW_ID: &str = "zos-panels-snap-preview";

/// Fixed id of the injected resize-handle style sheet
pub const RESIZE_STYLE_ID: &str = "zos-panels-resize";

/// Opaque handle to an element known to a geometry port
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rendering surface the controllers read geometry from and write it to
///
/// All rects are in the same coordinate space: the one element `left/top`
/// values are styled in. `viewport()` is anchored at the origin of it.
pub trait GeometryPort {
    /// Current styled geometry of an element, `None` if it does not exist
    fn rect(&self, el: ElementId) -> Option<Rect>;

    /// Write left/top/width/height to an element
    fn set_rect(&mut self, el: ElementId, rect: Rect);

    /// Size of the visible viewport
    fn viewport(&self) -> Size;

    /// Content box of the element's positioning parent, in the element's
    /// own coordinate space (origin at 0,0)
    fn parent_bounds(&self, el: ElementId) -> Option<Rect>;

    /// Whether `target` is `ancestor` or lives inside it
    fn contains(&self, ancestor: ElementId, target: ElementId) -> bool {
        ancestor == target
    }

    /// Insert a resize grip element into `el`
    fn create_handle(&mut self, el: ElementId, handle: ResizeHandle) -> Option<ElementId>;

    /// Remove an element previously created through the port
    fn remove_element(&mut self, el: ElementId);

    /// Insert a style sheet under a fixed id; a second call with the same id is a no-op
    fn inject_style(&mut self, id: &str, css: &str);

    /// Show the snap preview overlay, replacing any existing one
    fn show_preview(&mut self, rect: Rect);

    /// Remove the snap preview overlay if present
    fn hide_preview(&mut self);

    /// Set the stacking order of an element
    fn set_z_index(&mut self, el: ElementId, z: u32);

    /// Current scroll offset of a scroll container
    fn scroll_offset(&self, el: ElementId) -> Vec2;

    /// Set the scroll offset of a scroll container
    fn set_scroll_offset(&mut self, el: ElementId, offset: Vec2);
}
