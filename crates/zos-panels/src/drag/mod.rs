//! Drag controller
//!
//! [`drag_position`] is the pure geometry step; [`Draggable`] owns the
//! session, the hooks and the snap-zone tracking around it.

mod draggable;
mod options;

pub use draggable::{DragHooks, DragOutcome, Draggable};
pub use options::{Axis, DragOptions};

use crate::math::{clamp_span, snap_to_grid, Rect, Vec2};

/// Calculate the dragged position of `start` for a pointer offset `delta`
///
/// Applies axis lock, then grid rounding of the permitted axes, then
/// containment in `parent` and `viewport`, each axis clamped on its own.
pub fn drag_position(
    start: Rect,
    delta: Vec2,
    options: &DragOptions,
    parent: Option<Rect>,
    viewport: Option<Rect>,
) -> Vec2 {
    let axis = options.axis;
    let delta = delta.or_zero();
    let delta = Vec2::new(
        if axis.allows_x() { delta.x } else { 0.0 },
        if axis.allows_y() { delta.y } else { 0.0 },
    );

    let mut pos = start.position() + delta;

    if let Some(grid) = options.grid {
        if axis.allows_x() {
            pos.x = snap_to_grid(pos.x, grid);
        }
        if axis.allows_y() {
            pos.y = snap_to_grid(pos.y, grid);
        }
    }

    for area in parent.into_iter().chain(viewport) {
        if axis.allows_x() {
            pos.x = clamp_span(pos.x, start.width, area.left, area.right());
        }
        if axis.allows_y() {
            pos.y = clamp_span(pos.y, start.height, area.top, area.bottom());
        }
    }

    pos
}
