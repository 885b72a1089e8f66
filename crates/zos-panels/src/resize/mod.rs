//! Resize controller
//!
//! [`calculate_resize`] is the pure geometry step; [`Resizable`] owns the
//! grips, the session and the hooks around it.

mod handle;
mod options;
mod resizable;

pub use handle::ResizeHandle;
pub use options::{ResizeOptions, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
pub use resizable::{Resizable, ResizeHooks};

use crate::math::{clamp_total, non_negative, snap_to_grid, Rect, Size, Vec2};
use crate::port::{ElementId, GeometryPort};

/// Containment areas a resize is clamped to, in application order
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResizeBounds {
    pub viewport: Option<Rect>,
    pub parent: Option<Rect>,
}

impl ResizeBounds {
    /// No containment
    pub const NONE: ResizeBounds = ResizeBounds {
        viewport: None,
        parent: None,
    };

    /// Read the areas enabled in `options` from the port
    pub fn resolve<P: GeometryPort + ?Sized>(
        options: &ResizeOptions,
        el: ElementId,
        port: &P,
    ) -> Self {
        Self {
            viewport: options
                .constrain_to_viewport
                .then(|| Rect::from_size(port.viewport())),
            parent: if options.constrain_to_parent {
                port.parent_bounds(el)
            } else {
                None
            },
        }
    }

    fn areas(&self) -> impl Iterator<Item = Rect> {
        self.viewport.into_iter().chain(self.parent)
    }
}

/// Room the moving edges have inside `area`, as (width, height)
fn available(handle: ResizeHandle, start: Rect, area: Rect) -> (f32, f32) {
    let width = if handle.moves_left() {
        start.right() - area.left
    } else {
        area.right() - start.left
    };
    let height = if handle.moves_top() {
        start.bottom() - area.top
    } else {
        area.bottom() - start.top
    };
    (non_negative(width), non_negative(height))
}

/// Snap a span whose far edge is pinned
///
/// When the near edge moves it lands on the grid and the span is measured
/// from the pinned edge; otherwise the span itself is rounded.
fn snap_span(moves_near: bool, far: f32, span: f32, grid: f32) -> f32 {
    if moves_near {
        far - snap_to_grid(far - span, grid)
    } else {
        snap_to_grid(span, grid)
    }
}

/// Calculate the new rect of a resize from `start` by pointer offset `delta`
///
/// Constraints apply in order: aspect ratio, grid, min/max, viewport,
/// parent. The edge opposite the handle stays where it was in `start`, and
/// the grid rounds the moving edge rather than the size when that edge is
/// the left or top one.
pub fn calculate_resize(
    handle: ResizeHandle,
    start: Rect,
    delta: Vec2,
    options: &ResizeOptions,
    bounds: &ResizeBounds,
) -> Rect {
    let delta = delta.or_zero();

    let mut width = if handle.moves_left() {
        start.width - delta.x
    } else if handle.affects_width() {
        start.width + delta.x
    } else {
        start.width
    };
    let mut height = if handle.moves_top() {
        start.height - delta.y
    } else if handle.affects_height() {
        start.height + delta.y
    } else {
        start.height
    };

    match options.aspect_ratio {
        Some(ratio) => {
            // Width drives for e/w and corners, height for n/s
            let width_driven = handle.affects_width();
            let mut driven = if width_driven { width } else { height * ratio };

            if let Some(grid) = options.grid {
                driven = if width_driven {
                    snap_span(handle.moves_left(), start.right(), driven, grid)
                } else {
                    snap_span(handle.moves_top(), start.bottom(), driven / ratio, grid) * ratio
                };
            }

            let (lo, hi) = options.width_range();
            width = clamp_total(driven, lo, hi);

            for area in bounds.areas() {
                let (room_w, room_h) = available(handle, start, area);
                width = width.min(room_w).min(room_h * ratio);
            }

            width = non_negative(width);
            height = width / ratio;
        }
        None => {
            if let Some(grid) = options.grid {
                if handle.affects_width() {
                    width = snap_span(handle.moves_left(), start.right(), width, grid);
                }
                if handle.affects_height() {
                    height = snap_span(handle.moves_top(), start.bottom(), height, grid);
                }
            }

            if handle.affects_width() {
                let (lo, hi) = options.width_range();
                width = clamp_total(width, lo, hi);
            }
            if handle.affects_height() {
                let (lo, hi) = options.height_range();
                height = clamp_total(height, lo, hi);
            }

            for area in bounds.areas() {
                let (room_w, room_h) = available(handle, start, area);
                if handle.affects_width() {
                    width = width.min(room_w);
                }
                if handle.affects_height() {
                    height = height.min(room_h);
                }
            }

            width = non_negative(width);
            height = non_negative(height);
        }
    }

    let left = if handle.moves_left() {
        start.right() - width
    } else {
        start.left
    };
    let top = if handle.moves_top() {
        start.bottom() - height
    } else {
        start.top
    };

    Rect::new(left, top, width, height)
}

/// Clamp an explicitly requested size to the min/max and ratio options
pub fn clamp_size(options: &ResizeOptions, size: Size) -> Size {
    let (lo, hi) = options.width_range();
    let width = clamp_total(size.width, lo, hi);
    match options.aspect_ratio {
        Some(ratio) => Size::new(width, width / ratio),
        None => {
            let (lo, hi) = options.height_range();
            Size::new(width, clamp_total(size.height, lo, hi))
        }
    }
}
