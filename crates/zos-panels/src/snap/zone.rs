//! Snap zones

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size};

/// Named region of the viewport a panel can snap to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapZoneKind {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Full viewport
    Maximize,
}

impl SnapZoneKind {
    /// Every zone, halves first, then quarters, then maximize
    pub const ALL: [SnapZoneKind; 9] = [
        SnapZoneKind::Left,
        SnapZoneKind::Right,
        SnapZoneKind::Top,
        SnapZoneKind::Bottom,
        SnapZoneKind::TopLeft,
        SnapZoneKind::TopRight,
        SnapZoneKind::BottomLeft,
        SnapZoneKind::BottomRight,
        SnapZoneKind::Maximize,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SnapZoneKind::Left => "left",
            SnapZoneKind::Right => "right",
            SnapZoneKind::Top => "top",
            SnapZoneKind::Bottom => "bottom",
            SnapZoneKind::TopLeft => "topleft",
            SnapZoneKind::TopRight => "topright",
            SnapZoneKind::BottomLeft => "bottomleft",
            SnapZoneKind::BottomRight => "bottomright",
            SnapZoneKind::Maximize => "maximize",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        SnapZoneKind::ALL.into_iter().find(|k| k.as_str() == name)
    }

    #[inline]
    pub fn is_maximize(self) -> bool {
        self == SnapZoneKind::Maximize
    }

    /// Target rectangle of this zone in a viewport of the given size
    pub fn rect_in(self, viewport: Size) -> Rect {
        let viewport = viewport.non_negative();
        let w = viewport.width;
        let h = viewport.height;
        let half_w = w / 2.0;
        let half_h = h / 2.0;

        match self {
            SnapZoneKind::Left => Rect::new(0.0, 0.0, half_w, h),
            SnapZoneKind::Right => Rect::new(half_w, 0.0, half_w, h),
            SnapZoneKind::Top => Rect::new(0.0, 0.0, w, half_h),
            SnapZoneKind::Bottom => Rect::new(0.0, half_h, w, half_h),
            SnapZoneKind::TopLeft => Rect::new(0.0, 0.0, half_w, half_h),
            SnapZoneKind::TopRight => Rect::new(half_w, 0.0, half_w, half_h),
            SnapZoneKind::BottomLeft => Rect::new(0.0, half_h, half_w, half_h),
            SnapZoneKind::BottomRight => Rect::new(half_w, half_h, half_w, half_h),
            SnapZoneKind::Maximize => Rect::new(0.0, 0.0, w, h),
        }
    }
}

/// A zone together with its target rectangle
///
/// Computed from the current viewport on demand; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapZone {
    pub kind: SnapZoneKind,
    pub rect: Rect,
}

impl SnapZone {
    /// Zone `kind` for a viewport of the given size
    pub fn new(kind: SnapZoneKind, viewport: Size) -> Self {
        Self {
            kind,
            rect: kind.rect_in(viewport),
        }
    }
}
