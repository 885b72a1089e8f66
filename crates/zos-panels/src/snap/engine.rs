//! Snap zone detection and preview rendering

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, PanelError};
use crate::math::Size;
use crate::port::{ElementId, GeometryPort};

use super::{SnapZone, SnapZoneKind};

/// Default edge distance that triggers a snap zone
pub const SNAP_THRESHOLD: f32 = 20.0;

/// Default height of the top strip that triggers maximize
pub const MAXIMIZE_STRIP: f32 = 8.0;

/// Snap engine settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapConfig {
    /// Distance from an edge that enters an edge or corner zone
    pub threshold: f32,
    /// Distance from the top edge that enters the maximize zone
    pub maximize_strip: f32,
    /// Render the preview overlay while dragging over a zone
    pub show_preview: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: SNAP_THRESHOLD,
            maximize_strip: MAXIMIZE_STRIP,
            show_preview: true,
        }
    }
}

impl SnapConfig {
    pub fn validate(&self) -> Result<(), PanelError> {
        check_non_negative("threshold", self.threshold)?;
        check_non_negative("maximizeStrip", self.maximize_strip)?;
        Ok(())
    }
}

/// Maps pointer positions to snap zones
#[derive(Clone, Debug, Default)]
pub struct SnapEngine {
    config: SnapConfig,
}

impl SnapEngine {
    pub fn new(config: SnapConfig) -> Result<Self, PanelError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// All nine zones for the given viewport
    pub fn snap_zones(&self, viewport: Size) -> Vec<SnapZone> {
        SnapZoneKind::ALL
            .into_iter()
            .map(|kind| SnapZone::new(kind, viewport))
            .collect()
    }

    /// A single zone for the given viewport
    pub fn zone(&self, kind: SnapZoneKind, viewport: Size) -> SnapZone {
        SnapZone::new(kind, viewport)
    }

    /// Zone the pointer at `(x, y)` is entering, if any
    ///
    /// Precedence: the maximize strip along the top edge, then corners,
    /// then edges. The strip never extends past the edge threshold.
    pub fn detect_snap_zone(&self, x: f32, y: f32, viewport: Size) -> Option<SnapZone> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let t = self.config.threshold;
        let strip = self.config.maximize_strip.min(t);
        let w = viewport.width;
        let h = viewport.height;

        let left = x <= t;
        let right = x >= w - t;
        let top = y <= t;
        let bottom = y >= h - t;

        let kind = if y <= strip {
            SnapZoneKind::Maximize
        } else if top && left {
            SnapZoneKind::TopLeft
        } else if top && right {
            SnapZoneKind::TopRight
        } else if bottom && left {
            SnapZoneKind::BottomLeft
        } else if bottom && right {
            SnapZoneKind::BottomRight
        } else if left {
            SnapZoneKind::Left
        } else if right {
            SnapZoneKind::Right
        } else if top {
            SnapZoneKind::Top
        } else if bottom {
            SnapZoneKind::Bottom
        } else {
            return None;
        };

        Some(SnapZone::new(kind, viewport))
    }

    /// Write a zone's rect to an element
    pub fn apply_snap_zone<P: GeometryPort + ?Sized>(&self, port: &mut P, el: ElementId, zone: &SnapZone) {
        log::debug!("apply snap zone {} to {}", zone.kind.as_str(), el);
        port.set_rect(el, zone.rect);
    }

    /// Show the preview overlay for a zone (no-op when previews are off)
    pub fn show_snap_preview<P: GeometryPort + ?Sized>(&self, port: &mut P, zone: &SnapZone) {
        if self.config.show_preview {
            port.show_preview(zone.rect);
        }
    }

    pub fn hide_snap_preview<P: GeometryPort + ?Sized>(&self, port: &mut P) {
        port.hide_preview();
    }
}
