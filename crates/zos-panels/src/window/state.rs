//! Window state record

use serde::{Deserialize, Serialize};

use crate::math::Rect;
use crate::snap::SnapZoneKind;

/// Which state a panel is in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "zone", rename_all = "lowercase")]
pub enum WindowMode {
    /// Positioned by explicit geometry
    #[default]
    Floating,
    /// Filling the viewport
    Maximized,
    /// Docked to a half or quarter zone
    Snapped(SnapZoneKind),
}

/// State of one panel as tracked by the [`WindowStateStore`](super::WindowStateStore)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub is_maximized: bool,
    pub is_snapped: bool,
    pub snap_zone: Option<SnapZoneKind>,
    /// Floating geometry to return to
    pub saved_geometry: Option<Rect>,
}

impl WindowState {
    /// Neither maximized nor snapped
    #[inline]
    pub fn is_floating(&self) -> bool {
        !self.is_maximized && !self.is_snapped
    }

    pub fn mode(&self) -> WindowMode {
        if self.is_maximized {
            WindowMode::Maximized
        } else if self.is_snapped {
            match self.snap_zone {
                Some(zone) => WindowMode::Snapped(zone),
                None => WindowMode::Floating,
            }
        } else {
            WindowMode::Floating
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode() {
        let mut state = WindowState::default();
        assert!(state.is_floating());
        assert_eq!(state.mode(), WindowMode::Floating);

        state.is_snapped = true;
        state.snap_zone = Some(SnapZoneKind::Left);
        assert_eq!(state.mode(), WindowMode::Snapped(SnapZoneKind::Left));

        // The maximize zone sets both flags
        state.is_maximized = true;
        state.snap_zone = Some(SnapZoneKind::Maximize);
        assert_eq!(state.mode(), WindowMode::Maximized);
    }

    #[test]
    fn test_serialize() {
        let state = WindowState {
            is_maximized: false,
            is_snapped: true,
            snap_zone: Some(SnapZoneKind::TopRight),
            saved_geometry: Some(Rect::new(1.0, 2.0, 3.0, 4.0)),
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["isSnapped"], true);
        assert_eq!(json["snapZone"], "topright");
        assert_eq!(json["savedGeometry"]["width"], 3.0);
    }
}
