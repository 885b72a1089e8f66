//! Drag configuration

use serde::{Deserialize, Serialize};

use crate::error::{check_positive, PanelError};
use crate::port::ElementId;

/// Axes a drag may move along
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Both,
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn allows_x(self) -> bool {
        self != Axis::Y
    }

    #[inline]
    pub fn allows_y(self) -> bool {
        self != Axis::X
    }
}

/// Options for a [`Draggable`](super::Draggable)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragOptions {
    pub axis: Axis,
    /// Grid cell size positions are rounded to
    pub grid: Option<f32>,
    pub constrain_to_parent: bool,
    pub constrain_to_viewport: bool,
    /// Only a down inside this element starts a drag
    pub handle: Option<ElementId>,
    /// Detect snap zones and commit them on release
    pub snap_to_zones: bool,
    /// Start disabled
    pub disabled: bool,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Both,
            grid: None,
            constrain_to_parent: false,
            constrain_to_viewport: false,
            handle: None,
            snap_to_zones: true,
            disabled: false,
        }
    }
}

impl DragOptions {
    pub fn validate(&self) -> Result<(), PanelError> {
        if let Some(grid) = self.grid {
            check_positive("grid", grid)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis() {
        assert!(Axis::Both.allows_x() && Axis::Both.allows_y());
        assert!(Axis::X.allows_x() && !Axis::X.allows_y());
        assert!(!Axis::Y.allows_x() && Axis::Y.allows_y());
    }

    #[test]
    fn test_validate() {
        assert!(DragOptions::default().validate().is_ok());
        let opts = DragOptions {
            grid: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(PanelError::InvalidConstraint { field: "grid", .. })
        ));
    }

    #[test]
    fn test_decode_from_json() {
        let opts: DragOptions =
            serde_json::from_str(r#"{"axis": "x", "grid": 10, "constrainToViewport": true}"#).unwrap();
        assert_eq!(opts.axis, Axis::X);
        assert_eq!(opts.grid, Some(10.0));
        assert!(opts.constrain_to_viewport);
        assert!(opts.snap_to_zones);
    }
}
