//! Panel configuration

use serde::{Deserialize, Serialize};

use crate::drag::{DragHooks, DragOptions};
use crate::error::PanelError;
use crate::resize::{ResizeHooks, ResizeOptions};

/// Panel configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    /// Attach a draggable
    pub draggable: bool,
    /// Attach a resizable
    pub resizable: bool,
    pub drag: DragOptions,
    pub resize: ResizeOptions,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            draggable: true,
            resizable: true,
            drag: DragOptions::default(),
            resize: ResizeOptions::default(),
        }
    }
}

impl PanelConfig {
    /// Drag only, no grips
    pub fn drag_only() -> Self {
        Self {
            resizable: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), PanelError> {
        if self.draggable {
            self.drag.validate()?;
        }
        if self.resizable {
            self.resize.validate()?;
        }
        Ok(())
    }
}

/// Application callbacks for both controllers of a panel
#[derive(Debug, Default)]
pub struct PanelHooks {
    pub drag: DragHooks,
    pub resize: ResizeHooks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nested() {
        let config: PanelConfig = serde_json::from_str(
            r#"{"resizable": false, "drag": {"axis": "y"}, "resize": {"minWidth": 10}}"#,
        )
        .unwrap();
        assert!(config.draggable);
        assert!(!config.resizable);
        assert_eq!(config.drag.axis, crate::drag::Axis::Y);
        assert!((config.resize.min_width - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_validate_skips_disabled_controllers() {
        let mut config = PanelConfig::drag_only();
        config.resize.aspect_ratio = Some(-1.0);
        assert!(config.validate().is_ok());
        config.resizable = true;
        assert!(config.validate().is_err());
    }
}
