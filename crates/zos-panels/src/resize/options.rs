//! Resize configuration

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, check_positive, PanelError};

use super::ResizeHandle;

/// Default minimum panel width
pub const DEFAULT_MIN_WIDTH: f32 = 100.0;
/// Default minimum panel height
pub const DEFAULT_MIN_HEIGHT: f32 = 100.0;

/// Options for a [`Resizable`](super::Resizable)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeOptions {
    /// Which grips to create
    pub handles: Vec<ResizeHandle>,
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    /// Locked width / height ratio
    pub aspect_ratio: Option<f32>,
    /// Grid cell size sizes are rounded to
    pub grid: Option<f32>,
    pub constrain_to_parent: bool,
    pub constrain_to_viewport: bool,
    /// Start disabled
    pub disabled: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            handles: ResizeHandle::ALL.to_vec(),
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_width: None,
            max_height: None,
            aspect_ratio: None,
            grid: None,
            constrain_to_parent: false,
            constrain_to_viewport: false,
            disabled: false,
        }
    }
}

impl ResizeOptions {
    /// Check the options for out-of-range or contradictory values
    pub fn validate(&self) -> Result<(), PanelError> {
        check_non_negative("minWidth", self.min_width)?;
        check_non_negative("minHeight", self.min_height)?;
        if let Some(max) = self.max_width {
            check_non_negative("maxWidth", max)?;
            if max < self.min_width {
                return Err(PanelError::constraint(
                    "maxWidth",
                    format!("{max} is below minWidth {}", self.min_width),
                ));
            }
        }
        if let Some(max) = self.max_height {
            check_non_negative("maxHeight", max)?;
            if max < self.min_height {
                return Err(PanelError::constraint(
                    "maxHeight",
                    format!("{max} is below minHeight {}", self.min_height),
                ));
            }
        }
        if let Some(ratio) = self.aspect_ratio {
            check_positive("aspectRatio", ratio)?;
            let (lo, hi) = self.width_range();
            if hi < lo {
                return Err(PanelError::constraint(
                    "aspectRatio",
                    format!("{ratio} leaves no width between {lo} and {hi}"),
                ));
            }
        }
        if let Some(grid) = self.grid {
            check_positive("grid", grid)?;
        }
        Ok(())
    }

    /// Allowed width range, taking a locked ratio into account
    ///
    /// With a ratio the height limits are folded into the width range, so a
    /// width inside it always yields a height inside the height limits.
    pub(crate) fn width_range(&self) -> (f32, f32) {
        let mut lo = self.min_width;
        let mut hi = self.max_width.unwrap_or(f32::INFINITY);
        if let Some(ratio) = self.aspect_ratio {
            lo = lo.max(self.min_height * ratio);
            if let Some(max_h) = self.max_height {
                hi = hi.min(max_h * ratio);
            }
        }
        (lo, hi)
    }

    /// Allowed height range when no ratio is locked
    pub(crate) fn height_range(&self) -> (f32, f32) {
        (self.min_height, self.max_height.unwrap_or(f32::INFINITY))
    }
}
