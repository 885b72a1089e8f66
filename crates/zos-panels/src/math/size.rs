//! Width/height pair for element and viewport dimensions

use serde::{Deserialize, Serialize};

/// 2D size for width and height
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size with negative or non-finite dimensions replaced by zero
    #[inline]
    pub fn non_negative(self) -> Self {
        Self::new(
            super::non_negative(self.width),
            super::non_negative(self.height),
        )
    }
}
