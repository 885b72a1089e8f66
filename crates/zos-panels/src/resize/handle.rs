//! Resize handles

use serde::{Deserialize, Serialize};

/// One of the eight resize grips of a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// North (top) edge
    N,
    /// South (bottom) edge
    S,
    /// East (right) edge
    E,
    /// West (left) edge
    W,
    /// Northeast corner
    NE,
    /// Northwest corner
    NW,
    /// Southeast corner
    SE,
    /// Southwest corner
    SW,
}

impl ResizeHandle {
    /// All handles, edges first
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
        ResizeHandle::NE,
        ResizeHandle::NW,
        ResizeHandle::SE,
        ResizeHandle::SW,
    ];

    /// Dragging this handle moves the left edge
    #[inline]
    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    /// Dragging this handle moves the top edge
    #[inline]
    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    #[inline]
    pub fn affects_width(self) -> bool {
        !matches!(self, ResizeHandle::N | ResizeHandle::S)
    }

    #[inline]
    pub fn affects_height(self) -> bool {
        !matches!(self, ResizeHandle::E | ResizeHandle::W)
    }

    /// Check if this is a corner handle
    #[inline]
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            ResizeHandle::NE | ResizeHandle::NW | ResizeHandle::SE | ResizeHandle::SW
        )
    }

    /// Get CSS cursor style for this handle
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::N | ResizeHandle::S => "ns-resize",
            ResizeHandle::E | ResizeHandle::W => "ew-resize",
            ResizeHandle::NE | ResizeHandle::SW => "nesw-resize",
            ResizeHandle::NW | ResizeHandle::SE => "nwse-resize",
        }
    }

    /// Short direction name, also used as the handle's CSS class suffix
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }

    /// Parse a direction name (`"se"`, `"n"`, ...)
    pub fn parse(name: &str) -> Option<Self> {
        ResizeHandle::ALL.into_iter().find(|h| h.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_edges() {
        assert!(ResizeHandle::W.moves_left());
        assert!(ResizeHandle::SW.moves_left());
        assert!(!ResizeHandle::E.moves_left());
        assert!(ResizeHandle::NE.moves_top());
        assert!(!ResizeHandle::S.moves_top());
    }

    #[test]
    fn test_axes() {
        assert!(!ResizeHandle::N.affects_width());
        assert!(ResizeHandle::N.affects_height());
        assert!(ResizeHandle::E.affects_width());
        assert!(!ResizeHandle::E.affects_height());
        assert!(ResizeHandle::SE.affects_width() && ResizeHandle::SE.affects_height());
        assert!(ResizeHandle::SE.is_corner());
        assert!(!ResizeHandle::S.is_corner());
    }

    #[test]
    fn test_cursor() {
        assert_eq!(ResizeHandle::NW.cursor(), "nwse-resize");
        assert_eq!(ResizeHandle::SW.cursor(), "nesw-resize");
        assert_eq!(ResizeHandle::W.cursor(), "ew-resize");
    }

    #[test]
    fn test_parse() {
        for handle in ResizeHandle::ALL {
            assert_eq!(ResizeHandle::parse(handle.as_str()), Some(handle));
        }
        assert_eq!(ResizeHandle::parse("north"), None);
    }
}
