//! Per-panel window state
//!
//! Floating, maximized and snapped states plus the geometry each panel
//! returns to, keyed by [`PanelId`].

mod state;
mod store;

pub use state::{WindowMode, WindowState};
pub use store::WindowStateStore;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Application-chosen identifier of a panel
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PanelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
