//! Dispatch result type

use serde::Serialize;

use crate::drag::DragOutcome;
use crate::resize::ResizeHandle;
use crate::window::PanelId;

/// What a panel started doing on a down
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "handle", rename_all = "lowercase")]
pub enum Interaction {
    Drag,
    Resize(ResizeHandle),
}

/// Result of dispatching one native event
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// A drag or resize session started on a panel
    Started {
        panel: PanelId,
        interaction: Interaction,
    },
    /// A drag session finished
    Dropped {
        panel: PanelId,
        outcome: DragOutcome,
    },
    /// Input was consumed by a panel
    Handled,
    /// Input was not handled (pass through)
    Unhandled,
}

impl InputResult {
    /// Check if input was handled
    #[inline]
    pub fn is_handled(&self) -> bool {
        !matches!(self, InputResult::Unhandled)
    }

    /// Check if a session started
    #[inline]
    pub fn is_started(&self) -> bool {
        matches!(self, InputResult::Started { .. })
    }
}
