//! Native input events and the canonical pointer sample

use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::port::ElementId;

/// Device that produced a sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerOrigin {
    #[default]
    Mouse,
    Touch,
    Pen,
}

impl PointerOrigin {
    /// Parse a DOM `pointerType` string; unknown types count as mouse
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => PointerOrigin::Touch,
            "pen" => PointerOrigin::Pen,
            _ => PointerOrigin::Mouse,
        }
    }
}

/// Canonical phase of a pointer interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerPhase {
    /// Up or cancel: the interaction is over
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, PointerPhase::Up | PointerPhase::Cancel)
    }
}

/// Pressed-button mask, using the DOM `buttons` bit layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerButtons(pub u16);

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons(0);
    pub const PRIMARY: PointerButtons = PointerButtons(1);
    pub const SECONDARY: PointerButtons = PointerButtons(2);
    pub const AUXILIARY: PointerButtons = PointerButtons(4);

    /// Primary (left / touch contact / pen tip) is pressed
    #[inline]
    pub fn primary(self) -> bool {
        self.0 & Self::PRIMARY.0 != 0
    }

    /// No button is pressed
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Native event family as delivered by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl NativeKind {
    /// Parse a DOM event type name (`pointerdown`, `touchend`, ...)
    pub fn parse(event_type: &str) -> Option<Self> {
        let kind = match event_type {
            "pointerdown" => NativeKind::PointerDown,
            "pointermove" => NativeKind::PointerMove,
            "pointerup" => NativeKind::PointerUp,
            "pointercancel" => NativeKind::PointerCancel,
            "mousedown" => NativeKind::MouseDown,
            "mousemove" => NativeKind::MouseMove,
            "mouseup" => NativeKind::MouseUp,
            "touchstart" => NativeKind::TouchStart,
            "touchmove" => NativeKind::TouchMove,
            "touchend" => NativeKind::TouchEnd,
            "touchcancel" => NativeKind::TouchCancel,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical phase for this event family
    pub fn phase(self) -> PointerPhase {
        match self {
            NativeKind::PointerDown | NativeKind::MouseDown | NativeKind::TouchStart => {
                PointerPhase::Down
            }
            NativeKind::PointerMove | NativeKind::MouseMove | NativeKind::TouchMove => {
                PointerPhase::Move
            }
            NativeKind::PointerUp | NativeKind::MouseUp | NativeKind::TouchEnd => PointerPhase::Up,
            NativeKind::PointerCancel | NativeKind::TouchCancel => PointerPhase::Cancel,
        }
    }

    /// Whether the event comes from the touch event family
    #[inline]
    pub fn is_touch(self) -> bool {
        matches!(
            self,
            NativeKind::TouchStart
                | NativeKind::TouchMove
                | NativeKind::TouchEnd
                | NativeKind::TouchCancel
        )
    }

    /// Whether the event comes from the mouse event family
    #[inline]
    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            NativeKind::MouseDown | NativeKind::MouseMove | NativeKind::MouseUp
        )
    }
}

/// Raw input event before normalization
///
/// For touch events `client`/`screen` are taken from the first changed touch.
#[derive(Clone, Debug, PartialEq)]
pub struct NativePointerEvent {
    pub kind: NativeKind,
    pub client: Vec2,
    pub screen: Vec2,
    pub buttons: PointerButtons,
    /// `pointerType` for pointer events
    pub pointer_type: Option<PointerOrigin>,
    pub target: Option<ElementId>,
    pub timestamp_ms: f64,
}

impl NativePointerEvent {
    /// Create an event at a client position with screen == client
    pub fn new(kind: NativeKind, x: f32, y: f32) -> Self {
        let buttons = match kind.phase() {
            PointerPhase::Down | PointerPhase::Move => PointerButtons::PRIMARY,
            PointerPhase::Up | PointerPhase::Cancel => PointerButtons::NONE,
        };
        Self {
            kind,
            client: Vec2::new(x, y),
            screen: Vec2::new(x, y),
            buttons,
            pointer_type: None,
            target: None,
            timestamp_ms: 0.0,
        }
    }

    /// Set the element the event was dispatched to
    pub fn on(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the event timestamp
    pub fn at(mut self, timestamp_ms: f64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Set the pressed-button mask
    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Set the pointer type
    pub fn with_pointer_type(mut self, origin: PointerOrigin) -> Self {
        self.pointer_type = Some(origin);
        self
    }

    /// Device that produced the event
    pub fn origin(&self) -> PointerOrigin {
        if self.kind.is_touch() {
            PointerOrigin::Touch
        } else if self.kind.is_mouse() {
            PointerOrigin::Mouse
        } else {
            self.pointer_type.unwrap_or_default()
        }
    }
}

/// One canonical pointer sample
///
/// Exists only for the duration of one dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub origin: PointerOrigin,
    /// Position in client (viewport) coordinates
    pub client: Vec2,
    /// Position in screen coordinates
    pub screen: Vec2,
    /// Offset from the position at the start of the session
    pub delta: Vec2,
    /// Offset from the previous sample
    pub step: Vec2,
    pub buttons: PointerButtons,
    pub target: Option<ElementId>,
    pub timestamp_ms: f64,
}
