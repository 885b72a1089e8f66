//! Window state store: maximize, restore and snap transitions

use std::collections::HashMap;

use crate::math::Rect;
use crate::port::{ElementId, GeometryPort};
use crate::snap::SnapZone;

use super::{PanelId, WindowMode, WindowState};

/// Window state of every panel, keyed by id
///
/// The saved geometry is captured on the first transition away from
/// floating and left alone until the panel is floating again, so any chain
/// of maximize/snap transitions restores to the original floating rect.
#[derive(Clone, Debug, Default)]
pub struct WindowStateStore {
    states: HashMap<PanelId, WindowState>,
}

impl WindowStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a panel, if it ever transitioned
    pub fn state(&self, id: &PanelId) -> Option<WindowState> {
        self.states.get(id).copied()
    }

    /// Current mode of a panel; unknown panels are floating
    pub fn mode(&self, id: &PanelId) -> WindowMode {
        self.states.get(id).map(WindowState::mode).unwrap_or_default()
    }

    /// Transition into a non-floating state, saving geometry if floating
    fn leave_floating<P: GeometryPort + ?Sized>(
        &mut self,
        id: &PanelId,
        el: ElementId,
        target: Rect,
        port: &mut P,
    ) -> Option<&mut WindowState> {
        let current = port.rect(el)?;
        let state = self.states.entry(id.clone()).or_default();
        if state.is_floating() {
            state.saved_geometry = Some(current);
        }
        port.set_rect(el, target);
        Some(state)
    }

    /// Fill the viewport
    ///
    /// Maximizing a maximized panel re-applies the current viewport rect.
    /// Returns `false` when the element is missing.
    pub fn maximize<P: GeometryPort + ?Sized>(
        &mut self,
        id: &PanelId,
        el: ElementId,
        port: &mut P,
    ) -> bool {
        let target = Rect::from_size(port.viewport().non_negative());
        let Some(state) = self.leave_floating(id, el, target, port) else {
            return false;
        };
        state.is_maximized = true;
        state.is_snapped = false;
        state.snap_zone = None;
        log::debug!("panel {} maximized", id);
        true
    }

    /// Apply the saved floating geometry and mark the panel floating
    ///
    /// A no-op without saved geometry. The saved geometry is kept, so
    /// restoring twice lands on the same rect.
    pub fn restore<P: GeometryPort + ?Sized>(
        &mut self,
        id: &PanelId,
        el: ElementId,
        port: &mut P,
    ) -> bool {
        let Some(state) = self.states.get_mut(id) else {
            return false;
        };
        let Some(saved) = state.saved_geometry else {
            return false;
        };
        port.set_rect(el, saved);
        state.is_maximized = false;
        state.is_snapped = false;
        state.snap_zone = None;
        log::debug!("panel {} restored to {:?}", id, saved);
        true
    }

    /// Restore when maximized or snapped, maximize when floating
    pub fn toggle_maximize<P: GeometryPort + ?Sized>(
        &mut self,
        id: &PanelId,
        el: ElementId,
        port: &mut P,
    ) -> bool {
        if self.states.get(id).is_some_and(|s| !s.is_floating()) {
            self.restore(id, el, port)
        } else {
            self.maximize(id, el, port)
        }
    }

    /// Dock a panel to a zone; the maximize zone also sets the maximized flag
    pub fn snap<P: GeometryPort + ?Sized>(
        &mut self,
        id: &PanelId,
        el: ElementId,
        zone: &SnapZone,
        port: &mut P,
    ) -> bool {
        let Some(state) = self.leave_floating(id, el, zone.rect, port) else {
            return false;
        };
        state.is_snapped = true;
        state.snap_zone = Some(zone.kind);
        state.is_maximized = zone.kind.is_maximize();
        log::debug!("panel {} snapped to {}", id, zone.kind.as_str());
        true
    }

    /// Mark a panel floating where it currently is (dragged or resized out
    /// of a maximized/snapped state). The saved geometry is kept.
    pub fn mark_floating(&mut self, id: &PanelId) -> bool {
        match self.states.get_mut(id) {
            Some(state) if !state.is_floating() => {
                state.is_maximized = false;
                state.is_snapped = false;
                state.snap_zone = None;
                log::debug!("panel {} floating", id);
                true
            }
            _ => false,
        }
    }

    /// Forget a panel
    pub fn clear_state(&mut self, id: &PanelId) -> Option<WindowState> {
        self.states.remove(id)
    }

    pub fn clear_all(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
