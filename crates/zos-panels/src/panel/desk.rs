//! Desk: owns the shared services and every panel

use std::collections::HashMap;

use crate::error::PanelError;
use crate::math::{Rect, Size};
use crate::pointer::{NativePointerEvent, PointerNormalizer, PointerPhase, PointerSample};
use crate::port::{ElementId, GeometryPort};
use crate::resize::ResizeHandle;
use crate::services::Services;
use crate::snap::{SnapConfig, SnapZoneKind};
use crate::window::{PanelId, WindowMode, WindowState};

use super::{InputResult, Panel, PanelConfig, PanelHooks};

/// Phases a panel listens to while a session is active
const SESSION_PHASES: [PointerPhase; 3] = [PointerPhase::Move, PointerPhase::Up, PointerPhase::Cancel];

/// Composition root for panels on one surface
///
/// Owns the geometry port, the pointer normalizer, the snap engine, the
/// window-state store and the z-order, and routes native pointer events
/// to the panel that captured the down.
#[derive(Debug)]
pub struct Desk<P: GeometryPort> {
    services: Services<P>,
    pointer: PointerNormalizer,
    panels: HashMap<PanelId, Panel>,
}

impl<P: GeometryPort> Desk<P> {
    pub fn new(port: P) -> Self {
        Self {
            services: Services::new(port),
            pointer: PointerNormalizer::new(),
            panels: HashMap::new(),
        }
    }

    pub fn with_snap_config(port: P, config: SnapConfig) -> Result<Self, PanelError> {
        Ok(Self {
            services: Services::with_snap_config(port, config)?,
            pointer: PointerNormalizer::new(),
            panels: HashMap::new(),
        })
    }

    #[inline]
    pub fn port(&self) -> &P {
        &self.services.port
    }

    #[inline]
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.services.port
    }

    #[inline]
    pub fn services(&self) -> &Services<P> {
        &self.services
    }

    #[inline]
    pub fn pointer(&self) -> &PointerNormalizer {
        &self.pointer
    }

    pub fn panel(&self, id: &PanelId) -> Option<&Panel> {
        self.panels.get(id)
    }

    /// Panel ids, back to front
    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.services.z_order.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    fn lookup(&self, id: &PanelId) -> Result<&Panel, PanelError> {
        self.panels.get(id).ok_or_else(|| {
            log::warn!("unknown panel {}", id);
            PanelError::UnknownPanel(id.clone())
        })
    }

    fn element_of(&self, id: &PanelId) -> Result<ElementId, PanelError> {
        self.lookup(id).map(Panel::element)
    }

    /// Register a panel around `element`; it starts on top
    pub fn create_panel(
        &mut self,
        id: impl Into<PanelId>,
        element: ElementId,
        config: PanelConfig,
        hooks: PanelHooks,
    ) -> Result<PanelId, PanelError> {
        let id = id.into();
        if self.panels.contains_key(&id) {
            return Err(PanelError::DuplicatePanel(id));
        }

        let panel = Panel::new(id.clone(), element, config, hooks, &mut self.services)?;
        self.panels.insert(id.clone(), panel);
        self.raise(&id);
        log::debug!("panel {} created on {}", id, element);
        Ok(id)
    }

    /// Tear down a panel: sessions, grips, subscriptions, state and z entry
    pub fn destroy_panel(&mut self, id: &PanelId) -> Result<(), PanelError> {
        let Some(mut panel) = self.panels.remove(id) else {
            log::warn!("destroy of unknown panel {}", id);
            return Err(PanelError::UnknownPanel(id.clone()));
        };
        panel.destroy(&mut self.services);
        self.pointer.unsubscribe_owner(id);
        self.services.states.clear_state(id);
        self.services.z_order.remove(id);
        log::debug!("panel {} destroyed", id);
        Ok(())
    }

    /// Tear down every panel
    pub fn destroy_all(&mut self) {
        let ids: Vec<PanelId> = self.panels.keys().cloned().collect();
        for id in ids {
            let _ = self.destroy_panel(&id);
        }
        self.services.states.clear_all();
    }

    fn raise(&mut self, id: &PanelId) -> Option<u32> {
        let element = self.panels.get(id)?.element();
        let z = self.services.z_order.raise(id);
        self.services.port.set_z_index(element, z);
        Some(z)
    }

    /// Bring a panel to the top; returns its z value
    pub fn focus_panel(&mut self, id: &PanelId) -> Result<u32, PanelError> {
        self.lookup(id)?;
        self.raise(id).ok_or_else(|| PanelError::UnknownPanel(id.clone()))
    }

    /// Topmost panel
    pub fn focused(&self) -> Option<&PanelId> {
        self.services.z_order.top()
    }

    pub fn maximize(&mut self, id: &PanelId) -> Result<bool, PanelError> {
        let el = self.element_of(id)?;
        Ok(self.services.states.maximize(id, el, &mut self.services.port))
    }

    pub fn restore(&mut self, id: &PanelId) -> Result<bool, PanelError> {
        let el = self.element_of(id)?;
        Ok(self.services.states.restore(id, el, &mut self.services.port))
    }

    pub fn toggle_maximize(&mut self, id: &PanelId) -> Result<bool, PanelError> {
        let el = self.element_of(id)?;
        Ok(self
            .services
            .states
            .toggle_maximize(id, el, &mut self.services.port))
    }

    /// Dock a panel to a zone of the current viewport
    pub fn snap_panel(&mut self, id: &PanelId, kind: SnapZoneKind) -> Result<bool, PanelError> {
        let el = self.element_of(id)?;
        let zone = self.services.snap.zone(kind, self.services.port.viewport());
        Ok(self
            .services
            .states
            .snap(id, el, &zone, &mut self.services.port))
    }

    /// Window state of a panel; floating panels that never transitioned
    /// report the default state
    pub fn window_state(&self, id: &PanelId) -> Result<WindowState, PanelError> {
        self.lookup(id)?;
        Ok(self.services.states.state(id).unwrap_or_default())
    }

    pub fn mode(&self, id: &PanelId) -> Result<WindowMode, PanelError> {
        self.lookup(id)?;
        Ok(self.services.states.mode(id))
    }

    /// Current rect of a panel's element
    pub fn rect(&self, id: &PanelId) -> Result<Rect, PanelError> {
        let el = self.element_of(id)?;
        self.services
            .port
            .rect(el)
            .ok_or(PanelError::MissingElement(el))
    }

    pub fn set_size(&mut self, id: &PanelId, size: Size) -> Result<Rect, PanelError> {
        self.lookup(id)?;
        let panel = self
            .panels
            .get_mut(id)
            .ok_or_else(|| PanelError::UnknownPanel(id.clone()))?;
        panel.set_size(size, &mut self.services)
    }

    pub fn set_enabled(&mut self, id: &PanelId, enabled: bool) -> Result<(), PanelError> {
        let panel = self.panels.get_mut(id).ok_or_else(|| {
            log::warn!("unknown panel {}", id);
            PanelError::UnknownPanel(id.clone())
        })?;
        if enabled {
            panel.enable();
        } else {
            panel.disable(&mut self.services);
            self.pointer.unsubscribe_owner(id);
        }
        Ok(())
    }

    /// Route a down on a specific panel (listener attached to its element)
    pub fn pointer_down(
        &mut self,
        id: &PanelId,
        event: &NativePointerEvent,
    ) -> Result<InputResult, PanelError> {
        self.lookup(id)?;
        let sample = self.pointer.normalize(event);
        if sample.phase != PointerPhase::Down {
            return Ok(InputResult::Unhandled);
        }
        Ok(self.start_interaction(id, &sample, None))
    }

    /// Start a resize of a panel from an explicit handle
    pub fn begin_resize(
        &mut self,
        id: &PanelId,
        handle: ResizeHandle,
        event: &NativePointerEvent,
    ) -> Result<InputResult, PanelError> {
        self.lookup(id)?;
        let sample = self.pointer.normalize(event);
        if sample.phase != PointerPhase::Down {
            return Ok(InputResult::Unhandled);
        }
        Ok(self.start_interaction(id, &sample, Some(handle)))
    }

    /// Normalize and route one native event
    ///
    /// A down goes to the topmost panel under the target (or under the
    /// pointer when the event has no target). Every other phase goes to
    /// the panels subscribed to it.
    pub fn dispatch(&mut self, event: &NativePointerEvent) -> InputResult {
        let sample = self.pointer.normalize(event);

        if sample.phase == PointerPhase::Down {
            return match self.hit_test(&sample) {
                Some(id) => self.start_interaction(&id, &sample, None),
                None => InputResult::Unhandled,
            };
        }

        let owners = self.pointer.subscribers(sample.phase);
        if owners.is_empty() {
            return InputResult::Unhandled;
        }

        let mut result = InputResult::Handled;
        for id in owners {
            let Some(panel) = self.panels.get_mut(&id) else {
                self.pointer.unsubscribe_owner(&id);
                continue;
            };
            if let Some(outcome) = panel.handle_sample(&sample, &mut self.services) {
                result = InputResult::Dropped {
                    panel: id.clone(),
                    outcome,
                };
            }
            if sample.phase.is_terminal() || !panel.is_active() {
                self.pointer.unsubscribe_owner(&id);
            }
        }
        result
    }

    /// Topmost panel hit by a down sample
    fn hit_test(&self, sample: &PointerSample) -> Option<PanelId> {
        let port = &self.services.port;
        self.services
            .z_order
            .iter()
            .rev()
            .find(|id| {
                let Some(panel) = self.panels.get(*id) else {
                    return false;
                };
                match sample.target {
                    Some(target) => port.contains(panel.element(), target),
                    None => port
                        .rect(panel.element())
                        .is_some_and(|r| r.contains(sample.client)),
                }
            })
            .cloned()
    }

    fn start_interaction(
        &mut self,
        id: &PanelId,
        sample: &PointerSample,
        handle: Option<ResizeHandle>,
    ) -> InputResult {
        let Some(panel) = self.panels.get_mut(id) else {
            return InputResult::Unhandled;
        };
        if panel.is_active() {
            return InputResult::Handled;
        }

        let started = panel.begin(sample, handle, &self.services);
        self.raise(id);

        match started {
            Some(interaction) => {
                self.pointer.subscribe(id, &SESSION_PHASES);
                log::debug!("panel {} started {:?}", id, interaction);
                InputResult::Started {
                    panel: id.clone(),
                    interaction,
                }
            }
            None => InputResult::Handled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DragOutcome;
    use crate::panel::Interaction;
    use crate::pointer::NativeKind;
    use crate::port::MemoryGeometry;

    fn desk_with_panel() -> (Desk<MemoryGeometry>, PanelId, ElementId) {
        let mut port = MemoryGeometry::new(1920.0, 1080.0);
        let el = port.insert(Rect::new(100.0, 100.0, 400.0, 300.0));
        let mut desk = Desk::new(port);
        let id = desk
            .create_panel("board", el, PanelConfig::default(), PanelHooks::default())
            .unwrap();
        (desk, id, el)
    }

    #[test]
    fn test_create_rejects_duplicates_and_missing() {
        let (mut desk, id, el) = desk_with_panel();
        assert_eq!(
            desk.create_panel("board", el, PanelConfig::default(), PanelHooks::default()),
            Err(PanelError::DuplicatePanel(id))
        );
        assert_eq!(
            desk.create_panel("ghost", ElementId(77), PanelConfig::default(), PanelHooks::default()),
            Err(PanelError::MissingElement(ElementId(77)))
        );
        assert_eq!(desk.len(), 1);
    }

    #[test]
    fn test_dispatch_drag_session() {
        let (mut desk, id, el) = desk_with_panel();

        let result = desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0).on(el));
        assert_eq!(
            result,
            InputResult::Started {
                panel: id.clone(),
                interaction: Interaction::Drag
            }
        );
        assert!(desk.pointer().is_subscribed(&id));

        desk.dispatch(&NativePointerEvent::new(NativeKind::PointerMove, 250.0, 260.0));
        let result = desk.dispatch(&NativePointerEvent::new(NativeKind::PointerUp, 250.0, 260.0));
        assert!(matches!(
            result,
            InputResult::Dropped {
                outcome: DragOutcome::Moved { .. },
                ..
            }
        ));
        assert_eq!(desk.rect(&id), Ok(Rect::new(150.0, 160.0, 400.0, 300.0)));
        assert!(!desk.pointer().is_subscribed(&id));

        // Nothing listens once the session is over
        assert_eq!(
            desk.dispatch(&NativePointerEvent::new(NativeKind::PointerMove, 0.0, 0.0)),
            InputResult::Unhandled
        );
    }

    #[test]
    fn test_down_outside_panels() {
        let (mut desk, _, _) = desk_with_panel();
        assert_eq!(
            desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 1500.0, 900.0)),
            InputResult::Unhandled
        );
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let (mut desk, first, _) = desk_with_panel();
        let el = desk.port_mut().insert(Rect::new(150.0, 150.0, 400.0, 300.0));
        let second = desk
            .create_panel("chat", el, PanelConfig::default(), PanelHooks::default())
            .unwrap();

        let result = desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0));
        assert!(matches!(result, InputResult::Started { ref panel, .. } if *panel == second));
        desk.dispatch(&NativePointerEvent::new(NativeKind::PointerUp, 200.0, 200.0));

        desk.focus_panel(&first).unwrap();
        let result = desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0));
        assert!(matches!(result, InputResult::Started { ref panel, .. } if *panel == first));
    }

    #[test]
    fn test_interaction_raises_panel() {
        let (mut desk, first, first_el) = desk_with_panel();
        let el = desk.port_mut().insert(Rect::new(800.0, 100.0, 400.0, 300.0));
        let second = desk
            .create_panel("chat", el, PanelConfig::default(), PanelHooks::default())
            .unwrap();
        assert_eq!(desk.focused(), Some(&second));

        desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0).on(first_el));
        assert_eq!(desk.focused(), Some(&first));
        assert!(desk.port().z_index(first_el) > desk.port().z_index(el));
    }

    #[test]
    fn test_window_operations() {
        let (mut desk, id, _) = desk_with_panel();
        assert_eq!(desk.maximize(&id), Ok(true));
        assert_eq!(desk.mode(&id), Ok(WindowMode::Maximized));
        assert_eq!(desk.restore(&id), Ok(true));
        assert_eq!(desk.rect(&id), Ok(Rect::new(100.0, 100.0, 400.0, 300.0)));

        assert_eq!(desk.snap_panel(&id, SnapZoneKind::TopRight), Ok(true));
        assert_eq!(desk.rect(&id), Ok(Rect::new(960.0, 0.0, 960.0, 540.0)));
        // Toggling a snapped panel restores it
        assert_eq!(desk.toggle_maximize(&id), Ok(true));
        assert_eq!(desk.mode(&id), Ok(WindowMode::Floating));
        assert_eq!(desk.rect(&id), Ok(Rect::new(100.0, 100.0, 400.0, 300.0)));
        assert_eq!(desk.toggle_maximize(&id), Ok(true));
        assert_eq!(desk.mode(&id), Ok(WindowMode::Maximized));
    }

    #[test]
    fn test_unknown_panel() {
        let (mut desk, _, _) = desk_with_panel();
        let ghost = PanelId::new("ghost");
        assert_eq!(desk.maximize(&ghost), Err(PanelError::UnknownPanel(ghost.clone())));
        assert_eq!(desk.destroy_panel(&ghost), Err(PanelError::UnknownPanel(ghost.clone())));
        assert!(desk.focus_panel(&ghost).is_err());
    }

    #[test]
    fn test_destroy_panel_cleans_up() {
        let (mut desk, id, el) = desk_with_panel();
        desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0).on(el));
        desk.maximize(&id).unwrap();

        desk.destroy_panel(&id).unwrap();
        assert!(desk.is_empty());
        assert_eq!(desk.pointer().subscription_count(), 0);
        assert!(desk.services().states.is_empty());
        assert!(desk.services().z_order.is_empty());
        assert!(desk.port().children_of(el).is_empty());
    }

    #[test]
    fn test_disabled_panel_ignores_down() {
        let (mut desk, id, el) = desk_with_panel();
        desk.set_enabled(&id, false).unwrap();
        let result = desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0).on(el));
        assert_eq!(result, InputResult::Handled);
        desk.dispatch(&NativePointerEvent::new(NativeKind::PointerUp, 200.0, 200.0));

        desk.set_enabled(&id, true).unwrap();
        let result = desk.dispatch(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0).on(el));
        assert!(result.is_started());
    }
}
