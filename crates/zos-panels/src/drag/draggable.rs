//! Draggable controller

use std::fmt;

use serde::Serialize;

use crate::error::PanelError;
use crate::math::{Rect, Vec2};
use crate::pointer::PointerSample;
use crate::port::{ElementId, GeometryPort};
use crate::services::Services;
use crate::snap::{SnapZone, SnapZoneKind};
use crate::window::PanelId;

use super::{drag_position, DragOptions};

type StartHook = Box<dyn FnMut(ElementId, Vec2) -> bool>;
type PositionHook = Box<dyn FnMut(ElementId, Vec2)>;

/// Application callbacks around a drag
///
/// `on_drag_start` returning `false` aborts the session before anything
/// is written.
#[derive(Default)]
pub struct DragHooks {
    pub on_drag_start: Option<StartHook>,
    pub on_drag: Option<PositionHook>,
    pub on_drag_end: Option<PositionHook>,
}

impl DragHooks {
    pub fn on_start(mut self, f: impl FnMut(ElementId, Vec2) -> bool + 'static) -> Self {
        self.on_drag_start = Some(Box::new(f));
        self
    }

    pub fn on_drag(mut self, f: impl FnMut(ElementId, Vec2) + 'static) -> Self {
        self.on_drag = Some(Box::new(f));
        self
    }

    pub fn on_end(mut self, f: impl FnMut(ElementId, Vec2) + 'static) -> Self {
        self.on_drag_end = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for DragHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragHooks")
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag", &self.on_drag.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .finish()
    }
}

/// How a drag session finished
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DragOutcome {
    /// No session was active
    Idle,
    /// Released without moving
    Released,
    /// Dropped at a new position
    Moved { position: Vec2 },
    /// Released over a snap zone and committed to it
    Snapped { zone: SnapZoneKind },
}

/// Live drag interaction
#[derive(Clone, Copy, Debug)]
struct DragSession {
    start_pointer: Vec2,
    start_rect: Rect,
    parent: Option<Rect>,
    viewport: Option<Rect>,
    position: Vec2,
    zone: Option<SnapZone>,
    moved: bool,
}

/// Moves one element with the pointer
#[derive(Debug)]
pub struct Draggable {
    element: ElementId,
    options: DragOptions,
    hooks: DragHooks,
    /// Panel whose window state snaps are committed to
    panel: Option<PanelId>,
    session: Option<DragSession>,
    enabled: bool,
}

impl Draggable {
    /// Wire a draggable onto `element`
    pub fn new<P: GeometryPort + ?Sized>(
        element: ElementId,
        options: DragOptions,
        hooks: DragHooks,
        port: &P,
    ) -> Result<Self, PanelError> {
        options.validate()?;
        if port.rect(element).is_none() {
            return Err(PanelError::MissingElement(element));
        }
        if let Some(handle) = options.handle {
            if port.rect(handle).is_none() {
                return Err(PanelError::MissingElement(handle));
            }
        }

        Ok(Self {
            element,
            enabled: !options.disabled,
            options,
            hooks,
            panel: None,
            session: None,
        })
    }

    /// Commit snaps through the window-state store under `panel`
    pub fn bind_panel(mut self, panel: PanelId) -> Self {
        self.panel = Some(panel);
        self
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a drag session is active
    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Snap zone under the pointer in the active session
    pub fn active_zone(&self) -> Option<SnapZone> {
        self.session.and_then(|s| s.zone)
    }

    /// Whether a down on `target` may start a drag
    pub fn accepts<P: GeometryPort + ?Sized>(&self, target: Option<ElementId>, port: &P) -> bool {
        let Some(target) = target else {
            return self.options.handle.is_none();
        };
        let grip = self.options.handle.unwrap_or(self.element);
        port.contains(grip, target)
    }

    /// Begin a drag from a down sample
    ///
    /// Ignored while disabled, while a session is already active, for
    /// non-primary buttons and for downs outside the drag handle.
    pub fn start<P: GeometryPort + ?Sized>(&mut self, sample: &PointerSample, port: &P) -> bool {
        if !self.enabled || self.session.is_some() || !sample.buttons.primary() {
            return false;
        }
        if !self.accepts(sample.target, port) {
            return false;
        }
        let Some(start_rect) = port.rect(self.element) else {
            return false;
        };

        if let Some(hook) = self.hooks.on_drag_start.as_mut() {
            if !hook(self.element, start_rect.position()) {
                log::debug!("drag of {} vetoed by start hook", self.element);
                return false;
            }
        }

        let parent = if self.options.constrain_to_parent {
            port.parent_bounds(self.element)
        } else {
            None
        };
        let viewport = self
            .options
            .constrain_to_viewport
            .then(|| Rect::from_size(port.viewport()));

        self.session = Some(DragSession {
            start_pointer: sample.client,
            start_rect,
            parent,
            viewport,
            position: start_rect.position(),
            zone: None,
            moved: false,
        });
        log::debug!("drag {} from {:?}", self.element, start_rect);
        true
    }

    /// Apply a move sample; returns the position written
    pub fn on_move<P: GeometryPort>(
        &mut self,
        sample: &PointerSample,
        services: &mut Services<P>,
    ) -> Option<Vec2> {
        let session = self.session.as_mut()?;
        let position = drag_position(
            session.start_rect,
            sample.client - session.start_pointer,
            &self.options,
            session.parent,
            session.viewport,
        );
        session.position = position;
        session.moved = true;
        services
            .port
            .set_rect(self.element, session.start_rect.with_position(position));
        log::trace!("drag {} -> {:?}", self.element, position);

        if self.options.snap_to_zones {
            let viewport = services.port.viewport();
            let zone = services
                .snap
                .detect_snap_zone(sample.client.x, sample.client.y, viewport);
            if zone != session.zone {
                match &zone {
                    Some(zone) => services.snap.show_snap_preview(&mut services.port, zone),
                    None => services.snap.hide_snap_preview(&mut services.port),
                }
                session.zone = zone;
            }
        }

        if let Some(hook) = self.hooks.on_drag.as_mut() {
            hook(self.element, position);
        }
        Some(position)
    }

    /// Finish the session, committing the snap zone under the pointer
    pub fn end<P: GeometryPort>(&mut self, services: &mut Services<P>) -> DragOutcome {
        let Some(session) = self.session.take() else {
            return DragOutcome::Idle;
        };
        if session.zone.is_some() {
            services.snap.hide_snap_preview(&mut services.port);
        }

        if let Some(hook) = self.hooks.on_drag_end.as_mut() {
            hook(self.element, session.position);
        }

        if let Some(zone) = session.zone {
            match &self.panel {
                Some(panel) => {
                    services.states.snap(panel, self.element, &zone, &mut services.port);
                }
                None => services.snap.apply_snap_zone(&mut services.port, self.element, &zone),
            }
            log::debug!("drag {} snapped to {}", self.element, zone.kind.as_str());
            return DragOutcome::Snapped { zone: zone.kind };
        }

        if !session.moved {
            return DragOutcome::Released;
        }
        if let Some(panel) = &self.panel {
            services.states.mark_floating(panel);
        }
        log::debug!("drag {} dropped at {:?}", self.element, session.position);
        DragOutcome::Moved {
            position: session.position,
        }
    }

    /// Abort the session; a moved element goes back to where it started
    pub fn cancel<P: GeometryPort>(&mut self, services: &mut Services<P>) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        if session.zone.is_some() {
            services.snap.hide_snap_preview(&mut services.port);
        }
        if session.moved {
            services.port.set_rect(self.element, session.start_rect);
        }
        log::debug!("drag {} cancelled", self.element);
        true
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop accepting new sessions; an active one is rolled back
    pub fn disable<P: GeometryPort>(&mut self, services: &mut Services<P>) {
        self.enabled = false;
        self.cancel(services);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::pointer::{NativeKind, NativePointerEvent, PointerButtons, PointerNormalizer};
    use crate::port::MemoryGeometry;
    use crate::window::WindowMode;

    struct Rig {
        services: Services<MemoryGeometry>,
        pointer: PointerNormalizer,
        el: ElementId,
    }

    impl Rig {
        fn new() -> Self {
            let mut port = MemoryGeometry::new(1920.0, 1080.0);
            let el = port.insert(Rect::new(100.0, 100.0, 400.0, 300.0));
            Self {
                services: Services::new(port),
                pointer: PointerNormalizer::new(),
                el,
            }
        }

        fn sample(&mut self, kind: NativeKind, x: f32, y: f32) -> PointerSample {
            self.pointer
                .normalize(&NativePointerEvent::new(kind, x, y).on(self.el))
        }

        fn draggable(&self, options: DragOptions, hooks: DragHooks) -> Draggable {
            Draggable::new(self.el, options, hooks, &self.services.port).unwrap()
        }
    }

    #[test]
    fn test_drag_moves_without_resizing() {
        let mut rig = Rig::new();
        let mut drag = rig.draggable(DragOptions::default(), DragHooks::default());

        let down = rig.sample(NativeKind::PointerDown, 200.0, 200.0);
        assert!(drag.start(&down, &rig.services.port));
        let moved = rig.sample(NativeKind::PointerMove, 260.0, 230.0);
        assert_eq!(drag.on_move(&moved, &mut rig.services), Some(Vec2::new(160.0, 130.0)));
        assert_eq!(
            rig.services.port.rect(rig.el),
            Some(Rect::new(160.0, 130.0, 400.0, 300.0))
        );
        assert_eq!(
            drag.end(&mut rig.services),
            DragOutcome::Moved {
                position: Vec2::new(160.0, 130.0)
            }
        );
        assert_eq!(drag.end(&mut rig.services), DragOutcome::Idle);
    }

    #[test]
    fn test_cancel_before_move_leaves_geometry() {
        let mut rig = Rig::new();
        let mut drag = rig.draggable(DragOptions::default(), DragHooks::default());

        let down = rig.sample(NativeKind::PointerDown, 200.0, 200.0);
        drag.start(&down, &rig.services.port);
        assert!(drag.cancel(&mut rig.services));
        assert_eq!(rig.services.port.write_count(rig.el), 0);
        assert_eq!(
            rig.services.port.rect(rig.el),
            Some(Rect::new(100.0, 100.0, 400.0, 300.0))
        );
    }

    #[test]
    fn test_cancel_after_move_rolls_back() {
        let mut rig = Rig::new();
        let mut drag = rig.draggable(DragOptions::default(), DragHooks::default());

        let down = rig.sample(NativeKind::PointerDown, 200.0, 200.0);
        drag.start(&down, &rig.services.port);
        let moved = rig.sample(NativeKind::PointerMove, 5.0, 500.0);
        drag.on_move(&moved, &mut rig.services);
        assert!(rig.services.port.preview().is_some());

        drag.cancel(&mut rig.services);
        assert!(rig.services.port.preview().is_none());
        assert_eq!(
            rig.services.port.rect(rig.el),
            Some(Rect::new(100.0, 100.0, 400.0, 300.0))
        );
    }

    #[test]
    fn test_start_hook_veto() {
        let mut rig = Rig::new();
        let moves = Rc::new(RefCell::new(0));
        let counter = moves.clone();
        let hooks = DragHooks::default()
            .on_start(|_, _| false)
            .on_drag(move |_, _| *counter.borrow_mut() += 1);
        let mut drag = rig.draggable(DragOptions::default(), hooks);

        let down = rig.sample(NativeKind::PointerDown, 200.0, 200.0);
        assert!(!drag.start(&down, &rig.services.port));
        let moved = rig.sample(NativeKind::PointerMove, 300.0, 300.0);
        assert!(drag.on_move(&moved, &mut rig.services).is_none());
        assert_eq!(*moves.borrow(), 0);
        assert_eq!(rig.services.port.write_count(rig.el), 0);
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut rig = Rig::new();
        let mut drag = rig.draggable(DragOptions::default(), DragHooks::default());
        let down = rig.pointer.normalize(
            &NativePointerEvent::new(NativeKind::MouseDown, 200.0, 200.0)
                .on(rig.el)
                .with_buttons(PointerButtons::SECONDARY),
        );
        assert!(!drag.start(&down, &rig.services.port));
    }

    #[test]
    fn test_custom_handle() {
        let mut rig = Rig::new();
        let title = rig
            .services
            .port
            .insert_child(rig.el, Rect::new(100.0, 100.0, 400.0, 30.0));
        let body = rig
            .services
            .port
            .insert_child(rig.el, Rect::new(100.0, 130.0, 400.0, 270.0));
        let options = DragOptions {
            handle: Some(title),
            ..Default::default()
        };
        let mut drag = rig.draggable(options, DragHooks::default());

        let on_body = rig
            .pointer
            .normalize(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0).on(body));
        assert!(!drag.start(&on_body, &rig.services.port));
        rig.sample(NativeKind::PointerUp, 200.0, 200.0);

        let on_title = rig
            .pointer
            .normalize(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 110.0).on(title));
        assert!(drag.start(&on_title, &rig.services.port));
    }

    #[test]
    fn test_release_over_zone_snaps_bound_panel() {
        let mut rig = Rig::new();
        let panel = PanelId::new("chat");
        let mut drag = rig
            .draggable(DragOptions::default(), DragHooks::default())
            .bind_panel(panel.clone());

        let down = rig.sample(NativeKind::PointerDown, 200.0, 200.0);
        drag.start(&down, &rig.services.port);
        let moved = rig.sample(NativeKind::PointerMove, 5.0, 500.0);
        drag.on_move(&moved, &mut rig.services);
        assert_eq!(drag.active_zone().map(|z| z.kind), Some(SnapZoneKind::Left));
        assert_eq!(
            rig.services.port.preview(),
            Some(Rect::new(0.0, 0.0, 960.0, 1080.0))
        );

        assert_eq!(
            drag.end(&mut rig.services),
            DragOutcome::Snapped {
                zone: SnapZoneKind::Left
            }
        );
        assert!(rig.services.port.preview().is_none());
        assert_eq!(
            rig.services.port.rect(rig.el),
            Some(Rect::new(0.0, 0.0, 960.0, 1080.0))
        );
        assert_eq!(
            rig.services.states.mode(&panel),
            WindowMode::Snapped(SnapZoneKind::Left)
        );
    }

    #[test]
    fn test_leaving_zone_hides_preview() {
        let mut rig = Rig::new();
        let mut drag = rig.draggable(DragOptions::default(), DragHooks::default());

        let down = rig.sample(NativeKind::PointerDown, 200.0, 200.0);
        drag.start(&down, &rig.services.port);
        let into = rig.sample(NativeKind::PointerMove, 1915.0, 500.0);
        drag.on_move(&into, &mut rig.services);
        assert!(rig.services.port.preview().is_some());

        let out = rig.sample(NativeKind::PointerMove, 900.0, 500.0);
        drag.on_move(&out, &mut rig.services);
        assert!(rig.services.port.preview().is_none());
        assert!(drag.active_zone().is_none());
    }

    #[test]
    fn test_snapping_disabled() {
        let mut rig = Rig::new();
        let options = DragOptions {
            snap_to_zones: false,
            ..Default::default()
        };
        let mut drag = rig.draggable(options, DragHooks::default());

        let down = rig.sample(NativeKind::PointerDown, 200.0, 200.0);
        drag.start(&down, &rig.services.port);
        let moved = rig.sample(NativeKind::PointerMove, 5.0, 500.0);
        drag.on_move(&moved, &mut rig.services);
        assert!(rig.services.port.preview().is_none());
        assert!(matches!(drag.end(&mut rig.services), DragOutcome::Moved { .. }));
    }

    #[test]
    fn test_hooks_observe_positions() {
        let mut rig = Rig::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (start_log, end_log) = (seen.clone(), seen.clone());
        let hooks = DragHooks::default()
            .on_start(move |_, pos| {
                start_log.borrow_mut().push(("start", pos));
                true
            })
            .on_end(move |_, pos| end_log.borrow_mut().push(("end", pos)));
        let mut drag = rig.draggable(DragOptions::default(), hooks);

        let down = rig.sample(NativeKind::PointerDown, 200.0, 200.0);
        drag.start(&down, &rig.services.port);
        let moved = rig.sample(NativeKind::PointerMove, 210.0, 220.0);
        drag.on_move(&moved, &mut rig.services);
        drag.end(&mut rig.services);

        assert_eq!(
            *seen.borrow(),
            vec![
                ("start", Vec2::new(100.0, 100.0)),
                ("end", Vec2::new(110.0, 120.0))
            ]
        );
    }

    #[test]
    fn test_missing_handle_element() {
        let rig = Rig::new();
        let options = DragOptions {
            handle: Some(ElementId(999)),
            ..Default::default()
        };
        let err = Draggable::new(rig.el, options, DragHooks::default(), &rig.services.port).unwrap_err();
        assert_eq!(err, PanelError::MissingElement(ElementId(999)));
    }
}
