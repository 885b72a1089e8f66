//! A managed surface: draggable + resizable + window state

use crate::drag::{DragOutcome, Draggable};
use crate::error::PanelError;
use crate::math::{Rect, Size};
use crate::pointer::{PointerPhase, PointerSample};
use crate::port::{ElementId, GeometryPort};
use crate::resize::{ResizeHandle, Resizable};
use crate::services::Services;
use crate::window::PanelId;

use super::{Interaction, PanelConfig, PanelHooks};

/// One panel and its controllers
#[derive(Debug)]
pub struct Panel {
    id: PanelId,
    element: ElementId,
    drag: Option<Draggable>,
    resize: Option<Resizable>,
}

impl Panel {
    /// Wire controllers onto `element` as configured
    pub fn new<P: GeometryPort>(
        id: PanelId,
        element: ElementId,
        config: PanelConfig,
        hooks: PanelHooks,
        services: &mut Services<P>,
    ) -> Result<Self, PanelError> {
        config.validate()?;
        if services.port.rect(element).is_none() {
            return Err(PanelError::MissingElement(element));
        }

        let drag = if config.draggable {
            let drag = Draggable::new(element, config.drag, hooks.drag, &services.port)?;
            Some(drag.bind_panel(id.clone()))
        } else {
            None
        };
        let resize = if config.resizable {
            Some(Resizable::new(
                element,
                config.resize,
                hooks.resize,
                &mut services.port,
            )?)
        } else {
            None
        };

        Ok(Self {
            id,
            element,
            drag,
            resize,
        })
    }

    #[inline]
    pub fn id(&self) -> &PanelId {
        &self.id
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn draggable(&self) -> Option<&Draggable> {
        self.drag.as_ref()
    }

    pub fn resizable(&self) -> Option<&Resizable> {
        self.resize.as_ref()
    }

    /// Check if a drag or resize session is active
    pub fn is_active(&self) -> bool {
        self.drag.as_ref().is_some_and(Draggable::is_active)
            || self.resize.as_ref().is_some_and(Resizable::is_active)
    }

    /// Start a session from a down sample
    ///
    /// An explicit `handle` starts a resize; otherwise a down on a grip
    /// resizes and anything else drags.
    pub fn begin<P: GeometryPort>(
        &mut self,
        sample: &PointerSample,
        handle: Option<ResizeHandle>,
        services: &Services<P>,
    ) -> Option<Interaction> {
        if self.is_active() {
            return None;
        }

        let grip = handle.or_else(|| {
            let target = sample.target?;
            self.resize.as_ref()?.handle_at(target)
        });
        if let Some(handle) = grip {
            let resize = self.resize.as_mut()?;
            return resize
                .start(sample, handle, &services.port)
                .then_some(Interaction::Resize(handle));
        }

        let drag = self.drag.as_mut()?;
        drag.start(sample, &services.port).then_some(Interaction::Drag)
    }

    /// Feed a move/up/cancel sample to the active session
    ///
    /// Returns the drag outcome when an up finished a drag.
    pub fn handle_sample<P: GeometryPort>(
        &mut self,
        sample: &PointerSample,
        services: &mut Services<P>,
    ) -> Option<DragOutcome> {
        match sample.phase {
            PointerPhase::Down => None,
            PointerPhase::Move => {
                if let Some(drag) = self.drag.as_mut().filter(|d| d.is_active()) {
                    drag.on_move(sample, services);
                } else if let Some(resize) = self.resize.as_mut().filter(|r| r.is_active()) {
                    resize.on_move(sample, &mut services.port);
                }
                None
            }
            PointerPhase::Up => {
                if let Some(drag) = self.drag.as_mut().filter(|d| d.is_active()) {
                    return Some(drag.end(services));
                }
                if let Some(resize) = self.resize.as_mut().filter(|r| r.is_active()) {
                    if resize.end(&services.port).is_some() {
                        // Resizing a docked panel leaves it floating
                        services.states.mark_floating(&self.id);
                    }
                }
                None
            }
            PointerPhase::Cancel => {
                self.cancel(services);
                None
            }
        }
    }

    /// Roll back any active session
    pub fn cancel<P: GeometryPort>(&mut self, services: &mut Services<P>) -> bool {
        let mut cancelled = false;
        if let Some(drag) = self.drag.as_mut() {
            cancelled |= drag.cancel(services);
        }
        if let Some(resize) = self.resize.as_mut() {
            cancelled |= resize.cancel(&mut services.port);
        }
        cancelled
    }

    /// Set the panel size, honoring the resize limits when resizable
    pub fn set_size<P: GeometryPort>(
        &mut self,
        size: Size,
        services: &mut Services<P>,
    ) -> Result<Rect, PanelError> {
        if let Some(resize) = self.resize.as_mut() {
            return resize.set_size(size, &mut services.port);
        }
        let current = services
            .port
            .rect(self.element)
            .ok_or(PanelError::MissingElement(self.element))?;
        let rect = current.with_size(size.non_negative());
        services.port.set_rect(self.element, rect);
        Ok(rect)
    }

    pub fn size<P: GeometryPort>(&self, services: &Services<P>) -> Option<Size> {
        services.port.rect(self.element).map(|r| r.size())
    }

    pub fn enable(&mut self) {
        if let Some(drag) = self.drag.as_mut() {
            drag.enable();
        }
        if let Some(resize) = self.resize.as_mut() {
            resize.enable();
        }
    }

    /// Stop both controllers, rolling back an active session
    pub fn disable<P: GeometryPort>(&mut self, services: &mut Services<P>) {
        if let Some(drag) = self.drag.as_mut() {
            drag.disable(services);
        }
        if let Some(resize) = self.resize.as_mut() {
            resize.disable(&mut services.port);
        }
    }

    /// Cancel sessions and remove the grips; the element itself stays
    pub fn destroy<P: GeometryPort>(&mut self, services: &mut Services<P>) {
        self.cancel(services);
        if let Some(resize) = self.resize.as_mut() {
            resize.destroy(&mut services.port);
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.disable(services);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{NativeKind, NativePointerEvent, PointerNormalizer};
    use crate::port::MemoryGeometry;
    use crate::snap::{SnapZone, SnapZoneKind};
    use crate::window::WindowMode;

    fn setup() -> (Services<MemoryGeometry>, PointerNormalizer, Panel) {
        let mut port = MemoryGeometry::new(1920.0, 1080.0);
        let el = port.insert(Rect::new(100.0, 100.0, 400.0, 300.0));
        let mut services = Services::new(port);
        let panel = Panel::new(
            PanelId::new("p"),
            el,
            PanelConfig::default(),
            PanelHooks::default(),
            &mut services,
        )
        .unwrap();
        (services, PointerNormalizer::new(), panel)
    }

    #[test]
    fn test_down_on_grip_resizes() {
        let (mut services, mut pointer, mut panel) = setup();
        let grip = panel
            .resizable()
            .unwrap()
            .handles()
            .iter()
            .find(|(h, _)| *h == ResizeHandle::SE)
            .map(|(_, g)| *g)
            .unwrap();

        let down = pointer.normalize(&NativePointerEvent::new(NativeKind::PointerDown, 500.0, 400.0).on(grip));
        assert_eq!(
            panel.begin(&down, None, &services),
            Some(Interaction::Resize(ResizeHandle::SE))
        );
        let moved = pointer.normalize(&NativePointerEvent::new(NativeKind::PointerMove, 550.0, 420.0));
        panel.handle_sample(&moved, &mut services);
        assert_eq!(
            services.port.rect(panel.element()),
            Some(Rect::new(100.0, 100.0, 450.0, 320.0))
        );
    }

    #[test]
    fn test_down_on_body_drags() {
        let (mut services, mut pointer, mut panel) = setup();
        let el = panel.element();
        let down = pointer.normalize(&NativePointerEvent::new(NativeKind::PointerDown, 200.0, 200.0).on(el));
        assert_eq!(panel.begin(&down, None, &services), Some(Interaction::Drag));
        assert!(panel.begin(&down, None, &services).is_none());

        let moved = pointer.normalize(&NativePointerEvent::new(NativeKind::PointerMove, 250.0, 200.0));
        panel.handle_sample(&moved, &mut services);
        let up = pointer.normalize(&NativePointerEvent::new(NativeKind::PointerUp, 250.0, 200.0));
        assert_eq!(
            panel.handle_sample(&up, &mut services),
            Some(DragOutcome::Moved {
                position: crate::math::Vec2::new(150.0, 100.0)
            })
        );
        assert!(!panel.is_active());
    }

    #[test]
    fn test_resize_out_of_snapped_state_floats() {
        let (mut services, mut pointer, mut panel) = setup();
        let el = panel.element();
        let zone = SnapZone::new(SnapZoneKind::Left, services.port.viewport());
        services.states.snap(panel.id(), el, &zone, &mut services.port);

        let down = pointer.normalize(&NativePointerEvent::new(NativeKind::PointerDown, 960.0, 500.0));
        panel.begin(&down, Some(ResizeHandle::E), &services);
        let moved = pointer.normalize(&NativePointerEvent::new(NativeKind::PointerMove, 800.0, 500.0));
        panel.handle_sample(&moved, &mut services);
        let up = pointer.normalize(&NativePointerEvent::new(NativeKind::PointerUp, 800.0, 500.0));
        panel.handle_sample(&up, &mut services);

        assert_eq!(services.states.mode(panel.id()), WindowMode::Floating);
        assert_eq!(services.port.rect(el), Some(Rect::new(0.0, 0.0, 800.0, 1080.0)));
    }

    #[test]
    fn test_destroy_removes_grips() {
        let (mut services, _, mut panel) = setup();
        let el = panel.element();
        assert_eq!(services.port.children_of(el).len(), 8);
        panel.destroy(&mut services);
        assert!(services.port.children_of(el).is_empty());
        assert!(services.port.exists(el));
    }

    #[test]
    fn test_set_size_without_resizable() {
        let mut port = MemoryGeometry::default();
        let el = port.insert(Rect::new(0.0, 0.0, 300.0, 200.0));
        let mut services = Services::new(port);
        let mut panel = Panel::new(
            PanelId::new("q"),
            el,
            PanelConfig::drag_only(),
            PanelHooks::default(),
            &mut services,
        )
        .unwrap();
        assert!(panel.resizable().is_none());
        let rect = panel.set_size(Size::new(20.0, 10.0), &mut services).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 20.0, 10.0));
    }
}
