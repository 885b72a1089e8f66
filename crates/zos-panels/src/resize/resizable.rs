//! Resizable controller

use std::fmt;

use crate::error::PanelError;
use crate::math::{Rect, Size, Vec2};
use crate::pointer::PointerSample;
use crate::port::{ElementId, GeometryPort, RESIZE_STYLE_ID};

use super::{calculate_resize, clamp_size, ResizeBounds, ResizeHandle, ResizeOptions};

/// Shared style sheet for resize grips
const HANDLE_CSS: &str = "\
.zos-resize-handle{position:absolute;z-index:10;touch-action:none;}\
.zos-resize-n,.zos-resize-s{left:0;right:0;height:6px;cursor:ns-resize;}\
.zos-resize-e,.zos-resize-w{top:0;bottom:0;width:6px;cursor:ew-resize;}\
.zos-resize-n{top:-3px;}.zos-resize-s{bottom:-3px;}\
.zos-resize-e{right:-3px;}.zos-resize-w{left:-3px;}\
.zos-resize-ne,.zos-resize-nw,.zos-resize-se,.zos-resize-sw{width:12px;height:12px;}\
.zos-resize-ne{top:-6px;right:-6px;cursor:nesw-resize;}\
.zos-resize-sw{bottom:-6px;left:-6px;cursor:nesw-resize;}\
.zos-resize-nw{top:-6px;left:-6px;cursor:nwse-resize;}\
.zos-resize-se{bottom:-6px;right:-6px;cursor:nwse-resize;}";

type StartHook = Box<dyn FnMut(ElementId, ResizeHandle, Rect) -> bool>;
type RectHook = Box<dyn FnMut(ElementId, Rect)>;

/// Application callbacks around a resize
///
/// `on_resize_start` returning `false` aborts the session before anything
/// is written.
#[derive(Default)]
pub struct ResizeHooks {
    pub on_resize_start: Option<StartHook>,
    pub on_resize: Option<RectHook>,
    pub on_resize_end: Option<RectHook>,
}

impl ResizeHooks {
    pub fn on_start(mut self, f: impl FnMut(ElementId, ResizeHandle, Rect) -> bool + 'static) -> Self {
        self.on_resize_start = Some(Box::new(f));
        self
    }

    pub fn on_resize(mut self, f: impl FnMut(ElementId, Rect) + 'static) -> Self {
        self.on_resize = Some(Box::new(f));
        self
    }

    pub fn on_end(mut self, f: impl FnMut(ElementId, Rect) + 'static) -> Self {
        self.on_resize_end = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for ResizeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeHooks")
            .field("on_resize_start", &self.on_resize_start.is_some())
            .field("on_resize", &self.on_resize.is_some())
            .field("on_resize_end", &self.on_resize_end.is_some())
            .finish()
    }
}

/// Live resize interaction
#[derive(Clone, Copy, Debug)]
struct ResizeSession {
    handle: ResizeHandle,
    start_rect: Rect,
    start_pointer: Vec2,
    bounds: ResizeBounds,
    current: Rect,
}

/// Resizes one element from its eight grips
#[derive(Debug)]
pub struct Resizable {
    element: ElementId,
    options: ResizeOptions,
    hooks: ResizeHooks,
    /// Grip elements created in the port
    handles: Vec<(ResizeHandle, ElementId)>,
    session: Option<ResizeSession>,
    enabled: bool,
}

impl Resizable {
    /// Wire a resizable onto `element`, creating its grips
    pub fn new<P: GeometryPort + ?Sized>(
        element: ElementId,
        options: ResizeOptions,
        hooks: ResizeHooks,
        port: &mut P,
    ) -> Result<Self, PanelError> {
        options.validate()?;
        if port.rect(element).is_none() {
            return Err(PanelError::MissingElement(element));
        }

        port.inject_style(RESIZE_STYLE_ID, HANDLE_CSS);

        let mut handles = Vec::with_capacity(options.handles.len());
        for &handle in &options.handles {
            if handles.iter().any(|(h, _)| *h == handle) {
                continue;
            }
            if let Some(grip) = port.create_handle(element, handle) {
                handles.push((handle, grip));
            }
        }

        log::debug!("resizable {} with {} handles", element, handles.len());

        Ok(Self {
            element,
            enabled: !options.disabled,
            options,
            hooks,
            handles,
            session: None,
        })
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    pub fn options(&self) -> &ResizeOptions {
        &self.options
    }

    /// Grip elements, one per enabled handle
    pub fn handles(&self) -> &[(ResizeHandle, ElementId)] {
        &self.handles
    }

    /// Which handle a grip element belongs to
    pub fn handle_at(&self, target: ElementId) -> Option<ResizeHandle> {
        self.handles
            .iter()
            .find(|(_, grip)| *grip == target)
            .map(|(handle, _)| *handle)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a resize session is active
    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Handle of the active session
    pub fn active_handle(&self) -> Option<ResizeHandle> {
        self.session.map(|s| s.handle)
    }

    /// Begin a resize from `handle`
    ///
    /// Ignored while disabled or while a session is already active.
    pub fn start<P: GeometryPort + ?Sized>(
        &mut self,
        sample: &PointerSample,
        handle: ResizeHandle,
        port: &P,
    ) -> bool {
        if !self.enabled || self.session.is_some() {
            return false;
        }
        let Some(start_rect) = port.rect(self.element) else {
            return false;
        };

        if let Some(hook) = self.hooks.on_resize_start.as_mut() {
            if !hook(self.element, handle, start_rect) {
                log::debug!("resize of {} vetoed by start hook", self.element);
                return false;
            }
        }

        self.session = Some(ResizeSession {
            handle,
            start_rect,
            start_pointer: sample.client,
            bounds: ResizeBounds::resolve(&self.options, self.element, port),
            current: start_rect,
        });
        log::debug!("resize {} from {} at {:?}", self.element, handle.as_str(), start_rect);
        true
    }

    /// Apply a move sample; returns the rect written
    pub fn on_move<P: GeometryPort + ?Sized>(
        &mut self,
        sample: &PointerSample,
        port: &mut P,
    ) -> Option<Rect> {
        let session = self.session.as_mut()?;
        let rect = calculate_resize(
            session.handle,
            session.start_rect,
            sample.client - session.start_pointer,
            &self.options,
            &session.bounds,
        );
        session.current = rect;
        port.set_rect(self.element, rect);
        log::trace!("resize {} -> {:?}", self.element, rect);

        if let Some(hook) = self.hooks.on_resize.as_mut() {
            hook(self.element, rect);
        }
        Some(rect)
    }

    /// Finish the session and report the measured rect
    pub fn end<P: GeometryPort + ?Sized>(&mut self, port: &P) -> Option<Rect> {
        let session = self.session.take()?;
        let rect = port.rect(self.element).unwrap_or(session.current);
        log::debug!("resize {} ended at {:?}", self.element, rect);

        if let Some(hook) = self.hooks.on_resize_end.as_mut() {
            hook(self.element, rect);
        }
        Some(rect)
    }

    /// Abort the session and put the element back where it started
    pub fn cancel<P: GeometryPort + ?Sized>(&mut self, port: &mut P) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        if session.current != session.start_rect {
            port.set_rect(self.element, session.start_rect);
        }
        log::debug!("resize {} cancelled", self.element);
        true
    }

    /// Set the element size, keeping its position and honoring min/max
    pub fn set_size<P: GeometryPort + ?Sized>(
        &mut self,
        size: Size,
        port: &mut P,
    ) -> Result<Rect, PanelError> {
        let current = port
            .rect(self.element)
            .ok_or(PanelError::MissingElement(self.element))?;
        let rect = current.with_size(clamp_size(&self.options, size.non_negative()));
        port.set_rect(self.element, rect);
        Ok(rect)
    }

    /// Current element size
    pub fn size<P: GeometryPort + ?Sized>(&self, port: &P) -> Option<Size> {
        port.rect(self.element).map(|r| r.size())
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop accepting new sessions; an active one is rolled back
    pub fn disable<P: GeometryPort + ?Sized>(&mut self, port: &mut P) {
        self.enabled = false;
        self.cancel(port);
    }

    /// Cancel any session and remove the grips from the element
    pub fn destroy<P: GeometryPort + ?Sized>(&mut self, port: &mut P) {
        self.disable(port);
        for (_, grip) in self.handles.drain(..) {
            port.remove_element(grip);
        }
        log::debug!("resizable {} destroyed", self.element);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::pointer::{NativeKind, NativePointerEvent, PointerNormalizer};
    use crate::port::MemoryGeometry;

    fn sample(pointer: &mut PointerNormalizer, kind: NativeKind, x: f32, y: f32) -> PointerSample {
        pointer.normalize(&NativePointerEvent::new(kind, x, y))
    }

    #[test]
    fn test_new_creates_handles_and_style() {
        let mut port = MemoryGeometry::default();
        let el = port.insert(Rect::new(0.0, 0.0, 200.0, 200.0));
        let resizable =
            Resizable::new(el, ResizeOptions::default(), ResizeHooks::default(), &mut port).unwrap();

        assert_eq!(resizable.handles().len(), 8);
        assert_eq!(port.children_of(el).len(), 8);
        assert!(port.style(RESIZE_STYLE_ID).is_some());

        // A second resizable reuses the style sheet
        let other = port.insert(Rect::new(0.0, 0.0, 200.0, 200.0));
        Resizable::new(other, ResizeOptions::default(), ResizeHooks::default(), &mut port).unwrap();
        assert_eq!(port.style_count(), 1);
    }

    #[test]
    fn test_new_rejects_missing_element() {
        let mut port = MemoryGeometry::default();
        let err = Resizable::new(
            ElementId(42),
            ResizeOptions::default(),
            ResizeHooks::default(),
            &mut port,
        )
        .unwrap_err();
        assert_eq!(err, PanelError::MissingElement(ElementId(42)));
        assert_eq!(port.style_count(), 0);
    }

    #[test]
    fn test_session() {
        let mut port = MemoryGeometry::default();
        let el = port.insert(Rect::new(0.0, 0.0, 200.0, 200.0));
        let ended = Rc::new(RefCell::new(None));
        let sink = ended.clone();
        let hooks = ResizeHooks::default().on_end(move |_, rect| *sink.borrow_mut() = Some(rect));
        let mut resizable = Resizable::new(el, ResizeOptions::default(), hooks, &mut port).unwrap();
        let mut pointer = PointerNormalizer::new();

        let down = sample(&mut pointer, NativeKind::PointerDown, 200.0, 200.0);
        assert!(resizable.start(&down, ResizeHandle::SE, &port));
        // Re-entrant down is ignored
        assert!(!resizable.start(&down, ResizeHandle::N, &port));

        let moved = sample(&mut pointer, NativeKind::PointerMove, 250.0, 230.0);
        assert_eq!(resizable.on_move(&moved, &mut port), Some(Rect::new(0.0, 0.0, 250.0, 230.0)));

        assert_eq!(resizable.end(&port), Some(Rect::new(0.0, 0.0, 250.0, 230.0)));
        assert_eq!(*ended.borrow(), Some(Rect::new(0.0, 0.0, 250.0, 230.0)));
        assert!(!resizable.is_active());
    }

    #[test]
    fn test_start_hook_veto() {
        let mut port = MemoryGeometry::default();
        let el = port.insert(Rect::new(0.0, 0.0, 200.0, 200.0));
        let hooks = ResizeHooks::default().on_start(|_, _, _| false);
        let mut resizable = Resizable::new(el, ResizeOptions::default(), hooks, &mut port).unwrap();
        let mut pointer = PointerNormalizer::new();

        let down = sample(&mut pointer, NativeKind::PointerDown, 0.0, 0.0);
        assert!(!resizable.start(&down, ResizeHandle::SE, &port));
        let moved = sample(&mut pointer, NativeKind::PointerMove, 50.0, 50.0);
        assert!(resizable.on_move(&moved, &mut port).is_none());
        assert_eq!(port.write_count(el), 0);
    }

    #[test]
    fn test_cancel_rolls_back() {
        let mut port = MemoryGeometry::default();
        let el = port.insert(Rect::new(10.0, 10.0, 200.0, 200.0));
        let mut resizable =
            Resizable::new(el, ResizeOptions::default(), ResizeHooks::default(), &mut port).unwrap();
        let mut pointer = PointerNormalizer::new();

        let down = sample(&mut pointer, NativeKind::PointerDown, 10.0, 10.0);
        resizable.start(&down, ResizeHandle::NW, &port);
        let moved = sample(&mut pointer, NativeKind::PointerMove, 0.0, 0.0);
        resizable.on_move(&moved, &mut port);
        assert_eq!(port.rect(el), Some(Rect::new(0.0, 0.0, 210.0, 210.0)));

        assert!(resizable.cancel(&mut port));
        assert_eq!(port.rect(el), Some(Rect::new(10.0, 10.0, 200.0, 200.0)));
    }

    #[test]
    fn test_set_size_and_disable() {
        let mut port = MemoryGeometry::default();
        let el = port.insert(Rect::new(10.0, 10.0, 200.0, 200.0));
        let mut resizable =
            Resizable::new(el, ResizeOptions::default(), ResizeHooks::default(), &mut port).unwrap();

        let rect = resizable.set_size(Size::new(50.0, 400.0), &mut port).unwrap();
        assert_eq!(rect, Rect::new(10.0, 10.0, 100.0, 400.0));
        assert_eq!(resizable.size(&port), Some(Size::new(100.0, 400.0)));

        resizable.disable(&mut port);
        let mut pointer = PointerNormalizer::new();
        let down = sample(&mut pointer, NativeKind::PointerDown, 0.0, 0.0);
        assert!(!resizable.start(&down, ResizeHandle::E, &port));
        resizable.enable();
        assert!(resizable.start(&down, ResizeHandle::E, &port));
    }

    #[test]
    fn test_destroy_removes_handles() {
        let mut port = MemoryGeometry::default();
        let el = port.insert(Rect::new(0.0, 0.0, 200.0, 200.0));
        let options = ResizeOptions {
            handles: vec![ResizeHandle::SE, ResizeHandle::SE, ResizeHandle::E],
            ..Default::default()
        };
        let mut resizable = Resizable::new(el, options, ResizeHooks::default(), &mut port).unwrap();
        assert_eq!(resizable.handles().len(), 2);
        let grip = resizable.handles()[0].1;
        assert_eq!(resizable.handle_at(grip), Some(ResizeHandle::SE));

        resizable.destroy(&mut port);
        assert!(port.children_of(el).is_empty());
        assert!(port.exists(el));
        assert!(resizable.handles().is_empty());
    }
}
