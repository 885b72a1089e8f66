//! DOM geometry port and `requestAnimationFrame` frames

use std::collections::HashMap;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, Window};

use crate::math::{Rect, Size, Vec2};
use crate::port::{ElementId, GeometryPort, SNAP_PREVIEW_ID};
use crate::resize::ResizeHandle;
use crate::scroll::{FrameScheduler, FrameToken};

const PREVIEW_STYLE: &str = "position:fixed;pointer-events:none;z-index:9999;\
background:rgba(90,140,255,0.18);border:2px solid rgba(90,140,255,0.6);\
box-sizing:border-box;transition:all 120ms ease-out;";

/// Geometry port over live DOM elements
///
/// Elements are registered once and addressed by [`ElementId`] from then
/// on. Rects are read from the offset box and written as inline
/// `left/top/width/height`, both relative to the offset parent.
pub struct DomGeometry {
    window: Window,
    document: Document,
    elements: HashMap<ElementId, HtmlElement>,
    next_id: u64,
}

impl DomGeometry {
    /// Bind to the current window; `None` outside a browser
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            elements: HashMap::new(),
            next_id: 1,
        })
    }

    /// Register an element, returning its existing id if already known
    pub fn register(&mut self, el: HtmlElement) -> ElementId {
        if let Some(id) = self.id_of_exact(AsRef::<JsValue>::as_ref(&el)) {
            return id;
        }
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, el);
        id
    }

    pub fn unregister(&mut self, id: ElementId) -> Option<HtmlElement> {
        self.elements.remove(&id)
    }

    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(&id)
    }

    fn id_of_exact(&self, value: &JsValue) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, el)| AsRef::<JsValue>::as_ref(*el) == value)
            .map(|(id, _)| *id)
    }

    /// Nearest registered element at or above `node`
    pub fn id_of(&self, node: &Node) -> Option<ElementId> {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if let Some(id) = self.id_of_exact(AsRef::<JsValue>::as_ref(&n)) {
                return Some(id);
            }
            current = n.parent_node();
        }
        None
    }

    fn style(&self, el: ElementId, property: &str, value: &str) {
        if let Some(element) = self.elements.get(&el) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn px(value: f32) -> String {
        format!("{}px", value)
    }
}

impl GeometryPort for DomGeometry {
    fn rect(&self, el: ElementId) -> Option<Rect> {
        let element = self.elements.get(&el)?;
        Some(Rect::new(
            element.offset_left() as f32,
            element.offset_top() as f32,
            element.offset_width() as f32,
            element.offset_height() as f32,
        ))
    }

    fn set_rect(&mut self, el: ElementId, rect: Rect) {
        self.style(el, "left", &Self::px(rect.left));
        self.style(el, "top", &Self::px(rect.top));
        self.style(el, "width", &Self::px(rect.width));
        self.style(el, "height", &Self::px(rect.height));
    }

    fn viewport(&self) -> Size {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Size::new(read(self.window.inner_width()), read(self.window.inner_height()))
    }

    fn parent_bounds(&self, el: ElementId) -> Option<Rect> {
        let parent = self.elements.get(&el)?.offset_parent()?;
        Some(Rect::new(
            0.0,
            0.0,
            parent.client_width() as f32,
            parent.client_height() as f32,
        ))
    }

    fn contains(&self, ancestor: ElementId, target: ElementId) -> bool {
        match (self.elements.get(&ancestor), self.elements.get(&target)) {
            (Some(a), Some(t)) => a.contains(Some(AsRef::<Node>::as_ref(t))),
            _ => false,
        }
    }

    fn create_handle(&mut self, el: ElementId, handle: ResizeHandle) -> Option<ElementId> {
        let parent = self.elements.get(&el)?.clone();
        let grip: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
        grip.set_class_name(&format!("zos-resize-handle zos-resize-{}", handle.as_str()));
        let _ = grip.set_attribute("data-handle", handle.as_str());
        parent.append_child(&grip).ok()?;
        Some(self.register(grip))
    }

    fn remove_element(&mut self, el: ElementId) {
        if let Some(element) = self.elements.remove(&el) {
            element.remove();
        }
        // Forget registered descendants of the removed node
        let orphans: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, e)| !e.is_connected())
            .map(|(id, _)| *id)
            .collect();
        for id in orphans {
            self.elements.remove(&id);
        }
    }

    fn inject_style(&mut self, id: &str, css: &str) {
        if self.document.get_element_by_id(id).is_some() {
            return;
        }
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        if let Some(head) = self.document.head() {
            let _ = head.append_child(&style);
        }
    }

    fn show_preview(&mut self, rect: Rect) {
        let preview: Element = match self.document.get_element_by_id(SNAP_PREVIEW_ID) {
            Some(existing) => existing,
            None => {
                let Ok(created) = self.document.create_element("div") else {
                    return;
                };
                created.set_id(SNAP_PREVIEW_ID);
                let Some(body) = self.document.body() else {
                    return;
                };
                if body.append_child(&created).is_err() {
                    return;
                }
                created
            }
        };
        let css = format!(
            "{PREVIEW_STYLE}left:{}px;top:{}px;width:{}px;height:{}px;",
            rect.left, rect.top, rect.width, rect.height
        );
        let _ = preview.set_attribute("style", &css);
    }

    fn hide_preview(&mut self) {
        if let Some(preview) = self.document.get_element_by_id(SNAP_PREVIEW_ID) {
            preview.remove();
        }
    }

    fn set_z_index(&mut self, el: ElementId, z: u32) {
        self.style(el, "z-index", &z.to_string());
    }

    fn scroll_offset(&self, el: ElementId) -> Vec2 {
        let Some(element) = self.elements.get(&el) else {
            return Vec2::ZERO;
        };
        let read = |key: &str| {
            Reflect::get(AsRef::<JsValue>::as_ref(element), &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32
        };
        Vec2::new(read("scrollLeft"), read("scrollTop"))
    }

    fn set_scroll_offset(&mut self, el: ElementId, offset: Vec2) {
        if let Some(element) = self.elements.get(&el) {
            element.scroll_to_with_x_and_y(offset.x as f64, offset.y as f64);
        }
    }
}

/// Frame scheduler over `requestAnimationFrame`
///
/// Each frame calls `callback(token, timestamp)`; the callback is expected
/// to hand the token back to [`PanelDesk::on_frame`](super::PanelDesk::on_frame).
pub struct RafFrames {
    window: Window,
    callback: Option<Function>,
    handles: HashMap<FrameToken, i32>,
    next: u64,
}

impl RafFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
            handles: HashMap::new(),
            next: 0,
        }
    }

    pub fn set_callback(&mut self, callback: Function) {
        self.callback = Some(callback);
    }

    /// Forget a delivered frame
    pub fn complete(&mut self, token: FrameToken) {
        self.handles.remove(&token);
    }
}

impl FrameScheduler for RafFrames {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken(self.next);
        match &self.callback {
            Some(callback) => {
                let bound = callback.bind1(&JsValue::NULL, &JsValue::from_f64(token.0 as f64));
                match self.window.request_animation_frame(&bound) {
                    Ok(handle) => {
                        self.handles.insert(token, handle);
                    }
                    Err(_) => log::warn!("requestAnimationFrame failed for frame {}", token.0),
                }
            }
            None => log::warn!("frame {} requested without a frame callback", token.0),
        }
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Some(handle) = self.handles.remove(&token) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }
}
