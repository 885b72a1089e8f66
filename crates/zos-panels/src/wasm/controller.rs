//! WASM exports for the panel desk
//!
//! `PanelDesk` wraps a [`Desk`] over the live DOM so a page can register
//! panel elements, feed it pointer events and drive scroll animations.
//! Options travel as JSON strings, callbacks as a plain JS object.

use std::collections::HashMap;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Node};

use super::dom::{DomGeometry, RafFrames};
use crate::drag::DragHooks;
use crate::error::PanelError;
use crate::math::{Rect, Size, Vec2};
use crate::panel::{Desk, InputResult, PanelConfig, PanelHooks};
use crate::pointer::{NativeKind, NativePointerEvent, PointerButtons, PointerOrigin};
use crate::resize::{ResizeHandle, ResizeHooks};
use crate::scroll::{FrameToken, ScrollController, ScrollOptions};
use crate::snap::{SnapConfig, SnapZoneKind};
use crate::window::PanelId;

const UNHANDLED_JSON: &str = r#"{"type":"unhandled"}"#;

fn js_error(err: PanelError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn decode<T: serde::de::DeserializeOwned + Default>(json: Option<String>) -> Result<T, JsValue> {
    match json {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)
            .map_err(|e| js_error(PanelError::InvalidConfig(e.to_string()))),
        _ => Ok(T::default()),
    }
}

fn rect_value(rect: Rect) -> JsValue {
    let obj = Object::new();
    for (key, value) in [
        ("left", rect.left),
        ("top", rect.top),
        ("width", rect.width),
        ("height", rect.height),
    ] {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), &JsValue::from_f64(value as f64));
    }
    obj.into()
}

fn callback(callbacks: &JsValue, key: &str) -> Option<Function> {
    if !callbacks.is_object() {
        return None;
    }
    Reflect::get(callbacks, &JsValue::from_str(key))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn find_scroller(
    scrollers: &mut HashMap<u32, ScrollController>,
    scroller: u32,
) -> Result<&mut ScrollController, JsValue> {
    scrollers
        .get_mut(&scroller)
        .ok_or_else(|| JsValue::from_str(&format!("unknown scroller {}", scroller)))
}

/// A start callback vetoes only by returning `false`
fn allowed(result: Result<JsValue, JsValue>, key: &str) -> bool {
    match result {
        Ok(value) => value.as_bool() != Some(false),
        Err(err) => {
            log::warn!("{} threw: {:?}", key, err);
            true
        }
    }
}

fn report(result: Result<JsValue, JsValue>, key: &str) {
    if let Err(err) = result {
        log::warn!("{} threw: {:?}", key, err);
    }
}

/// Map `{ onDragStart, onDrag, onDragEnd, onResizeStart, onResize, onResizeEnd }`
/// onto controller hooks; every callback receives the panel id first
fn hooks_from_js(panel: &PanelId, callbacks: &JsValue) -> PanelHooks {
    let id = JsValue::from_str(panel.as_str());
    let mut drag = DragHooks::default();
    let mut resize = ResizeHooks::default();

    if let Some(f) = callback(callbacks, "onDragStart") {
        let id = id.clone();
        drag = drag.on_start(move |_, pos: Vec2| {
            allowed(
                f.call3(&JsValue::NULL, &id, &pos.x.into(), &pos.y.into()),
                "onDragStart",
            )
        });
    }
    if let Some(f) = callback(callbacks, "onDrag") {
        let id = id.clone();
        drag = drag.on_drag(move |_, pos: Vec2| {
            report(f.call3(&JsValue::NULL, &id, &pos.x.into(), &pos.y.into()), "onDrag");
        });
    }
    if let Some(f) = callback(callbacks, "onDragEnd") {
        let id = id.clone();
        drag = drag.on_end(move |_, pos: Vec2| {
            report(f.call3(&JsValue::NULL, &id, &pos.x.into(), &pos.y.into()), "onDragEnd");
        });
    }
    if let Some(f) = callback(callbacks, "onResizeStart") {
        let id = id.clone();
        resize = resize.on_start(move |_, handle: ResizeHandle, rect| {
            allowed(
                f.call3(&JsValue::NULL, &id, &handle.as_str().into(), &rect_value(rect)),
                "onResizeStart",
            )
        });
    }
    if let Some(f) = callback(callbacks, "onResize") {
        let id = id.clone();
        resize = resize.on_resize(move |_, rect| {
            report(f.call2(&JsValue::NULL, &id, &rect_value(rect)), "onResize");
        });
    }
    if let Some(f) = callback(callbacks, "onResizeEnd") {
        resize = resize.on_end(move |_, rect| {
            report(f.call2(&JsValue::NULL, &id, &rect_value(rect)), "onResizeEnd");
        });
    }

    PanelHooks { drag, resize }
}

/// Panel desk for WASM: a [`Desk`] over the DOM plus scroll animations
///
/// Callbacks run synchronously inside pointer dispatch and must not call
/// back into the same `PanelDesk`.
#[wasm_bindgen]
pub struct PanelDesk {
    desk: Desk<DomGeometry>,
    frames: RafFrames,
    scrollers: HashMap<u32, ScrollController>,
    next_scroller: u32,
}

#[wasm_bindgen]
impl PanelDesk {
    /// Create a desk bound to the current window
    ///
    /// `snap_config_json` may set `threshold`, `maximizeStrip` and
    /// `showPreview`; omitted fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(snap_config_json: Option<String>) -> Result<PanelDesk, JsValue> {
        let config: SnapConfig = decode(snap_config_json)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let port = DomGeometry::new().ok_or_else(|| JsValue::from_str("no document"))?;
        let desk = Desk::with_snap_config(port, config).map_err(js_error)?;
        Ok(Self {
            desk,
            frames: RafFrames::new(window),
            scrollers: HashMap::new(),
            next_scroller: 1,
        })
    }

    // =========================================================================
    // Panels
    // =========================================================================

    /// Register a panel around `element`
    ///
    /// `options_json` is a panel configuration (`draggable`, `resizable`,
    /// `drag`, `resize`); `callbacks` an object of optional functions.
    #[wasm_bindgen]
    pub fn create_panel(
        &mut self,
        id: &str,
        element: HtmlElement,
        options_json: Option<String>,
        callbacks: JsValue,
    ) -> Result<(), JsValue> {
        let config: PanelConfig = decode(options_json)?;
        let panel = PanelId::new(id);
        let hooks = hooks_from_js(&panel, &callbacks);
        let el = self.desk.port_mut().register(element);
        self.desk
            .create_panel(panel, el, config, hooks)
            .map(|_| ())
            .map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn destroy_panel(&mut self, id: &str) -> Result<(), JsValue> {
        let panel = PanelId::new(id);
        let el = self.desk.panel(&panel).map(|p| p.element());
        self.desk.destroy_panel(&panel).map_err(js_error)?;
        if let Some(el) = el {
            self.desk.port_mut().unregister(el);
        }
        Ok(())
    }

    #[wasm_bindgen]
    pub fn destroy_all(&mut self) {
        self.desk.destroy_all();
    }

    /// Bring a panel to the top; returns its z-index
    #[wasm_bindgen]
    pub fn focus_panel(&mut self, id: &str) -> Result<u32, JsValue> {
        self.desk.focus_panel(&PanelId::new(id)).map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn get_focused_panel(&self) -> Option<String> {
        self.desk.focused().map(|id| id.as_str().to_string())
    }

    /// Panel ids back to front, as JSON
    #[wasm_bindgen]
    pub fn get_panels_json(&self) -> String {
        serde_json::to_string(&self.desk.panel_ids()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen]
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), JsValue> {
        self.desk
            .set_enabled(&PanelId::new(id), enabled)
            .map_err(js_error)
    }

    /// Resize a panel within its constraints; returns the applied rect as JSON
    #[wasm_bindgen]
    pub fn set_size(&mut self, id: &str, width: f32, height: f32) -> Result<String, JsValue> {
        let rect = self
            .desk
            .set_size(&PanelId::new(id), Size::new(width, height))
            .map_err(js_error)?;
        Ok(serde_json::to_string(&rect).unwrap_or_else(|_| "{}".to_string()))
    }

    #[wasm_bindgen]
    pub fn get_rect_json(&self, id: &str) -> Result<String, JsValue> {
        let rect = self.desk.rect(&PanelId::new(id)).map_err(js_error)?;
        Ok(serde_json::to_string(&rect).unwrap_or_else(|_| "{}".to_string()))
    }

    // =========================================================================
    // Window state
    // =========================================================================

    #[wasm_bindgen]
    pub fn maximize(&mut self, id: &str) -> Result<bool, JsValue> {
        self.desk.maximize(&PanelId::new(id)).map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn restore(&mut self, id: &str) -> Result<bool, JsValue> {
        self.desk.restore(&PanelId::new(id)).map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn toggle_maximize(&mut self, id: &str) -> Result<bool, JsValue> {
        self.desk.toggle_maximize(&PanelId::new(id)).map_err(js_error)
    }

    /// Dock a panel to a named zone (`left`, `topright`, `maximize`, ...)
    #[wasm_bindgen]
    pub fn snap_panel(&mut self, id: &str, zone: &str) -> Result<bool, JsValue> {
        let kind = SnapZoneKind::parse(zone)
            .ok_or_else(|| JsValue::from_str(&format!("unknown snap zone `{}`", zone)))?;
        self.desk
            .snap_panel(&PanelId::new(id), kind)
            .map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn get_window_state_json(&self, id: &str) -> Result<String, JsValue> {
        let state = self.desk.window_state(&PanelId::new(id)).map_err(js_error)?;
        Ok(serde_json::to_string(&state).unwrap_or_else(|_| "{}".to_string()))
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Route one DOM pointer, mouse or touch event; returns the result as JSON
    ///
    /// For touch events pass the first changed touch's coordinates.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_event(
        &mut self,
        event_type: &str,
        client_x: f32,
        client_y: f32,
        screen_x: f32,
        screen_y: f32,
        buttons: u16,
        pointer_type: &str,
        target: Option<Node>,
        timestamp: f64,
    ) -> String {
        let Some(event) = self.native_event(
            event_type,
            Vec2::new(client_x, client_y),
            Vec2::new(screen_x, screen_y),
            buttons,
            pointer_type,
            target,
            timestamp,
        ) else {
            return UNHANDLED_JSON.to_string();
        };
        let result = self.desk.dispatch(&event);
        Self::result_json(&result)
    }

    /// Start a resize from an explicit handle (`n`, `se`, ...)
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn begin_resize(
        &mut self,
        id: &str,
        handle: &str,
        client_x: f32,
        client_y: f32,
        screen_x: f32,
        screen_y: f32,
        buttons: u16,
        pointer_type: &str,
        timestamp: f64,
    ) -> Result<String, JsValue> {
        let handle = ResizeHandle::parse(handle)
            .ok_or_else(|| JsValue::from_str(&format!("unknown resize handle `{}`", handle)))?;
        let Some(event) = self.native_event(
            "pointerdown",
            Vec2::new(client_x, client_y),
            Vec2::new(screen_x, screen_y),
            buttons,
            pointer_type,
            None,
            timestamp,
        ) else {
            return Ok(UNHANDLED_JSON.to_string());
        };
        let result = self
            .desk
            .begin_resize(&PanelId::new(id), handle, &event)
            .map_err(js_error)?;
        Ok(Self::result_json(&result))
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Function called as `callback(token, timestamp)` on every animation
    /// frame; it should forward both to [`PanelDesk::on_frame`]
    #[wasm_bindgen]
    pub fn set_frame_callback(&mut self, callback: Function) {
        self.frames.set_callback(callback);
    }

    /// Attach a scroll animator to `element`; returns its handle
    #[wasm_bindgen]
    pub fn create_scroller(
        &mut self,
        element: HtmlElement,
        options_json: Option<String>,
    ) -> Result<u32, JsValue> {
        let options: ScrollOptions = decode(options_json)?;
        let el = self.desk.port_mut().register(element);
        let controller = ScrollController::new(el, options, self.desk.port()).map_err(js_error)?;
        let handle = self.next_scroller;
        self.next_scroller += 1;
        self.scrollers.insert(handle, controller);
        Ok(handle)
    }

    #[wasm_bindgen]
    pub fn destroy_scroller(&mut self, scroller: u32) {
        if let Some(mut controller) = self.scrollers.remove(&scroller) {
            controller.stop(&mut self.frames);
        }
    }

    /// Animate to an absolute scroll offset
    #[wasm_bindgen]
    pub fn scroll_to(&mut self, scroller: u32, x: f32, y: f32, now: f64) -> Result<(), JsValue> {
        let controller = find_scroller(&mut self.scrollers, scroller)?;
        controller.scroll_to(Vec2::new(x, y), now, self.desk.port(), &mut self.frames);
        Ok(())
    }

    /// Animate by an offset relative to the current position
    #[wasm_bindgen]
    pub fn scroll_by(&mut self, scroller: u32, dx: f32, dy: f32, now: f64) -> Result<(), JsValue> {
        let controller = find_scroller(&mut self.scrollers, scroller)?;
        controller.scroll_by(Vec2::new(dx, dy), now, self.desk.port(), &mut self.frames);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn stop_scroll(&mut self, scroller: u32) -> Result<(), JsValue> {
        let controller = find_scroller(&mut self.scrollers, scroller)?;
        controller.stop(&mut self.frames);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn is_scrolling(&self, scroller: u32) -> bool {
        self.scrollers
            .get(&scroller)
            .is_some_and(ScrollController::is_animating)
    }

    /// Advance the animation that owns `token`; false once nothing is pending
    #[wasm_bindgen]
    pub fn on_frame(&mut self, token: f64, now: f64) -> bool {
        let token = FrameToken(token as u64);
        self.frames.complete(token);
        let Some(controller) = self
            .scrollers
            .values_mut()
            .find(|c| c.pending_frame() == Some(token))
        else {
            return false;
        };
        controller.on_frame(token, now, self.desk.port_mut(), &mut self.frames)
    }
}

impl PanelDesk {
    #[allow(clippy::too_many_arguments)]
    fn native_event(
        &self,
        event_type: &str,
        client: Vec2,
        screen: Vec2,
        buttons: u16,
        pointer_type: &str,
        target: Option<Node>,
        timestamp: f64,
    ) -> Option<NativePointerEvent> {
        let Some(kind) = NativeKind::parse(event_type) else {
            log::debug!("ignoring event type {}", event_type);
            return None;
        };
        let pointer_type = (!pointer_type.is_empty()).then(|| PointerOrigin::from_pointer_type(pointer_type));
        Some(NativePointerEvent {
            kind,
            client,
            screen,
            buttons: PointerButtons(buttons),
            pointer_type,
            target: target.and_then(|node| self.desk.port().id_of(&node)),
            timestamp_ms: timestamp,
        })
    }

    fn result_json(result: &InputResult) -> String {
        serde_json::to_string(result).unwrap_or_else(|_| UNHANDLED_JSON.to_string())
    }
}
