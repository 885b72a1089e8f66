//! In-memory geometry port for headless use and testing.
//!
//! Provides a HashMap-based element tree with no rendering behind it.

use std::collections::{BTreeMap, HashMap};

use crate::math::{Rect, Size, Vec2};
use crate::resize::ResizeHandle;

use super::{ElementId, GeometryPort};

#[derive(Clone, Debug, Default)]
struct MemoryElement {
    rect: Rect,
    parent: Option<ElementId>,
    z_index: Option<u32>,
    scroll: Vec2,
    handle: Option<ResizeHandle>,
    /// Number of `set_rect` calls that hit this element
    writes: usize,
}

/// In-memory geometry port.
#[derive(Clone, Debug)]
pub struct MemoryGeometry {
    viewport: Size,
    elements: HashMap<ElementId, MemoryElement>,
    styles: BTreeMap<String, String>,
    preview: Option<Rect>,
    next_id: u64,
}

impl Default for MemoryGeometry {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl MemoryGeometry {
    /// Create an empty surface with the given viewport size.
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport: Size::new(viewport_width, viewport_height),
            elements: HashMap::new(),
            styles: BTreeMap::new(),
            preview: None,
            next_id: 1,
        }
    }

    /// Add a top-level element.
    pub fn insert(&mut self, rect: Rect) -> ElementId {
        self.insert_element(rect, None, None)
    }

    /// Add an element positioned inside `parent`.
    pub fn insert_child(&mut self, parent: ElementId, rect: Rect) -> ElementId {
        self.insert_element(rect, Some(parent), None)
    }

    fn insert_element(
        &mut self,
        rect: Rect,
        parent: Option<ElementId>,
        handle: Option<ResizeHandle>,
    ) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            MemoryElement {
                rect,
                parent,
                handle,
                ..Default::default()
            },
        );
        id
    }

    /// Change the viewport size (e.g. a window resize).
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
    }

    /// Whether the element still exists.
    pub fn exists(&self, el: ElementId) -> bool {
        self.elements.contains_key(&el)
    }

    /// Number of live elements, handles included.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Direct children of an element, sorted by id.
    pub fn children_of(&self, parent: ElementId) -> Vec<ElementId> {
        let mut children: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, e)| e.parent == Some(parent))
            .map(|(&id, _)| id)
            .collect();
        children.sort();
        children
    }

    /// Which resize grip an element is, if it is one.
    pub fn handle_kind(&self, el: ElementId) -> Option<ResizeHandle> {
        self.elements.get(&el).and_then(|e| e.handle)
    }

    /// Number of rect writes an element has received.
    pub fn write_count(&self, el: ElementId) -> usize {
        self.elements.get(&el).map_or(0, |e| e.writes)
    }

    /// Stacking order last written to an element.
    pub fn z_index(&self, el: ElementId) -> Option<u32> {
        self.elements.get(&el).and_then(|e| e.z_index)
    }

    /// Contents of an injected style sheet.
    pub fn style(&self, id: &str) -> Option<&str> {
        self.styles.get(id).map(String::as_str)
    }

    /// Number of injected style sheets.
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// The snap preview overlay currently shown.
    pub fn preview(&self) -> Option<Rect> {
        self.preview
    }
}

impl GeometryPort for MemoryGeometry {
    fn rect(&self, el: ElementId) -> Option<Rect> {
        self.elements.get(&el).map(|e| e.rect)
    }

    fn set_rect(&mut self, el: ElementId, rect: Rect) {
        if let Some(element) = self.elements.get_mut(&el) {
            element.rect = rect;
            element.writes += 1;
        }
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn parent_bounds(&self, el: ElementId) -> Option<Rect> {
        // Child rects are parent-relative, so the parent box starts at the origin
        let parent = self.elements.get(&el)?.parent?;
        self.rect(parent).map(|r| Rect::from_size(r.size()))
    }

    fn contains(&self, ancestor: ElementId, target: ElementId) -> bool {
        let mut current = Some(target);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.elements.get(&id).and_then(|e| e.parent);
        }
        false
    }

    fn create_handle(&mut self, el: ElementId, handle: ResizeHandle) -> Option<ElementId> {
        if !self.exists(el) {
            return None;
        }
        Some(self.insert_element(Rect::ZERO, Some(el), Some(handle)))
    }

    fn remove_element(&mut self, el: ElementId) {
        let mut doomed = vec![el];
        while let Some(id) = doomed.pop() {
            if self.elements.remove(&id).is_some() {
                doomed.extend(self.children_of(id));
            }
        }
    }

    fn inject_style(&mut self, id: &str, css: &str) {
        self.styles
            .entry(id.to_string())
            .or_insert_with(|| css.to_string());
    }

    fn show_preview(&mut self, rect: Rect) {
        self.preview = Some(rect);
    }

    fn hide_preview(&mut self) {
        self.preview = None;
    }

    fn set_z_index(&mut self, el: ElementId, z: u32) {
        if let Some(element) = self.elements.get_mut(&el) {
            element.z_index = Some(z);
        }
    }

    fn scroll_offset(&self, el: ElementId) -> Vec2 {
        self.elements.get(&el).map_or(Vec2::ZERO, |e| e.scroll)
    }

    fn set_scroll_offset(&mut self, el: ElementId, offset: Vec2) {
        if let Some(element) = self.elements.get_mut(&el) {
            element.scroll = offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_write() {
        let mut port = MemoryGeometry::new(800.0, 600.0);
        let el = port.insert(Rect::new(10.0, 10.0, 100.0, 100.0));

        assert_eq!(port.rect(el), Some(Rect::new(10.0, 10.0, 100.0, 100.0)));
        assert_eq!(port.write_count(el), 0);

        port.set_rect(el, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(port.rect(el), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(port.write_count(el), 1);
    }

    #[test]
    fn test_parent_bounds_and_contains() {
        let mut port = MemoryGeometry::default();
        let parent = port.insert(Rect::new(30.0, 20.0, 500.0, 400.0));
        let child = port.insert_child(parent, Rect::new(10.0, 10.0, 50.0, 50.0));
        let grandchild = port.insert_child(child, Rect::new(0.0, 0.0, 5.0, 5.0));

        assert_eq!(port.parent_bounds(child), Some(Rect::new(0.0, 0.0, 500.0, 400.0)));
        assert!(port.parent_bounds(parent).is_none());
        assert!(port.contains(parent, grandchild));
        assert!(!port.contains(grandchild, parent));
    }

    #[test]
    fn test_remove_element_removes_subtree() {
        let mut port = MemoryGeometry::default();
        let parent = port.insert(Rect::new(0.0, 0.0, 500.0, 400.0));
        let handle = port.create_handle(parent, ResizeHandle::SE).unwrap();
        assert_eq!(port.handle_kind(handle), Some(ResizeHandle::SE));
        assert_eq!(port.element_count(), 2);

        port.remove_element(parent);
        assert_eq!(port.element_count(), 0);
    }

    #[test]
    fn test_inject_style_is_keyed_by_id() {
        let mut port = MemoryGeometry::default();
        port.inject_style("a", "first");
        port.inject_style("a", "second");
        assert_eq!(port.style("a"), Some("first"));
        assert_eq!(port.style_count(), 1);
    }

    #[test]
    fn test_single_preview_slot() {
        let mut port = MemoryGeometry::default();
        port.show_preview(Rect::new(0.0, 0.0, 10.0, 10.0));
        port.show_preview(Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(port.preview(), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
        port.hide_preview();
        assert!(port.preview().is_none());
    }
}
