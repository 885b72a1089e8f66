//! Focus stack and z-order

use std::collections::HashMap;

use crate::window::PanelId;

/// Default z-index of the first raised panel
pub const DEFAULT_Z_BASE: u32 = 100;

/// Focus stack with a monotonically increasing z counter
#[derive(Clone, Debug)]
pub struct ZOrder {
    /// Focus stack (most recently raised at end)
    stack: Vec<PanelId>,
    /// Assigned z values
    z: HashMap<PanelId, u32>,
    /// Next z value to hand out
    next_z: u32,
}

impl Default for ZOrder {
    fn default() -> Self {
        Self::new(DEFAULT_Z_BASE)
    }
}

impl ZOrder {
    /// Create a z-order whose first raise yields `base`
    pub fn new(base: u32) -> Self {
        Self {
            stack: Vec::new(),
            z: HashMap::new(),
            next_z: base,
        }
    }

    /// Bring a panel to the top; returns its new z value
    ///
    /// Raising the panel that is already on top keeps its z.
    pub fn raise(&mut self, id: &PanelId) -> u32 {
        if self.stack.last() == Some(id) {
            if let Some(&z) = self.z.get(id) {
                return z;
            }
        }

        self.stack.retain(|p| p != id);
        self.stack.push(id.clone());

        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        self.z.insert(id.clone(), z);
        z
    }

    /// Drop a panel from the stack
    pub fn remove(&mut self, id: &PanelId) -> bool {
        self.stack.retain(|p| p != id);
        self.z.remove(id).is_some()
    }

    /// Topmost panel
    pub fn top(&self) -> Option<&PanelId> {
        self.stack.last()
    }

    pub fn z_of(&self, id: &PanelId) -> Option<u32> {
        self.z.get(id).copied()
    }

    /// Panels back to front
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PanelId> {
        self.stack.iter()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise() {
        let mut order = ZOrder::new(10);
        let a = PanelId::new("a");
        let b = PanelId::new("b");

        assert_eq!(order.raise(&a), 10);
        assert_eq!(order.raise(&b), 11);
        assert_eq!(order.top(), Some(&b));

        assert_eq!(order.raise(&a), 12);
        assert_eq!(order.top(), Some(&a));
        assert!(order.z_of(&a) > order.z_of(&b));

        // Already on top: z unchanged
        assert_eq!(order.raise(&a), 12);
        assert_eq!(order.iter().cloned().collect::<Vec<_>>(), vec![b.clone(), a.clone()]);
    }

    #[test]
    fn test_remove() {
        let mut order = ZOrder::default();
        let a = PanelId::new("a");
        let b = PanelId::new("b");
        order.raise(&a);
        order.raise(&b);

        assert!(order.remove(&b));
        assert!(!order.remove(&b));
        assert_eq!(order.top(), Some(&a));
        assert_eq!(order.len(), 1);
        assert!(order.z_of(&b).is_none());
    }
}
