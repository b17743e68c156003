//! FocusRing: keyboard focus cycling between browse panes.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    /// Replace the ring contents, keeping the focused id when it survives.
    pub fn set_items(&mut self, items: Vec<ComponentId>) {
        let old = self.current();
        self.items = items;
        if let Some(id) = old {
            if let Some(pos) = self.items.iter().position(|&x| x == id) {
                self.current = pos;
                return;
            }
        }
        self.current = 0;
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_both_ways() {
        let mut ring = FocusRing::new(vec![ComponentId::Hero, ComponentId::CategoryRows]);
        assert_eq!(ring.current(), Some(ComponentId::Hero));
        assert_eq!(ring.next(), Some(ComponentId::CategoryRows));
        assert_eq!(ring.next(), Some(ComponentId::Hero));
        assert_eq!(ring.prev(), Some(ComponentId::CategoryRows));
    }

    #[test]
    fn test_set_items_keeps_surviving_focus() {
        let mut ring = FocusRing::new(vec![ComponentId::Hero, ComponentId::CategoryRows]);
        ring.set(ComponentId::CategoryRows);
        ring.set_items(vec![ComponentId::CategoryRows]);
        assert_eq!(ring.current(), Some(ComponentId::CategoryRows));
        ring.set_items(vec![ComponentId::SearchResults]);
        assert_eq!(ring.current(), Some(ComponentId::SearchResults));
    }

    #[test]
    fn test_empty_ring() {
        let mut ring = FocusRing::default();
        assert_eq!(ring.next(), None);
        assert_eq!(ring.current(), None);
    }
}
