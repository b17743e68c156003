//! WorkspaceManager: which browse panes exist and which one has focus.
//!
//! Tracks:
//! - Browse mode (hero + category rows) versus search mode (flat results)
//! - Whether help and the keys bar are visible
//! - The FocusRing for the current mode

use crate::action::ComponentId;
use crate::focus::FocusRing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    Home,
    Search,
}

pub struct WorkspaceManager {
    pub mode: BrowseMode,
    pub show_help: bool,
    pub show_keys_bar: bool,
    pub focus: FocusRing,
    has_hero: bool,
}

impl WorkspaceManager {
    pub fn new(show_keys_bar: bool) -> Self {
        let mut wm = Self {
            mode: BrowseMode::Home,
            show_help: false,
            show_keys_bar,
            focus: FocusRing::default(),
            has_hero: true,
        };
        wm.rebuild_focus_ring();
        wm
    }

    /// Rebuild the ring for the current mode. The hero strip only joins it
    /// when it has something to show.
    pub fn rebuild_focus_ring(&mut self) {
        let items = match self.mode {
            BrowseMode::Home if self.has_hero => {
                vec![ComponentId::Hero, ComponentId::CategoryRows]
            }
            BrowseMode::Home => vec![ComponentId::CategoryRows],
            BrowseMode::Search => vec![ComponentId::SearchResults],
        };
        self.focus.set_items(items);
    }

    /// Follow the query: any search text or kind filter switches to results.
    pub fn sync(&mut self, searching: bool, has_hero: bool) {
        let mode = if searching {
            BrowseMode::Search
        } else {
            BrowseMode::Home
        };
        if mode != self.mode || has_hero != self.has_hero {
            self.mode = mode;
            self.has_hero = has_hero;
            self.rebuild_focus_ring();
        }
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.focus.current()
    }

    pub fn focus_next(&mut self) -> Option<ComponentId> {
        self.focus.next()
    }

    pub fn focus_prev(&mut self) -> Option<ComponentId> {
        self.focus.prev()
    }

    pub fn focus_set(&mut self, id: ComponentId) {
        self.focus.set(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_swaps_ring() {
        let mut wm = WorkspaceManager::new(true);
        assert_eq!(wm.focused(), Some(ComponentId::Hero));
        wm.sync(true, true);
        assert_eq!(wm.mode, BrowseMode::Search);
        assert_eq!(wm.focused(), Some(ComponentId::SearchResults));
        wm.sync(false, true);
        assert_eq!(wm.focused(), Some(ComponentId::Hero));
    }

    #[test]
    fn test_empty_hero_leaves_ring() {
        let mut wm = WorkspaceManager::new(true);
        wm.sync(false, false);
        assert_eq!(wm.focused(), Some(ComponentId::CategoryRows));
        assert_eq!(wm.focus_next(), Some(ComponentId::CategoryRows));
    }
}
