//! Which item the modal shows and the playlist it navigates.
//!
//! Opening always replaces the playlist; closing clears both halves so the
//! modal is absent rather than merely hidden.

use crate::model::MediaItem;

/// Where an open request came from.  Decides which playlist the modal gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    /// The hero section: playlist is the full recent list, not just the cards shown.
    Recent,
    /// A category row: playlist is that category's items.
    Category(String),
    /// The search results grid: playlist is the filtered result set.
    SearchResults,
}

/// Direction of a playlist step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<MediaItem>,
    playlist: Vec<MediaItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `item` with `playlist` as the navigation context.
    pub fn open(&mut self, item: MediaItem, playlist: Vec<MediaItem>) {
        self.current = Some(item);
        self.playlist = playlist;
    }

    pub fn close(&mut self) {
        self.current = None;
        self.playlist.clear();
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.current.as_ref()
    }

    pub fn playlist(&self) -> &[MediaItem] {
        &self.playlist
    }

    /// Position of the current item in the playlist, matched by id.
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.playlist.iter().position(|i| i.id == current.id)
    }

    pub fn has_next(&self) -> bool {
        self.current_index()
            .is_some_and(|idx| idx + 1 < self.playlist.len())
    }

    pub fn has_previous(&self) -> bool {
        self.current_index().is_some_and(|idx| idx > 0)
    }

    /// Step within the playlist.  Returns the new current item, or `None`
    /// when the step is disabled (and nothing changes).
    pub fn advance(&mut self, nav: Navigation) -> Option<&MediaItem> {
        let idx = self.current_index()?;
        let target = match nav {
            Navigation::Next if idx + 1 < self.playlist.len() => idx + 1,
            Navigation::Previous if idx > 0 => idx - 1,
            _ => return None,
        };
        self.current = self.playlist.get(target).cloned();
        self.current.as_ref()
    }

    /// Jump to an entry picked from the playlist overlay.  The playlist is kept.
    pub fn jump_to(&mut self, item: MediaItem) {
        if self.current.is_some() {
            self.current = Some(item);
        }
    }

    /// `"idx / len"`, or `None` when the current item is not in the playlist.
    pub fn position_label(&self) -> Option<String> {
        self.current_index()
            .map(|idx| format!("{} / {}", idx + 1, self.playlist.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;

    fn item(id: &str) -> MediaItem {
        MediaItem {
            id: id.into(),
            name: format!("{id}.mp3"),
            title: id.into(),
            description: None,
            kind: MediaKind::Audio,
            path: format!("media/p/{id}.mp3"),
            thumbnail: None,
            category: "p".into(),
            duration: None,
            size: None,
            added_at: "2024-01-01".into(),
        }
    }

    fn playlist(ids: &[&str]) -> Vec<MediaItem> {
        ids.iter().map(|id| item(id)).collect()
    }

    #[test]
    fn test_next_prev_bounds() {
        let mut sel = Selection::new();
        let list = playlist(&["a", "b", "c"]);
        for (i, it) in list.iter().enumerate() {
            sel.open(it.clone(), list.clone());
            assert_eq!(sel.has_next(), i != 2, "next at {i}");
            assert_eq!(sel.has_previous(), i != 0, "prev at {i}");
        }
    }

    #[test]
    fn test_advance_walks_and_stops() {
        let mut sel = Selection::new();
        let list = playlist(&["a", "b"]);
        sel.open(item("a"), list);
        assert!(sel.advance(Navigation::Previous).is_none());
        assert_eq!(sel.advance(Navigation::Next).map(|i| i.id.clone()), Some("b".into()));
        assert!(sel.advance(Navigation::Next).is_none());
        assert_eq!(sel.current().map(|i| i.id.as_str()), Some("b"));
    }

    #[test]
    fn test_close_clears_and_reopen_replaces() {
        let mut sel = Selection::new();
        sel.open(item("a"), playlist(&["a", "b", "c"]));
        sel.close();
        assert!(!sel.is_open());
        assert!(sel.playlist().is_empty());

        sel.open(item("z"), playlist(&["z"]));
        assert_eq!(sel.playlist().len(), 1);
        assert_eq!(sel.position_label().as_deref(), Some("1 / 1"));
    }

    #[test]
    fn test_missing_from_playlist_hides_indicator() {
        let mut sel = Selection::new();
        sel.open(item("x"), playlist(&["a", "b"]));
        assert_eq!(sel.current_index(), None);
        assert_eq!(sel.position_label(), None);
        assert!(!sel.has_next());
        assert!(!sel.has_previous());
    }

    #[test]
    fn test_jump_keeps_playlist() {
        let mut sel = Selection::new();
        sel.open(item("a"), playlist(&["a", "b", "c"]));
        sel.jump_to(item("c"));
        assert_eq!(sel.position_label().as_deref(), Some("3 / 3"));
        assert_eq!(sel.playlist().len(), 3);
    }
}
