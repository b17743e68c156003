//! Transient search text + type filter.  Never persisted.

use crate::model::{KindFilter, MediaItem};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    search: String,
    filter: KindFilter,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(search: impl Into<String>, filter: KindFilter) -> Self {
        Self {
            search: search.into(),
            filter,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> KindFilter {
        self.filter
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_filter(&mut self, filter: KindFilter) {
        self.filter = filter;
    }

    /// No search text and no type filter: the page shows hero + category rows.
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.filter == KindFilter::All
    }

    /// Search results replace the browse layout whenever any predicate is active.
    pub fn is_searching(&self) -> bool {
        !self.is_unfiltered()
    }

    /// Both predicates, ANDed.
    pub fn matches(&self, item: &MediaItem) -> bool {
        self.filter.accepts(item.kind) && self.matches_text(item)
    }

    fn matches_text(&self, item: &MediaItem) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = normalize_search_text(&self.search);
        search_matches(&needle, &item.title)
            || search_matches(&needle, &item.name)
            || item
                .description
                .as_deref()
                .is_some_and(|d| search_matches(&needle, d))
    }
}

pub fn normalize_search_text(input: &str) -> String {
    input.to_lowercase()
}

/// Case-insensitive substring test.  `needle` must already be normalized.
pub fn search_matches(needle: &str, text: &str) -> bool {
    needle.is_empty() || normalize_search_text(text).contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;

    fn item(title: &str, name: &str, description: Option<&str>, kind: MediaKind) -> MediaItem {
        MediaItem {
            id: "1".into(),
            name: name.into(),
            title: title.into(),
            description: description.map(str::to_string),
            kind,
            path: format!("media/{name}"),
            thumbnail: None,
            category: "c".into(),
            duration: None,
            size: None,
            added_at: "2024-01-01".into(),
        }
    }

    #[test]
    fn test_searching_mode() {
        let mut q = QueryState::new();
        assert!(!q.is_searching());
        q.set_filter(KindFilter::Only(MediaKind::Pdf));
        assert!(q.is_searching());
        q.set_filter(KindFilter::All);
        q.set_search("x");
        assert!(q.is_searching());
    }

    #[test]
    fn test_case_insensitive_title() {
        let q = QueryState::with("REACT", KindFilter::All);
        assert!(q.matches(&item("מבוא ל-React", "intro.mp4", None, MediaKind::Video)));
    }

    #[test]
    fn test_matches_file_name_and_description() {
        let by_name = QueryState::with("securit", KindFilter::All);
        assert!(by_name.matches(&item("אבטחה", "web-security.mp4", None, MediaKind::Video)));

        let by_desc = QueryState::with("בסיס", KindFilter::All);
        assert!(by_desc.matches(&item("t", "t.mp4", Some("למד את הבסיס"), MediaKind::Video)));
        assert!(!by_desc.matches(&item("t", "t.mp4", None, MediaKind::Video)));
    }

    #[test]
    fn test_predicates_are_anded() {
        let q = QueryState::with("episode", KindFilter::Only(MediaKind::Video));
        assert!(!q.matches(&item("x", "episode-01.mp3", None, MediaKind::Audio)));
        let q = QueryState::with("episode", KindFilter::Only(MediaKind::Audio));
        assert!(q.matches(&item("x", "episode-01.mp3", None, MediaKind::Audio)));
    }
}
