//! Catalog store: categories plus the derived views the page renders.
//!
//! The catalog is read-only once built.  Every derivation borrows from it,
//! so the front end recomputes views on query changes without copying items.

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::CatalogError;
use crate::model::{Category, MediaItem};
use crate::query::QueryState;
use crate::selection::PlaylistSource;

/// Maximum length of the recently-added list (and of the playlist opened from it).
pub const RECENT_LIMIT: usize = 10;
/// How many recent items the hero section shows.
pub const HERO_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    title: Option<String>,
    description: Option<String>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Validate and wrap a category list.
    ///
    /// Rejects duplicate item ids, duplicate category ids and items whose
    /// `category` field disagrees with the category holding them.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for category in &categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
            for item in &category.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(CatalogError::DuplicateId(item.id.clone()));
                }
                if item.category != category.id {
                    return Err(CatalogError::CategoryMismatch {
                        item: item.id.clone(),
                        category: item.category.clone(),
                        container: category.id.clone(),
                    });
                }
            }
        }
        Ok(Self {
            title: None,
            description: None,
            categories,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_heading(mut self, title: Option<String>, description: Option<String>) -> Self {
        self.title = title;
        self.description = description;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn categories_mut(&mut self) -> &mut [Category] {
        &mut self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Every item, concatenated in category order.
    pub fn all_items(&self) -> Vec<&MediaItem> {
        self.categories.iter().flat_map(|c| c.items.iter()).collect()
    }

    /// Items passing the query's text and kind predicates, in catalog order.
    pub fn filtered_items(&self, query: &QueryState) -> Vec<&MediaItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|item| query.matches(item))
            .collect()
    }

    /// Categories trimmed to the filtered items, empty ones dropped.
    ///
    /// An unfiltered query hands back the catalog's own slice untouched, so
    /// callers comparing by pointer see the same collection.
    pub fn filtered_categories(&self, query: &QueryState) -> Cow<'_, [Category]> {
        if query.is_unfiltered() {
            return Cow::Borrowed(&self.categories);
        }
        let keep: HashSet<&str> = self
            .filtered_items(query)
            .into_iter()
            .map(|item| item.id.as_str())
            .collect();
        let trimmed = self
            .categories
            .iter()
            .filter_map(|category| {
                let items: Vec<MediaItem> = category
                    .items
                    .iter()
                    .filter(|item| keep.contains(item.id.as_str()))
                    .cloned()
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some(Category {
                        id: category.id.clone(),
                        name: category.name.clone(),
                        path: category.path.clone(),
                        description: category.description.clone(),
                        items,
                    })
                }
            })
            .collect();
        Cow::Owned(trimmed)
    }

    /// Newest first by `added_at`, capped at [`RECENT_LIMIT`].
    ///
    /// Unparseable dates count as oldest; the sort is stable so ties keep
    /// their flattened catalog order.
    pub fn recent_items(&self) -> Vec<&MediaItem> {
        let mut keyed: Vec<(Option<NaiveDateTime>, &MediaItem)> = self
            .all_items()
            .into_iter()
            .map(|item| (parse_added_at(&item.added_at), item))
            .collect();
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
        keyed
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|(_, item)| item)
            .collect()
    }

    pub fn hero_items(&self) -> Vec<&MediaItem> {
        let mut recent = self.recent_items();
        recent.truncate(HERO_LIMIT);
        recent
    }

    /// The playlist an item opened from `source` navigates.
    ///
    /// `None` means the opener gave no context; the current filtered result
    /// set is used.  An unknown category id yields an empty playlist.
    pub fn playlist_for(
        &self,
        source: Option<&PlaylistSource>,
        query: &QueryState,
    ) -> Vec<MediaItem> {
        match source {
            Some(PlaylistSource::Recent) => self.recent_items().into_iter().cloned().collect(),
            Some(PlaylistSource::Category(id)) => self
                .filtered_categories(query)
                .iter()
                .find(|c| &c.id == id)
                .map(|c| c.items.clone())
                .unwrap_or_default(),
            Some(PlaylistSource::SearchResults) | None => {
                self.filtered_items(query).into_iter().cloned().collect()
            }
        }
    }
}

/// Parse an `addedAt` string.  Accepts RFC 3339, a naive ISO timestamp, or
/// a bare `YYYY-MM-DD` date (midnight).
pub fn parse_added_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;

    fn item(id: &str, category: &str, added_at: &str) -> MediaItem {
        MediaItem {
            id: id.into(),
            name: format!("{id}.mp4"),
            title: format!("title {id}"),
            description: None,
            kind: MediaKind::Video,
            path: format!("media/{category}/{id}.mp4"),
            thumbnail: None,
            category: category.into(),
            duration: None,
            size: None,
            added_at: added_at.into(),
        }
    }

    fn category(id: &str, items: Vec<MediaItem>) -> Category {
        Category {
            id: id.into(),
            name: id.to_uppercase(),
            path: format!("media/{id}"),
            description: None,
            items,
        }
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Catalog::new(vec![
            category("a", vec![item("1", "a", "2024-01-01")]),
            category("b", vec![item("1", "b", "2024-01-02")]),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("1".into()));
    }

    #[test]
    fn test_rejects_category_mismatch() {
        let err = Catalog::new(vec![category("a", vec![item("1", "b", "2024-01-01")])]).unwrap_err();
        assert!(matches!(err, CatalogError::CategoryMismatch { .. }));
    }

    #[test]
    fn test_parse_added_at_formats() {
        assert!(parse_added_at("2024-01-15").is_some());
        assert!(parse_added_at("2024-01-15T10:30:00").is_some());
        assert!(parse_added_at("2024-01-15T10:30:00Z").is_some());
        assert!(parse_added_at("yesterday").is_none());
        assert!(parse_added_at("").is_none());
    }

    #[test]
    fn test_unparseable_dates_sort_oldest_and_stable() {
        let catalog = Catalog::new(vec![category(
            "a",
            vec![
                item("bad1", "a", "not a date"),
                item("old", "a", "2023-05-01"),
                item("bad2", "a", ""),
                item("new", "a", "2024-02-01"),
            ],
        )])
        .unwrap();
        let ids: Vec<&str> = catalog.recent_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["new", "old", "bad1", "bad2"]);
    }

    #[test]
    fn test_equal_dates_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            category("a", vec![item("1", "a", "2024-01-01"), item("2", "a", "2024-01-01")]),
            category("b", vec![item("3", "b", "2024-01-01")]),
        ])
        .unwrap();
        let ids: Vec<&str> = catalog.recent_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_empty_catalog_views() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.all_items().is_empty());
        assert!(catalog.recent_items().is_empty());
        assert!(catalog.filtered_categories(&QueryState::new()).is_empty());
    }
}
