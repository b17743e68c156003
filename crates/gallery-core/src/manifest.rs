//! Optional manifest overlay: retitles and describes categories, annotates
//! items by path.
//!
//! ```json
//! {
//!   "title": "...", "description": "...",
//!   "categories": { "<category id>": { "title": "...", "description": "..." } },
//!   "items": { "<item path>": { "title": "...", "description": "...", "thumbnail": "..." } }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ManifestError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: HashMap<String, CategoryOverride>,
    #[serde(default)]
    pub items: HashMap<String, ItemOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryOverride {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemOverride {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Overlay onto `catalog`.  Ids and paths the catalog does not know are
    /// skipped.  Item ids, kinds and order never change.
    pub fn apply(&self, mut catalog: Catalog) -> Catalog {
        for id in self.categories.keys() {
            if catalog.category(id).is_none() {
                debug!("manifest: no category '{}' in catalog, skipping", id);
            }
        }

        let mut matched_paths = 0usize;
        for category in catalog.categories_mut() {
            if let Some(o) = self.categories.get(&category.id) {
                if let Some(title) = &o.title {
                    category.name = title.clone();
                }
                if let Some(description) = &o.description {
                    category.description = Some(description.clone());
                }
            }
            for item in &mut category.items {
                let Some(o) = self.items.get(&item.path) else {
                    continue;
                };
                matched_paths += 1;
                if let Some(title) = &o.title {
                    item.title = title.clone();
                }
                if let Some(description) = &o.description {
                    item.description = Some(description.clone());
                }
                if let Some(thumbnail) = &o.thumbnail {
                    item.thumbnail = Some(thumbnail.clone());
                }
            }
        }
        if matched_paths < self.items.len() {
            debug!(
                "manifest: {} of {} item paths matched the catalog",
                matched_paths,
                self.items.len()
            );
        }

        let title = self.title.clone().or_else(|| catalog.title().map(str::to_string));
        let description = self
            .description
            .clone()
            .or_else(|| catalog.description().map(str::to_string));
        catalog.with_heading(title, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_catalog;
    use std::io::Write;

    const MANIFEST: &str = r#"{
        "title": "ספריית הצוות",
        "categories": {
            "podcasts": { "title": "האזנה", "description": "פרקים שבועיים" },
            "missing": { "title": "x" }
        },
        "items": {
            "media/podcasts/episode-01.mp3": { "title": "פרק פתיחה", "thumbnail": "thumbs/ep1.png" },
            "media/nowhere.mp4": { "title": "ghost" }
        }
    }"#;

    #[test]
    fn test_overlay_by_id_and_path() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        let catalog = manifest.apply(demo_catalog().unwrap());

        assert_eq!(catalog.title(), Some("ספריית הצוות"));
        let podcasts = catalog.category("podcasts").unwrap();
        assert_eq!(podcasts.name, "האזנה");
        assert_eq!(podcasts.description.as_deref(), Some("פרקים שבועיים"));
        assert_eq!(catalog.category("tutorials").unwrap().description, None);
        let ep = &catalog.category("podcasts").unwrap().items[0];
        assert_eq!(ep.title, "פרק פתיחה");
        assert_eq!(ep.thumbnail.as_deref(), Some("thumbs/ep1.png"));
        // Untouched fields survive.
        assert_eq!(ep.description.as_deref(), Some("הפרק הראשון בסדרה"));
        assert_eq!(catalog.item_count(), 9);
    }

    #[test]
    fn test_empty_manifest_is_noop() {
        let before = demo_catalog().unwrap();
        let after = Manifest::from_json("{}").unwrap().apply(before.clone());
        assert_eq!(before.categories(), after.categories());
    }

    #[test]
    fn test_load_errors() {
        let missing = Manifest::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(ManifestError::Read { .. })));

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{ not json").unwrap();
        assert!(matches!(Manifest::load(f.path()), Err(ManifestError::Parse(_))));
    }
}
