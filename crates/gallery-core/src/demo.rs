//! The embedded catalog shipped with the gallery: four categories, nine items.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{Category, MediaItem, MediaKind};

struct Entry {
    id: &'static str,
    file: &'static str,
    title: &'static str,
    description: &'static str,
    kind: MediaKind,
    duration: Option<&'static str>,
    added_at: &'static str,
}

const TUTORIALS: &[Entry] = &[
    Entry {
        id: "1",
        file: "intro-to-react.mp4",
        title: "מבוא ל-React",
        description: "למד את הבסיס של React",
        kind: MediaKind::Video,
        duration: Some("15:30"),
        added_at: "2024-01-15",
    },
    Entry {
        id: "2",
        file: "typescript-basics.mp4",
        title: "יסודות TypeScript",
        description: "הכר את TypeScript",
        kind: MediaKind::Video,
        duration: Some("22:45"),
        added_at: "2024-01-10",
    },
    Entry {
        id: "3",
        file: "css-animations.mp4",
        title: "אנימציות CSS",
        description: "צור אנימציות מדהימות",
        kind: MediaKind::Video,
        duration: Some("18:20"),
        added_at: "2024-01-08",
    },
];

const PRESENTATIONS: &[Entry] = &[
    Entry {
        id: "4",
        file: "project-overview.pdf",
        title: "סקירת הפרויקט",
        description: "סקירה כללית של הפרויקט",
        kind: MediaKind::Pdf,
        duration: None,
        added_at: "2024-01-12",
    },
    Entry {
        id: "5",
        file: "architecture.pdf",
        title: "ארכיטקטורת המערכת",
        description: "תיאור מבנה המערכת",
        kind: MediaKind::Pdf,
        duration: None,
        added_at: "2024-01-05",
    },
];

const PODCASTS: &[Entry] = &[
    Entry {
        id: "6",
        file: "episode-01.mp3",
        title: "פרק 1 - התחלה",
        description: "הפרק הראשון בסדרה",
        kind: MediaKind::Audio,
        duration: Some("45:00"),
        added_at: "2024-01-14",
    },
    Entry {
        id: "7",
        file: "episode-02.mp3",
        title: "פרק 2 - המשך",
        description: "הפרק השני בסדרה",
        kind: MediaKind::Audio,
        duration: Some("38:15"),
        added_at: "2024-01-07",
    },
];

const LECTURES: &[Entry] = &[
    Entry {
        id: "8",
        file: "web-security.mp4",
        title: "אבטחת אתרים",
        description: "הרצאה על אבטחת מידע",
        kind: MediaKind::Video,
        duration: Some("55:00"),
        added_at: "2024-01-13",
    },
    Entry {
        id: "9",
        file: "performance.mp4",
        title: "ביצועים ואופטימיזציה",
        description: "שיפור ביצועי אתרים",
        kind: MediaKind::Video,
        duration: Some("42:30"),
        added_at: "2024-01-06",
    },
];

fn category(id: &str, name: &str, entries: &[Entry]) -> Category {
    let path = format!("media/{id}");
    let items = entries
        .iter()
        .map(|e| MediaItem {
            id: e.id.to_string(),
            name: e.file.to_string(),
            title: e.title.to_string(),
            description: Some(e.description.to_string()),
            kind: e.kind,
            path: format!("{path}/{}", e.file),
            thumbnail: None,
            category: id.to_string(),
            duration: e.duration.map(str::to_string),
            size: None,
            added_at: e.added_at.to_string(),
        })
        .collect();
    Category {
        id: id.to_string(),
        name: name.to_string(),
        path,
        description: None,
        items,
    }
}

pub fn demo_categories() -> Vec<Category> {
    vec![
        category("tutorials", "הדרכות", TUTORIALS),
        category("presentations", "מצגות", PRESENTATIONS),
        category("podcasts", "פודקאסטים", PODCASTS),
        category("lectures", "הרצאות", LECTURES),
    ]
}

pub fn demo_catalog() -> Result<Catalog, CatalogError> {
    Catalog::new(demo_categories())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_shape() {
        let catalog = demo_catalog().unwrap();
        assert_eq!(catalog.categories().len(), 4);
        assert_eq!(catalog.item_count(), 9);
        let kinds = |k| catalog.all_items().iter().filter(|i| i.kind == k).count();
        assert_eq!(kinds(MediaKind::Video), 5);
        assert_eq!(kinds(MediaKind::Audio), 2);
        assert_eq!(kinds(MediaKind::Pdf), 2);
    }

    #[test]
    fn test_demo_paths_follow_category() {
        for category in demo_categories() {
            for item in &category.items {
                assert_eq!(item.path, format!("{}/{}", category.path, item.name));
            }
        }
    }
}
