use gallery_core::catalog::Catalog;
use gallery_core::demo::demo_catalog;
use gallery_core::model::{Category, MediaItem, MediaKind};

pub fn demo() -> Catalog {
    demo_catalog().expect("embedded catalog is valid")
}

pub fn item(id: &str, category: &str, kind: MediaKind, added_at: &str) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        name: format!("{id}.bin"),
        title: format!("Item {id}"),
        description: None,
        kind,
        path: format!("media/{category}/{id}.bin"),
        thumbnail: None,
        category: category.to_string(),
        duration: None,
        size: None,
        added_at: added_at.to_string(),
    }
}

/// `n` video items spread round-robin over `cats` categories, one day apart.
pub fn large_catalog(n: usize, cats: usize) -> Catalog {
    let mut categories: Vec<Category> = (0..cats)
        .map(|c| Category {
            id: format!("cat{c}"),
            name: format!("Category {c}"),
            path: format!("media/cat{c}"),
            description: None,
            items: Vec::new(),
        })
        .collect();
    for i in 0..n {
        let c = i % cats;
        let day = 1 + (i * 7) % 28;
        let kind = [MediaKind::Video, MediaKind::Audio, MediaKind::Pdf][i % 3];
        categories[c]
            .items
            .push(item(&i.to_string(), &format!("cat{c}"), kind, &format!("2024-02-{day:02}")));
    }
    Catalog::new(categories).expect("fixture catalog is valid")
}

pub fn ids(items: &[&MediaItem]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}
