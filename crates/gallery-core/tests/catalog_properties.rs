mod common;

use std::borrow::Cow;

use common::fixtures::{demo, ids, large_catalog};
use gallery_core::catalog::{parse_added_at, RECENT_LIMIT};
use gallery_core::model::{KindFilter, MediaKind};
use gallery_core::query::QueryState;

fn queries() -> Vec<QueryState> {
    let mut out = Vec::new();
    for text in ["", "a", "REACT", "פרק", "securit", "mp4", "zzz"] {
        for filter in KindFilter::CHOICES {
            out.push(QueryState::with(text, filter));
        }
    }
    out
}

fn is_subsequence(sub: &[String], full: &[String]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| f == s))
}

#[test]
fn filtered_items_is_ordered_subsequence_of_all_items() {
    for catalog in [demo(), large_catalog(40, 3)] {
        let all = ids(&catalog.all_items());
        for q in queries() {
            let filtered = ids(&catalog.filtered_items(&q));
            assert!(is_subsequence(&filtered, &all), "query {:?}", q);
        }
    }
}

#[test]
fn filtered_categories_never_empty() {
    let catalog = demo();
    for q in queries() {
        if q.is_unfiltered() {
            continue;
        }
        for category in catalog.filtered_categories(&q).iter() {
            assert!(!category.items.is_empty(), "query {:?}", q);
        }
    }
}

#[test]
fn unfiltered_categories_are_identical() {
    let catalog = demo();
    let cats = catalog.filtered_categories(&QueryState::new());
    assert!(matches!(cats, Cow::Borrowed(_)));
    assert!(std::ptr::eq(cats.as_ptr(), catalog.categories().as_ptr()));
    assert_eq!(cats.len(), catalog.categories().len());
}

#[test]
fn recent_items_length_and_order() {
    for catalog in [demo(), large_catalog(3, 2), large_catalog(25, 4)] {
        let recent = catalog.recent_items();
        assert_eq!(recent.len(), RECENT_LIMIT.min(catalog.item_count()));
        let dates: Vec<_> = recent.iter().map(|i| parse_added_at(&i.added_at)).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn demo_recent_order() {
    let catalog = demo();
    assert_eq!(
        ids(&catalog.recent_items()),
        ["1", "6", "8", "4", "2", "3", "7", "9", "5"]
    );
    assert_eq!(ids(&catalog.hero_items()), ["1", "6", "8", "4", "2"]);
}

#[test]
fn search_is_case_insensitive() {
    let catalog = demo();
    let hits = catalog.filtered_items(&QueryState::with("REACT", KindFilter::All));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "מבוא ל-React");
}

#[test]
fn audio_filter_spans_categories() {
    let catalog = large_catalog(30, 5);
    let q = QueryState::with("", KindFilter::Only(MediaKind::Audio));
    let hits = catalog.filtered_items(&q);
    assert_eq!(hits.len(), 10);
    assert!(hits.iter().all(|i| i.kind == MediaKind::Audio));
    let categories = catalog.filtered_categories(&q);
    assert_eq!(categories.len(), 5);
}

#[test]
fn securit_collapses_to_lectures() {
    let catalog = demo();
    let q = QueryState::with("securit", KindFilter::All);
    let hits = catalog.filtered_items(&q);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "אבטחת אתרים");

    let cats = catalog.filtered_categories(&q);
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].id, "lectures");
    assert_eq!(cats[0].items.len(), 1);
    assert_eq!(cats[0].items[0].id, "8");
}

#[test]
fn no_results_is_empty_not_error() {
    let catalog = demo();
    let q = QueryState::with("zzz", KindFilter::All);
    assert!(catalog.filtered_items(&q).is_empty());
    assert!(catalog.filtered_categories(&q).is_empty());
    assert!(!catalog.is_empty());
}
