mod common;

use common::fixtures::demo;
use gallery_core::catalog::RECENT_LIMIT;
use gallery_core::player::{EngineEvent, PlayerDefaults};
use gallery_core::query::QueryState;
use gallery_core::selection::{Navigation, PlaylistSource, Selection};
use gallery_core::surface::Surface;

fn open_from(
    selection: &mut Selection,
    source: PlaylistSource,
    id: &str,
    query: &QueryState,
) {
    let catalog = demo();
    let playlist = catalog.playlist_for(Some(&source), query);
    let item = playlist
        .iter()
        .find(|i| i.id == id)
        .cloned()
        .expect("item is in its own playlist");
    selection.open(item, playlist);
}

#[test]
fn category_open_uses_category_items_in_order() {
    let mut sel = Selection::new();
    let q = QueryState::new();
    open_from(&mut sel, PlaylistSource::Category("podcasts".into()), "6", &q);
    let ids: Vec<&str> = sel.playlist().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["6", "7"]);
    assert_eq!(sel.position_label().as_deref(), Some("1 / 2"));
}

#[test]
fn same_item_from_hero_gets_recent_list() {
    let mut sel = Selection::new();
    let q = QueryState::new();
    open_from(&mut sel, PlaylistSource::Category("podcasts".into()), "6", &q);
    open_from(&mut sel, PlaylistSource::Recent, "6", &q);
    assert_eq!(sel.playlist().len(), demo().item_count().min(RECENT_LIMIT));
    assert_eq!(sel.position_label().as_deref(), Some("2 / 9"));
}

#[test]
fn search_open_uses_result_set() {
    let mut sel = Selection::new();
    let q = QueryState::with("פרק", Default::default());
    open_from(&mut sel, PlaylistSource::SearchResults, "7", &q);
    let ids: Vec<&str> = sel.playlist().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["6", "7"]);
    assert!(!sel.has_next());
    assert!(sel.has_previous());
}

#[test]
fn missing_context_defaults_to_filtered_items() {
    let catalog = demo();
    let playlist = catalog.playlist_for(None, &QueryState::new());
    assert_eq!(playlist.len(), catalog.item_count());
}

#[test]
fn ended_auto_advances_through_playlist() {
    let mut sel = Selection::new();
    open_from(
        &mut sel,
        PlaylistSource::Category("tutorials".into()),
        "1",
        &QueryState::new(),
    );

    let mut visited = vec![sel.current().map(|i| i.id.clone()).unwrap_or_default()];
    loop {
        let item = sel.current().cloned().expect("modal open");
        let mut surface = Surface::for_item(&item, PlayerDefaults::default());
        surface.set_navigation(sel.has_next(), sel.has_previous());
        let player = surface.playable_mut().expect("tutorials are videos");
        player.toggle_play();
        match player.on_engine_event(&EngineEvent::Ended) {
            Some(nav) => {
                let next = sel.advance(nav).map(|i| i.id.clone());
                visited.push(next.unwrap_or_default());
            }
            None => break,
        }
    }
    assert_eq!(visited, ["1", "2", "3"]);
    assert_eq!(sel.advance(Navigation::Next), None);
}

#[test]
fn close_then_reopen_replaces_playlist() {
    let mut sel = Selection::new();
    let q = QueryState::new();
    open_from(&mut sel, PlaylistSource::Category("tutorials".into()), "2", &q);
    sel.close();
    assert!(sel.current().is_none());

    open_from(&mut sel, PlaylistSource::Category("presentations".into()), "5", &q);
    let ids: Vec<&str> = sel.playlist().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["4", "5"]);
}
