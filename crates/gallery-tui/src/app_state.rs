//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this for catalog, query and modal data, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use gallery_core::catalog::Catalog;
use gallery_core::config::{EngineKind, PlaybackConfig};
use gallery_core::model::MediaItem;
use gallery_core::query::QueryState;
use gallery_core::selection::Selection;
use gallery_core::surface::Surface;

use crate::theme::{Palette, ThemeState, ThemeToggle};
use crate::widgets::status_bar::InputMode;

pub struct AppState {
    // ── Library ─────────────────────────────────────────────────────────────
    pub catalog: Catalog,
    pub query: QueryState,

    // ── Modal ───────────────────────────────────────────────────────────────
    pub selection: Selection,
    /// Player or viewer mounted for `selection.current()`.
    pub surface: Option<Surface>,
    pub show_playlist: bool,
    /// Bumped every time the modal opens on a new item or playlist.
    pub selection_rev: u64,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub theme: ThemeState,
    pub input_mode: InputMode,
    pub playback: PlaybackConfig,
}

impl AppState {
    pub fn new(catalog: Catalog, theme: ThemeState, playback: PlaybackConfig) -> Self {
        Self {
            catalog,
            query: QueryState::new(),
            selection: Selection::new(),
            surface: None,
            show_playlist: false,
            selection_rev: 0,
            theme,
            input_mode: InputMode::Normal,
            playback,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    /// The modal's current item, if the modal is open.
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.selection.current()
    }

    pub fn is_current(&self, item: &MediaItem) -> bool {
        self.current_item().is_some_and(|c| c.id == item.id)
    }

    /// True when no real playback engine backs the players.
    pub fn is_demo(&self) -> bool {
        self.playback.engine == EngineKind::Simulated
    }
}
