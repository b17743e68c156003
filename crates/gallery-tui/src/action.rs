//! Action enum: all user-initiated intents and engine-driven events.

use gallery_core::model::{KindFilter, MediaItem};
use gallery_core::selection::{Navigation, PlaylistSource};

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Header,
    Hero,
    CategoryRows,
    SearchResults,
    Modal,
    Playlist,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Browsing ─────────────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchChanged(String),
    SetFilter(KindFilter),
    CycleFilter { forward: bool },

    // ── Selection ────────────────────────────────────────────────────────────
    /// Open the modal on `item`; the source decides which playlist it gets.
    OpenItem {
        item: MediaItem,
        source: Option<PlaylistSource>,
    },
    CloseModal,
    Navigate(Navigation),
    JumpTo(MediaItem),
    TogglePlaylist,
    ClosePlaylist,

    // ── Playback ─────────────────────────────────────────────────────────────
    TogglePlay,
    SeekRelative(f64),
    SeekTo(f64),
    VolumeStep(f64),
    SetVolume(f64),
    ToggleMute,
    ToggleFullscreen,

    // ── Document ─────────────────────────────────────────────────────────────
    PageNext,
    PagePrev,
    ZoomIn,
    ZoomOut,
    Download,

    // ── UI toggles ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    ToggleTheme,
    ToggleHelp,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Noop,
}
