//! Shared video/audio player state machine.
//!
//! The player never talks to a playback engine directly.  User operations
//! return the `EngineCommand`s to forward, and engine notifications come
//! back in through `on_event`.  Play/pause flips optimistically; every
//! engine event simply overwrites the displayed state, so redelivery is
//! harmless.

use crate::selection::Navigation;

/// Slider maximum while the engine has not reported a duration yet.
pub const UNKNOWN_DURATION_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// Which surface a player drives.  Only video can go full-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Video,
    Audio,
}

/// Requests for the underlying playback engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    SetMuted(bool),
    SetFullscreen(bool),
}

/// Notifications from the underlying playback engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    TimeUpdate(f64),
    MetadataLoaded { duration: f64 },
    Ended,
    FullscreenChanged(bool),
    /// The resource could not be loaded.  No retry is attempted.
    LoadFailed(String),
}

/// Values a freshly mounted player starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerDefaults {
    pub volume: f64,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

#[derive(Debug, Clone)]
pub struct MediaPlayer {
    kind: PlayerKind,
    state: PlaybackState,
    current_time: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    fullscreen: bool,
    has_next: bool,
    has_previous: bool,
    load_error: Option<String>,
}

impl MediaPlayer {
    pub fn new(kind: PlayerKind, defaults: PlayerDefaults) -> Self {
        let volume = defaults.volume.clamp(0.0, 1.0);
        Self {
            kind,
            state: PlaybackState::Paused,
            current_time: 0.0,
            duration: 0.0,
            volume,
            muted: volume == 0.0,
            fullscreen: false,
            has_next: false,
            has_previous: false,
            load_error: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// 0 until the engine reports metadata.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Stored volume, kept intact while muted.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// What the volume control shows: 0 while muted.
    pub fn displayed_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn slider_max(&self) -> f64 {
        if self.duration > 0.0 {
            self.duration
        } else {
            UNKNOWN_DURATION_MAX
        }
    }

    /// Position as a 0..=1 fraction of the slider.
    pub fn progress_ratio(&self) -> f64 {
        (self.current_time / self.slider_max()).clamp(0.0, 1.0)
    }

    // ── User operations ──────────────────────────────────────────────────────

    pub fn set_navigation(&mut self, has_next: bool, has_previous: bool) {
        self.has_next = has_next;
        self.has_previous = has_previous;
    }

    pub fn toggle_play(&mut self) -> EngineCommand {
        match self.state {
            PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                EngineCommand::Play
            }
            PlaybackState::Playing => {
                self.state = PlaybackState::Paused;
                EngineCommand::Pause
            }
        }
    }

    /// Jump to `t` seconds.  Play/pause is left alone.
    pub fn seek(&mut self, t: f64) -> EngineCommand {
        let upper = if self.duration > 0.0 {
            self.duration
        } else {
            f64::MAX
        };
        let t = if t.is_finite() { t.clamp(0.0, upper) } else { 0.0 };
        self.current_time = t;
        EngineCommand::Seek(t)
    }

    pub fn seek_relative(&mut self, delta: f64) -> EngineCommand {
        self.seek(self.current_time + delta)
    }

    /// A zero volume forces mute; any other value leaves the mute flag as is.
    pub fn set_volume(&mut self, v: f64) -> Vec<EngineCommand> {
        let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        self.volume = v;
        let mut cmds = vec![EngineCommand::SetVolume(v)];
        if v == 0.0 && !self.muted {
            self.muted = true;
            cmds.push(EngineCommand::SetMuted(true));
        }
        cmds
    }

    pub fn toggle_mute(&mut self) -> EngineCommand {
        self.muted = !self.muted;
        EngineCommand::SetMuted(self.muted)
    }

    /// Request the opposite full-screen state.  The flag itself only moves
    /// when the engine reports `FullscreenChanged`.
    pub fn toggle_fullscreen(&self) -> Option<EngineCommand> {
        match self.kind {
            PlayerKind::Video => Some(EngineCommand::SetFullscreen(!self.fullscreen)),
            PlayerKind::Audio => None,
        }
    }

    pub fn next(&self) -> Option<Navigation> {
        self.has_next.then_some(Navigation::Next)
    }

    pub fn previous(&self) -> Option<Navigation> {
        self.has_previous.then_some(Navigation::Previous)
    }

    // ── Engine notifications ─────────────────────────────────────────────────

    /// Apply an engine event.  Returns `Some(Navigation::Next)` when the
    /// media ended and the playlist has a following item.
    pub fn on_event(&mut self, event: &EngineEvent) -> Option<Navigation> {
        match event {
            EngineEvent::TimeUpdate(t) => {
                if t.is_finite() {
                    self.current_time = t.max(0.0);
                }
                None
            }
            EngineEvent::MetadataLoaded { duration } => {
                if duration.is_finite() && *duration >= 0.0 {
                    self.duration = *duration;
                }
                None
            }
            EngineEvent::Ended => {
                self.state = PlaybackState::Paused;
                self.next()
            }
            EngineEvent::FullscreenChanged(on) => {
                self.fullscreen = *on;
                None
            }
            EngineEvent::LoadFailed(reason) => {
                self.state = PlaybackState::Paused;
                self.load_error = Some(reason.clone());
                None
            }
        }
    }
}

/// `m:ss` with zero-padded seconds.  Minutes are not wrapped into hours.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let s = secs.floor() as u64;
    format!("{}:{:02}", s / 60, s % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio() -> MediaPlayer {
        MediaPlayer::new(PlayerKind::Audio, PlayerDefaults::default())
    }

    #[test]
    fn test_toggle_is_optimistic() {
        let mut p = audio();
        assert!(!p.is_playing());
        assert_eq!(p.toggle_play(), EngineCommand::Play);
        assert!(p.is_playing());
        assert_eq!(p.toggle_play(), EngineCommand::Pause);
        assert!(!p.is_playing());
    }

    #[test]
    fn test_mute_preserves_volume() {
        let mut p = audio();
        p.set_volume(0.7);
        p.toggle_mute();
        assert_eq!(p.displayed_volume(), 0.0);
        assert_eq!(p.volume(), 0.7);
        p.toggle_mute();
        assert_eq!(p.volume(), 0.7);
        assert_eq!(p.displayed_volume(), 0.7);
    }

    #[test]
    fn test_zero_volume_forces_mute_only() {
        let mut p = audio();
        let cmds = p.set_volume(0.0);
        assert!(p.is_muted());
        assert!(cmds.contains(&EngineCommand::SetMuted(true)));

        // Raising the volume again does not unmute implicitly.
        let cmds = p.set_volume(0.4);
        assert!(p.is_muted());
        assert_eq!(cmds, vec![EngineCommand::SetVolume(0.4)]);
    }

    #[test]
    fn test_ended_pauses_and_advances_when_possible() {
        let mut p = audio();
        p.toggle_play();
        p.set_navigation(true, false);
        assert_eq!(p.on_event(&EngineEvent::Ended), Some(Navigation::Next));
        assert!(!p.is_playing());

        p.toggle_play();
        p.set_navigation(false, true);
        assert_eq!(p.on_event(&EngineEvent::Ended), None);
        assert!(!p.is_playing());
    }

    #[test]
    fn test_seek_clamps_and_keeps_state() {
        let mut p = audio();
        p.on_event(&EngineEvent::MetadataLoaded { duration: 120.0 });
        p.toggle_play();
        assert_eq!(p.seek(500.0), EngineCommand::Seek(120.0));
        assert_eq!(p.seek(-3.0), EngineCommand::Seek(0.0));
        assert!(p.is_playing());
    }

    #[test]
    fn test_events_are_idempotent() {
        let mut p = audio();
        for _ in 0..3 {
            p.on_event(&EngineEvent::TimeUpdate(12.5));
            p.on_event(&EngineEvent::MetadataLoaded { duration: 60.0 });
        }
        assert_eq!(p.current_time(), 12.5);
        assert_eq!(p.duration(), 60.0);
    }

    #[test]
    fn test_slider_max_until_metadata() {
        let mut p = audio();
        assert_eq!(p.slider_max(), UNKNOWN_DURATION_MAX);
        p.on_event(&EngineEvent::MetadataLoaded { duration: 42.0 });
        assert_eq!(p.slider_max(), 42.0);
    }

    #[test]
    fn test_navigation_disabled_is_noop() {
        let p = audio();
        assert_eq!(p.next(), None);
        assert_eq!(p.previous(), None);
    }

    #[test]
    fn test_fullscreen_video_only() {
        let mut v = MediaPlayer::new(PlayerKind::Video, PlayerDefaults::default());
        assert_eq!(v.toggle_fullscreen(), Some(EngineCommand::SetFullscreen(true)));
        v.on_event(&EngineEvent::FullscreenChanged(true));
        assert_eq!(v.toggle_fullscreen(), Some(EngineCommand::SetFullscreen(false)));
        assert_eq!(audio().toggle_fullscreen(), None);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(930.0), "15:30");
        assert_eq!(format_time(3725.0), "62:05");
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
