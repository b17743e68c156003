//! Player dispatch: one surface per item, chosen by media kind.

use crate::model::{MediaItem, MediaKind};
use crate::pdf::PdfViewer;
use crate::player::{EngineCommand, EngineEvent, MediaPlayer, PlayerDefaults, PlayerKind};
use crate::selection::Navigation;

/// The operations shared by every surface that plays time-based media.
pub trait Playable {
    fn volume(&self) -> f64;
    fn toggle_play(&mut self) -> EngineCommand;
    fn seek(&mut self, t: f64) -> EngineCommand;
    fn seek_relative(&mut self, delta: f64) -> EngineCommand;
    fn set_volume(&mut self, v: f64) -> Vec<EngineCommand>;
    fn toggle_mute(&mut self) -> EngineCommand;
    /// `None` for audio.
    fn toggle_fullscreen(&self) -> Option<EngineCommand>;
    fn on_engine_event(&mut self, event: &EngineEvent) -> Option<Navigation>;
    fn next(&self) -> Option<Navigation>;
    fn previous(&self) -> Option<Navigation>;
}

impl Playable for MediaPlayer {
    fn volume(&self) -> f64 {
        MediaPlayer::volume(self)
    }

    fn toggle_play(&mut self) -> EngineCommand {
        MediaPlayer::toggle_play(self)
    }

    fn seek(&mut self, t: f64) -> EngineCommand {
        MediaPlayer::seek(self, t)
    }

    fn seek_relative(&mut self, delta: f64) -> EngineCommand {
        MediaPlayer::seek_relative(self, delta)
    }

    fn set_volume(&mut self, v: f64) -> Vec<EngineCommand> {
        MediaPlayer::set_volume(self, v)
    }

    fn toggle_mute(&mut self) -> EngineCommand {
        MediaPlayer::toggle_mute(self)
    }

    fn toggle_fullscreen(&self) -> Option<EngineCommand> {
        MediaPlayer::toggle_fullscreen(self)
    }

    fn on_engine_event(&mut self, event: &EngineEvent) -> Option<Navigation> {
        self.on_event(event)
    }

    fn next(&self) -> Option<Navigation> {
        MediaPlayer::next(self)
    }

    fn previous(&self) -> Option<Navigation> {
        MediaPlayer::previous(self)
    }
}

#[derive(Debug, Clone)]
pub enum Surface {
    Video(MediaPlayer),
    Audio(MediaPlayer),
    Pdf(PdfViewer),
    /// Rendered as a "format not supported" placeholder.
    Unsupported(MediaKind),
}

impl Surface {
    pub fn for_item(item: &MediaItem, defaults: PlayerDefaults) -> Self {
        match item.kind {
            MediaKind::Video => Self::Video(MediaPlayer::new(PlayerKind::Video, defaults)),
            MediaKind::Audio => Self::Audio(MediaPlayer::new(PlayerKind::Audio, defaults)),
            MediaKind::Pdf => Self::Pdf(PdfViewer::new()),
            other => Self::Unsupported(other),
        }
    }

    /// Whether a playback engine should load the item at all.
    pub fn needs_engine(&self) -> bool {
        matches!(self, Self::Video(_) | Self::Audio(_))
    }

    pub fn player(&self) -> Option<&MediaPlayer> {
        match self {
            Self::Video(p) | Self::Audio(p) => Some(p),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut MediaPlayer> {
        match self {
            Self::Video(p) | Self::Audio(p) => Some(p),
            _ => None,
        }
    }

    pub fn playable_mut(&mut self) -> Option<&mut dyn Playable> {
        self.player_mut().map(|p| p as &mut dyn Playable)
    }

    pub fn pdf_mut(&mut self) -> Option<&mut PdfViewer> {
        match self {
            Self::Pdf(v) => Some(v),
            _ => None,
        }
    }

    /// Playlist flags only reach video and audio; the PDF viewer has no
    /// next/previous affordance.
    pub fn set_navigation(&mut self, has_next: bool, has_previous: bool) {
        if let Some(p) = self.player_mut() {
            p.set_navigation(has_next, has_previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: MediaKind) -> MediaItem {
        MediaItem {
            id: "1".into(),
            name: "f".into(),
            title: "f".into(),
            description: None,
            kind,
            path: "media/f".into(),
            thumbnail: None,
            category: "c".into(),
            duration: None,
            size: None,
            added_at: "2024-01-01".into(),
        }
    }

    #[test]
    fn test_dispatch_by_kind() {
        let d = PlayerDefaults::default();
        assert!(matches!(Surface::for_item(&item(MediaKind::Video), d), Surface::Video(_)));
        assert!(matches!(Surface::for_item(&item(MediaKind::Audio), d), Surface::Audio(_)));
        assert!(matches!(Surface::for_item(&item(MediaKind::Pdf), d), Surface::Pdf(_)));
        assert!(matches!(
            Surface::for_item(&item(MediaKind::Image), d),
            Surface::Unsupported(MediaKind::Image)
        ));
    }

    #[test]
    fn test_pdf_ignores_navigation() {
        let mut s = Surface::for_item(&item(MediaKind::Pdf), PlayerDefaults::default());
        s.set_navigation(true, true);
        assert!(s.playable_mut().is_none());
        assert!(!s.needs_engine());
    }

    #[test]
    fn test_playable_drives_the_player() {
        let mut s = Surface::for_item(&item(MediaKind::Audio), PlayerDefaults::default());
        let p = s.playable_mut().unwrap();
        assert_eq!(p.toggle_play(), EngineCommand::Play);
        assert_eq!(p.set_volume(0.4), vec![EngineCommand::SetVolume(0.4)]);
        assert_eq!(p.toggle_mute(), EngineCommand::SetMuted(true));
        assert_eq!(p.volume(), 0.4);
        assert_eq!(p.toggle_fullscreen(), None);
        assert!(s.player().unwrap().is_playing());
    }

    #[test]
    fn test_playable_forwards_navigation() {
        let mut s = Surface::for_item(&item(MediaKind::Video), PlayerDefaults::default());
        s.set_navigation(true, false);
        let p = s.playable_mut().unwrap();
        assert_eq!(p.next(), Some(Navigation::Next));
        assert_eq!(p.previous(), None);
    }
}
