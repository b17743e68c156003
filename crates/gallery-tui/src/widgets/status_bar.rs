//! Status bar: footer credit line and the keybindings bar.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Palette;

pub const FOOTER_TEXT: &str = "מאגר מדיה פתוח | מופעל באמצעות GitHub Pages";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Filter,
}

/// What the keys bar should describe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeysContext {
    Browse,
    Player,
    Document,
    Playlist,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "SEARCH",
        }
    }

    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Normal => palette.border_focused,
            Self::Filter => palette.filter_fg,
        }
    }
}

pub fn draw_footer(frame: &mut Frame, area: Rect, palette: &Palette) {
    let line = Line::from(Span::styled(FOOTER_TEXT, palette.muted_text()));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    context: KeysContext,
    palette: &Palette,
) {
    let label = match (mode, context) {
        (InputMode::Filter, _) => mode.label(),
        (_, KeysContext::Browse) => "BROWSE",
        (_, KeysContext::Player) => "PLAYER",
        (_, KeysContext::Document) => "PDF",
        (_, KeysContext::Playlist) => "PLAYLIST",
    };

    let keys = match (mode, context) {
        (InputMode::Filter, _) => " type to search  Enter keep  Esc clear+close  Tab next pane",
        (_, KeysContext::Browse) => {
            " ←→↑↓ move  Enter open  Tab panes  / search  f/F type  t theme  K keys  ? help  q quit"
        }
        (_, KeysContext::Player) => {
            " Space play  ←→ seek  +/- vol  m mute  v full  n/p next/prev  l playlist  Esc close"
        }
        (_, KeysContext::Document) => {
            " ←→ page  +/- zoom  d download  l playlist  Esc close"
        }
        (_, KeysContext::Playlist) => " ↑↓ move  Enter play  l/Esc close playlist",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(mode.color(palette))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, palette.muted_text()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
