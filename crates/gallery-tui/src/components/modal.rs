//! Modal component: the shell around the mounted player or viewer.
//!
//! Holds the title bar with the playlist position, the close and playlist
//! buttons, the `PlayerView` and the `PlaylistOverlay`. While the overlay is
//! open it takes keys first and the rest of the modal is dimmed; clicking
//! the dimmed part closes the overlay only. Clicking outside the modal
//! closes the modal.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use gallery_core::selection::Navigation;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{player_view::PlayerView, playlist_overlay::PlaylistOverlay},
    widgets::{
        hit,
        pane_chrome::{pane_chrome, Badge},
    },
};

const CLOSE_LABEL: &str = " ✕ ";
const PLAYLIST_LABEL: &str = " ☰ פלייליסט ";
/// Share of the modal's inner width taken by the playlist overlay.
const OVERLAY_PERCENT: u16 = 38;
const OVERLAY_MIN_WIDTH: u16 = 30;

pub struct Modal {
    player: PlayerView,
    playlist: PlaylistOverlay,
    area: Rect,
    close_btn: Rect,
    playlist_btn: Rect,
    overlay_area: Rect,
    backdrop_area: Rect,
}

impl Modal {
    pub fn new() -> Self {
        Self {
            player: PlayerView::new(),
            playlist: PlaylistOverlay::new(),
            area: Rect::default(),
            close_btn: Rect::default(),
            playlist_btn: Rect::default(),
            overlay_area: Rect::default(),
            backdrop_area: Rect::default(),
        }
    }

    fn reset_areas(&mut self) {
        self.area = Rect::default();
        self.close_btn = Rect::default();
        self.playlist_btn = Rect::default();
        self.overlay_area = Rect::default();
        self.backdrop_area = Rect::default();
    }
}

impl Default for Modal {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the mounted player has taken over the whole terminal.
fn fullscreen(state: &AppState) -> bool {
    state
        .surface
        .as_ref()
        .and_then(|s| s.player())
        .is_some_and(|p| p.is_fullscreen())
}

impl Component for Modal {
    fn id(&self) -> ComponentId {
        ComponentId::Modal
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !state.selection.is_open() {
            return vec![];
        }
        if state.show_playlist {
            let actions = self.playlist.handle_key(key, state);
            if !actions.is_empty() {
                return actions;
            }
        }
        match key.code {
            KeyCode::Esc if fullscreen(state) => vec![Action::ToggleFullscreen],
            KeyCode::Esc | KeyCode::Char('x') => vec![Action::CloseModal],
            KeyCode::Char('l') => vec![Action::TogglePlaylist],
            KeyCode::Char('n') => vec![Action::Navigate(Navigation::Next)],
            KeyCode::Char('p') => vec![Action::Navigate(Navigation::Previous)],
            _ => self.player.handle_key(key, state),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if !state.selection.is_open() {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !hit(self.area, col, row) {
                    return vec![Action::CloseModal];
                }
                if hit(self.close_btn, col, row) {
                    return vec![Action::CloseModal];
                }
                if hit(self.playlist_btn, col, row) {
                    return vec![Action::TogglePlaylist];
                }
                if state.show_playlist {
                    if hit(self.overlay_area, col, row) {
                        return self.playlist.handle_mouse(event, area, state);
                    }
                    if hit(self.backdrop_area, col, row) {
                        return vec![Action::ClosePlaylist];
                    }
                    return vec![];
                }
                self.player.handle_mouse(event, state)
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp
                if state.show_playlist && hit(self.overlay_area, col, row) =>
            {
                self.playlist.handle_mouse(event, area, state)
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(item) = state.current_item() else {
            self.reset_areas();
            return;
        };
        let palette = state.palette();

        // Dim whatever is behind the modal.
        frame.buffer_mut().set_style(area, Style::default().fg(palette.muted));

        let modal = if fullscreen(state) {
            area
        } else {
            area.inner(Margin {
                horizontal: (area.width / 16).max(1),
                vertical: (area.height / 12).max(1),
            })
        };
        self.area = modal;

        let position = state.selection.position_label();
        let block = pane_chrome(
            &item.title,
            true,
            position.as_deref().map(|text| Badge {
                text,
                color: palette.secondary,
            }),
            palette,
        )
        .style(Style::default().bg(palette.bg));
        let inner = block.inner(modal);
        frame.render_widget(Clear, modal);
        frame.render_widget(block, modal);

        // Buttons sit on the bottom border.
        let bottom = modal.y + modal.height.saturating_sub(1);
        let close_w = CLOSE_LABEL.width() as u16;
        let playlist_w = PLAYLIST_LABEL.width() as u16;
        self.close_btn = Rect::new(modal.x + 2, bottom, close_w, 1).intersection(modal);
        self.playlist_btn = Rect::new(
            (modal.x + modal.width).saturating_sub(playlist_w + 2),
            bottom,
            playlist_w,
            1,
        )
        .intersection(modal);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(CLOSE_LABEL, palette.accent_text()))),
            self.close_btn,
        );
        let playlist_style = if state.show_playlist {
            palette.selected_focused()
        } else {
            palette.secondary_text()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(PLAYLIST_LABEL, playlist_style))),
            self.playlist_btn,
        );

        let body = inner.inner(Margin {
            horizontal: 1,
            vertical: 0,
        });
        self.player.draw(frame, body, state);

        if state.show_playlist {
            let width = overlay_width(inner.width);
            self.overlay_area = Rect {
                x: inner.x + inner.width - width,
                width,
                ..inner
            };
            self.backdrop_area = Rect {
                width: inner.width - width,
                ..inner
            };
            frame.buffer_mut().set_style(
                self.backdrop_area,
                Style::default().fg(palette.muted).bg(palette.backdrop),
            );
            self.playlist.draw(frame, self.overlay_area, true, state);
        } else {
            self.overlay_area = Rect::default();
            self.backdrop_area = Rect::default();
        }
    }
}

/// Playlist overlay width inside a modal `total` columns wide.
fn overlay_width(total: u16) -> u16 {
    let share = (total as u32 * OVERLAY_PERCENT as u32 / 100) as u16;
    share.max(OVERLAY_MIN_WIDTH).min(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_width() {
        assert_eq!(overlay_width(100), 38);
        assert_eq!(overlay_width(50), OVERLAY_MIN_WIDTH);
        assert_eq!(overlay_width(20), 20);
        // Wide terminals must not overflow the u16 product.
        assert_eq!(overlay_width(4000), 1520);
        assert_eq!(overlay_width(u16::MAX), 24903);
    }
}
