//! PlaylistOverlay: slide-in list of the modal's active playlist.
//!
//! Each entry shows its 1-based position, title and duration. The entry
//! matching the open item is highlighted. Choosing an entry jumps to it
//! and leaves the overlay open.

use gallery_core::model::MediaItem;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::media_card::truncate,
    widgets::{
        hit,
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

pub const PLAYLIST_TITLE: &str = "פלייליסט";

pub struct PlaylistOverlay {
    list: ScrollableList<MediaItem>,
    synced_rev: Option<u64>,
    rows_area: Rect,
}

impl PlaylistOverlay {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
            synced_rev: None,
            rows_area: Rect::default(),
        }
    }

    /// Pull the playlist out of the selection when it has changed, and put
    /// the cursor on the current entry.
    fn sync(&mut self, state: &AppState) {
        if self.synced_rev == Some(state.selection_rev) {
            return;
        }
        self.synced_rev = Some(state.selection_rev);
        self.list.set_items(state.selection.playlist().to_vec());
        match state.selection.current_index() {
            Some(idx) => self.list.select(idx),
            None => self.list.select_first(),
        }
    }

    fn jump(&self) -> Vec<Action> {
        match self.list.selected_item() {
            Some(item) => vec![Action::JumpTo(item.clone())],
            None => vec![],
        }
    }
}

impl Default for PlaylistOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// One overlay row: `n. title ... duration`, fitted to `width`.
pub fn entry_text(position: usize, item: &MediaItem, width: usize) -> String {
    let prefix = format!("{:>2}. ", position);
    let duration = item.duration.as_deref().unwrap_or("");
    let room = width.saturating_sub(prefix.width() + duration.width() + 1);
    let title = truncate(&item.title, room);
    let pad = room.saturating_sub(title.width()) + 1;
    format!("{}{}{}{}", prefix, title, " ".repeat(pad), duration)
}

impl Component for PlaylistOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::Playlist
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.sync(state);
        // Cursor keys are swallowed with a Noop; anything else falls through
        // to the player underneath.
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(1),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => return self.jump(),
            KeyCode::Esc | KeyCode::Char('l') => return vec![Action::ClosePlaylist],
            _ => return vec![],
        }
        vec![Action::Noop]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        self.sync(state);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !hit(self.rows_area, event.column, event.row) {
                    return vec![];
                }
                if self.list.handle_click((event.row - self.rows_area.y) as usize) {
                    return self.jump();
                }
                vec![]
            }
            MouseEventKind::ScrollDown => {
                self.list.select_down(1);
                vec![]
            }
            MouseEventKind::ScrollUp => {
                self.list.select_up(1);
                vec![]
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync(state);
        let palette = state.palette();

        let count = self.list.len().to_string();
        let block = pane_chrome(
            PLAYLIST_TITLE,
            focused,
            Some(Badge {
                text: &count,
                color: palette.secondary,
            }),
            palette,
        )
        .style(Style::default().bg(palette.surface));
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);
        self.rows_area = inner;

        let height = inner.height as usize;
        self.list.ensure_visible(height);
        let current_id = state.current_item().map(|i| i.id.as_str());
        let lines: Vec<Line> = self
            .list
            .visible_items(height)
            .into_iter()
            .map(|(idx, item)| {
                let is_current = current_id == Some(item.id.as_str());
                let mut style = if is_current {
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    palette.text()
                };
                if focused && idx == self.list.selected {
                    style = style.bg(palette.selection_bg);
                }
                let marker = if is_current { "▶" } else { " " };
                Line::from(vec![
                    Span::styled(marker, palette.accent_text()),
                    Span::styled(
                        entry_text(idx + 1, item, inner.width.saturating_sub(1) as usize),
                        style,
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::demo::demo_categories;

    #[test]
    fn test_entry_text_layout() {
        let item = demo_categories()[0].items[0].clone();
        let text = entry_text(1, &item, 40);
        assert!(text.starts_with(" 1. "));
        assert!(text.ends_with(item.duration.as_deref().unwrap_or_default()));
        assert_eq!(text.width(), 40);
    }
}
