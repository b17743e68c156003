//! CategoryRows component: one horizontal card strip per category.
//!
//! Up/Down move between rows, Left/Right along a row. Every row keeps its
//! own cursor so coming back to a row lands where it was left. Opening a
//! card uses that category's items as the playlist.

use std::collections::HashMap;

use gallery_core::model::Category;
use gallery_core::selection::PlaylistSource;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::media_card::{self, CardLook, CardStrip, CARD_HEIGHT},
    widgets::hit,
};

/// Title line + cards + one blank spacer row.
const ROW_HEIGHT: u16 = CARD_HEIGHT + 2;

pub struct CategoryRows {
    row: usize,
    row_offset: usize,
    /// Cursor per category id.
    strips: HashMap<String, CardStrip>,
    /// (row index, cards rect) as last drawn.
    row_areas: Vec<(usize, Rect)>,
}

impl CategoryRows {
    pub fn new() -> Self {
        Self {
            row: 0,
            row_offset: 0,
            strips: HashMap::new(),
            row_areas: Vec::new(),
        }
    }

    fn strip_mut(&mut self, id: &str) -> &mut CardStrip {
        self.strips.entry(id.to_string()).or_default()
    }

    fn open(category: &Category, idx: usize) -> Vec<Action> {
        match category.items.get(idx) {
            Some(item) => vec![Action::OpenItem {
                item: item.clone(),
                source: Some(PlaylistSource::Category(category.id.clone())),
            }],
            None => vec![],
        }
    }

    fn move_row(&mut self, delta: isize, rows: usize) {
        if rows == 0 {
            self.row = 0;
            return;
        }
        self.row = (self.row as isize + delta).clamp(0, rows as isize - 1) as usize;
    }
}

impl Default for CategoryRows {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CategoryRows {
    fn id(&self) -> ComponentId {
        ComponentId::CategoryRows
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let categories = state.catalog.filtered_categories(&state.query);
        let Some(category) = categories.get(self.row.min(categories.len().saturating_sub(1))) else {
            return vec![];
        };
        let len = category.items.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.row == 0 {
                    return vec![Action::FocusPane(ComponentId::Hero)];
                }
                self.move_row(-1, categories.len());
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_row(1, categories.len()),
            KeyCode::PageUp => self.move_row(-3, categories.len()),
            KeyCode::PageDown => self.move_row(3, categories.len()),
            KeyCode::Right | KeyCode::Char('l') => self.strip_mut(&category.id).move_by(1, len),
            KeyCode::Left | KeyCode::Char('h') => self.strip_mut(&category.id).move_by(-1, len),
            KeyCode::Home | KeyCode::Char('g') => {
                self.strip_mut(&category.id).move_by(-(len as isize), len)
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.strip_mut(&category.id).move_by(len as isize, len)
            }
            KeyCode::Enter => {
                let idx = self.strips.get(&category.id).map_or(0, |s| s.selected);
                return Self::open(category, idx);
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let categories = state.catalog.filtered_categories(&state.query);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some((row, cards)) = self
                    .row_areas
                    .iter()
                    .find(|(_, r)| hit(*r, event.column, event.row))
                    .copied()
                else {
                    return vec![];
                };
                let Some(category) = categories.get(row) else {
                    return vec![];
                };
                self.row = row;
                let Some(slot) = media_card::slot_at(cards, event.column) else {
                    return vec![];
                };
                let strip = self.strip_mut(&category.id);
                let idx = strip.offset + slot;
                if idx >= category.items.len() {
                    return vec![];
                }
                strip.selected = idx;
                Self::open(category, idx)
            }
            MouseEventKind::ScrollDown => {
                self.move_row(1, categories.len());
                vec![]
            }
            MouseEventKind::ScrollUp => {
                self.move_row(-1, categories.len());
                vec![]
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = state.palette();
        let categories = state.catalog.filtered_categories(&state.query);
        self.row_areas.clear();
        if categories.is_empty() || area.height == 0 {
            return;
        }
        self.move_row(0, categories.len());

        let visible_rows = ((area.height + 1) / ROW_HEIGHT).max(1) as usize;
        if self.row < self.row_offset {
            self.row_offset = self.row;
        } else if self.row >= self.row_offset + visible_rows {
            self.row_offset = self.row + 1 - visible_rows;
        }

        let per_row = media_card::cards_per_row(area.width.saturating_sub(2));
        let mut y = area.y;
        for (row, category) in categories.iter().enumerate().skip(self.row_offset) {
            if y >= area.y + area.height {
                break;
            }
            let row_focused = focused && row == self.row;
            let title_style = if row_focused {
                palette.title().add_modifier(Modifier::UNDERLINED)
            } else {
                palette.title()
            };
            let marker = if row_focused { "▸ " } else { "  " };
            let mut spans = vec![
                Span::styled(marker, palette.accent_text()),
                Span::styled(category.name.as_str(), title_style),
                Span::styled(format!("  ({})", category.items.len()), palette.muted_text()),
            ];
            if let Some(description) = &category.description {
                spans.push(Span::styled(format!("  {}", description), palette.secondary_text()));
            }
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(area.x, y, area.width, 1),
            );

            let cards = Rect {
                x: area.x + 2,
                y: y + 1,
                width: area.width.saturating_sub(2),
                height: CARD_HEIGHT.min((area.y + area.height).saturating_sub(y + 1)),
            };
            if cards.height == 0 {
                break;
            }
            self.row_areas.push((row, cards));

            let strip = self.strips.entry(category.id.clone()).or_default();
            strip.clamp(category.items.len());
            strip.ensure_visible(per_row);
            let strip = *strip;

            for (slot, (idx, item)) in category
                .items
                .iter()
                .enumerate()
                .skip(strip.offset)
                .take(per_row)
                .enumerate()
            {
                let look = CardLook {
                    selected: row_focused && idx == strip.selected,
                    active: state.is_current(item),
                };
                media_card::draw_card(frame, media_card::card_rect(cards, slot), item, look, palette);
            }

            y += ROW_HEIGHT;
        }
    }

    fn min_height(&self) -> u16 {
        ROW_HEIGHT
    }
}
