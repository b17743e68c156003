//! SearchResults component: flat card grid shown while a search or type
//! filter is active.

use gallery_core::selection::PlaylistSource;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::media_card::{self, CardLook, CARD_GAP, CARD_HEIGHT},
    widgets::hit,
};

pub const NO_RESULTS_TITLE: &str = "לא נמצאו תוצאות";
pub const NO_RESULTS_HINT: &str = "נסה לחפש משהו אחר או לשנות את הסינון";

pub fn results_title(count: usize) -> String {
    format!("תוצאות חיפוש ({})", count)
}

pub struct SearchResults {
    selected: usize,
    row_offset: usize,
    cols: usize,
    grid: Rect,
}

impl SearchResults {
    pub fn new() -> Self {
        Self {
            selected: 0,
            row_offset: 0,
            cols: 1,
            grid: Rect::default(),
        }
    }

    fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    fn open(state: &AppState, idx: usize) -> Vec<Action> {
        match state.catalog.filtered_items(&state.query).get(idx) {
            Some(item) => vec![Action::OpenItem {
                item: (*item).clone(),
                source: Some(PlaylistSource::SearchResults),
            }],
            None => vec![],
        }
    }
}

impl Default for SearchResults {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchResults {
    fn id(&self) -> ComponentId {
        ComponentId::SearchResults
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = state.catalog.filtered_items(&state.query).len();
        let cols = self.cols.max(1) as isize;
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.move_by(1, len),
            KeyCode::Left | KeyCode::Char('h') => self.move_by(-1, len),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(cols, len),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-cols, len),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.move_by(len as isize, len),
            KeyCode::Enter => return Self::open(state, self.selected),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let len = state.catalog.filtered_items(&state.query).len();
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !hit(self.grid, event.column, event.row) {
                    return vec![];
                }
                let grid_row = ((event.row - self.grid.y) / (CARD_HEIGHT + 1)) as usize;
                if (event.row - self.grid.y) % (CARD_HEIGHT + 1) == CARD_HEIGHT {
                    return vec![];
                }
                let Some(col) = media_card::slot_at(self.grid, event.column) else {
                    return vec![];
                };
                if col >= self.cols {
                    return vec![];
                }
                let idx = (self.row_offset + grid_row) * self.cols + col;
                if idx >= len {
                    return vec![];
                }
                self.selected = idx;
                Self::open(state, idx)
            }
            MouseEventKind::ScrollDown => {
                self.move_by(self.cols as isize, len);
                vec![]
            }
            MouseEventKind::ScrollUp => {
                self.move_by(-(self.cols as isize), len);
                vec![]
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if matches!(
            action,
            Action::SearchChanged(_) | Action::SetFilter(_) | Action::CycleFilter { .. }
        ) {
            self.selected = 0;
            self.row_offset = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = state.palette();
        let items = state.catalog.filtered_items(&state.query);
        if area.height == 0 {
            return;
        }

        let title_style = if focused {
            palette.title()
        } else {
            palette.secondary_text()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(results_title(items.len()), title_style))),
            Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), 1),
        );

        let body = Rect {
            y: area.y + 2,
            height: area.height.saturating_sub(2),
            ..area
        };

        if items.is_empty() {
            self.grid = Rect::default();
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(NO_RESULTS_TITLE, palette.title())),
                Line::from(Span::styled(NO_RESULTS_HINT, palette.secondary_text())),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
            return;
        }

        self.grid = Rect {
            x: body.x + 1,
            width: body.width.saturating_sub(1),
            ..body
        };
        self.cols = media_card::cards_per_row(self.grid.width);
        if self.selected >= items.len() {
            self.selected = items.len() - 1;
        }

        let row_stride = CARD_HEIGHT + 1;
        let visible_rows = ((self.grid.height + 1) / row_stride).max(1) as usize;
        let sel_row = self.selected / self.cols;
        if sel_row < self.row_offset {
            self.row_offset = sel_row;
        } else if sel_row >= self.row_offset + visible_rows {
            self.row_offset = sel_row + 1 - visible_rows;
        }

        let first = self.row_offset * self.cols;
        for (pos, item) in items.iter().enumerate().skip(first).take(visible_rows * self.cols) {
            let rel = pos - first;
            let (r, c) = (rel / self.cols, rel % self.cols);
            let y = self.grid.y + r as u16 * row_stride;
            if y >= self.grid.y + self.grid.height {
                break;
            }
            let x = self.grid.x + c as u16 * (media_card::CARD_WIDTH + CARD_GAP);
            let cell = Rect {
                x,
                y,
                width: media_card::CARD_WIDTH.min((self.grid.x + self.grid.width).saturating_sub(x)),
                height: CARD_HEIGHT.min(self.grid.y + self.grid.height - y),
            };
            let look = CardLook {
                selected: focused && pos == self.selected,
                active: state.is_current(item),
            };
            media_card::draw_card(frame, cell, item, look, palette);
        }
    }
}
