//! Hero component: the "recently added" strip above the category rows.
//!
//! Shows `Catalog::hero_items()`, but opening any of them hands the modal
//! the full recent list as its playlist.

use gallery_core::selection::PlaylistSource;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::media_card::{self, CardLook, CardStrip, CARD_HEIGHT},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub const HERO_TITLE: &str = "נוסף לאחרונה";

pub struct Hero {
    strip: CardStrip,
    cards_area: Rect,
}

impl Hero {
    pub fn new() -> Self {
        Self {
            strip: CardStrip::default(),
            cards_area: Rect::default(),
        }
    }

    /// Rows the hero needs: card height plus the chrome border.
    pub fn height() -> u16 {
        CARD_HEIGHT + 2
    }

    fn open(&self, state: &AppState, idx: usize) -> Vec<Action> {
        match state.catalog.hero_items().get(idx) {
            Some(item) => vec![Action::OpenItem {
                item: (*item).clone(),
                source: Some(PlaylistSource::Recent),
            }],
            None => vec![],
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Hero {
    fn id(&self) -> ComponentId {
        ComponentId::Hero
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = state.catalog.hero_items().len();
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.strip.move_by(1, len),
            KeyCode::Left | KeyCode::Char('h') => self.strip.move_by(-1, len),
            KeyCode::Home | KeyCode::Char('g') => self.strip.move_by(-(len as isize), len),
            KeyCode::End | KeyCode::Char('G') => self.strip.move_by(len as isize, len),
            KeyCode::Down | KeyCode::Char('j') => return vec![Action::FocusPane(ComponentId::CategoryRows)],
            KeyCode::Enter => return self.open(state, self.strip.selected),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let len = state.catalog.hero_items().len();
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if event.row < self.cards_area.y
                    || event.row >= self.cards_area.y + self.cards_area.height
                {
                    return vec![];
                }
                match media_card::slot_at(self.cards_area, event.column) {
                    Some(slot) if self.strip.offset + slot < len => {
                        self.strip.selected = self.strip.offset + slot;
                        self.open(state, self.strip.selected)
                    }
                    _ => vec![],
                }
            }
            MouseEventKind::ScrollDown => {
                self.strip.move_by(1, len);
                vec![]
            }
            MouseEventKind::ScrollUp => {
                self.strip.move_by(-1, len);
                vec![]
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = state.palette();
        let items = state.catalog.hero_items();
        self.strip.clamp(items.len());

        let count = items.len().to_string();
        let block = pane_chrome(
            HERO_TITLE,
            focused,
            Some(Badge {
                text: &count,
                color: palette.accent,
            }),
            palette,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.cards_area = inner;

        let per_row = media_card::cards_per_row(inner.width);
        self.strip.ensure_visible(per_row);

        for (slot, (idx, item)) in items
            .iter()
            .enumerate()
            .skip(self.strip.offset)
            .take(per_row)
            .enumerate()
        {
            let look = CardLook {
                selected: focused && idx == self.strip.selected,
                active: state.is_current(item),
            };
            media_card::draw_card(frame, media_card::card_rect(inner, slot), item, look, palette);
        }
    }

    fn min_height(&self) -> u16 {
        Self::height()
    }
}
