//! Header component: 2-row top bar.
//!
//! Row 1: logo, live search box, the four-way type filter, theme toggle.
//! Row 2: library heading (title/description) or a plain separator.
//!
//! Not in the focus ring; it takes keys only while the search box is active.

use gallery_core::model::KindFilter;
use ratatui::crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::media_card::truncate,
    theme::{theme_glyph, ThemeToggle},
    widgets::filter_input::{FilterAction, FilterInput},
    widgets::hit,
};

pub const LOGO: &str = "מדיה גיטהאב";
pub const SEARCH_PLACEHOLDER: &str = "חיפוש...";

pub struct Header {
    search: FilterInput,
    search_area: Rect,
    tab_areas: Vec<(KindFilter, Rect)>,
    theme_area: Rect,
}

impl Header {
    pub fn new() -> Self {
        Self {
            search: FilterInput::new(SEARCH_PLACEHOLDER),
            search_area: Rect::default(),
            tab_areas: Vec::new(),
            theme_area: Rect::default(),
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_active()
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.search.is_active() {
            return vec![];
        }
        match self.search.handle_key(key) {
            FilterAction::Changed(text) => vec![Action::SearchChanged(text)],
            FilterAction::Confirmed | FilterAction::Cancelled => vec![Action::CloseSearch],
            FilterAction::None => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        if hit(self.search_area, col, row) {
            return vec![Action::OpenSearch];
        }
        if let Some((filter, _)) = self.tab_areas.iter().find(|(_, r)| hit(*r, col, row)) {
            return vec![Action::SetFilter(*filter)];
        }
        if hit(self.theme_area, col, row) {
            return vec![Action::ToggleTheme];
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenSearch => self.search.activate(),
            Action::CloseSearch => self.search.deactivate(),
            Action::SearchChanged(text) if text.is_empty() => self.search.clear(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let palette = state.palette();
        frame.render_widget(
            Paragraph::new("").style(Style::default().bg(palette.bg)),
            area,
        );

        let logo = format!(" ▶ {} ", LOGO);
        let tabs: Vec<(KindFilter, String)> = KindFilter::CHOICES
            .iter()
            .map(|f| (*f, format!(" {} ", f.label())))
            .collect();
        let tabs_w: u16 = tabs.iter().map(|(_, t)| t.width() as u16 + 1).sum();

        let row1 = Rect { height: 1, ..area };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(logo.width() as u16),
                Constraint::Length(1),
                Constraint::Min(12),
                Constraint::Length(1),
                Constraint::Length(tabs_w),
                Constraint::Length(4),
            ])
            .split(row1);

        frame.render_widget(
            Paragraph::new(Span::styled(
                logo,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            cols[0],
        );

        self.search_area = cols[2];
        self.search.draw(frame, cols[2], palette);

        // Filter tabs
        self.tab_areas.clear();
        let mut x = cols[4].x;
        let current = state.query.filter();
        for (filter, label) in &tabs {
            let w = (label.width() as u16).min((cols[4].x + cols[4].width).saturating_sub(x));
            if w == 0 {
                break;
            }
            let r = Rect::new(x, row1.y, w, 1);
            let style = if *filter == current {
                Style::default()
                    .fg(palette.bg)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                palette.secondary_text()
            };
            frame.render_widget(Paragraph::new(Span::styled(label.as_str(), style)), r);
            self.tab_areas.push((*filter, r));
            x += w + 1;
        }

        self.theme_area = cols[5];
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {} ", theme_glyph(state.theme.mode())),
                palette.title(),
            )),
            cols[5],
        );

        if area.height < 2 {
            return;
        }
        let row2 = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        let line = match (state.catalog.title(), state.catalog.description()) {
            (Some(title), description) => {
                let mut spans = vec![Span::styled(format!(" {}", title), palette.title())];
                if let Some(d) = description {
                    let room = (row2.width as usize).saturating_sub(title.width() + 4);
                    spans.push(Span::styled(
                        format!("  {}", truncate(d, room)),
                        palette.secondary_text(),
                    ));
                }
                Line::from(spans)
            }
            _ => Line::from(Span::styled(
                "─".repeat(row2.width as usize),
                Style::default().fg(palette.separator),
            )),
        };
        frame.render_widget(Paragraph::new(line), row2);
    }

    fn min_height(&self) -> u16 {
        2
    }
}
