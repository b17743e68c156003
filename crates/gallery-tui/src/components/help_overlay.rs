//! HelpOverlay component: centered popup with keyboard shortcut reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::Palette,
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // Swallow everything else while open.
            _ => vec![Action::Noop],
        }
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            return;
        }
        let palette = state.palette();
        let popup = centered_rect(64, 33, area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                title,
                Style::default().fg(palette.muted).add_modifier(Modifier::BOLD),
            ))
        };

        let help_lines: Vec<Line> = vec![
            Line::from(Span::styled(" קיצורי מקלדת", palette.title())),
            Line::from(""),
            section(" browse"),
            help_row("← / →  or  h / l", "move along a row", palette),
            help_row("↑ / ↓  or  j / k", "move between rows", palette),
            help_row("home / end", "first / last card", palette),
            help_row("enter / click", "open the selected item", palette),
            help_row("tab / shift-tab", "focus next / previous pane", palette),
            help_row("/", "search (Esc clears + closes)", palette),
            help_row("f / F", "cycle type filter", palette),
            help_row("t", "toggle light / dark theme", palette),
            Line::from(""),
            section(" video & audio"),
            help_row("space  or  k", "play / pause", palette),
            help_row("← / →", "seek back / forward", palette),
            help_row("↑ / ↓  or  + / -", "volume up / down", palette),
            help_row("m", "mute", palette),
            help_row("v", "full screen (video)", palette),
            Line::from(""),
            section(" pdf"),
            help_row("← / →", "previous / next page", palette),
            help_row("+ / -", "zoom in / out", palette),
            help_row("d", "download", palette),
            Line::from(""),
            section(" modal"),
            help_row("n / p", "next / previous (video, audio)", palette),
            help_row("l", "toggle playlist", palette),
            help_row("esc  or  x", "close (playlist first)", palette),
            Line::from(""),
            help_row("K", "toggle keys bar", palette),
            help_row("?", "toggle this help overlay", palette),
            help_row("q / Ctrl+C", "quit", palette),
            Line::from(""),
            Line::from(Span::styled(" press ? or esc to close", palette.muted_text())),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.border_focused))
                        .style(Style::default().bg(palette.surface)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn help_row<'a>(key: &'a str, desc: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<20}", key),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, palette.secondary_text()),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
