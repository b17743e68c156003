//! PlayerView: draws whichever `Surface` the modal mounted and maps keys
//! and clicks on it to playback/document actions.
//!
//! Video and audio share one layout: a screen box, a seek bar and a row of
//! buttons. The PDF viewer gets a toolbar, a placeholder page and an info
//! strip. Anything else renders the "format not supported" placeholder.

use gallery_core::model::MediaItem;
use gallery_core::pdf::PdfViewer;
use gallery_core::player::{MediaPlayer, PlayerKind};
use gallery_core::selection::Navigation;
use gallery_core::surface::Surface;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::Action,
    app_state::AppState,
    theme::Palette,
    widgets::{hit, progress_bar},
};

pub const VIDEO_DEMO_NOTE: &str = "(הדגמה - הוסף קבצי וידאו למאגר)";
pub const AUDIO_DEMO_NOTE: &str = "(הדגמה - הוסף קבצי אודיו למאגר)";
pub const PDF_DEMO_NOTE: &str = "(הדגמה - הוסף קבצי PDF למאגר)";
pub const UNSUPPORTED_TEXT: &str = "סוג קובץ לא נתמך";

const VOLUME_CELLS: u16 = 10;

pub struct PlayerView {
    progress_area: Rect,
    volume_area: Rect,
    buttons: Vec<(Rect, Action)>,
}

impl PlayerView {
    pub fn new() -> Self {
        Self {
            progress_area: Rect::default(),
            volume_area: Rect::default(),
            buttons: Vec::new(),
        }
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let seek = state.playback.seek_step_secs;
        let vol = state.playback.volume_step;
        match state.surface.as_ref() {
            Some(Surface::Video(_)) | Some(Surface::Audio(_)) => match key.code {
                KeyCode::Char(' ') | KeyCode::Char('k') => vec![Action::TogglePlay],
                KeyCode::Right | KeyCode::Char('.') => vec![Action::SeekRelative(seek)],
                KeyCode::Left | KeyCode::Char(',') => vec![Action::SeekRelative(-seek)],
                KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                    vec![Action::VolumeStep(vol)]
                }
                KeyCode::Down | KeyCode::Char('-') => vec![Action::VolumeStep(-vol)],
                KeyCode::Char('m') => vec![Action::ToggleMute],
                KeyCode::Char('v') => vec![Action::ToggleFullscreen],
                KeyCode::Char('0') => vec![Action::SeekTo(0.0)],
                _ => vec![],
            },
            Some(Surface::Pdf(_)) => match key.code {
                KeyCode::Right | KeyCode::PageDown | KeyCode::Char(' ') => vec![Action::PageNext],
                KeyCode::Left | KeyCode::PageUp => vec![Action::PagePrev],
                KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => vec![Action::ZoomIn],
                KeyCode::Char('-') | KeyCode::Down => vec![Action::ZoomOut],
                KeyCode::Char('d') => vec![Action::Download],
                _ => vec![],
            },
            _ => vec![],
        }
    }

    // ── Mouse ─────────────────────────────────────────────────────────────────

    pub fn handle_mouse(&mut self, event: MouseEvent, state: &AppState) -> Vec<Action> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        if let Some((_, action)) = self.buttons.iter().find(|(r, _)| hit(*r, col, row)) {
            return vec![action.clone()];
        }
        let Some(player) = state.surface.as_ref().and_then(|s| s.player()) else {
            return vec![];
        };
        if hit(self.progress_area, col, row) {
            let ratio = progress_bar::click_ratio(
                self.progress_area,
                Some(player.current_time()),
                Some(player.duration()),
                col,
            );
            if let Some(r) = ratio {
                return vec![Action::SeekTo(r * player.slider_max())];
            }
        }
        if hit(self.volume_area, col, row) {
            let cell = col - self.volume_area.x;
            let v = (cell + 1) as f64 / VOLUME_CELLS as f64;
            return vec![Action::SetVolume(v)];
        }
        vec![]
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.buttons.clear();
        self.progress_area = Rect::default();
        self.volume_area = Rect::default();
        let Some(item) = state.current_item() else {
            return;
        };
        let palette = state.palette();
        match state.surface.as_ref() {
            Some(Surface::Video(p)) | Some(Surface::Audio(p)) => {
                self.draw_media(frame, area, item, p, state.is_demo(), palette)
            }
            Some(Surface::Pdf(v)) => self.draw_pdf(frame, area, item, v, palette),
            Some(Surface::Unsupported(_)) | None => draw_unsupported(frame, area, item, palette),
        }
    }

    fn draw_media(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        item: &MediaItem,
        player: &MediaPlayer,
        demo: bool,
        palette: &Palette,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        // Screen
        let video = player.kind() == PlayerKind::Video;
        let glyph = if video { "▶" } else { "♫" };
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                glyph,
                Style::default()
                    .fg(palette.kind_color(item.kind))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(item.title.as_str(), palette.title())),
        ];
        if !video {
            if let Some(desc) = item.description.as_deref() {
                lines.push(Line::from(Span::styled(desc, palette.secondary_text())));
            }
        }
        if demo {
            let note = if video { VIDEO_DEMO_NOTE } else { AUDIO_DEMO_NOTE };
            lines.push(Line::from(Span::styled(note, palette.muted_text())));
        }
        if let Some(err) = player.load_error() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("✗ {}", err),
                Style::default().fg(palette.toast_error),
            )));
        }
        let mut screen = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.surface));
        if player.is_fullscreen() {
            screen = screen.title_top(
                Line::from(Span::styled(" ⤢ מסך מלא ", palette.accent_text())).right_aligned(),
            );
        }
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(screen),
            chunks[0],
        );

        // Seek bar
        self.progress_area = chunks[1];
        progress_bar::draw_progress(
            frame,
            chunks[1],
            player.progress_ratio(),
            Some(player.current_time()),
            Some(player.duration()),
            palette.kind_color(item.kind),
            palette,
        );

        // Buttons
        let row = chunks[2];
        let mut spans: Vec<Span> = Vec::new();
        let mut x = row.x;
        let enabled = |on: bool| {
            if on {
                palette.title()
            } else {
                palette.muted_text()
            }
        };
        self.button(
            &mut spans,
            &mut x,
            row,
            " ⏮ ",
            enabled(player.has_previous()),
            player.has_previous().then_some(Action::Navigate(Navigation::Previous)),
        );
        let play_label = if player.is_playing() { " ❚❚ " } else { " ▶ " };
        self.button(
            &mut spans,
            &mut x,
            row,
            play_label,
            Style::default()
                .fg(palette.bg)
                .bg(palette.kind_color(item.kind))
                .add_modifier(Modifier::BOLD),
            Some(Action::TogglePlay),
        );
        self.button(
            &mut spans,
            &mut x,
            row,
            " ⏭ ",
            enabled(player.has_next()),
            player.has_next().then_some(Action::Navigate(Navigation::Next)),
        );
        spans.push(Span::raw("   "));
        x += 3;

        let mute_label = if player.is_muted() { " 🔇 " } else { " 🔊 " };
        self.button(&mut spans, &mut x, row, mute_label, palette.text(), Some(Action::ToggleMute));

        let shown = player.displayed_volume();
        let filled = (shown * VOLUME_CELLS as f64).round() as u16;
        let volume_width = VOLUME_CELLS.min((row.x + row.width).saturating_sub(x));
        self.volume_area = Rect::new(x, row.y, volume_width, 1);
        spans.push(Span::styled(
            "█".repeat(filled as usize),
            Style::default().fg(palette.secondary),
        ));
        spans.push(Span::styled(
            "░".repeat((VOLUME_CELLS - filled.min(VOLUME_CELLS)) as usize),
            palette.muted_text(),
        ));
        let pct = format!(" {:>3}%", (shown * 100.0).round() as u32);
        x += VOLUME_CELLS + pct.width() as u16;
        spans.push(Span::styled(pct, palette.secondary_text()));

        if video {
            spans.push(Span::raw("   "));
            x += 3;
            let label = if player.is_fullscreen() { " ⤡ " } else { " ⤢ " };
            self.button(
                &mut spans,
                &mut x,
                row,
                label,
                palette.text(),
                Some(Action::ToggleFullscreen),
            );
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), row);
    }

    fn draw_pdf(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        item: &MediaItem,
        viewer: &PdfViewer,
        palette: &Palette,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(area);

        // Toolbar: zoom | pages | download
        let row = chunks[0];
        let mut spans: Vec<Span> = Vec::new();
        let mut x = row.x;
        self.button(&mut spans, &mut x, row, " − ", palette.title(), Some(Action::ZoomOut));
        let zoom = format!(" {:>3}% ", viewer.zoom());
        x += zoom.width() as u16;
        spans.push(Span::styled(zoom, palette.secondary_text()));
        self.button(&mut spans, &mut x, row, " + ", palette.title(), Some(Action::ZoomIn));
        spans.push(Span::raw("    "));
        x += 4;

        let style_for = |on: bool| if on { palette.title() } else { palette.muted_text() };
        self.button(
            &mut spans,
            &mut x,
            row,
            " ‹ ",
            style_for(viewer.can_go_prev()),
            viewer.can_go_prev().then_some(Action::PagePrev),
        );
        let label = format!(" {} ", viewer.page_label());
        x += label.width() as u16;
        spans.push(Span::styled(label, palette.secondary_text()));
        self.button(
            &mut spans,
            &mut x,
            row,
            " › ",
            style_for(viewer.can_go_next()),
            viewer.can_go_next().then_some(Action::PageNext),
        );
        spans.push(Span::raw("    "));
        x += 4;
        self.button(
            &mut spans,
            &mut x,
            row,
            " ⤓ הורדה ",
            palette.accent_text(),
            Some(Action::Download),
        );
        frame.render_widget(Paragraph::new(Line::from(spans)), row);

        // Placeholder page, widened with the zoom level.
        let page_area = chunks[1];
        let width = ((page_area.width as u32 * viewer.zoom()) / 200)
            .clamp(20.min(page_area.width as u32), page_area.width as u32) as u16;
        let page = Rect {
            x: page_area.x + (page_area.width - width) / 2,
            width,
            ..page_area
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "▤",
                Style::default()
                    .fg(palette.kind_pdf)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(item.title.as_str(), palette.title())),
            Line::from(Span::styled(PDF_DEMO_NOTE, palette.muted_text())),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.border))
                        .style(Style::default().bg(palette.surface)),
                ),
            page,
        );

        // Info
        let mut info = vec![Line::from(Span::styled(item.title.as_str(), palette.title()))];
        if let Some(desc) = item.description.as_deref() {
            info.push(Line::from(Span::styled(desc, palette.secondary_text())));
        }
        frame.render_widget(Paragraph::new(info), chunks[2]);
    }

    /// Push a clickable label, remembering its rect when it has an action.
    fn button<'a>(
        &mut self,
        spans: &mut Vec<Span<'a>>,
        x: &mut u16,
        row: Rect,
        label: &'a str,
        style: Style,
        action: Option<Action>,
    ) {
        let w = label.width() as u16;
        if let Some(action) = action {
            let width = w.min((row.x + row.width).saturating_sub(*x));
            if width > 0 {
                self.buttons.push((Rect::new(*x, row.y, width, 1), action));
            }
        }
        spans.push(Span::styled(label, style));
        *x += w;
    }
}

impl Default for PlayerView {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_unsupported(frame: &mut Frame, area: Rect, item: &MediaItem, palette: &Palette) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(UNSUPPORTED_TEXT, palette.title())),
        Line::from(Span::styled(
            format!("{} · {}", item.kind.label(), item.name),
            palette.muted_text(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        ),
        area,
    );
}
