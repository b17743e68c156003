//! Media card: one item drawn as a small bordered tile.
//!
//! Cards are shared by the hero strip, the category rows and the search
//! grid. A card never acts on its own: the owning component maps clicks
//! and Enter onto `Action::OpenItem` with its own playlist source.

use gallery_core::model::MediaItem;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Palette;

pub const CARD_WIDTH: u16 = 28;
pub const CARD_HEIGHT: u16 = 6;
/// Horizontal gap between neighbouring cards.
pub const CARD_GAP: u16 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct CardLook {
    /// Under the cursor of the focused pane.
    pub selected: bool,
    /// The item currently open in the modal.
    pub active: bool,
}

pub fn draw_card(frame: &mut Frame, area: Rect, item: &MediaItem, look: CardLook, palette: &Palette) {
    if area.width < 6 || area.height < 3 {
        return;
    }

    let border = if look.selected {
        Style::default()
            .fg(palette.border_focused)
            .add_modifier(Modifier::BOLD)
    } else if look.active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    };
    let bg = if look.selected {
        palette.selection_bg
    } else {
        palette.surface
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let kind_color = palette.kind_color(item.kind);

    // Top line: kind badge on one side, duration on the other.
    let badge = format!("{} {}", item.kind.icon(), item.kind.label());
    let duration = item.duration.clone().unwrap_or_default();
    let pad = width.saturating_sub(badge.width() + duration.width());
    let top = Line::from(vec![
        Span::styled(
            badge,
            Style::default().fg(kind_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(duration, palette.secondary_text()),
    ]);

    let title_style = if look.active {
        palette.title().fg(palette.accent)
    } else {
        palette.title()
    };
    let mut lines = vec![
        top,
        Line::from(Span::styled(truncate(&item.title, width), title_style)),
    ];
    if let Some(desc) = item.description.as_deref() {
        lines.push(Line::from(Span::styled(
            truncate(desc, width),
            palette.secondary_text(),
        )));
    }
    if look.active && inner.height as usize > lines.len() {
        lines.push(Line::from(Span::styled(
            "● מוצג כעת",
            palette.accent_text(),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// How many whole cards fit side by side in `width` columns.
pub fn cards_per_row(width: u16) -> usize {
    ((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1) as usize
}

/// Rect of the `slot`-th card in a horizontal strip starting at `area`.
pub fn card_rect(area: Rect, slot: usize) -> Rect {
    let x = area.x + slot as u16 * (CARD_WIDTH + CARD_GAP);
    Rect {
        x,
        y: area.y,
        width: CARD_WIDTH.min((area.x + area.width).saturating_sub(x)),
        height: CARD_HEIGHT.min(area.height),
    }
}

/// Which card slot a click column falls into, if it lands on a card
/// rather than a gap.
pub fn slot_at(area: Rect, col: u16) -> Option<usize> {
    if col < area.x || col >= area.x + area.width {
        return None;
    }
    let offset = col - area.x;
    let stride = CARD_WIDTH + CARD_GAP;
    (offset % stride < CARD_WIDTH).then_some((offset / stride) as usize)
}

// ── Horizontal strip cursor ───────────────────────────────────────────────────

/// Cursor and scroll offset for one horizontal run of cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardStrip {
    pub selected: usize,
    pub offset: usize,
}

impl CardStrip {
    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, len as isize - 1) as usize;
    }

    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Scroll so the cursor is inside a window of `per_row` cards.
    pub fn ensure_visible(&mut self, per_row: usize) {
        let per_row = per_row.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + per_row {
            self.offset = self.selected + 1 - per_row;
        }
    }
}

/// Cut `text` to `max` display columns, ending in `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert!(truncate("מבוא ל-React מתקדם", 8).width() <= 8);
    }

    #[test]
    fn test_slot_geometry() {
        let strip = Rect::new(2, 0, 90, CARD_HEIGHT);
        assert_eq!(cards_per_row(strip.width), 3);
        assert_eq!(slot_at(strip, 2), Some(0));
        assert_eq!(slot_at(strip, 2 + CARD_WIDTH), None);
        assert_eq!(slot_at(strip, 2 + CARD_WIDTH + CARD_GAP), Some(1));
        assert_eq!(card_rect(strip, 1).x, 2 + CARD_WIDTH + CARD_GAP);
    }

    #[test]
    fn test_strip_scrolls_with_cursor() {
        let mut strip = CardStrip::default();
        strip.move_by(4, 5);
        strip.ensure_visible(3);
        assert_eq!((strip.selected, strip.offset), (4, 2));
        strip.move_by(-10, 5);
        strip.ensure_visible(3);
        assert_eq!((strip.selected, strip.offset), (0, 0));
        strip.move_by(1, 0);
        assert_eq!(strip.selected, 0);
    }
}
