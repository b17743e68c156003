//! Smooth Unicode progress bar widget.

use gallery_core::player::format_time;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Palette;

/// Render a smooth progress bar in `area`.
/// `progress` is 0.0..=1.0. `time_pos` and `duration` are optional display values.
pub fn draw_progress(
    frame: &mut Frame,
    area: Rect,
    progress: f64,
    time_pos: Option<f64>,
    duration: Option<f64>,
    fill: Color,
    palette: &Palette,
) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let left_label = time_pos.map(format_time).unwrap_or_default();
    let right_label = duration.map(format_time).unwrap_or_default();
    let (_, bar_w) = bar_span(area, &left_label, &right_label);
    let bar = render_bar(progress, bar_w as usize);

    let mut spans = Vec::new();
    if !left_label.is_empty() {
        spans.push(Span::styled(
            format!("{} ", left_label),
            Style::default().fg(palette.secondary),
        ));
    }
    spans.push(Span::styled(bar, Style::default().fg(fill).bg(palette.separator)));
    if !right_label.is_empty() {
        spans.push(Span::styled(
            format!(" {}", right_label),
            Style::default().fg(palette.muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Map a click column onto the bar's 0.0..=1.0 range, or `None` outside it.
pub fn click_ratio(area: Rect, time_pos: Option<f64>, duration: Option<f64>, col: u16) -> Option<f64> {
    let left_label = time_pos.map(format_time).unwrap_or_default();
    let right_label = duration.map(format_time).unwrap_or_default();
    let (bar_x, bar_w) = bar_span(area, &left_label, &right_label);
    if bar_w == 0 || col < bar_x || col >= bar_x + bar_w {
        return None;
    }
    Some((col - bar_x) as f64 / (bar_w.saturating_sub(1)).max(1) as f64)
}

/// Column and width the bar itself occupies once labels are laid out.
fn bar_span(area: Rect, left_label: &str, right_label: &str) -> (u16, u16) {
    let left_w = if left_label.is_empty() {
        0
    } else {
        left_label.len() as u16 + 1
    };
    let right_w = if right_label.is_empty() {
        0
    } else {
        right_label.len() as u16 + 1
    };
    let bar_w = area.width.saturating_sub(left_w + right_w).max(4).min(area.width);
    (area.x + left_w, bar_w)
}

fn render_bar(progress: f64, bar_w: usize) -> String {
    // 8 eighths per cell
    let eighths = (progress.clamp(0.0, 1.0) * bar_w as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let mut bar = String::with_capacity(bar_w + 4);
    for _ in 0..full_blocks.min(bar_w) {
        bar.push('█');
    }
    if full_blocks < bar_w {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..bar_w {
            bar.push(' ');
        }
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_is_stable() {
        for p in [0.0, 0.33, 0.5, 1.0, 1.7] {
            assert_eq!(render_bar(p, 20).chars().count(), 20);
        }
        assert_eq!(render_bar(1.0, 4), "████");
    }

    #[test]
    fn test_click_ratio_maps_bar_columns() {
        let area = Rect::new(10, 0, 30, 1);
        // "0:00 " occupies 5 columns, " 1:00" another 5.
        assert_eq!(click_ratio(area, Some(0.0), Some(60.0), 12), None);
        assert_eq!(click_ratio(area, Some(0.0), Some(60.0), 15), Some(0.0));
        assert_eq!(click_ratio(area, Some(0.0), Some(60.0), 34), Some(1.0));
        assert_eq!(click_ratio(area, Some(0.0), Some(60.0), 36), None);
    }
}
