//! Colour palettes and the theme capability the header toggles.

use gallery_core::config::ThemeMode;
use gallery_core::model::MediaKind;
use ratatui::style::{Color, Modifier, Style};

// ── Palettes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub primary: Color,
    pub secondary: Color,
    pub muted: Color,
    pub accent: Color,
    pub separator: Color,
    pub selection_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub filter_bg: Color,
    pub filter_fg: Color,
    pub backdrop: Color,
    pub kind_video: Color,
    pub kind_audio: Color,
    pub kind_pdf: Color,
    pub toast_info: Color,
    pub toast_success: Color,
    pub toast_warning: Color,
    pub toast_error: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(18, 18, 18),
    surface: Color::Rgb(24, 24, 32),
    primary: Color::Rgb(210, 210, 225),
    secondary: Color::Rgb(115, 115, 138),
    muted: Color::Rgb(72, 72, 88),
    accent: Color::Rgb(255, 95, 95),
    separator: Color::Rgb(40, 40, 52),
    selection_bg: Color::Rgb(28, 28, 40),
    border: Color::Rgb(40, 40, 52),
    border_focused: Color::Rgb(120, 100, 200),
    filter_bg: Color::Rgb(20, 20, 32),
    filter_fg: Color::Rgb(255, 200, 80),
    backdrop: Color::Rgb(8, 8, 10),
    kind_video: Color::Rgb(255, 95, 95),
    kind_audio: Color::Rgb(80, 200, 120),
    kind_pdf: Color::Rgb(80, 140, 200),
    toast_info: Color::Rgb(80, 160, 220),
    toast_success: Color::Rgb(80, 200, 120),
    toast_warning: Color::Rgb(255, 184, 80),
    toast_error: Color::Rgb(255, 95, 95),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(246, 246, 242),
    surface: Color::Rgb(236, 236, 230),
    primary: Color::Rgb(30, 30, 40),
    secondary: Color::Rgb(90, 90, 110),
    muted: Color::Rgb(150, 150, 165),
    accent: Color::Rgb(200, 50, 60),
    separator: Color::Rgb(210, 210, 215),
    selection_bg: Color::Rgb(220, 220, 235),
    border: Color::Rgb(200, 200, 210),
    border_focused: Color::Rgb(100, 80, 190),
    filter_bg: Color::Rgb(230, 230, 240),
    filter_fg: Color::Rgb(150, 90, 0),
    backdrop: Color::Rgb(190, 190, 195),
    kind_video: Color::Rgb(200, 50, 60),
    kind_audio: Color::Rgb(30, 140, 70),
    kind_pdf: Color::Rgb(40, 100, 180),
    toast_info: Color::Rgb(30, 110, 180),
    toast_success: Color::Rgb(30, 140, 70),
    toast_warning: Color::Rgb(180, 110, 0),
    toast_error: Color::Rgb(200, 50, 60),
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Dark => &DARK,
            ThemeMode::Light => &LIGHT,
        }
    }

    pub fn kind_color(&self, kind: MediaKind) -> Color {
        match kind {
            MediaKind::Video => self.kind_video,
            MediaKind::Audio => self.kind_audio,
            MediaKind::Pdf => self.kind_pdf,
            MediaKind::Image => self.secondary,
        }
    }

    // ── Predefined styles ─────────────────────────────────────────────────────

    pub fn text(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn secondary_text(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn muted_text(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent_text(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.selection_bg).fg(self.primary)
    }

    pub fn selected_focused(&self) -> Style {
        self.selected().add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn filter(&self) -> Style {
        Style::default().fg(self.filter_fg).bg(self.filter_bg)
    }
}

// ── Theme capability ──────────────────────────────────────────────────────────

/// Read/toggle access to the process-wide colour scheme.
pub trait ThemeToggle {
    fn mode(&self) -> ThemeMode;
    fn toggle(&mut self) -> ThemeMode;

    fn palette(&self) -> &'static Palette {
        Palette::for_mode(self.mode())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeState {
    mode: ThemeMode,
}

impl ThemeState {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }
}

impl ThemeToggle for ThemeState {
    fn mode(&self) -> ThemeMode {
        self.mode
    }

    fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.mode
    }
}

/// Glyph for the header's theme button: shows the mode a press switches to.
pub fn theme_glyph(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Dark => "☀",
        ThemeMode::Light => "☾",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_palette() {
        let mut theme = ThemeState::new(ThemeMode::Dark);
        assert_eq!(theme.palette().bg, DARK.bg);
        assert_eq!(theme.toggle(), ThemeMode::Light);
        assert_eq!(theme.palette().bg, LIGHT.bg);
        assert_eq!(theme.toggle(), ThemeMode::Dark);
    }
}
