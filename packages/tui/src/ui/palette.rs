use auditflow_core::Theme;
use ratatui::style::{Color, Style};

/// Terminal colors derived from the active flower theme and dark/light mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
}

impl Palette {
    pub fn new(theme: &Theme, dark_mode: bool) -> Self {
        let (background, foreground, muted) = if dark_mode {
            (
                Color::Rgb(17, 24, 39),
                Color::Rgb(229, 231, 235),
                Color::Rgb(107, 114, 128),
            )
        } else {
            (
                Color::Rgb(250, 250, 250),
                Color::Rgb(31, 41, 55),
                Color::Rgb(156, 163, 175),
            )
        };

        Self {
            primary: hex_color(theme.primary),
            secondary: hex_color(theme.secondary),
            accent: hex_color(theme.accent),
            background,
            foreground,
            muted,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.primary)
    }
}

/// Map a `#rrggbb` theme color to a terminal color, falling back to the default
pub fn hex_color(color: &str) -> Color {
    match Theme::rgb(color) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Reset,
    }
}
