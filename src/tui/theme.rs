// Theme system for the TUI
//
// Two built-in themes, switchable at runtime. Each theme names a color for
// every UI role so components never hardcode ratatui colors.

use ratatui::style::Color;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Parse a configured theme name; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    /// Toggle between the two themes
    pub fn toggle(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub title: Color,
    pub highlight: Color,
    pub status_bar: Color,

    pub selected_bg: Color,
    pub selected_fg: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Marker for values not yet confirmed by the server
    pub syncing: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(16, 20, 28),
            foreground: Color::Rgb(205, 214, 224),
            muted: Color::Rgb(110, 120, 135),
            border: Color::Rgb(60, 70, 85),
            title: Color::Rgb(97, 175, 239),
            highlight: Color::Rgb(86, 182, 194),
            status_bar: Color::Rgb(140, 150, 165),
            selected_bg: Color::Rgb(40, 48, 60),
            selected_fg: Color::Rgb(229, 233, 240),
            success: Color::Rgb(87, 199, 133),
            warning: Color::Rgb(229, 192, 123),
            error: Color::Rgb(224, 108, 117),
            syncing: Color::Rgb(229, 192, 123),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(248, 249, 250),
            foreground: Color::Rgb(40, 44, 52),
            muted: Color::Rgb(130, 135, 145),
            border: Color::Rgb(180, 186, 195),
            title: Color::Rgb(1, 102, 255),
            highlight: Color::Rgb(9, 134, 165),
            status_bar: Color::Rgb(90, 95, 105),
            selected_bg: Color::Rgb(220, 228, 240),
            selected_fg: Color::Rgb(20, 24, 32),
            success: Color::Rgb(22, 140, 77),
            warning: Color::Rgb(176, 126, 10),
            error: Color::Rgb(200, 50, 60),
            syncing: Color::Rgb(176, 126, 10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_name_is_dark() {
        assert_eq!(ThemeKind::from_name("solarized"), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_name("LIGHT"), ThemeKind::Light);
    }

    #[test]
    fn test_toggle_flips() {
        assert_eq!(ThemeKind::Dark.toggle(), ThemeKind::Light);
        assert_eq!(ThemeKind::Light.toggle(), ThemeKind::Dark);
    }
}
