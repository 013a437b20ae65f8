//! Theme definitions for the TUI
//!
//! Dark and light palettes. The default is "dark"; "light" can be chosen
//! via config file or CVIEW_THEME.

use ratatui::style::Color;

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeName::Light,
            _ => ThemeName::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: ThemeName,

    // Base colors
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,

    // Application types
    pub active: Color,
    pub archived: Color,

    // UI elements
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub checked: Color,
    pub error: Color,
    pub warning: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,

            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            active: Color::Rgb(0, 200, 0),
            archived: Color::Rgb(140, 140, 140),

            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,
            header_bg: Color::Rgb(40, 80, 120),
            header_fg: Color::White,
            checked: Color::Rgb(80, 160, 255),
            error: Color::Rgb(255, 80, 80),
            warning: Color::Rgb(255, 180, 0),
            accent: Color::Cyan,
        }
    }

    /// Create a light theme
    /// Uses darker, more saturated colors for visibility on light backgrounds
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,

            fg: Color::Black,
            muted: Color::Rgb(120, 120, 120),
            border: Color::Rgb(120, 120, 120),
            border_focused: Color::Rgb(0, 100, 180),

            active: Color::Rgb(0, 140, 0),
            archived: Color::Rgb(100, 100, 100),

            selected_bg: Color::Rgb(200, 220, 255),
            selected_fg: Color::Black,
            header_bg: Color::Rgb(180, 200, 230),
            header_fg: Color::Black,
            checked: Color::Rgb(0, 80, 180),
            error: Color::Rgb(200, 0, 0),
            warning: Color::Rgb(200, 120, 0),
            accent: Color::Rgb(0, 100, 180),
        }
    }

    /// Create theme from name string
    pub fn from_name(name: &str) -> Self {
        match ThemeName::parse(name) {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Color for an application type value
    pub fn application_type_color(&self, value: &str) -> Color {
        if value.eq_ignore_ascii_case("active") {
            self.active
        } else if value.eq_ignore_ascii_case("archived") {
            self.archived
        } else {
            self.fg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let dark = Theme::from_name("dark");
        assert_eq!(dark.name, ThemeName::Dark);

        let light = Theme::from_name("LIGHT");
        assert_eq!(light.name, ThemeName::Light);

        // Unknown defaults to dark
        let unknown = Theme::from_name("solarized");
        assert_eq!(unknown.name, ThemeName::Dark);
    }

    #[test]
    fn test_application_type_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.application_type_color("active"), theme.active);
        assert_eq!(theme.application_type_color("Archived"), theme.archived);
        assert_eq!(theme.application_type_color("other"), theme.fg);
    }
}
