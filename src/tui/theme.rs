//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::types::Gender;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys, panel borders)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Bar color for one gender
    pub fn gender(self, gender: Gender) -> Color {
        match (self, gender) {
            (Self::Dark, Gender::Male) => Color::Blue,
            (Self::Dark, Gender::Female) => Color::LightMagenta,
            (Self::Light, Gender::Male) => Color::Indexed(25),
            (Self::Light, Gender::Female) => Color::Indexed(90), // dark magenta (ANSI 256)
        }
    }

    /// Age histogram bar color
    pub fn age_bar(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Registration trend line color
    pub fn trend(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Anomaly notes (unrecognized tags, folded ages, bad dates)
    pub fn warn(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(208), // orange (ANSI 256)
            Self::Light => Color::Indexed(166), // dark orange (ANSI 256)
        }
    }

    /// Error color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors() {
        let t = Theme::Dark;
        assert_eq!(t.text(), Color::White);
        assert_eq!(t.accent(), Color::Cyan);
        assert_eq!(t.muted(), Color::DarkGray);
        assert_eq!(t.age_bar(), Color::Green);
        assert_eq!(t.trend(), Color::Yellow);
        assert_eq!(t.warn(), Color::Indexed(208));
        assert_eq!(t.error(), Color::Red);
    }

    #[test]
    fn test_light_theme_colors() {
        let t = Theme::Light;
        assert_eq!(t.text(), Color::Black);
        assert_eq!(t.accent(), Color::Indexed(25));
        assert_eq!(t.muted(), Color::Gray);
        assert_eq!(t.age_bar(), Color::Indexed(22));
        assert_eq!(t.trend(), Color::Indexed(130));
        assert_eq!(t.warn(), Color::Indexed(166));
        assert_eq!(t.error(), Color::Indexed(124));
    }

    #[test]
    fn test_gender_colors_are_distinct() {
        for t in [Theme::Dark, Theme::Light] {
            assert_ne!(t.gender(Gender::Male), t.gender(Gender::Female));
        }
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }
}
