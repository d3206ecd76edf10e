//! Theme system for TUI colors and styles

use iocraft::prelude::Color;

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Repository attribute colors
    pub starred: Color,
    pub visibility_private: Color,
    pub language: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub name_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            starred: Color::Yellow,
            visibility_private: Color::Red,
            language: Color::Cyan,

            border: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            highlight: Color::Blue,
            name_color: Color::Cyan,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}
