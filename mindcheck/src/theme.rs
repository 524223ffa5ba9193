//! Color theme system for mindcheck.
//!
//! Two built-in themes:
//!
//! - `dark` uses the ANSI 16 colors so it works on any terminal.
//! - `catppuccin_mocha` uses the Catppuccin Mocha palette in RGB and needs truecolor.

use ratatui::style::Color;

/// All color values used across the UI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border of the focused card or panel.
    pub border_active: Color,
    pub border_inactive: Color,

    // Title bar
    pub title_bar_bg: Color,
    pub title_bar_fg: Color,

    // Body text
    pub text: Color,
    /// Secondary text: hints, unselected options, descriptions.
    pub muted: Color,
    /// Background of the highlighted survey question.
    pub highlight_bg: Color,
    /// Check mark and chosen option on answered questions.
    pub answered: Color,

    // Results
    pub risk_low: Color,
    pub risk_moderate: Color,
    /// High-risk advisory emphasis.
    pub alert: Color,

    // Chat
    pub user_label: Color,
    pub assistant_label: Color,
    /// Error placeholders and the survey failure banner.
    pub error: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_normal: Color,
    pub status_mode_insert: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            title_bar_bg: Color::Blue,
            title_bar_fg: Color::White,

            text: Color::Reset,
            muted: Color::DarkGray,
            highlight_bg: Color::Black,
            answered: Color::Green,

            risk_low: Color::Green,
            risk_moderate: Color::Yellow,
            alert: Color::Red,

            user_label: Color::Cyan,
            assistant_label: Color::Magenta,
            error: Color::Red,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
        }
    }

    /// Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let crust = Color::Rgb(17, 17, 27); // #11111b
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            title_bar_bg: blue,
            title_bar_fg: crust,

            text,
            muted: overlay1,
            highlight_bg: surface0,
            answered: green,

            risk_low: green,
            risk_moderate: yellow,
            alert: red,

            user_label: teal,
            assistant_label: mauve,
            error: red,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
