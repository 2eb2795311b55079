//! Terminal color theme system
//!
//! Adaptive color palettes for dark and light terminal backgrounds.
//! Auto-detects via the COLORFGBG env var, with a manual override through
//! the --light flag or HK_LIGHT_BG=1.

use ratatui::style::Color;

/// Color theme for the terminal UI.
/// UI code uses theme colors instead of hardcoded Color:: values.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (footers, instructions)
    pub text_dim: Color,

    /// Default border color
    pub border: Color,
    /// Informational border (help, settings)
    pub border_accent: Color,

    /// Section headers, accent text
    pub accent: Color,
    /// Positive (healing, victory)
    pub good: Color,
    /// Negative (damage, the enemy)
    pub bad: Color,

    // Field terrain
    pub field_player: Color,
    pub field_water: Color,
    pub field_bridge: Color,
    pub field_event: Color,
    pub field_floor: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_accent: Color::Cyan,
            accent: Color::Cyan,
            good: Color::Green,
            bad: Color::Red,
            field_player: Color::Yellow,
            field_water: Color::Blue,
            field_bridge: Color::Gray,
            field_event: Color::Cyan,
            field_floor: Color::DarkGray,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            accent: Color::Blue,
            good: Color::Green,
            bad: Color::Red,
            field_player: Color::Magenta,
            field_water: Color::Blue,
            field_bridge: Color::DarkGray,
            field_event: Color::Blue,
            field_floor: Color::Gray,
        }
    }

    /// Auto-detect the terminal background and pick a palette
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    fn is_light_background() -> bool {
        if std::env::var("HK_LIGHT_BG").map(|v| v == "1").unwrap_or(false) {
            return true;
        }
        // COLORFGBG is "fg;bg"; backgrounds 7 and 15 are light
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| v.rsplit(';').next().map(str::to_string))
            .map(|bg| bg == "7" || bg == "15")
            .unwrap_or(false)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
