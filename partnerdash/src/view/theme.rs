//! Theme-aware color palette for PartnerDash.
//!
//! Semantic colors derived from the current theme, plus conversions for the
//! hashed avatar colors and the metric palette.

use iced::{Color, Theme};

use partnerdash_common::pastel_color;

/// Get colors from the theme's extended palette.
pub struct ThemeColors<'a> {
    theme: &'a Theme,
}

impl<'a> ThemeColors<'a> {
    /// Create a new ThemeColors from a theme reference.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    // ========================================================================
    // Text Colors
    // ========================================================================

    /// Primary text color.
    pub fn text(&self) -> Color {
        self.palette().background.base.text
    }

    /// Muted/secondary text color.
    pub fn text_muted(&self) -> Color {
        let text = self.text();
        let bg = self.palette().background.base.color;
        Color::from_rgb(
            text.r * 0.6 + bg.r * 0.4,
            text.g * 0.6 + bg.g * 0.4,
            text.b * 0.6 + bg.b * 0.4,
        )
    }

    // ========================================================================
    // Semantic Colors
    // ========================================================================

    pub fn danger(&self) -> Color {
        self.palette().danger.base.color
    }

    pub fn danger_text(&self) -> Color {
        self.palette().danger.base.text
    }

    // ========================================================================
    // Card/Container Colors
    // ========================================================================

    /// Card background color.
    pub fn card_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.12, 0.12, 0.14)
        } else {
            Color::from_rgb(1.0, 1.0, 1.0)
        }
    }

    /// Default border color.
    pub fn border(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.25, 0.25, 0.3)
        } else {
            Color::from_rgb(0.8, 0.8, 0.82)
        }
    }

    // ========================================================================
    // Chart Colors
    // ========================================================================

    /// Chart background color.
    pub fn chart_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.08, 0.08, 0.1)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Chart grid lines.
    pub fn chart_grid(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.2, 0.25)
        } else {
            Color::from_rgb(0.85, 0.85, 0.88)
        }
    }

    /// Chart axis labels.
    pub fn chart_label(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.5, 0.5, 0.5)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    /// Chart tooltip background.
    pub fn chart_tooltip_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgba(0.0, 0.0, 0.0, 0.85)
        } else {
            Color::from_rgba(1.0, 1.0, 1.0, 0.95)
        }
    }

    /// Hover cursor line.
    pub fn chart_highlight(&self) -> Color {
        if self.is_dark() {
            Color::from_rgba(1.0, 1.0, 1.0, 0.35)
        } else {
            Color::from_rgba(0.0, 0.0, 0.0, 0.3)
        }
    }

    /// Check if the current theme is dark.
    pub fn is_dark(&self) -> bool {
        self.palette().is_dark
    }
}

/// Convenience function to create ThemeColors.
pub fn colors(theme: &Theme) -> ThemeColors<'_> {
    ThemeColors::new(theme)
}

/// Convert an 8-bit RGB triple.
pub fn rgb(color: [u8; 3]) -> Color {
    Color::from_rgb8(color[0], color[1], color[2])
}

/// Stable avatar background for an identifier.
pub fn avatar_color(seed: &str) -> Color {
    rgb(pastel_color(seed).to_rgb())
}
