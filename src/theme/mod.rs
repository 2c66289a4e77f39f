//! Theming for the terminal UI

mod palettes;

pub use palettes::THEME_NAMES;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::transition::Phase;

/// A color theme for the terminal UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub cursor: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

impl Theme {
    /// Foreground for body text in a fade phase
    ///
    /// Terminals have no opacity, so fading sections are drawn muted.
    pub fn body_fg(&self, phase: Phase) -> Color {
        if phase.is_fading() { self.fg_muted } else { self.fg_primary }
    }

    /// Foreground for an accent in a fade phase
    pub fn accent_fg(&self, phase: Phase) -> Color {
        if phase.is_fading() { self.fg_muted } else { self.accent_primary }
    }
}
