use std::fmt;

use serde::{Deserialize, Serialize};

use crate::themes::Color;

/// The editor theme a custom theme is layered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BaseTheme {
    #[default]
    #[serde(rename = "vs")]
    Light,
    #[serde(rename = "vs-dark")]
    Dark,
    #[serde(rename = "hc-black")]
    HighContrast,
}

impl BaseTheme {
    pub const ALL: [BaseTheme; 3] = [BaseTheme::Light, BaseTheme::Dark, BaseTheme::HighContrast];

    /// The name the base theme is registered under
    pub fn name(&self) -> &'static str {
        match self {
            BaseTheme::Light => "vs",
            BaseTheme::Dark => "vs-dark",
            BaseTheme::HighContrast => "hc-black",
        }
    }

    /// Text color used when nothing in a theme sets the foreground
    pub fn fallback_foreground(&self) -> Color {
        match self {
            BaseTheme::Light => Color::BLACK,
            BaseTheme::Dark => Color::rgb(0xD4, 0xD4, 0xD4),
            BaseTheme::HighContrast => Color::WHITE,
        }
    }

    pub(crate) fn builtin_definition(&self) -> &'static str {
        match self {
            BaseTheme::Light => include_str!("builtin/vs.json"),
            BaseTheme::Dark => include_str!("builtin/vs-dark.json"),
            BaseTheme::HighContrast => include_str!("builtin/hc-black.json"),
        }
    }
}

impl fmt::Display for BaseTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
