mod base;
mod color;
mod compiled;
mod font_style;
mod raw;

pub use base::BaseTheme;
pub use color::Color;
pub use compiled::{EDITOR_BACKGROUND, EDITOR_FOREGROUND, Style, StyleModifier, StyleRule, Theme};
pub use font_style::FontStyle;
pub use raw::{RawRule, RawTheme};
