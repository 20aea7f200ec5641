use serde::{Deserialize, Serialize};

use crate::error::{Error, HighlightResult};

#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug,
)]
pub struct FontStyle {
    bits: u8,
}

impl FontStyle {
    /// Bold font style
    pub const BOLD: Self = Self { bits: 1 };
    /// Underline font style
    pub const UNDERLINE: Self = Self { bits: 2 };
    /// Italic font style
    pub const ITALIC: Self = Self { bits: 4 };

    /// Returns an empty set of flags
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Returns `true` if no flags are currently stored
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if all of the flags in `other` are contained within `self`
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Inserts the specified flags in-place
    pub fn insert(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    /// Parses a theme `fontStyle` value such as `"bold italic underline"`.
    ///
    /// An empty value, `normal` or `none` means no style. Tokens are matched exactly.
    pub fn parse(font_style_str: &str) -> HighlightResult<Self> {
        let mut font_style = Self::empty();
        for part in font_style_str.split_whitespace() {
            match part {
                "bold" => font_style.insert(FontStyle::BOLD),
                "italic" => font_style.insert(FontStyle::ITALIC),
                "underline" => font_style.insert(FontStyle::UNDERLINE),
                "normal" | "none" => {}
                _ => return Err(Error::InvalidFontStyle(font_style_str.to_string())),
            }
        }
        Ok(font_style)
    }

    /// CSS declarations for the flags that are set
    pub(crate) fn css_attributes(&self) -> impl Iterator<Item = &'static str> {
        self.css_attributes_over(FontStyle::empty())
    }

    /// CSS declarations turning text already styled with `outer` into this style.
    /// Flags set in `outer` but not here are switched off explicitly.
    pub(crate) fn css_attributes_over(&self, outer: FontStyle) -> impl Iterator<Item = &'static str> {
        let this = *self;
        [
            (FontStyle::BOLD, "font-weight: bold;", "font-weight: normal;"),
            (FontStyle::ITALIC, "font-style: italic;", "font-style: normal;"),
            (FontStyle::UNDERLINE, "text-decoration: underline;", "text-decoration: none;"),
        ]
        .into_iter()
        .filter(move |(flag, _, _)| this.contains(*flag) != outer.contains(*flag))
        .map(move |(flag, on, off)| if this.contains(flag) { on } else { off })
    }

    /// SGR parameters for the flags that are set
    pub(crate) fn ansi_parameters(&self) -> impl Iterator<Item = &'static str> {
        [
            (FontStyle::BOLD, "1"),
            (FontStyle::ITALIC, "3"),
            (FontStyle::UNDERLINE, "4"),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, sgr)| sgr)
    }
}
