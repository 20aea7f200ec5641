use serde::{Deserialize, Serialize};

use crate::error::{Error, HighlightResult};

/// RGBA color with 8-bit components
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

fn parse_hex_component(hex: &str, original: &str) -> HighlightResult<u8> {
    // from_str_radix accepts a leading `+`, which is not a hex digit
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHexColor {
            value: original.to_string(),
            reason: format!("invalid hex component '{}'", hex),
        });
    }
    u8::from_str_radix(hex, 16).map_err(|_| Error::InvalidHexColor {
        value: original.to_string(),
        reason: format!("invalid hex component '{}'", hex),
    })
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Used for spans whose background the theme leaves unset
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Outputs the hex value for that colour.
    #[inline]
    pub fn as_hex(&self) -> String {
        if self.a < 255 {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        } else {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        }
    }

    #[inline]
    pub(crate) fn as_css_color_property(&self) -> String {
        format!("color: {};", self.as_hex())
    }

    #[inline]
    pub(crate) fn as_css_bg_color_property(&self) -> String {
        format!("background-color: {};", self.as_hex())
    }

    /// Appends the `38;2;r;g;b` SGR parameters
    pub(crate) fn as_ansi_fg(&self, out: &mut String) {
        out.push_str(&format!("38;2;{};{};{}", self.r, self.g, self.b));
    }

    /// Appends the `48;2;r;g;b` SGR parameters
    pub(crate) fn as_ansi_bg(&self, out: &mut String) {
        out.push_str(&format!("48;2;{};{};{}", self.r, self.g, self.b));
    }

    /// Creates a Color from a hex string, with or without a leading `#`.
    ///
    /// Theme rules write 6 digits (`0000ff`) but the short `RGB`/`RGBA` and the
    /// `RRGGBBAA` forms used by editor colors are accepted too.
    pub fn from_hex(hex: &str) -> HighlightResult<Self> {
        let original = hex;
        let hex = hex.trim().strip_prefix('#').unwrap_or(hex.trim());

        if !hex.is_ascii() {
            return Err(Error::InvalidHexColor {
                value: original.to_string(),
                reason: "non-ASCII characters".to_string(),
            });
        }

        // Short forms repeat each digit: F -> FF
        let (digits, width) = match hex.len() {
            3 | 4 => (hex.len(), 1),
            6 | 8 => (hex.len() / 2, 2),
            len => {
                return Err(Error::InvalidHexColor {
                    value: original.to_string(),
                    reason: format!("invalid length {}", len),
                });
            }
        };

        let mut channels = [255u8; 4];
        for (i, channel) in channels.iter_mut().take(digits).enumerate() {
            let value = parse_hex_component(&hex[i * width..(i + 1) * width], original)?;
            *channel = if width == 1 { value * 17 } else { value };
        }

        let [r, g, b, a] = channels;
        Ok(Color { r, g, b, a })
    }
}
