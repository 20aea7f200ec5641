use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, HighlightResult};
use crate::themes::BaseTheme;
use crate::themes::compiled::Theme;

fn default_inherit() -> bool {
    true
}

/// A single entry of the `rules` list of a theme document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawRule {
    /// Dot-separated scope selector, `""` applies to every token
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(
        rename = "fontStyle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub font_style: Option<String>,
}

/// Theme document as written in configuration
///
/// ```json
/// {
///   "base": "vs",
///   "inherit": true,
///   "rules": [{ "token": "keyword", "foreground": "0000ff" }],
///   "colors": { "editor.foreground": "#24292e" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTheme {
    pub base: BaseTheme,
    #[serde(default = "default_inherit")]
    pub inherit: bool,
    #[serde(default)]
    pub rules: Vec<RawRule>,
    /// UI slot name -> hex color
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl RawTheme {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> HighlightResult<Self> {
        let file = File::open(path)?;
        let theme = serde_json::from_reader(BufReader::new(file))?;
        Ok(theme)
    }

    pub fn load_from_str(content: &str) -> HighlightResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Compile this raw theme, returning the problems found along the way.
    ///
    /// Malformed rules are not part of the compiled theme.
    pub fn compile(self) -> (Theme, Vec<Error>) {
        Theme::from_raw_theme(self)
    }
}
