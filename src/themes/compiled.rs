use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, HighlightResult};
use crate::scope::{Scope, matches, specificity};
use crate::themes::font_style::FontStyle;
use crate::themes::raw::{RawRule, RawTheme};
use crate::themes::{BaseTheme, Color};

/// Name of the editor color used as the default text color
pub const EDITOR_FOREGROUND: &str = "editor.foreground";
/// Name of the editor color painted behind the whole text area
pub const EDITOR_BACKGROUND: &str = "editor.background";

/// A complete style with foreground, background colors and font styling
///
/// This is what gets applied to a rendered token: every field has a concrete value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Style {
    pub foreground: Color,
    pub background: Color,
    pub font_style: FontStyle,
}

impl Default for Style {
    fn default() -> Style {
        Style {
            foreground: Color::BLACK,
            background: Color::TRANSPARENT,
            font_style: FontStyle::empty(),
        }
    }
}

/// A style with optional values, as written in a theme rule
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct StyleModifier {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font_style: Option<FontStyle>,
}

impl StyleModifier {
    /// Fields set in `other` replace ours.
    pub fn overlay(self, other: &StyleModifier) -> StyleModifier {
        StyleModifier {
            foreground: other.foreground.or(self.foreground),
            background: other.background.or(self.background),
            font_style: other.font_style.or(self.font_style),
        }
    }

    /// Fills the fields left unset from `style`.
    pub fn apply_to(&self, style: &Style) -> Style {
        Style {
            foreground: self.foreground.unwrap_or(style.foreground),
            background: self.background.unwrap_or(style.background),
            font_style: self.font_style.unwrap_or(style.font_style),
        }
    }
}

// `inherit` is accepted by VSCode-like themes and means "not set"
fn parse_color(value: Option<&str>) -> HighlightResult<Option<Color>> {
    match value {
        None | Some("inherit") => Ok(None),
        Some(s) => Color::from_hex(s).map(Some),
    }
}

impl TryFrom<&RawRule> for StyleModifier {
    type Error = Error;

    fn try_from(rule: &RawRule) -> Result<Self, Self::Error> {
        Ok(Self {
            foreground: parse_color(rule.foreground.as_deref())?,
            background: parse_color(rule.background.as_deref())?,
            font_style: rule.font_style.as_deref().map(FontStyle::parse).transpose()?,
        })
    }
}

/// One entry of a theme's rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub scope: Scope,
    pub style_modifier: StyleModifier,
}

impl StyleRule {
    pub fn new(scope: impl Into<Scope>, style_modifier: StyleModifier) -> Self {
        Self {
            scope: scope.into(),
            style_modifier,
        }
    }
}

/// A compiled theme.
///
/// Immutable once built: changing styles means building and registering another theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    base: BaseTheme,
    inherit_from_base: bool,
    /// In table order, never sorted
    rules: Vec<StyleRule>,
    editor_colors: BTreeMap<String, Color>,
    /// Fields of the last empty-scope rule
    baseline: StyleModifier,
}

impl Theme {
    pub fn new(
        base: BaseTheme,
        inherit_from_base: bool,
        rules: Vec<StyleRule>,
        editor_colors: BTreeMap<String, Color>,
    ) -> Self {
        let baseline = rules
            .iter()
            .rev()
            .find(|rule| rule.scope.is_empty())
            .map(|rule| rule.style_modifier)
            .unwrap_or_default();

        Self {
            base,
            inherit_from_base,
            rules,
            editor_colors,
            baseline,
        }
    }

    /// Compiles a theme document. Rules and editor colors that fail to parse are
    /// left out of the theme and returned alongside it.
    pub fn from_raw_theme(raw_theme: RawTheme) -> (Self, Vec<Error>) {
        let mut problems = Vec::new();

        let mut rules = Vec::with_capacity(raw_theme.rules.len());
        for raw_rule in &raw_theme.rules {
            match StyleModifier::try_from(raw_rule) {
                Ok(style_modifier) => {
                    rules.push(StyleRule::new(raw_rule.token.as_str(), style_modifier))
                }
                Err(err) => problems.push(Error::MalformedRule {
                    token: raw_rule.token.clone(),
                    source: Box::new(err),
                }),
            }
        }

        let mut editor_colors = BTreeMap::new();
        for (name, value) in raw_theme.colors {
            match Color::from_hex(&value) {
                Ok(color) => {
                    editor_colors.insert(name, color);
                }
                Err(err) => problems.push(err),
            }
        }

        (
            Theme::new(
                raw_theme.base,
                raw_theme.inherit,
                rules,
                editor_colors,
            ),
            problems,
        )
    }

    pub fn base(&self) -> BaseTheme {
        self.base
    }

    pub fn inherit_from_base(&self) -> bool {
        self.inherit_from_base
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn editor_colors(&self) -> &BTreeMap<String, Color> {
        &self.editor_colors
    }

    pub fn editor_color(&self, name: &str) -> Option<Color> {
        self.editor_colors.get(name).copied()
    }

    /// The style used when neither the theme nor its base set a field.
    /// The text color is `editor.foreground` when the theme defines it.
    pub fn hard_defaults(&self) -> Style {
        Style {
            foreground: self
                .editor_color(EDITOR_FOREGROUND)
                .unwrap_or_else(|| self.base.fallback_foreground()),
            background: Color::TRANSPARENT,
            font_style: FontStyle::empty(),
        }
    }

    /// The most specific matching rule. Among equally specific rules the one
    /// furthest down the table wins.
    pub fn winning_rule(&self, scope: &Scope) -> Option<&StyleRule> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| matches(scope, &rule.scope))
            .max_by_key(|(idx, rule)| (specificity(&rule.scope), *idx))
            .map(|(_, rule)| rule)
    }

    /// Resolves the style of a token with the given scope.
    ///
    /// Only the winning rule and the empty-scope baseline contribute; less specific
    /// matching rules do not. Fields still unset come from `base` when this theme
    /// inherits and a base is given, otherwise from the hard defaults. The base is
    /// resolved on its own and never consults a base of its own.
    pub fn resolve(&self, scope: &Scope, base: Option<&Theme>) -> Style {
        let modifier = match self.winning_rule(scope) {
            Some(rule) => self.baseline.overlay(&rule.style_modifier),
            None => self.baseline,
        };

        match base {
            Some(base) if self.inherit_from_base => modifier.apply_to(&base.resolve(scope, None)),
            _ => modifier.apply_to(&self.hard_defaults()),
        }
    }

    /// The style of text no rule targets specifically
    pub fn default_style(&self, base: Option<&Theme>) -> Style {
        self.resolve(&Scope::default(), base)
    }

    /// Loads one of the bundled base themes
    pub fn builtin_base(base: BaseTheme) -> HighlightResult<Self> {
        let raw = RawTheme::load_from_str(base.builtin_definition())?;
        let (theme, problems) = Theme::from_raw_theme(raw);
        debug_assert!(problems.is_empty(), "{problems:?}");
        Ok(theme)
    }
}
