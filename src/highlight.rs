use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::renderers::html::HtmlEscaped;
use crate::scope::Scope;
use crate::themes::{Style, Theme};
use crate::tokenizer::Token;

/// A span of source with its resolved style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedText {
    /// Byte span within the source
    pub span: Range<usize>,
    pub text: String,
    pub style: Style,
}

impl HighlightedText {
    /// Renders this highlighted text as an HTML span element.
    /// Only the properties that differ from `default_style` are written: the enclosing
    /// element is expected to carry the default style itself.
    pub fn as_html(&self, default_style: &Style) -> String {
        let escaped = HtmlEscaped(self.text.as_str());
        if self.style == *default_style {
            return format!("<span>{escaped}</span>");
        }

        let mut css_style = String::with_capacity(30);
        if self.style.foreground != default_style.foreground {
            css_style.push_str(&self.style.foreground.as_css_color_property());
        }
        if self.style.background != default_style.background
            && !self.style.background.is_transparent()
        {
            css_style.push_str(&self.style.background.as_css_bg_color_property());
        }
        for font_attr in self
            .style
            .font_style
            .css_attributes_over(default_style.font_style)
        {
            css_style.push_str(font_attr);
        }

        if css_style.is_empty() {
            format!("<span>{escaped}</span>")
        } else {
            format!(r#"<span style="{}">{escaped}</span>"#, css_style)
        }
    }

    /// Appends this text to `out` wrapped in 24-bit ANSI escapes.
    pub fn as_ansi(&self, default_style: &Style, out: &mut String) {
        let mut params = Vec::with_capacity(3);

        if self.style.foreground != default_style.foreground {
            let mut fg = String::new();
            self.style.foreground.as_ansi_fg(&mut fg);
            params.push(fg);
        }
        if self.style.background != default_style.background
            && !self.style.background.is_transparent()
        {
            let mut bg = String::new();
            self.style.background.as_ansi_bg(&mut bg);
            params.push(bg);
        }
        params.extend(self.style.font_style.ansi_parameters().map(str::to_owned));

        if params.is_empty() {
            out.push_str(&self.text);
        } else {
            out.push_str("\x1b[");
            out.push_str(&params.join(";"));
            out.push('m');
            out.push_str(&self.text);
            out.push_str("\x1b[0m");
        }
    }
}

/// Options for the styling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightOptions {
    /// Merge adjacent spans that resolved to the same style
    pub merge_same_style_tokens: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            merge_same_style_tokens: true,
        }
    }
}

impl HighlightOptions {
    pub fn merge_same_style_tokens(mut self, value: bool) -> Self {
        self.merge_same_style_tokens = value;
        self
    }
}

/// Applies a theme to a token stream.
///
/// One highlighter is one render pass: resolution is pure, so styles are memoized
/// per scope for as long as the highlighter lives.
#[derive(Debug, Clone)]
pub struct Highlighter<'r> {
    theme: &'r Theme,
    base: Option<&'r Theme>,
    cache: HashMap<Scope, Style>,
}

impl<'r> Highlighter<'r> {
    pub fn new(theme: &'r Theme, base: Option<&'r Theme>) -> Self {
        Highlighter {
            theme,
            base,
            cache: HashMap::new(),
        }
    }

    /// The style of a scope, resolved once per pass
    pub fn style_for(&mut self, scope: &Scope) -> Style {
        if let Some(&cached_style) = self.cache.get(scope) {
            return cached_style;
        }

        let style = self.theme.resolve(scope, self.base);
        self.cache.insert(scope.clone(), style);
        style
    }

    pub fn default_style(&mut self) -> Style {
        self.style_for(&Scope::default())
    }

    /// Resolves every token and hands each `(span, style)` pair to `sink` in order.
    pub fn style_tokens(
        &mut self,
        tokens: impl IntoIterator<Item = Token>,
        mut sink: impl FnMut(Range<usize>, Style),
    ) {
        for token in tokens {
            let style = self.style_for(&token.scope);
            sink(token.span, style);
        }
    }

    /// Resolves every token against `content`.
    ///
    /// Tokens whose span is out of range or not on char boundaries are dropped.
    pub fn highlight_tokens(
        &mut self,
        content: &str,
        tokens: impl IntoIterator<Item = Token>,
        options: HighlightOptions,
    ) -> Vec<HighlightedText> {
        let mut styled: Vec<(Range<usize>, Style)> = Vec::new();

        self.style_tokens(tokens, |span, style| {
            if content.get(span.clone()).is_none() {
                log::warn!(
                    "Ignoring token {span:?}: not a valid span of a {} byte source",
                    content.len()
                );
                return;
            }
            if options.merge_same_style_tokens {
                if let Some((prev_span, prev_style)) = styled.last_mut() {
                    if *prev_style == style && prev_span.end == span.start {
                        prev_span.end = span.end;
                        return;
                    }
                }
            }
            styled.push((span, style));
        });

        styled
            .into_iter()
            .filter_map(|(span, style)| {
                let text = content.get(span.clone())?.to_string();
                Some(HighlightedText { span, text, style })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::themes::{BaseTheme, Color, FontStyle, StyleModifier, StyleRule};
    use crate::tokenizer::{BoltTokenizer, Tokenizer};

    fn color(hex: &str) -> Color {
        Color::from_hex(hex).unwrap()
    }

    fn test_theme() -> Theme {
        Theme::new(
            BaseTheme::Dark,
            false,
            vec![
                StyleRule::new(
                    "",
                    StyleModifier {
                        foreground: Some(color("#D4D4D4")),
                        background: Some(color("#1E1E1E")),
                        font_style: None,
                    },
                ),
                StyleRule::new(
                    "string.comment",
                    StyleModifier {
                        foreground: Some(color("#6A9955")),
                        background: None,
                        font_style: Some(FontStyle::ITALIC),
                    },
                ),
                StyleRule::new(
                    "keyword",
                    StyleModifier {
                        foreground: Some(color("#569CD6")),
                        background: None,
                        font_style: Some(FontStyle::BOLD),
                    },
                ),
            ],
            BTreeMap::new(),
        )
    }

    #[test]
    fn test_style_for() {
        let test_theme = test_theme();
        let mut highlighter = Highlighter::new(&test_theme, None);

        let comment_style = highlighter.style_for(&Scope::new("string.comment"));
        assert_eq!(comment_style.foreground, color("#6A9955"));
        assert_eq!(comment_style.font_style, FontStyle::ITALIC);

        let keyword_style = highlighter.style_for(&Scope::new("keyword.constant"));
        assert_eq!(keyword_style.foreground, color("#569CD6"));
        assert_eq!(keyword_style.font_style, FontStyle::BOLD);

        let unknown_style = highlighter.style_for(&Scope::new("unknown"));
        assert_eq!(unknown_style, test_theme.default_style(None));
        assert_eq!(highlighter.cache.len(), 3);

        // Cached results are the same as fresh ones
        assert_eq!(highlighter.style_for(&Scope::new("keyword.constant")), keyword_style);
        assert_eq!(highlighter.cache.len(), 3);
    }

    #[test]
    fn test_highlight_tokens() {
        let test_theme = test_theme();
        let mut highlighter = Highlighter::new(&test_theme, None);
        let content = "if hello\n// hi";
        let tokens = BoltTokenizer.tokenize(content);

        let highlighted = highlighter.highlight_tokens(
            content,
            tokens,
            HighlightOptions::default().merge_same_style_tokens(false),
        );
        let texts: Vec<_> = highlighted.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["if", " ", "hello", "\n", "// hi"]);
        assert_eq!(highlighted[0].style.foreground, color("#569CD6"));
        assert_eq!(highlighted[2].style.foreground, color("#D4D4D4"));
        assert_eq!(highlighted[4].style.foreground, color("#6A9955"));
        assert_eq!(highlighted[4].span, 9..14);
    }

    #[test]
    fn test_merge_same_style_tokens() {
        let test_theme = test_theme();
        let mut highlighter = Highlighter::new(&test_theme, None);
        let content = "if hello\n// hi";
        let tokens = BoltTokenizer.tokenize(content);

        let highlighted =
            highlighter.highlight_tokens(content, tokens, HighlightOptions::default());
        let texts: Vec<_> = highlighted.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["if", " hello\n", "// hi"]);
        assert_eq!(highlighted[1].span, 2..9);
    }

    #[test]
    fn test_invalid_spans_are_dropped() {
        let test_theme = test_theme();
        let mut highlighter = Highlighter::new(&test_theme, None);
        let content = "été if";
        let tokens = vec![
            Token::new(0..1, "keyword"),
            Token::new(0..2, ""),
            Token::new(2..5, ""),
            Token::new(6..8, "keyword"),
            Token::new(8..20, "keyword"),
        ];

        let highlighted =
            highlighter.highlight_tokens(content, tokens, HighlightOptions::default());
        let texts: Vec<_> = highlighted.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["été", "if"]);
        assert_eq!(highlighted[0].span, 0..5);
        assert_eq!(highlighted[1].style.foreground, color("#569CD6"));
    }

    #[test]
    fn test_style_tokens_sink() {
        let test_theme = test_theme();
        let mut highlighter = Highlighter::new(&test_theme, None);
        let mut seen = Vec::new();
        highlighter.style_tokens(BoltTokenizer.tokenize("let x"), |span, style| {
            seen.push((span, style.font_style))
        });
        assert_eq!(
            seen,
            vec![
                (0..3, FontStyle::BOLD),
                (3..4, FontStyle::empty()),
                (4..5, FontStyle::empty())
            ]
        );
    }

    #[test]
    fn test_as_html_empty() {
        let default_style = test_theme().default_style(None);
        let ht = HighlightedText {
            span: 0..5,
            text: "hello".to_string(),
            style: default_style,
        };
        let res = ht.as_html(&default_style);
        insta::assert_snapshot!(res, @"<span>hello</span>");
    }

    #[test]
    fn test_as_html_content_escape() {
        let default_style = test_theme().default_style(None);
        let ht = HighlightedText {
            span: 0..17,
            text: "<script></script>".to_string(),
            style: default_style,
        };
        let res = ht.as_html(&default_style);
        insta::assert_snapshot!(res, @"<span>&lt;script&gt;&lt;/script&gt;</span>");
    }

    #[test]
    fn test_as_html_completely_different() {
        let default_style = test_theme().default_style(None);
        let ht = HighlightedText {
            span: 0..5,
            text: "hello".to_string(),
            style: Style {
                foreground: color("#FFFF00"),
                background: color("#FFFF00"),
                font_style: FontStyle::ITALIC,
            },
        };
        let res = ht.as_html(&default_style);
        insta::assert_snapshot!(res, @r#"<span style="color: #FFFF00;background-color: #FFFF00;font-style: italic;">hello</span>"#);
    }

    #[test]
    fn test_as_html_skips_transparent_background() {
        let default_style = test_theme().default_style(None);
        let ht = HighlightedText {
            span: 0..5,
            text: "hello".to_string(),
            style: Style {
                background: Color::TRANSPARENT,
                ..default_style
            },
        };
        let res = ht.as_html(&default_style);
        insta::assert_snapshot!(res, @"<span>hello</span>");
    }

    #[test]
    fn test_as_ansi() {
        let default_style = test_theme().default_style(None);
        let mut out = String::new();
        HighlightedText {
            span: 0..2,
            text: "if".to_string(),
            style: Style {
                foreground: color("#569CD6"),
                background: default_style.background,
                font_style: FontStyle::BOLD,
            },
        }
        .as_ansi(&default_style, &mut out);
        HighlightedText {
            span: 2..3,
            text: " ".to_string(),
            style: default_style,
        }
        .as_ansi(&default_style, &mut out);
        assert_eq!(out, "\x1b[38;2;86;156;214;1mif\x1b[0m ");
    }
}
