use std::collections::BTreeMap;
use std::fmt;

use crate::registry::HighlightedCode;

#[derive(Debug, PartialEq, Clone, Default)]
/// A renderer that will output proper HTML code
pub struct HtmlRenderer {
    /// Any metadata we want to add as `<code>` data-* attribute
    pub other_metadata: BTreeMap<String, String>,
}

impl HtmlRenderer {
    /// Renders the given highlighted code to an HTML string, escaping characters.
    ///
    /// Each span only carries the CSS properties that differ from the theme's default
    /// style, which is set once on the `<pre>`.
    pub fn render(&self, highlighted: &HighlightedCode) -> String {
        let default_style = &highlighted.default_style;

        let mut content = String::with_capacity(highlighted.tokens.len() * 16);
        for tok in &highlighted.tokens {
            content.push_str(&tok.as_html(default_style));
        }

        let mut data_attrs = format!(
            r#"data-lang="{}" data-theme="{}""#,
            HtmlEscaped(&highlighted.language),
            HtmlEscaped(&highlighted.theme_name)
        );
        for (key, value) in &self.other_metadata {
            // lowercase and replace non-alphanumeric chars with hyphens
            let slugified_key: String = key
                .to_lowercase()
                .chars()
                .map(|c| {
                    if c.is_alphanumeric() || c == '-' {
                        c
                    } else {
                        '-'
                    }
                })
                .collect();
            data_attrs.push_str(&format!(
                r#" data-{slugified_key}="{}""#,
                HtmlEscaped(value)
            ));
        }

        let mut pre_style = default_style.foreground.as_css_color_property();
        // The editor background only shows through where the default style has none
        let background = match highlighted.editor_background {
            Some(editor_bg) if default_style.background.is_transparent() => editor_bg,
            _ => default_style.background,
        };
        if !background.is_transparent() {
            pre_style.push(' ');
            pre_style.push_str(&background.as_css_bg_color_property());
        }
        for font_attr in default_style.font_style.css_attributes() {
            pre_style.push(' ');
            pre_style.push_str(font_attr);
        }

        format!(
            r#"<pre class="bolt-highlight" style="{pre_style}"><code {data_attrs}>{content}</code></pre>"#
        )
    }
}

// From syntect
pub(crate) struct HtmlEscaped<'a>(pub &'a str);
impl fmt::Display for HtmlEscaped<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Because the internet is always right, turns out there's not that many
        // characters to escape: http://stackoverflow.com/questions/7381974
        let Self(s) = *self;
        let pile_o_bits = s;
        let mut last = 0;
        for (i, ch) in s.bytes().enumerate() {
            match ch as char {
                '<' | '>' | '&' | '\'' | '"' => {
                    fmt.write_str(&pile_o_bits[last..i])?;
                    let s = match ch as char {
                        '>' => "&gt;",
                        '<' => "&lt;",
                        '&' => "&amp;",
                        '\'' => "&#39;",
                        '"' => "&quot;",
                        _ => unreachable!(),
                    };
                    fmt.write_str(s)?;
                    last = i + 1;
                }
                _ => {}
            }
        }

        if last < s.len() {
            fmt.write_str(&pile_o_bits[last..])?;
        }
        Ok(())
    }
}
