use crate::registry::HighlightedCode;

/// Terminal renderer via ANSI escape codes. Requires a terminal that supports truecolor
///
/// Properties equal to the theme's default style are left to the terminal.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Render to the terminal with ANSI escape codes
    pub fn render(&self, highlighted: &HighlightedCode) -> String {
        let mut output =
            String::with_capacity(highlighted.tokens.iter().map(|t| t.text.len()).sum());

        for token in &highlighted.tokens {
            token.as_ansi(&highlighted.default_style, &mut output);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn test_render_bolt_snippet() {
        let registry = Registry::builtin().unwrap();
        let highlighted = registry.highlight("let a = \"x\";", "bolt").unwrap();

        let ansi = TerminalRenderer.render(&highlighted);
        assert_eq!(
            ansi,
            "\x1b[38;2;0;0;255mlet\x1b[0m \x1b[38;2;36;41;46ma\x1b[0m = \x1b[38;2;3;47;98m\"x\"\x1b[0m;"
        );
    }
}
