//! Syntax highlighting for the Bolt language, the way a browser code editor does it.
//!
//! A [`Tokenizer`] splits source text into spans tagged with a hierarchical [`Scope`],
//! each scope is resolved against a [`Theme`] into a concrete [`Style`], and a renderer
//! turns the styled spans into HTML or ANSI output.
//!
//! ```
//! use bolt_highlight::{HtmlRenderer, Registry};
//!
//! let registry = Registry::builtin().unwrap();
//! let highlighted = registry.highlight("let x = 42;", "bolt").unwrap();
//! let html = HtmlRenderer::default().render(&highlighted);
//! assert!(html.starts_with("<pre"));
//! ```

mod error;
mod highlight;
mod registry;
mod renderers;
pub mod scope;
mod themes;
mod tokenizer;

pub use error::Error;
pub use highlight::{HighlightOptions, HighlightedText, Highlighter};
pub use registry::{BOLT_LANGUAGE, BOLT_THEME, HighlightedCode, Registry};
pub use renderers::{html::HtmlRenderer, terminal::TerminalRenderer};
pub use scope::Scope;
pub use themes::{
    BaseTheme, Color, EDITOR_BACKGROUND, EDITOR_FOREGROUND, FontStyle, RawRule, RawTheme, Style,
    StyleModifier, StyleRule, Theme,
};
pub use tokenizer::{BoltTokenizer, PlainTokenizer, Token, Tokenizer, scopes};
