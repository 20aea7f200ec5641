use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, HighlightResult};
use crate::highlight::{HighlightOptions, HighlightedText, Highlighter};
use crate::scope::Scope;
use crate::themes::{BaseTheme, Color, EDITOR_BACKGROUND, RawTheme, Style, Theme};
use crate::tokenizer::{BoltTokenizer, PlainTokenizer, Tokenizer};

/// The language id of Bolt
pub const BOLT_LANGUAGE: &str = "bolt";
/// The name the bundled Bolt theme is registered under by [`Registry::builtin`]
pub const BOLT_THEME: &str = "bolt";

const BOLT_THEME_DEFINITION: &str = include_str!("themes/builtin/bolt.json");

/// Highlighted code with language, theme, and styled spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    /// The requested language
    pub language: String,
    /// The theme that was active when highlighting started
    pub theme_name: String,
    /// The style of text that no rule targets, what renderers diff against
    pub default_style: Style,
    /// The theme's `editor.background`, if it has one
    pub editor_background: Option<Color>,
    /// The styled spans, covering the whole source in order
    pub tokens: Vec<HighlightedText>,
}

/// The main struct of the crate.
///
/// Holds the languages, their tokenizers and the themes, and is responsible for
/// highlighting a text. It is not responsible for actually rendering it.
///
/// Themes can be registered through a shared reference while other threads resolve:
/// a registration publishes a whole compiled theme at once, so readers see either the
/// previous theme or the new one.
pub struct Registry {
    // language id -> tokenizer
    languages: HashMap<String, Box<dyn Tokenizer>>,
    // name given by user -> theme
    themes: papaya::HashMap<String, Arc<Theme>>,
    active_theme: RwLock<Option<String>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            languages: HashMap::new(),
            themes: papaya::HashMap::new(),
            active_theme: RwLock::new(None),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut languages: Vec<_> = self.languages.keys().collect();
        languages.sort();
        f.debug_struct("Registry")
            .field("languages", &languages)
            .field("themes", &self.theme_names())
            .field("active_theme", &*self.read_active_theme())
            .finish()
    }
}

impl Registry {
    /// A registry with the three base themes, the Bolt language and the Bolt theme,
    /// which is made active.
    pub fn builtin() -> HighlightResult<Self> {
        let mut registry = Registry::default();
        for base in BaseTheme::ALL {
            registry.register_theme(base.name(), Theme::builtin_base(base)?);
        }
        registry.add_theme_from_str(BOLT_THEME, BOLT_THEME_DEFINITION)?;

        registry.register_language(BOLT_LANGUAGE);
        registry.register_tokenizer(BOLT_LANGUAGE, BoltTokenizer)?;
        registry.set_active_theme(BOLT_THEME)?;
        Ok(registry)
    }

    /// Registers a language. Until a tokenizer is registered for it, its text
    /// is highlighted as a single unscoped span.
    pub fn register_language(&mut self, id: &str) {
        self.languages
            .entry(id.to_owned())
            .or_insert_with(|| Box::new(PlainTokenizer));
    }

    /// Sets the tokenizer of an already registered language, replacing any previous one.
    pub fn register_tokenizer(
        &mut self,
        id: &str,
        tokenizer: impl Tokenizer + 'static,
    ) -> HighlightResult<()> {
        let slot = self
            .languages
            .get_mut(id)
            .ok_or_else(|| Error::LanguageNotFound(id.to_string()))?;
        *slot = Box::new(tokenizer);
        Ok(())
    }

    /// Checks whether the given language id has been registered
    pub fn contains_language(&self, id: &str) -> bool {
        self.languages.contains_key(id)
    }

    /// Registers a compiled theme under `name`, replacing any theme with that name.
    pub fn register_theme(&self, name: &str, theme: Theme) {
        let themes = self.themes.pin();
        if themes.insert(name.to_owned(), Arc::new(theme)).is_some() {
            log::debug!("Replaced theme '{name}'");
        }
    }

    /// Compiles and registers a theme document.
    ///
    /// Rules that cannot be compiled are reported here once and left out of the theme.
    pub fn add_theme(&self, name: &str, raw_theme: RawTheme) {
        let (theme, problems) = raw_theme.compile();
        for problem in problems {
            log::warn!("Theme '{name}': {problem}, ignoring it");
        }
        self.register_theme(name, theme);
    }

    /// Parses the JSON document and adds it as a theme.
    pub fn add_theme_from_str(&self, name: &str, content: &str) -> HighlightResult<()> {
        let raw_theme = RawTheme::load_from_str(content)?;
        self.add_theme(name, raw_theme);
        Ok(())
    }

    /// Reads the file and adds it as a theme.
    pub fn add_theme_from_path(&self, name: &str, path: impl AsRef<Path>) -> HighlightResult<()> {
        let raw_theme = RawTheme::load_from_file(path)?;
        self.add_theme(name, raw_theme);
        Ok(())
    }

    /// Checks whether the given theme is available in the registry
    pub fn contains_theme(&self, name: &str) -> bool {
        self.themes.pin().contains_key(name)
    }

    /// The theme currently registered under `name`
    pub fn theme(&self, name: &str) -> Option<Arc<Theme>> {
        self.themes.pin().get(name).cloned()
    }

    /// Names of all registered themes, sorted
    pub fn theme_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.pin().iter().map(|(k, _)| k.clone()).collect();
        names.sort();
        names
    }

    /// The theme `theme` inherits from, if it inherits and its base is registered
    pub fn base_for(&self, theme: &Theme) -> Option<Arc<Theme>> {
        if !theme.inherit_from_base() {
            return None;
        }
        let base = self.theme(theme.base().name());
        if base.is_none() {
            log::debug!(
                "Base theme '{}' is not registered, using defaults instead",
                theme.base()
            );
        }
        base
    }

    /// Makes `name` the theme used by [`Registry::highlight`].
    pub fn set_active_theme(&self, name: &str) -> HighlightResult<()> {
        if !self.contains_theme(name) {
            return Err(Error::ThemeNotFound(name.to_string()));
        }
        *self
            .active_theme
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(name.to_owned());
        log::debug!("Active theme is now '{name}'");
        Ok(())
    }

    fn read_active_theme(&self) -> std::sync::RwLockReadGuard<'_, Option<String>> {
        self.active_theme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The active theme's name and a snapshot of it
    pub fn active_theme(&self) -> HighlightResult<(String, Arc<Theme>)> {
        let name = self.read_active_theme().clone().ok_or(Error::NoActiveTheme)?;
        let theme = self
            .theme(&name)
            .ok_or_else(|| Error::ThemeNotFound(name.clone()))?;
        Ok((name, theme))
    }

    /// Resolves a single scope against the named theme and its base.
    pub fn resolve(&self, scope: &Scope, theme_name: &str) -> HighlightResult<Style> {
        let theme = self
            .theme(theme_name)
            .ok_or_else(|| Error::ThemeNotFound(theme_name.to_string()))?;
        let base = self.base_for(&theme);
        Ok(theme.resolve(scope, base.as_deref()))
    }

    /// Highlights `content` with the default options.
    pub fn highlight(&self, content: &str, lang: &str) -> HighlightResult<HighlightedCode> {
        self.highlight_with_options(content, lang, HighlightOptions::default())
    }

    /// The main entry point for the actual usage.
    ///
    /// This returns the raw output of the tokenizer + theme matching against the
    /// active theme. It's up to you to use a provided renderer or your own afterwards.
    pub fn highlight_with_options(
        &self,
        content: &str,
        lang: &str,
        options: HighlightOptions,
    ) -> HighlightResult<HighlightedCode> {
        let tokenizer = self
            .languages
            .get(lang)
            .ok_or_else(|| Error::LanguageNotFound(lang.to_string()))?;

        // Theme swaps during this pass only affect the next one
        let (theme_name, theme) = self.active_theme()?;
        let base = self.base_for(&theme);

        let mut highlighter = Highlighter::new(&theme, base.as_deref());
        let tokens = highlighter.highlight_tokens(content, tokenizer.tokenize(content), options);

        Ok(HighlightedCode {
            language: lang.to_string(),
            theme_name,
            default_style: highlighter.default_style(),
            editor_background: theme.editor_color(EDITOR_BACKGROUND),
            tokens,
        })
    }
}
