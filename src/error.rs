use std::fmt;
use std::io;

pub(crate) type HighlightResult<T> = Result<T, Error>;

/// Errors that can occur while registering themes or highlighting code
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred when reading a theme file
    Io(io::Error),

    /// JSON parsing failed when loading a theme.
    Json(serde_json::Error),

    /// An invalid hex color was encountered.
    /// Can only happen when loading a theme.
    #[allow(missing_docs)]
    InvalidHexColor { value: String, reason: String },

    /// A `fontStyle` contained something other than `bold`, `italic` or `underline`.
    InvalidFontStyle(String),

    /// A theme rule could not be compiled and was dropped from its theme.
    #[allow(missing_docs)]
    MalformedRule { token: String, source: Box<Error> },

    /// A theme was not found in the registry.
    ThemeNotFound(String),

    /// A language id was used before being registered.
    LanguageNotFound(String),

    /// Highlighting was requested before any theme was made active.
    NoActiveTheme,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON parsing error: {}", err),
            Error::InvalidHexColor { value, reason } => {
                write!(f, "invalid hex color '{}': {}", value, reason)
            }
            Error::InvalidFontStyle(value) => write!(f, "invalid font style '{}'", value),
            Error::MalformedRule { token, source } => {
                write!(f, "malformed rule for token '{}': {}", token, source)
            }
            Error::ThemeNotFound(name) => write!(f, "theme '{}' not found", name),
            Error::LanguageNotFound(id) => write!(f, "language '{}' not found", id),
            Error::NoActiveTheme => write!(f, "no active theme set"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::MalformedRule { source, .. } => Some(source.as_ref()),
            Error::InvalidHexColor { .. }
            | Error::InvalidFontStyle(_)
            | Error::ThemeNotFound(_)
            | Error::LanguageNotFound(_)
            | Error::NoActiveTheme => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
