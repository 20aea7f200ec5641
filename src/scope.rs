//! Hierarchical token scopes such as `invalid.illegal` or `brackethighlighter.curly`.
//!
//! A scope is an ordered list of segments. A selector written for `invalid` applies to
//! `invalid.illegal` because its segments are a prefix of the candidate's segments.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An immutable dot-separated scope.
///
/// Segments are kept exactly as written: `a..b` has three segments, the middle one empty.
/// The empty string is the empty scope, which is a prefix of every scope.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Scope {
    segments: Vec<Box<str>>,
}

impl Scope {
    /// Create a new scope from a dot-separated string. Never fails.
    pub fn new(s: &str) -> Scope {
        let s = s.trim();
        if s.is_empty() {
            return Scope::default();
        }

        Scope {
            segments: s.split('.').map(Box::from).collect(),
        }
    }

    /// The segments of this scope, outermost first
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| &**s)
    }

    /// Number of segments
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if this scope's segments are a prefix of `other`'s segments.
    /// The empty scope is a prefix of everything.
    #[inline]
    pub fn is_prefix_of(&self, other: &Scope) -> bool {
        self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a == b)
    }
}

/// Whether a rule written for `selector` applies to `candidate`.
#[inline]
pub fn matches(candidate: &Scope, selector: &Scope) -> bool {
    selector.is_prefix_of(candidate)
}

/// How specific a selector is: its number of segments.
#[inline]
pub fn specificity(selector: &Scope) -> usize {
    selector.len()
}

impl From<&str> for Scope {
    fn from(s: &str) -> Self {
        Scope::new(s)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope(\"{self}\")")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Scope::new(&s))
    }
}
