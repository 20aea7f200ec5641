//! Turn [`HighlightedCode`](crate::HighlightedCode) into something a user can look at.
//!
//! Renderers never resolve styles themselves: every span arrives with its resolved style.

pub mod html;
pub mod terminal;
