pub mod url;

use thiserror::Error;

use crate::letters::{self, LetterEntry};

pub use url::{letter_from_query, letter_url, query_param, with_param, LETTER_PARAM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("cannot leave the page while doors are opening")]
    Busy,
}

/// Step through the alphabet from the reveal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "prev" => Some(Direction::Prev),
            "next" => Some(Direction::Next),
            _ => None,
        }
    }

    /// Neighbor of `glyph` in this direction, if not at the end of the alphabet.
    pub fn neighbor(self, glyph: char) -> Option<&'static LetterEntry> {
        match self {
            Direction::Prev => letters::previous(glyph),
            Direction::Next => letters::next(glyph),
        }
    }
}
