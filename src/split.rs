//! Tokenizers for selector stages.

use crate::ast::SplitMode;

impl SplitMode {
    /// Tokenize `s` with this mode's splitter.
    pub fn split<'a>(self, s: &'a str, delimiter: &str) -> Vec<&'a str> {
        match self {
            SplitMode::Greedy => greedy(s, delimiter),
            SplitMode::NonGreedy => non_greedy(s, delimiter),
        }
    }
}

/// Split on any character of the delimiter string, dropping empty tokens
/// so that delimiter runs collapse.
///
/// `":foo:"` split by `":"` produces `["foo"]`; the result can be empty.
pub fn greedy<'a>(s: &'a str, delimiter: &str) -> Vec<&'a str> {
    s.split(|c: char| delimiter.contains(c))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Split on the delimiter as one literal unit, keeping empty tokens.
///
/// `":foo:"` split by `":"` produces `["", "foo", ""]`.
pub fn non_greedy<'a>(s: &'a str, delimiter: &str) -> Vec<&'a str> {
    s.split(delimiter).collect()
}
