use regex::Regex;

use crate::error::{Error, Result};
use crate::extractor::Filter;

/// Keeps tokens matching a regular expression, in original order. Matching
/// is unanchored: a pattern found anywhere in a token selects it.
#[derive(Debug)]
pub struct RegexpFilter {
    pattern: Regex,
}

impl RegexpFilter {
    /// Compile a pattern into a filter. Regex engine errors are surfaced
    /// verbatim.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::compile(format!("invalid regexp {:?}: {}", pattern, e)))?;
        Ok(Self { pattern })
    }
}

impl Filter for RegexpFilter {
    fn select<'a>(&self, fields: &[&'a str], _zero: &'a str) -> Result<Vec<&'a str>> {
        Ok(fields
            .iter()
            .copied()
            .filter(|field| self.pattern.is_match(field))
            .collect())
    }
}
