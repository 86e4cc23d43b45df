use crate::ast::FieldRange;
use crate::error::Result;
use crate::extractor::Filter;

/// A group of field ranges, such as `{1}`, `{1,4:5}`, or `{-2:-1}`.
/// Selections of the member ranges are concatenated in spec order. The
/// group does not distinguish greedy from non-greedy tokenizing; that
/// belongs to the selector.
pub struct Group {
    ranges: Vec<FieldRange>,
}

impl Group {
    pub fn new(ranges: Vec<FieldRange>) -> Self {
        Self { ranges }
    }
}

impl Filter for Group {
    fn select<'a>(&self, fields: &[&'a str], zero: &'a str) -> Result<Vec<&'a str>> {
        let mut selected = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            selected.extend(range.select(fields, zero)?);
        }
        Ok(selected)
    }
}
