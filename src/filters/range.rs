use crate::ast::FieldRange;
use crate::error::Result;
use crate::extractor::Filter;

impl Filter for FieldRange {
    fn select<'a>(&self, fields: &[&'a str], zero: &'a str) -> Result<Vec<&'a str>> {
        if self.is_zero() {
            // The zero range bypasses tokenization entirely.
            return Ok(vec![zero]);
        }

        let resolved = resolve(*self, fields.len());
        let Some((start, end)) = bounds(resolved, fields.len()) else {
            return Ok(Vec::new());
        };
        Ok(fields[start..end].to_vec())
    }
}

/// Absolutize a possibly-relative range against the token count.
///
/// A relative index `r < 0` over `n` tokens maps to `n + 1 + r` (1-based).
/// The mapping is not bounds-checked; it can yield non-positive positions,
/// which `bounds` later treats as selecting nothing. When absolutization
/// leaves `end` before `start` (a mixed-sign range), `end` is clamped up to
/// `start`.
fn resolve(range: FieldRange, len: usize) -> FieldRange {
    let mut resolved = FieldRange {
        start: absolutize(range.start, len),
        end: absolutize(range.end, len),
    };
    if resolved.end < resolved.start {
        resolved.end = resolved.start;
    }
    resolved
}

/// Map one relative index to a 1-based absolute position, unchecked.
fn absolutize(rel: i64, len: usize) -> i64 {
    if rel < 0 { len as i64 + 1 + rel } else { rel }
}

/// Convert a resolved range to 0-based slice bounds over `len` tokens.
///
/// Returns `None` for ranges that select nothing: non-positive positions,
/// inverted ranges, or a start past the last token. The end is clamped to
/// the token count.
fn bounds(range: FieldRange, len: usize) -> Option<(usize, usize)> {
    if range.start <= 0 || range.end <= 0 || range.start > range.end {
        return None;
    }
    let start = (range.start - 1) as usize;
    if start > len {
        return None;
    }
    let end = (range.end as usize).min(len);
    Some((start, end))
}
