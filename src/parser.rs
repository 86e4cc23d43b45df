//! Extraction argument parser.
//!
//! Arguments are scanned from their last character backward to the first:
//! each stage's delimiter sits to the left of the selector it delimits, and
//! group/regexp spans close on the right. The scanner works over a
//! random-access codepoint buffer with explicit index bookkeeping so that
//! multi-byte text stays correct. Field-range specs read left-to-right and
//! are parsed with winnow.

use winnow::ModalResult;
use winnow::ascii::digit1;
use winnow::combinator::{alt, opt};
use winnow::prelude::*;

use crate::ast::{ExtractorSpec, FieldRange, FilterSpec, SelectorSpec, SplitMode};
use crate::error::{Error, Result};

/// Parse one extraction argument into an ordered list of selector specs.
///
/// Selectors are discovered right-to-left and reversed before returning, so
/// the result reads first-applied-first.
pub fn parse_extractor(arg: &str) -> Result<ExtractorSpec> {
    let chars: Vec<char> = arg.chars().collect();
    let mut selectors = Vec::new();
    let mut pos = chars.len() as isize - 1;

    while pos >= 0 {
        let (mode, filter, at) = parse_selector(&chars, pos)?;
        let (delimiter, next) = take_delimiter(&chars, at);
        selectors.push(SelectorSpec {
            delimiter,
            mode,
            filter,
        });
        pos = next;
    }

    selectors.reverse();
    Ok(ExtractorSpec { selectors })
}

/// Parse the selector ending at `pos`, dispatching on its final character.
///
/// Returns the split mode, the filter spec, and the index of the character
/// immediately left of the selector (the delimiter candidate), which may
/// be -1 when the selector reaches the start of the argument.
fn parse_selector(chars: &[char], pos: isize) -> Result<(SplitMode, FilterSpec, isize)> {
    match chars[pos as usize] {
        '}' => parse_group_selector(chars, pos),
        '/' => {
            let (pattern, at) = scan_regexp(chars, pos);
            Ok((SplitMode::Greedy, FilterSpec::Regexp(pattern), at))
        }
        c if c.is_ascii_digit() => parse_simple_selector(chars, pos),
        c => Err(Error::compile(format!("unexpected {:?} in selector", c))),
    }
}

/// Parse a group selector `{...}` or `{?...}` closing at `close`.
fn parse_group_selector(chars: &[char], close: isize) -> Result<(SplitMode, FilterSpec, isize)> {
    let open = rfind(chars, close, |c| c == '{');
    if open == -1 {
        return Err(Error::compile(format!(
            "extractor has unmatched '}}' at character {}",
            close + 1
        )));
    }

    let body = span(chars, open + 1, close);
    let (mode, body) = match body.strip_prefix('?') {
        Some(rest) => (SplitMode::NonGreedy, rest),
        None => (SplitMode::Greedy, body.as_str()),
    };

    let ranges = body
        .split(',')
        .map(|spec| {
            parse_field_range(spec)
                .map_err(|e| Error::compile(format!("cannot parse {:?}: {}", spec, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((mode, FilterSpec::Group(ranges), open - 1))
}

/// Parse a simple numeric selector (a digit run with an optional leading
/// `-`) ending at `pos`.
fn parse_simple_selector(chars: &[char], pos: isize) -> Result<(SplitMode, FilterSpec, isize)> {
    let mut start = rfind(chars, pos, |c| !c.is_ascii_digit());
    if start > -1 && chars[start as usize] == '-' {
        start -= 1;
    }
    let digits = span(chars, start + 1, pos + 1);
    let range = parse_field_range(&digits)?;
    Ok((SplitMode::Greedy, FilterSpec::Range(range), start))
}

/// Collect a regexp body closing at `close` by scanning backward for an
/// unescaped `/`.
///
/// A closing candidate preceded by an odd run of backslashes is escaped:
/// the slash is folded into the pattern (with half the backslashes) and the
/// scan continues. An even run means the slash is unescaped and the run
/// itself is left as the delimiter. If the string is exhausted first, the
/// pattern is whatever was collected.
///
/// Chunks are discovered right-to-left and reassembled in original order.
/// Returns the pattern text and the delimiter-candidate index.
fn scan_regexp(chars: &[char], close: isize) -> (String, isize) {
    let mut chunks: Vec<String> = Vec::new();
    let mut i = close;
    let mut start = rfind(chars, i, |c| c == '/');

    while start != -1 {
        let chunk = span(chars, start + 1, i);
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        i = start;

        let escaped = start > 1 && chars[(start - 1) as usize] == '\\';
        if !escaped {
            i -= 1;
            break;
        }
        i = rfind(chars, start, |c| c != '\\') + 1;
        let escapes = start - i;
        if escapes % 2 == 0 {
            // Unescaped after all; the backslash run is the delimiter.
            break;
        }
        chunks.push(span(chars, start - (escapes - 1) / 2, start + 1));

        start = rfind(chars, i, |c| c == '/');
    }

    chunks.reverse();
    (chunks.concat(), i)
}

/// Consume the stage delimiter at `pos`, resolving a preceding backslash
/// as an escape. With nothing left of the selector the delimiter defaults
/// to a single space.
///
/// Returns the delimiter and the scan position for the next selector.
fn take_delimiter(chars: &[char], pos: isize) -> (String, isize) {
    if pos > 0 && chars[(pos - 1) as usize] == '\\' {
        let delim = unescape_delimiter(chars[pos as usize]);
        (delim.to_string(), pos - 2)
    } else if pos >= 0 {
        (chars[pos as usize].to_string(), pos - 1)
    } else {
        (" ".to_string(), pos - 1)
    }
}

/// Backslash escape table for delimiters. Unlisted characters map to
/// themselves, so `\\` stays a backslash and `\,` is a comma.
fn unescape_delimiter(c: char) -> char {
    match c {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        'z' => '\0',
        'e' => '\u{1B}',
        other => other,
    }
}

/// Scan backward from `from - 1` for a character matching `pred`.
/// Returns -1 when none matches.
fn rfind(chars: &[char], from: isize, pred: impl Fn(char) -> bool) -> isize {
    let mut q = from - 1;
    while q >= 0 {
        if pred(chars[q as usize]) {
            return q;
        }
        q -= 1;
    }
    -1
}

/// The codepoint span `[from, to)` as an owned string.
fn span(chars: &[char], from: isize, to: isize) -> String {
    chars[from as usize..to as usize].iter().collect()
}

/// Parse one field-range spec: `N`, `N:M`, `:M`, `N:`, or `:`.
///
/// No colon means a single field. An empty side defaults to the first
/// field (left) or the last field (right); both sides empty is the zero
/// range. Same-signed nonzero ranges must be ascending, and zero can only
/// pair with zero.
pub fn parse_field_range(spec: &str) -> Result<FieldRange> {
    let range = field_range
        .parse(spec)
        .map_err(|_| Error::compile(format!("invalid field spec {:?}", spec)))?;
    validate(range)
}

fn validate(range: FieldRange) -> Result<FieldRange> {
    let (start, end) = (range.start, range.end);
    if start > end && ((start < 0 && end < 0) || (start > 0 && end > 0)) {
        Err(Error::compile(format!(
            "start > end is invalid: {} > {}",
            start, end
        )))
    } else if (start == 0 || end == 0) && start != end {
        Err(Error::compile(format!(
            "start or end cannot be 0 when the other is not 0: {} and {}",
            start, end
        )))
    } else {
        Ok(range)
    }
}

fn field_range(input: &mut &str) -> ModalResult<FieldRange> {
    alt((range_spec, index.map(FieldRange::single))).parse_next(input)
}

fn range_spec(input: &mut &str) -> ModalResult<FieldRange> {
    let start = opt(index).parse_next(input)?;
    ':'.parse_next(input)?;
    let end = opt(index).parse_next(input)?;

    Ok(match (start, end) {
        (None, None) => FieldRange::default(),
        (start, end) => FieldRange {
            start: start.unwrap_or(1),
            end: end.unwrap_or(-1),
        },
    })
}

/// A signed integer index.
fn index(input: &mut &str) -> ModalResult<i64> {
    (opt('-'), digit1)
        .try_map(|(neg, digits): (Option<char>, &str)| {
            digits
                .parse::<i64>()
                .map(|value| if neg.is_some() { -value } else { value })
        })
        .parse_next(input)
}
