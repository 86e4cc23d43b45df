//! Compiled extraction pipelines.
//!
//! An `Extractor` is the compiled form of one extraction argument: an
//! ordered list of selectors, each of which tokenizes the current string,
//! filters the tokens, and rejoins them with its own delimiter. Compilation
//! happens once per argument; extraction is a pure fold over the stages.

use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::ast::{FilterSpec, SelectorSpec, SplitMode};
use crate::error::Result;
use crate::filters::{Group, RegexpFilter};
use crate::parser;

/// A filter selects a subset of tokens. Filters that can reproduce the
/// original untokenized string receive it as `zero`.
///
/// The `Result` is reserved for filters that can fail during evaluation;
/// every current filter is total.
pub trait Filter {
    fn select<'a>(&self, fields: &[&'a str], zero: &'a str) -> Result<Vec<&'a str>>;
}

/// One tokenize-filter-rejoin stage of an extraction.
pub struct Selector {
    delimiter: String,
    mode: SplitMode,
    filter: Box<dyn Filter>,
}

impl Selector {
    /// Apply this stage to a string.
    pub fn extract(&self, s: &str) -> Result<String> {
        let fields = self.mode.split(s, &self.delimiter);
        let selected = self.filter.select(&fields, s)?;
        Ok(selected.join(&self.delimiter))
    }
}

/// A compiled extraction argument: selectors applied in order, each stage
/// feeding the next. Immutable once compiled and reused across all lines.
pub struct Extractor {
    selectors: Vec<Selector>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor").finish_non_exhaustive()
    }
}

impl Extractor {
    /// Run the pipeline over one line, already stripped of its terminator.
    pub fn extract(&self, line: &str) -> Result<String> {
        let mut current = line.to_string();
        for selector in &self.selectors {
            current = selector.extract(&current)?;
        }
        Ok(current)
    }
}

/// Compile one extraction argument into an `Extractor`.
///
/// Parsing and regexp compilation both happen here; a returned extractor
/// can no longer fail on any input line.
pub fn compile(arg: &str) -> Result<Extractor> {
    let spec = parser::parse_extractor(arg)?;
    let selectors = spec
        .selectors
        .into_iter()
        .map(compile_selector)
        .collect::<Result<Vec<_>>>()?;
    Ok(Extractor { selectors })
}

fn compile_selector(spec: SelectorSpec) -> Result<Selector> {
    let filter: Box<dyn Filter> = match spec.filter {
        FilterSpec::Range(range) => Box::new(range),
        FilterSpec::Group(ranges) => Box::new(Group::new(ranges)),
        FilterSpec::Regexp(pattern) => Box::new(RegexpFilter::new(&pattern)?),
    };
    Ok(Selector {
        delimiter: spec.delimiter,
        mode: spec.mode,
        filter,
    })
}

/// The outputs of every extractor for one input line, in argument order.
pub struct Extraction {
    pub fields: Vec<String>,
}

impl Extraction {
    /// Whether printing this extraction would write nothing at all.
    ///
    /// Separators between extractors count as output, so two empty fields
    /// still print a line; only a single empty field (or none) is blank.
    pub fn is_blank(&self) -> bool {
        self.fields.len() <= 1 && self.fields.iter().all(|f| f.is_empty())
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in &self.fields {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}

impl Serialize for Extraction {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.fields.len()))?;
        for field in &self.fields {
            seq.serialize_element(field)?;
        }
        seq.end()
    }
}

/// Apply every extractor to one line.
pub fn extract_line(extractors: &[Extractor], line: &str) -> Result<Extraction> {
    let fields = extractors
        .iter()
        .map(|ex| ex.extract(line))
        .collect::<Result<Vec<_>>>()?;
    Ok(Extraction { fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(arg: &str, line: &str) -> String {
        compile(arg).unwrap().extract(line).unwrap()
    }

    /// Run several extraction arguments over several lines, collecting the
    /// printed lines (blank extractions produce none).
    fn run(args: &[&str], lines: &[&str]) -> Vec<String> {
        let extractors: Vec<Extractor> = args.iter().map(|a| compile(a).unwrap()).collect();
        lines
            .iter()
            .filter_map(|line| {
                let extraction = extract_line(&extractors, line).unwrap();
                if extraction.is_blank() {
                    None
                } else {
                    Some(extraction.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn basic_fields() {
        assert_eq!(
            run(
                &["1", "3"],
                &[
                    "1 2 3 4 5",
                    "foo bar baz fizz pizza",
                    "foo    bar     baz",
                ]
            ),
            vec!["1 3", "foo baz", "foo baz"]
        );
    }

    #[test]
    fn multi_fields() {
        assert_eq!(
            run(&["{1,2,-1}"], &["1 2 3 4 5 6 7 8 9 10", "foo bar baz fizz"]),
            vec!["1 2 10", "foo bar fizz"]
        );
    }

    #[test]
    fn custom_delimiter_group() {
        assert_eq!(extract("a{1,2,3}", "fooabuzzaflorbadiss"), "fooabuzzaflorb");
        assert_eq!(extract("a{1,2,3}", "1a2a3a4a5"), "1a2a3");
    }

    #[test]
    fn single_character_delimiters() {
        assert_eq!(
            run(&["a1", "b1", "c1", "d2"], &["abcdefgh"]),
            vec!["bcdefgh a ab efgh"]
        );
    }

    #[test]
    fn numeric_range() {
        assert_eq!(extract("{1:3}", "1 2 3 4 5"), "1 2 3");
    }

    #[test]
    fn zero_range_returns_whole_string() {
        assert_eq!(
            run(&["{0}", "{0:0}", "0"], &["a b c"]),
            vec!["a b c a b c a b c"]
        );
    }

    #[test]
    fn zero_range_preserves_delimiters() {
        assert_eq!(
            run(&[":{0}", ":{0:0}", ":0"], &[":a::b::c:"]),
            vec![":a::b::c: :a::b::c: :a::b::c:"]
        );
    }

    #[test]
    fn impossible_field_yields_no_output() {
        assert!(run(&["123456789"], &["a b c d e f g"]).is_empty());
        assert!(run(&["-123456789"], &["a b c d e f g"]).is_empty());
    }

    #[test]
    fn out_of_range_end_is_clamped() {
        assert_eq!(extract("{-5:100}", "a b c d e f g"), "c d e f g");
    }

    #[test]
    fn regexp_filters_tokens() {
        assert_eq!(
            run(&["/-/--1", " /-/"], &["a-b c d e-f", "foobar baz big-turtle"]),
            vec!["f a-b e-f", "turtle big-turtle"]
        );
    }

    #[test]
    fn regexp_escaped_forward_slash() {
        assert_eq!(
            run(&[" /\\w\\// -1/1"], &["foo/bar baz/ /what"]),
            vec!["baz"]
        );
    }

    #[test]
    fn regexp_escaped_backslash() {
        assert_eq!(
            run(&[" /\\w\\\\/ -1\\1"], &["foo\\bar baz\\ \\what"]),
            vec!["baz"]
        );
    }

    #[test]
    fn regexp_backslash_delimiter() {
        assert_eq!(
            run(&["\\\\/\\//\\-1/1"], &["baz/\\foo/bar\\what"]),
            vec!["foo"]
        );
    }

    #[test]
    fn greedy_group_collapses_delimiters() {
        assert_eq!(extract(":{3}", "foo:::bar:::baz:::fizz"), "baz");
    }

    #[test]
    fn non_greedy_group_keeps_empty_fields() {
        assert_eq!(extract(":{?4}", "foo:::bar:::baz:::fizz"), "bar");
    }

    #[test]
    fn compile_bad_relative_range() {
        let err = compile("{-2:-3}").unwrap_err().in_extract(1, "{-2:-3}");
        assert_eq!(
            err.to_string(),
            "error parsing extract 1: \"{-2:-3}\": cannot parse \"-2:-3\": start > end is invalid: -2 > -3"
        );
    }

    #[test]
    fn compile_bad_absolute_range() {
        let err = compile("{1,3:1}").unwrap_err().in_extract(1, "{1,3:1}");
        assert_eq!(
            err.to_string(),
            "error parsing extract 1: \"{1,3:1}\": cannot parse \"3:1\": start > end is invalid: 3 > 1"
        );
    }

    #[test]
    fn compile_invalid_regexp() {
        assert!(compile(" /[bad/").is_err());
    }

    #[test]
    fn empty_argument_is_identity() {
        assert_eq!(extract("", "a b c"), "a b c");
    }

    #[test]
    fn extraction_blankness() {
        let one_empty = Extraction {
            fields: vec![String::new()],
        };
        assert!(one_empty.is_blank());

        // Separators count as output, matching the written-bytes gate.
        let two_empty = Extraction {
            fields: vec![String::new(), String::new()],
        };
        assert!(!two_empty.is_blank());
        assert_eq!(two_empty.to_string(), " ");

        let none = Extraction { fields: Vec::new() };
        assert!(none.is_blank());
    }

    #[test]
    fn extraction_serializes_as_array() {
        let extraction = Extraction {
            fields: vec!["a".to_string(), "b c".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&extraction).unwrap(),
            r#"["a","b c"]"#
        );
    }
}
