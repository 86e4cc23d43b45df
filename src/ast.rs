/// A parsed extraction argument: an ordered list of selector specs,
/// first-applied-first. Produced by the parser, consumed by `compile`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorSpec {
    pub selectors: Vec<SelectorSpec>,
}

/// One tokenize-then-filter stage of an extraction, before regex
/// compilation. The delimiter both splits the incoming string and rejoins
/// the selected tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorSpec {
    pub delimiter: String,
    pub mode: SplitMode,
    pub filter: FilterSpec,
}

/// How a stage tokenizes its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Split on any delimiter character, dropping empty tokens.
    #[default]
    Greedy,
    /// Split on the delimiter as a whole, keeping empty tokens.
    NonGreedy,
}

/// The token-subset policy of a stage.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// `N` or `N:M` - a single field range.
    Range(FieldRange),
    /// `{N,M:K,...}` - a comma-separated list of field ranges.
    Group(Vec<FieldRange>),
    /// `/regexp/` - keep tokens matching the pattern (compiled later).
    Regexp(String),
}

/// An inclusive range of fields `[start, end]`, 1-based. Negative values
/// are relative to the token count and resolved at selection time.
///
/// The default range `{0, 0}` is the zero range, written `0`, `{0}`, or
/// `{0:0}`, and selects the whole untokenized string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldRange {
    pub start: i64,
    pub end: i64,
}

impl FieldRange {
    /// A range selecting exactly one field.
    pub fn single(index: i64) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Whether this is the zero range (select the whole string).
    pub fn is_zero(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}
