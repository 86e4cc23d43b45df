//! Filter implementations for selector stages.
//!
//! Each filter implements `extractor::Filter`: given the tokens of the
//! current stage and the untokenized string, it selects a subset.

mod group;
mod range;
mod regexp;

pub use group::Group;
pub use regexp::RegexpFilter;
