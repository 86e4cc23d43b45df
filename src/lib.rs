//! fex is a field extractor for line-oriented text, similar to cut or awk
//! but with less friction for the common cases of either.
//!
//! Each command-line argument compiles to an [`Extractor`]: a pipeline of
//! selectors that repeatedly tokenize a line by a delimiter, pick tokens by
//! index, range, or regexp, and rejoin the picks. Compilation happens once,
//! before any input is read; extraction never fails afterwards.
//!
//! ```
//! let extractor = fex::compile("{1,-1}").unwrap();
//! assert_eq!(extractor.extract("a b c d").unwrap(), "a d");
//! ```

pub mod ast;
pub mod error;
pub mod extractor;
pub mod filters;
pub mod parser;
pub mod split;

pub use ast::FieldRange;
pub use error::{Error, Result};
pub use extractor::{Extraction, Extractor, Filter, Selector, compile, extract_line};
