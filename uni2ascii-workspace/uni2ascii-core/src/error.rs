// src/error.rs

use thiserror::Error;

/// Problems detected while assembling a transliteration table.
///
/// For the embedded table any of these is a defect in the shipped data, not
/// something an input line can trigger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("line {line_no}: expected `<source> <replacement>`, got {line:?}")]
    Malformed { line_no: usize, line: String },

    #[error("empty source sequence (replacement {replacement:?})")]
    EmptySource { replacement: String },

    #[error("duplicate source {source_seq:?}: {first:?} vs {second:?}")]
    Duplicate {
        source_seq: String,
        first: String,
        second: String,
    },
}

/// Raised by [`crate::ResidualPolicy::Error`] when a line still carries
/// codepoints the table could not map.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResidualError {
    #[error("non-ASCII character {ch:?} (U+{code:04X}) at column {column}")]
    NonAscii { ch: char, code: u32, column: usize },
}
