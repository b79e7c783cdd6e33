// src/lib.rs

//! Convert unicode characters that resemble ASCII into their ASCII equivalent.
//!
//! ```
//! use uni2ascii_core::uni2ascii;
//!
//! assert_eq!(uni2ascii("Café\n"), "Cafe\n");
//! ```
//!
//! Only visual and typographic look-alikes are covered (accented Latin,
//! Cyrillic/Greek homoglyphs, dashes, quotes, ligatures, odd spaces). Anything
//! else passes through untouched; pair with a [`ResidualPolicy`] when the
//! output must be pure ASCII.

pub mod config;
pub mod error;
pub mod matcher;
pub mod residual;
pub mod table;
pub mod translit;

pub use config::Uni2AsciiConfig;
pub use error::{ResidualError, TableError};
pub use residual::{ResidualPolicy, has_residue, residual_runs, to_ascii_lossy, trim_line};
pub use table::{DuplicatePolicy, Table, TableBuilder, parse_entries};
pub use translit::{Transliterator, uni2ascii};
