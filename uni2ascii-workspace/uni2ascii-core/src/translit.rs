// src/translit.rs

use std::sync::Arc;

use once_cell::sync::OnceCell;
use unicode_normalization::UnicodeNormalization;

use crate::table::Table;

static SHARED: OnceCell<Transliterator> = OnceCell::new();

/// Applies a [`Table`] to lines of text.
///
/// Input is NFC-normalized, then scanned left to right: at each position the
/// longest table source starting there is replaced, otherwise the char is
/// copied through. Unmapped non-ASCII survives; see [`crate::ResidualPolicy`].
#[derive(Debug, Clone)]
pub struct Transliterator {
    table: Arc<Table>,
}

impl Transliterator {
    pub fn new(table: Arc<Table>) -> Self {
        Self { table }
    }

    /// Process-wide transliterator over the builtin table.
    pub fn builtin() -> &'static Transliterator {
        SHARED.get_or_init(|| Transliterator::new(Table::shared()))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Line terminators are ordinary ASCII and pass through where they are.
    pub fn transliterate(&self, line: &str) -> String {
        // ASCII is already NFC.
        let skip_ascii = !self.table.has_ascii_sources();
        if skip_ascii && line.is_ascii() {
            return line.to_string();
        }

        let normalized: String = line.nfc().collect();
        let mut out = String::with_capacity(normalized.len());
        let mut rest = normalized.as_str();
        while let Some(ch) = rest.chars().next() {
            if skip_ascii && ch.is_ascii() {
                // Copy the whole ASCII run at once.
                let run = rest
                    .find(|c: char| !c.is_ascii())
                    .unwrap_or(rest.len());
                out.push_str(&rest[..run]);
                rest = &rest[run..];
                continue;
            }
            match self.table.longest_match(rest) {
                Some((consumed, rep)) => {
                    out.push_str(rep);
                    rest = &rest[consumed..];
                }
                None => {
                    out.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        out
    }
}

/// Transliterate `line` with the builtin table.
pub fn uni2ascii(line: &str) -> String {
    Transliterator::builtin().transliterate(line)
}
