// src/table.rs

//! Transliteration table: source sequence -> ASCII replacement.
//!
//! The builtin table is flat data (`assets/translits.txt`) plus two fixed
//! groups of space-like codepoints. Adding an equivalence means adding one
//! line to the asset file.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use unicode_normalization::UnicodeNormalization;

use crate::error::TableError;
use crate::matcher::Matcher;

/// === Embedded table ===
pub const TRANSLITS_TXT: &str = include_str!("../assets/translits.txt");

/// Codepoints that separate words but render with no pixels (or as plain
/// blank space). Each becomes a single ASCII space.
pub const WHITESPACE_EQUIVALENTS: &[char] = &[
    '\u{00A0}', // no-break space
    '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}',
    '\u{2007}', '\u{2008}',
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{2060}', // word joiner
    '\u{202F}', // narrow no-break space
    '\u{205F}', // medium mathematical space
    '\u{3000}', // ideographic space
    '\u{FEFF}', // BOM / zero width no-break space
];

/// Very thin spaces, used for kerning rather than word separation. Dropped.
pub const THIN_SPACES: &[char] = &['\u{2009}', '\u{200A}'];

static BUILTIN: OnceCell<Arc<Table>> = OnceCell::new();

/// What to do when a source is inserted a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail the build.
    #[default]
    Reject,
    /// Keep the later replacement (logged).
    Override,
}

/// Parse the `<source> <replacement>` line format.
///
/// Lines are trimmed first; blank lines and `#` comments are skipped. Any
/// other line must split into exactly two whitespace-separated tokens.
pub fn parse_entries(text: &str) -> Result<Vec<(String, String)>, TableError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(src), Some(rep), None) => out.push((src.to_string(), rep.to_string())),
            _ => {
                return Err(TableError::Malformed {
                    line_no: idx + 1,
                    line: line.to_string(),
                });
            }
        }
    }
    Ok(out)
}

/// Accumulates entries; [`TableBuilder::build`] produces the immutable table
/// and its matcher in one step.
#[derive(Debug, Default)]
pub struct TableBuilder {
    entries: BTreeMap<String, String>,
    on_duplicate: DuplicatePolicy,
}

impl TableBuilder {
    pub fn new(on_duplicate: DuplicatePolicy) -> Self {
        Self {
            entries: BTreeMap::new(),
            on_duplicate,
        }
    }

    pub fn on_duplicate(&mut self, policy: DuplicatePolicy) -> &mut Self {
        self.on_duplicate = policy;
        self
    }

    /// Add one entry. The source is NFC-normalized so it lines up with
    /// normalized input.
    pub fn insert(&mut self, source: &str, replacement: &str) -> Result<&mut Self, TableError> {
        let source: String = source.nfc().collect();
        if source.is_empty() {
            return Err(TableError::EmptySource {
                replacement: replacement.to_string(),
            });
        }
        if let Some(prev) = self.entries.get(&source) {
            if prev != replacement {
                match self.on_duplicate {
                    DuplicatePolicy::Reject => {
                        return Err(TableError::Duplicate {
                            source_seq: source,
                            first: prev.clone(),
                            second: replacement.to_string(),
                        });
                    }
                    DuplicatePolicy::Override => {
                        tracing::warn!(
                            source = %source.escape_unicode(),
                            from = %prev,
                            to = %replacement,
                            "overriding table entry"
                        );
                    }
                }
            }
        }
        self.entries.insert(source, replacement.to_string());
        Ok(self)
    }

    pub fn extend<I, S, R>(&mut self, entries: I) -> Result<&mut Self, TableError>
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: AsRef<str>,
    {
        for (src, rep) in entries {
            self.insert(src.as_ref(), rep.as_ref())?;
        }
        Ok(self)
    }

    /// Add the two fixed space groups.
    pub fn with_space_groups(&mut self) -> Result<&mut Self, TableError> {
        let mut buf = [0u8; 4];
        for &sp in WHITESPACE_EQUIVALENTS {
            self.insert(sp.encode_utf8(&mut buf), " ")?;
        }
        for &sp in THIN_SPACES {
            self.insert(sp.encode_utf8(&mut buf), "")?;
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> Table {
        let mut matcher = Matcher::new();
        for (src, rep) in &self.entries {
            matcher.insert(src, rep);
        }
        tracing::debug!(
            entries = self.entries.len(),
            longest = matcher.max_depth(),
            "built transliteration table"
        );
        let ascii_sources = self
            .entries
            .keys()
            .any(|src| src.starts_with(|c: char| c.is_ascii()));
        Table {
            entries: self.entries,
            matcher,
            ascii_sources,
        }
    }
}

/// Immutable mapping plus the matcher compiled from it.
#[derive(Debug, Clone)]
pub struct Table {
    entries: BTreeMap<String, String>,
    matcher: Matcher,
    ascii_sources: bool,
}

impl Table {
    /// Embedded data plus the space groups. Duplicate sources are an error.
    pub fn builtin() -> Result<Self, TableError> {
        Ok(Self::builtin_builder()?.build())
    }

    fn builtin_builder() -> Result<TableBuilder, TableError> {
        let mut builder = TableBuilder::new(DuplicatePolicy::Reject);
        builder.extend(parse_entries(TRANSLITS_TXT)?)?;
        builder.with_space_groups()?;
        Ok(builder)
    }

    /// Builtin table with `extra` layered on top; later entries win.
    pub fn with_overrides<I, S, R>(extra: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: AsRef<str>,
    {
        let mut builder = Self::builtin_builder()?;
        builder.on_duplicate(DuplicatePolicy::Override).extend(extra)?;
        Ok(builder.build())
    }

    /// Process-wide builtin table, built on first use.
    ///
    /// # Panics
    /// If the embedded data is malformed. That is a packaging defect and a
    /// partial table would corrupt every line afterwards.
    pub fn shared() -> Arc<Table> {
        BUILTIN
            .get_or_init(|| match Table::builtin() {
                Ok(table) => Arc::new(table),
                Err(err) => panic!("embedded transliteration table is invalid: {err}"),
            })
            .clone()
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by source.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, r)| (s.as_str(), r.as_str()))
    }

    /// Length in chars of the longest source.
    pub fn max_source_len(&self) -> usize {
        self.matcher.max_depth()
    }

    /// Whether any source begins with an ASCII char. The builtin table has
    /// none, which lets ASCII runs skip the matcher.
    pub fn has_ascii_sources(&self) -> bool {
        self.ascii_sources
    }

    /// Longest source starting at the beginning of `text`.
    pub fn longest_match<'a>(&'a self, text: &str) -> Option<(usize, &'a str)> {
        self.matcher.longest_match(text)
    }
}

impl<S, R> FromIterator<(S, R)> for Table
where
    S: AsRef<str>,
    R: AsRef<str>,
{
    /// Lenient collection for small in-memory tables: last entry wins and
    /// entries with an empty source are logged and skipped. Use
    /// [`TableBuilder::extend`] when a bad entry must fail the build.
    fn from_iter<I: IntoIterator<Item = (S, R)>>(iter: I) -> Self {
        let mut builder = TableBuilder::new(DuplicatePolicy::Override);
        for (src, rep) in iter {
            if let Err(err) = builder.insert(src.as_ref(), rep.as_ref()) {
                tracing::warn!(%err, "skipping table entry");
            }
        }
        builder.build()
    }
}
