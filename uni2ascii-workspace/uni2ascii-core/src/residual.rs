// src/residual.rs

//! What to do with codepoints the table could not map.
//!
//! Runs after [`crate::Transliterator::transliterate`]. The transliterator
//! never fails; this layer is where a line can be rejected or rewritten.

use serde::Deserialize;

use crate::error::ResidualError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "replacement")]
pub enum ResidualPolicy {
    /// Leave the line alone (default).
    #[default]
    Pass,
    /// Fail on the first residual codepoint.
    Error,
    /// Discard lines that carry any residue.
    DropLine,
    /// Replace each run of residual codepoints with a literal ("" deletes).
    Replace(String),
}

impl ResidualPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResidualPolicy::Pass => "pass",
            ResidualPolicy::Error => "error",
            ResidualPolicy::DropLine => "drop_line",
            ResidualPolicy::Replace(_) => "replace",
        }
    }

    /// `Ok(None)` means the line is dropped.
    pub fn apply(&self, line: &str) -> Result<Option<String>, ResidualError> {
        match self {
            ResidualPolicy::Pass => Ok(Some(line.to_string())),
            ResidualPolicy::Error => match first_residue(line) {
                Some((column, ch)) => Err(ResidualError::NonAscii {
                    ch,
                    code: ch as u32,
                    column,
                }),
                None => Ok(Some(line.to_string())),
            },
            ResidualPolicy::DropLine => {
                if has_residue(line) {
                    Ok(None)
                } else {
                    Ok(Some(line.to_string()))
                }
            }
            ResidualPolicy::Replace(with) => Ok(Some(replace_runs(line, with))),
        }
    }
}

pub fn has_residue(line: &str) -> bool {
    !line.is_ascii()
}

/// 1-based char column and value of the first non-ASCII codepoint.
fn first_residue(line: &str) -> Option<(usize, char)> {
    line.chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii())
        .map(|(idx, ch)| (idx + 1, ch))
}

/// Byte ranges of maximal non-ASCII runs.
pub fn residual_runs(line: &str) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for (start, ch) in line.char_indices() {
        if ch.is_ascii() {
            continue;
        }
        let end = start + ch.len_utf8();
        if let Some(last) = runs.last_mut() {
            if last.1 == start {
                last.1 = end;
                continue;
            }
        }
        runs.push((start, end));
    }
    runs
}

fn replace_runs(line: &str, with: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut cursor = 0usize;
    for (s, e) in residual_runs(line) {
        out.push_str(&line[cursor..s]);
        out.push_str(with);
        cursor = e;
    }
    out.push_str(&line[cursor..]);
    out
}

/// Final output encoding: anything still outside ASCII is dropped.
pub fn to_ascii_lossy(line: &str) -> String {
    line.chars().filter(char::is_ascii).collect()
}

/// Trim leading/trailing whitespace but keep the line terminator.
pub fn trim_line(line: &str) -> String {
    let body = line.trim_end_matches(['\n', '\r']);
    let terminator = &line[body.len()..];
    format!("{}{}", body.trim(), terminator)
}
