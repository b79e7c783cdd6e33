// src/matcher.rs

//! Character trie over table sources.
//!
//! Every source sequence is a path from the root; the node where it ends holds
//! the replacement. A lookup walks as far as the text allows and reports the
//! deepest terminal node it passed, so a source that is a prefix of another
//! never shadows the longer one regardless of insertion order.

use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
struct Node {
    children: BTreeMap<char, Node>,
    replacement: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct Matcher {
    root: Node,
    max_depth: usize,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) `source`. Empty sources are ignored; the table
    /// builder rejects them before they get here.
    pub fn insert(&mut self, source: &str, replacement: &str) {
        if source.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        let mut depth = 0usize;
        for ch in source.chars() {
            node = node.children.entry(ch).or_default();
            depth += 1;
        }
        node.replacement = Some(replacement.to_string());
        self.max_depth = self.max_depth.max(depth);
    }

    /// Longest source that is a prefix of `text`, as
    /// `(bytes consumed, replacement)`.
    pub fn longest_match<'a>(&'a self, text: &str) -> Option<(usize, &'a str)> {
        let mut node = &self.root;
        let mut best = None;
        for (idx, ch) in text.char_indices() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(rep) = node.replacement.as_deref() {
                best = Some((idx + ch.len_utf8(), rep));
            }
        }
        best
    }

    /// Length in chars of the longest source.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_does_not_shadow_longer_source() {
        let mut m = Matcher::new();
        m.insert("a", "1");
        m.insert("ab", "2");
        assert_eq!(m.longest_match("abc"), Some((2, "2")));
        assert_eq!(m.longest_match("ac"), Some((1, "1")));
    }

    #[test]
    fn falls_back_to_shorter_when_longer_path_dies() {
        let mut m = Matcher::new();
        m.insert("x", "short");
        m.insert("xyz", "long");
        // "xy" is on the path to "xyz" but not terminal.
        assert_eq!(m.longest_match("xyq"), Some((1, "short")));
        assert_eq!(m.max_depth(), 3);
    }

    #[test]
    fn multibyte_lengths_are_in_bytes() {
        let mut m = Matcher::new();
        m.insert("\u{FB03}", "ffi");
        assert_eq!(m.longest_match("\u{FB03}x"), Some((3, "ffi")));
        assert_eq!(m.longest_match("y"), None);
        assert_eq!(m.longest_match(""), None);
    }
}
