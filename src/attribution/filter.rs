//! Row visibility.
//!
//! The two pattern sets are deliberately matched differently:
//!
//! * **hidden** patterns are literal substrings. They are escaped before being
//!   joined into one matcher, so `a.b` or `(tmp)` never act as regex syntax.
//! * **show-only** patterns are regular expressions, so precise inclusion
//!   rules such as `^src/.*\.rs$` are possible.
//!
//! Hidden wins: a key matching both sets is not visible.

use crate::error::{DaymapError, Result};
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use std::collections::BTreeSet;
use tracing::debug;

/// Compiled size limit for the combined matchers.
const MATCHER_SIZE_LIMIT: usize = 10 * (1 << 20);

#[derive(Debug, Clone, Default)]
pub struct VisibilityFilter {
    hidden: BTreeSet<String>,
    show_only: BTreeSet<String>,
    hidden_matcher: Option<Regex>,
    show_matcher: Option<RegexSet>,
}

impl VisibilityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal substring to hide. Empty patterns are ignored.
    /// Returns whether the set changed.
    pub fn hide(&mut self, pattern: &str) -> Result<bool> {
        if pattern.is_empty() || self.hidden.contains(pattern) {
            return Ok(false);
        }
        let mut hidden = self.hidden.clone();
        hidden.insert(pattern.to_string());
        self.hidden_matcher = compile_hidden(&hidden, MATCHER_SIZE_LIMIT)?;
        self.hidden = hidden;
        debug!(pattern, "added hidden pattern");
        Ok(true)
    }

    pub fn unhide(&mut self, pattern: &str) -> Result<bool> {
        if !self.hidden.contains(pattern) {
            return Ok(false);
        }
        let mut hidden = self.hidden.clone();
        hidden.remove(pattern);
        self.hidden_matcher = compile_hidden(&hidden, MATCHER_SIZE_LIMIT)?;
        self.hidden = hidden;
        Ok(true)
    }

    /// Adds a show-only regex. An expression that fails to compile is
    /// rejected with [`DaymapError::InvalidPattern`] and the filter is left
    /// exactly as it was.
    pub fn show_only(&mut self, pattern: &str) -> Result<bool> {
        if pattern.is_empty() || self.show_only.contains(pattern) {
            return Ok(false);
        }
        Regex::new(pattern).map_err(|e| DaymapError::invalid_pattern(pattern, e))?;
        let mut show_only = self.show_only.clone();
        show_only.insert(pattern.to_string());
        self.show_matcher = compile_show_only(&show_only, MATCHER_SIZE_LIMIT)?;
        self.show_only = show_only;
        debug!(pattern, "added show-only pattern");
        Ok(true)
    }

    pub fn unshow(&mut self, pattern: &str) -> Result<bool> {
        if !self.show_only.contains(pattern) {
            return Ok(false);
        }
        let mut show_only = self.show_only.clone();
        show_only.remove(pattern);
        self.show_matcher = compile_show_only(&show_only, MATCHER_SIZE_LIMIT)?;
        self.show_only = show_only;
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.hidden.clear();
        self.show_only.clear();
        self.hidden_matcher = None;
        self.show_matcher = None;
    }

    pub fn is_visible(&self, group_key: &str) -> bool {
        if let Some(hidden) = &self.hidden_matcher {
            if hidden.is_match(group_key) {
                return false;
            }
        }
        match &self.show_matcher {
            Some(show) => show.is_match(group_key),
            None => true,
        }
    }

    pub fn visible<'a, I>(&self, groups: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        groups.into_iter().filter(|g| self.is_visible(g)).collect()
    }

    pub fn hidden_patterns(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    pub fn show_only_patterns(&self) -> impl Iterator<Item = &str> {
        self.show_only.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.show_only.is_empty()
    }
}

fn compile_hidden(patterns: &BTreeSet<String>, size_limit: usize) -> Result<Option<Regex>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let joined = patterns
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&joined)
        .size_limit(size_limit)
        .build()
        .map(Some)
        .map_err(DaymapError::PatternCompile)
}

fn compile_show_only(patterns: &BTreeSet<String>, size_limit: usize) -> Result<Option<RegexSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    RegexSetBuilder::new(patterns)
        .size_limit(size_limit)
        .build()
        .map(Some)
        .map_err(DaymapError::PatternCompile)
}
