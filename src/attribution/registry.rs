use std::collections::{BTreeSet, HashMap};

pub const NO_CONTRIBUTOR: &str = "No Contributor";

/// Distinct authors, ordered lexicographically, with 1-based codes.
///
/// Code 0 is reserved for cells nobody touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorRegistry {
    names: Vec<String>,
    codes: HashMap<String, u32>,
}

impl AuthorRegistry {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        let names: Vec<String> = sorted.into_iter().collect();
        let codes = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx as u32 + 1))
            .collect();
        Self { names, codes }
    }

    pub fn code_of(&self, author: &str) -> Option<u32> {
        self.codes.get(author).copied()
    }

    pub fn name_of(&self, code: u32) -> Option<&str> {
        match code {
            0 => Some(NO_CONTRIBUTOR),
            c => self.names.get(c as usize - 1).map(String::as_str),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Legend for a renderer: index == code.
    pub fn labels(&self) -> Vec<String> {
        std::iter::once(NO_CONTRIBUTOR.to_string())
            .chain(self.names.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
