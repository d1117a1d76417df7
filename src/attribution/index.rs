use super::axis::DateAxis;
use super::group::GroupKeyResolver;
use super::registry::AuthorRegistry;
use crate::error::{DaymapError, Result};
use crate::model::CommitRecord;
use chrono::NaiveDate;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// group key -> day -> the author holding that slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributionIndex {
    groups: BTreeMap<String, BTreeMap<NaiveDate, String>>,
}

impl AttributionIndex {
    /// Records `author` for (group, date) unless the slot is already taken.
    /// Returns whether the slot was claimed.
    pub fn claim(&mut self, group: &str, date: NaiveDate, author: &str) -> bool {
        let days = self.groups.entry(group.to_string()).or_default();
        if days.contains_key(&date) {
            return false;
        }
        days.insert(date, author.to_string());
        true
    }

    pub fn attributions(&self, group: &str) -> Option<&BTreeMap<NaiveDate, String>> {
        self.groups.get(group)
    }

    pub fn author_at(&self, group: &str, date: NaiveDate) -> Option<&str> {
        self.groups.get(group)?.get(&date).map(String::as_str)
    }

    /// Group keys in lexicographic order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }
}

/// The result of one aggregation pass. Rebuilt whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub depth: u32,
    pub index: AttributionIndex,
    pub authors: AuthorRegistry,
    pub axis: DateAxis,
}

impl Snapshot {
    /// Aggregates `records` in the order given.
    ///
    /// The first record to reach a (group, day) slot keeps it, so feeding
    /// history newest-first attributes each day to its most recent author.
    /// Paths under the same group count once per commit.
    pub fn build<I>(records: I, resolver: &mut GroupKeyResolver, depth: u32) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<CommitRecord>,
    {
        let mut index = AttributionIndex::default();
        let mut authors: BTreeSet<String> = BTreeSet::new();
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        let mut commits = 0usize;
        let mut claimed = 0usize;

        for record in records {
            let record = record.borrow();
            commits += 1;

            bounds = Some(match bounds {
                None => (record.date, record.date),
                Some((lo, hi)) => (lo.min(record.date), hi.max(record.date)),
            });
            authors.insert(record.author.clone());

            let groups: BTreeSet<String> = record
                .changed_paths
                .iter()
                .map(|path| resolver.resolve(path, depth).to_string())
                .collect();

            for group in &groups {
                if index.claim(group, record.date, &record.author) {
                    claimed += 1;
                }
            }
        }

        let (min_date, max_date) = bounds.ok_or(DaymapError::EmptyHistory)?;
        let axis = DateAxis::build(min_date, max_date)?;
        debug!(commits, claimed, depth, "aggregated commit history");
        info!(
            groups = index.len(),
            authors = authors.len(),
            days = axis.len(),
            "built attribution snapshot"
        );

        Ok(Self {
            depth,
            index,
            authors: AuthorRegistry::from_names(authors),
            axis,
        })
    }
}
