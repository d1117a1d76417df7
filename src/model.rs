use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as seen by the aggregation engine: who, which day, what paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author: String,
    pub date: NaiveDate,
    pub changed_paths: BTreeSet<String>,
}

impl CommitRecord {
    pub fn new<A, I, P>(author: A, date: NaiveDate, paths: I) -> Self
    where
        A: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            author: author.into(),
            date,
            changed_paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: String,
    pub days_touched: usize,
    pub distinct_authors: usize,
    pub last_author: Option<String>,
    pub last_active: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorTotal {
    pub code: u32,
    pub author: String,
    pub cells: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub depth: u32,
    pub since: Option<String>,
    pub until: Option<String>,
    pub path_prefix: String,
    pub authors: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub groups: Vec<String>,
    pub matrix: Vec<Vec<u32>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow<'a> {
    pub group: &'a str,
    pub cells: &'a [u32],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub depth: u32,
    pub path_prefix: String,
    pub entries: Vec<GroupSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub authors: Vec<AuthorTotal>,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}
