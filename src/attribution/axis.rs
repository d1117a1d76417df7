use crate::error::{DaymapError, Result};
use chrono::{Days, NaiveDate};

/// Every calendar day from the first to the last commit, gaps included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateAxis {
    dates: Vec<NaiveDate>,
}

impl DateAxis {
    pub fn build(min_date: NaiveDate, max_date: NaiveDate) -> Result<Self> {
        if min_date > max_date {
            return Err(DaymapError::InvalidDate(format!(
                "Invalid axis: start ({min_date}) is after end ({max_date})"
            )));
        }
        let span = (max_date - min_date).num_days() as u64;
        let dates = (0..=span)
            .map(|offset| {
                min_date.checked_add_days(Days::new(offset)).ok_or_else(|| {
                    DaymapError::InvalidDate(format!("Date overflow at {min_date} + {offset}d"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { dates })
    }

    /// Zero-based column of `date`, `None` outside the axis.
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        let first = *self.dates.first()?;
        let last = *self.dates.last()?;
        if date < first || date > last {
            return None;
        }
        Some((date - first).num_days() as usize)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
