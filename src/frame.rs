use crate::attribution::{build_matrix, Matrix, Snapshot, VisibilityFilter};
use crate::model::{AuthorTotal, GroupSummary, MatrixRow};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Everything a renderer needs: row labels, column labels, legend, cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub depth: u32,
    pub groups: Vec<String>,
    pub dates: Vec<NaiveDate>,
    /// Index == contributor code; entry 0 is the "no contribution" label.
    pub authors: Vec<String>,
    pub matrix: Matrix,
}

impl Frame {
    pub fn project(snapshot: &Snapshot, filter: &VisibilityFilter) -> Self {
        let visible = filter.visible(snapshot.index.groups());
        let (groups, matrix) =
            build_matrix(&snapshot.index, &snapshot.axis, &visible, &snapshot.authors);
        Self {
            depth: snapshot.depth,
            groups,
            dates: snapshot.axis.dates().to_vec(),
            authors: snapshot.authors.labels(),
            matrix,
        }
    }

    /// Drill into the rows whose key starts with `prefix`.
    pub fn under_path(&self, prefix: &str) -> Self {
        let keep: Vec<usize> = self
            .groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.starts_with(prefix))
            .map(|(idx, _)| idx)
            .collect();
        Self {
            depth: self.depth,
            groups: keep.iter().map(|&i| self.groups[i].clone()).collect(),
            dates: self.dates.clone(),
            authors: self.authors.clone(),
            matrix: self.matrix.select_rows(&keep),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = MatrixRow<'_>> {
        self.groups
            .iter()
            .zip(self.matrix.iter_rows())
            .map(|(group, cells)| MatrixRow { group, cells })
    }

    pub fn author_name(&self, code: u32) -> Option<&str> {
        self.authors.get(code as usize).map(String::as_str)
    }

    pub fn group_summaries(&self) -> Vec<GroupSummary> {
        self.rows()
            .map(|row| {
                let touched: Vec<(usize, u32)> = row
                    .cells
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|&(_, code)| code != 0)
                    .collect();
                let distinct: HashSet<u32> = touched.iter().map(|&(_, code)| code).collect();
                let last = touched.last().copied();
                GroupSummary {
                    group: row.group.to_string(),
                    days_touched: touched.len(),
                    distinct_authors: distinct.len(),
                    last_author: last.and_then(|(_, code)| self.author_name(code).map(str::to_string)),
                    last_active: last.and_then(|(col, _)| self.dates.get(col).copied()),
                }
            })
            .collect()
    }

    /// Non-zero cells per contributor, in code order (code 0 excluded).
    pub fn author_totals(&self) -> Vec<AuthorTotal> {
        let mut counts = vec![0usize; self.authors.len()];
        for row in self.matrix.iter_rows() {
            for &code in row {
                if let Some(slot) = counts.get_mut(code as usize) {
                    *slot += 1;
                }
            }
        }
        self.authors
            .iter()
            .enumerate()
            .skip(1)
            .map(|(code, author)| AuthorTotal {
                code: code as u32,
                author: author.clone(),
                cells: counts[code],
            })
            .collect()
    }
}
