use super::axis::DateAxis;
use super::index::AttributionIndex;
use super::registry::AuthorRegistry;
use serde::Serialize;

/// Dense groups x days grid of contributor codes, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    fn set(&mut self, row: usize, col: usize, code: u32) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = code;
        }
    }

    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.rows).filter_map(move |r| self.row(r))
    }

    pub fn to_nested(&self) -> Vec<Vec<u32>> {
        self.iter_rows().map(<[u32]>::to_vec).collect()
    }

    /// A new matrix holding only the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let picked: Vec<&[u32]> = rows.iter().filter_map(|&r| self.row(r)).collect();
        Self {
            rows: picked.len(),
            cols: self.cols,
            cells: picked.concat(),
        }
    }
}

/// Projects the index onto the axis for `visible_groups`.
///
/// Rows come out sorted lexicographically whatever order the groups were
/// passed in; the returned labels line up with the matrix rows.
pub fn build_matrix(
    index: &AttributionIndex,
    axis: &DateAxis,
    visible_groups: &[&str],
    authors: &AuthorRegistry,
) -> (Vec<String>, Matrix) {
    let mut groups: Vec<String> = visible_groups.iter().map(|g| g.to_string()).collect();
    groups.sort();
    groups.dedup();

    let mut matrix = Matrix::zeros(groups.len(), axis.len());
    for (row, group) in groups.iter().enumerate() {
        let Some(days) = index.attributions(group) else {
            continue;
        };
        for (date, author) in days {
            if let (Some(col), Some(code)) = (axis.column_of(*date), authors.code_of(author)) {
                matrix.set(row, col, code);
            }
        }
    }
    (groups, matrix)
}
