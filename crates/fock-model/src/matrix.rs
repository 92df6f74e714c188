//! Matrix backends receiving assembled elements.

use std::collections::HashMap;

use fock_core::Coefficient;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Write target for matrix assembly.
///
/// Unset positions read as zero. `set` overwrites any previous value.
pub trait SparseMatrix {
    /// Value at `(row, col)`, zero when unset.
    fn get(&self, row: usize, col: usize) -> Coefficient;
    /// Stores `value` at `(row, col)`.
    fn set(&mut self, row: usize, col: usize, value: Coefficient);
}

/// Hash-backed sparse matrix without a fixed shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashSparseMatrix {
    entries: HashMap<(usize, usize), Coefficient>,
}

impl HashSparseMatrix {
    /// An empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored positions, explicit zeros included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Coefficient)> + '_ {
        self.entries
            .iter()
            .map(|(&(row, col), &value)| (row, col, value))
    }

    /// Entries ordered by row, then column.
    pub fn entries_sorted(&self) -> Vec<(usize, usize, Coefficient)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|&(row, col, _)| (row, col));
        entries
    }

    /// Snapshot in compressed sparse row form with `nrows` rows.
    ///
    /// # Panics
    ///
    /// Panics when a stored row index is `>= nrows`.
    pub fn to_csr(&self, nrows: usize) -> CsrMatrix {
        let mut rows: Vec<Vec<(usize, Coefficient)>> = vec![Vec::new(); nrows];
        for (row, col, value) in self.iter() {
            rows[row].push((col, value));
        }

        let mut row_ptr = Vec::with_capacity(nrows + 1);
        let mut col_indices = Vec::with_capacity(self.len());
        let mut values = Vec::with_capacity(self.len());
        row_ptr.push(0);
        for row in &mut rows {
            row.sort_by_key(|&(col, _)| col);
            for &(col, value) in row.iter() {
                col_indices.push(col);
                values.push(value);
            }
            row_ptr.push(col_indices.len());
        }

        CsrMatrix {
            nrows,
            row_ptr,
            col_indices,
            values,
        }
    }
}

impl SparseMatrix for HashSparseMatrix {
    fn get(&self, row: usize, col: usize) -> Coefficient {
        self.entries.get(&(row, col)).copied().unwrap_or_default()
    }

    fn set(&mut self, row: usize, col: usize, value: Coefficient) {
        self.entries.insert((row, col), value);
    }
}

/// Dense backend; positions outside the allocated shape panic.
impl SparseMatrix for DMatrix<Coefficient> {
    fn get(&self, row: usize, col: usize) -> Coefficient {
        self[(row, col)]
    }

    fn set(&mut self, row: usize, col: usize, value: Coefficient) {
        self[(row, col)] = value;
    }
}

/// Compressed sparse row snapshot for eigensolver collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows.
    pub nrows: usize,
    /// Offsets into the column and value arrays, `nrows + 1` long.
    pub row_ptr: Vec<usize>,
    /// Column of each stored value.
    pub col_indices: Vec<usize>,
    /// Stored values, row-major.
    pub values: Vec<Coefficient>,
}

impl CsrMatrix {
    /// Number of stored values.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// `y = A x`.
    pub fn matvec(&self, x: &[Coefficient]) -> Vec<Coefficient> {
        (0..self.nrows)
            .map(|row| {
                (self.row_ptr[row]..self.row_ptr[row + 1])
                    .map(|idx| self.values[idx] * x[self.col_indices[idx]])
                    .sum()
            })
            .collect()
    }

    /// Square dense copy of side `max(nrows, largest column + 1)`.
    pub fn to_dense(&self) -> DMatrix<Coefficient> {
        let ncols = self
            .col_indices
            .iter()
            .map(|col| col + 1)
            .max()
            .unwrap_or(0);
        let side = self.nrows.max(ncols);
        let mut dense = DMatrix::zeros(side, side);
        for row in 0..self.nrows {
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                dense[(row, self.col_indices[idx])] = self.values[idx];
            }
        }
        dense
    }
}
