//! Sparse triplet compression of a dense link matrix.
//!
//! Only the nonzero entries survive, stored as three parallel vectors
//! (value, row, column) in strict row-major order: rows ascending, columns
//! ascending within a row. That order is an API guarantee — the iteration
//! engine accumulates in triplet order, and floating-point summation order
//! is part of the reproducibility contract.
//!
//! Zero entries are detected with an exact `!= 0.0` test, no epsilon:
//! tiny-but-nonzero weights from upstream normalization are retained.

use rayon::prelude::*;

use super::dense::LinkMatrix;

/// Below this many rows the sequential scan wins; above it, rows are
/// compressed in parallel and concatenated in row order.
const PARALLEL_ROW_THRESHOLD: usize = 512;

/// The nonzero entries of a [`LinkMatrix`] in row-major order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressedTriplets {
    values: Vec<f64>,
    rows: Vec<u32>,
    cols: Vec<u32>,
}

impl CompressedTriplets {
    /// Compress a dense matrix into triplets.
    ///
    /// Pure transformation: the input is only borrowed. O(rows * cols)
    /// time, O(nonzeros) space.
    pub fn from_dense(matrix: &LinkMatrix) -> Self {
        let num_rows = matrix.num_rows();

        let per_row: Vec<Vec<(u32, f64)>> = if num_rows < PARALLEL_ROW_THRESHOLD {
            (0..num_rows).map(|r| compress_row(matrix.row(r))).collect()
        } else {
            (0..num_rows)
                .into_par_iter()
                .map(|r| compress_row(matrix.row(r)))
                .collect()
        };

        let nonzeros = per_row.iter().map(Vec::len).sum();
        let mut triplets = Self {
            values: Vec::with_capacity(nonzeros),
            rows: Vec::with_capacity(nonzeros),
            cols: Vec::with_capacity(nonzeros),
        };

        for (row, entries) in per_row.into_iter().enumerate() {
            for (col, value) in entries {
                triplets.values.push(value);
                triplets.rows.push(row as u32);
                triplets.cols.push(col);
            }
        }

        triplets
    }

    /// Number of stored nonzero entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the source matrix had no nonzero entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(value, row, col)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, u32, u32)> + '_ {
        self.values
            .iter()
            .zip(&self.rows)
            .zip(&self.cols)
            .map(|((&value, &row), &col)| (value, row, col))
    }

    /// The stored values, in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Row index of each stored value.
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Column index of each stored value.
    pub fn cols(&self) -> &[u32] {
        &self.cols
    }
}

/// Extract the nonzero `(col, value)` runs of one row, columns ascending.
fn compress_row(row: &[f64]) -> Vec<(u32, f64)> {
    row.iter()
        .enumerate()
        .filter(|(_, &value)| value != 0.0)
        .map(|(col, &value)| (col as u32, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> LinkMatrix {
        LinkMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_row_major_order() {
        let m = matrix(vec![
            vec![0.0, 2.0, 0.0],
            vec![3.0, 0.0, 4.0],
            vec![0.0, 0.0, 5.0],
        ]);
        let t = CompressedTriplets::from_dense(&m);

        assert_eq!(t.values(), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(t.rows(), &[0, 1, 1, 2]);
        assert_eq!(t.cols(), &[1, 0, 2, 2]);
    }

    #[test]
    fn test_all_zero_matrix_yields_empty_triplets() {
        let m = matrix(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        let t = CompressedTriplets::from_dense(&m);

        assert!(t.is_empty());
        assert!(t.values().is_empty());
        assert!(t.rows().is_empty());
        assert!(t.cols().is_empty());
    }

    #[test]
    fn test_tiny_nonzero_entries_are_retained() {
        let m = matrix(vec![vec![1e-300, 0.0], vec![0.0, 1.0]]);
        let t = CompressedTriplets::from_dense(&m);

        assert_eq!(t.len(), 2);
        assert_eq!(t.values()[0], 1e-300);
    }

    #[test]
    fn test_reconstruction_matches_source() {
        let source = matrix(vec![
            vec![0.0, 0.5, 0.0, 0.25],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.5, 0.0, 0.75],
        ]);
        let t = CompressedTriplets::from_dense(&source);

        let mut rebuilt = vec![vec![0.0; source.num_cols()]; source.num_rows()];
        for (value, row, col) in t.iter() {
            rebuilt[row as usize][col as usize] = value;
        }

        assert_eq!(LinkMatrix::from_rows(rebuilt).unwrap(), source);
    }

    #[test]
    fn test_parallel_path_matches_sequential_order() {
        // A banded matrix wide enough to cross the parallel threshold.
        let n = PARALLEL_ROW_THRESHOLD + 17;
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|r| {
                let mut row = vec![0.0; n];
                row[r] = 1.0;
                row[(r + 1) % n] = 0.5;
                row
            })
            .collect();
        let t = CompressedTriplets::from_dense(&matrix(rows));

        assert_eq!(t.len(), 2 * n);
        // Rows must still be ascending, columns ascending within each row.
        let mut prev = (0u32, 0u32);
        for (i, (_, row, col)) in t.iter().enumerate() {
            if i > 0 {
                assert!((row, col) > prev, "order violated at entry {i}");
            }
            prev = (row, col);
        }
    }

    #[test]
    fn test_iter_agrees_with_accessors() {
        let m = matrix(vec![vec![0.0, 1.5], vec![2.5, 0.0]]);
        let t = CompressedTriplets::from_dense(&m);

        let collected: Vec<_> = t.iter().collect();
        assert_eq!(collected, vec![(1.5, 0, 1), (2.5, 1, 0)]);
    }
}
