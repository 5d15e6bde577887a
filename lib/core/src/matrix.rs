//! Dense, read-only item-to-item similarity scores.

use crate::{Error, Result};
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;

/// Tolerance under which `[i][j]` and `[j][i]` count as equal.
pub const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// An N×N matrix where `[i][j]` scores how alike products `i` and `j` are.
///
/// Construction rejects non-square shapes and non-finite scores, so every
/// stored value is totally ordered.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    data: Array2<f64>,
}

impl SimilarityMatrix {
    pub fn new(data: Array2<f64>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }

        if let Some(((row, col), _)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteScore { row, col });
        }

        Ok(Self { data })
    }

    /// Build from nested rows. Ragged input is reported as a non-square matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(Error::NotSquare { rows: n, cols: bad.len() });
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((n, cols), flat)
            .map_err(|_| Error::NotSquare { rows: n, cols })?;
        Self::new(data)
    }

    /// Number of products covered (rows == columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn score(&self, i: usize, j: usize) -> Option<f64> {
        self.data.get((i, j)).copied()
    }

    /// `(peer_index, score)` for every column of row `index`, self included.
    pub fn row(&self, index: usize) -> Option<impl Iterator<Item = (usize, f64)> + '_> {
        if index >= self.dim() {
            return None;
        }
        let row: ArrayView1<'_, f64> = self.data.row(index);
        Some(row.into_iter().copied().enumerate())
    }

    /// Largest `|[i][j] - [j][i]|` and where it occurs, if it exceeds
    /// [`SYMMETRY_TOLERANCE`].
    pub fn max_asymmetry(&self) -> Option<(usize, usize, f64)> {
        let n = self.dim();
        (0..n)
            .into_par_iter()
            .filter_map(|i| {
                ((i + 1)..n)
                    .map(|j| (i, j, (self.data[(i, j)] - self.data[(j, i)]).abs()))
                    .max_by(|a, b| a.2.total_cmp(&b.2))
            })
            .max_by(|a, b| a.2.total_cmp(&b.2).then_with(|| b.0.cmp(&a.0)))
            .filter(|&(_, _, diff)| diff > SYMMETRY_TOLERANCE)
    }
}
