use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Pairwise matrix is {rows}x{cols} but {scores} per-residue scores were given")]
    ShapeMismatch {
        scores: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Index {index} is out of bounds for {len} residues")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Confidence record holds no residues")]
    Empty,
}

/// Read-only per-model confidence data: one score per residue and an `N x N`
/// pairwise error matrix, both over the concatenated residue ordering.
///
/// `pairwise[(i, j)]` and `pairwise[(j, i)]` are independent values; the matrix is
/// never assumed to be symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceRecord {
    scores: Vec<f64>,
    pairwise: DMatrix<f64>,
}

impl ConfidenceRecord {
    pub fn new(scores: Vec<f64>, pairwise: DMatrix<f64>) -> Result<Self, RecordError> {
        if pairwise.nrows() != scores.len() || pairwise.ncols() != scores.len() {
            return Err(RecordError::ShapeMismatch {
                scores: scores.len(),
                rows: pairwise.nrows(),
                cols: pairwise.ncols(),
            });
        }
        Ok(Self { scores, pairwise })
    }

    /// Builds a record from a row-major nested matrix as found in model output documents.
    pub fn from_rows(scores: Vec<f64>, rows: Vec<Vec<f64>>) -> Result<Self, RecordError> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(RecordError::ShapeMismatch {
                scores: scores.len(),
                rows: n,
                cols: bad.len(),
            });
        }
        let pairwise = DMatrix::from_row_iterator(n, n, rows.into_iter().flatten());
        Self::new(scores, pairwise)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn pairwise(&self) -> &DMatrix<f64> {
        &self.pairwise
    }

    pub fn global_score(&self, index: usize) -> Result<f64, RecordError> {
        self.scores
            .get(index)
            .copied()
            .ok_or(RecordError::IndexOutOfRange {
                index,
                len: self.scores.len(),
            })
    }

    pub fn global_pair(&self, i: usize, j: usize) -> Result<f64, RecordError> {
        let len = self.len();
        for index in [i, j] {
            if index >= len {
                return Err(RecordError::IndexOutOfRange { index, len });
            }
        }
        Ok(self.pairwise[(i, j)])
    }

    /// Arithmetic mean over every per-residue score.
    pub fn mean_score(&self) -> Result<f64, RecordError> {
        if self.scores.is_empty() {
            return Err(RecordError::Empty);
        }
        Ok(self.scores.iter().sum::<f64>() / self.scores.len() as f64)
    }
}
