use crate::errors::DecisionTreeError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Class label, always `0` or `1` in a valid dataset.
pub type Label = u8;

/// A single training or evaluation record, a feature vector and its class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    x: Vec<f64>,
    y: Label,
}

impl LabeledPoint {
    pub fn new(x: Vec<f64>, y: Label) -> Self {
        LabeledPoint { x, y }
    }

    /// Feature values of the point.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Class label of the point.
    pub fn y(&self) -> Label {
        self.y
    }

    /// Number of features.
    pub fn dim(&self) -> usize {
        self.x.len()
    }
}

impl Display for LabeledPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.x.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "] -> {}", self.y)
    }
}

/// Check a dataset before it is used for training or evaluation,
/// returning the shared number of features.
///
/// The dataset must be non-empty, every point must have the same number of
/// features, all features must be finite, and all labels must be `0` or `1`.
pub fn validate_dataset(data: &[LabeledPoint]) -> Result<usize, DecisionTreeError> {
    let first = data.first().ok_or(DecisionTreeError::EmptyDataset)?;
    let dim = first.dim();
    for (row, point) in data.iter().enumerate() {
        if point.dim() != dim {
            return Err(DecisionTreeError::InconsistentDimension(row, dim, point.dim()));
        }
        if point.y > 1 {
            return Err(DecisionTreeError::InvalidLabel(row, point.y));
        }
        if let Some(feature) = point.x.iter().position(|v| !v.is_finite()) {
            return Err(DecisionTreeError::NonFiniteFeature(row, feature));
        }
    }
    Ok(dim)
}

/// Lay the features of a dataset out in column major order,
/// the layout [`Matrix`] expects.
pub fn to_column_major(data: &[LabeledPoint]) -> Vec<f64> {
    let cols = data.first().map_or(0, |p| p.dim());
    let mut values = Vec::with_capacity(cols * data.len());
    for j in 0..cols {
        values.extend(data.iter().map(|p| p.x.get(j).copied().unwrap_or(f64::NAN)));
    }
    values
}

/// Contiguous Column Major Matrix data container.
///
/// Used for batch prediction, each row is one feature vector.
pub struct Matrix<'a, T> {
    /// The raw data stored in a single slice.
    pub data: &'a [T],
    /// Number of rows in the matrix.
    pub rows: usize,
    /// Number of columns in the matrix.
    pub cols: usize,
    stride1: usize,
    stride2: usize,
}

impl<'a, T> Matrix<'a, T> {
    // Defaults to column major
    pub fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        Matrix {
            data,
            rows,
            cols,
            stride1: rows,
            stride2: 1,
        }
    }

    /// Get a single reference to an item in the matrix.
    ///
    /// * `i` - The ith row of the data to get.
    /// * `j` - the jth column of the data to get.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[self.item_index(i, j)]
    }

    fn item_index(&self, i: usize, j: usize) -> usize {
        let mut idx = self.stride2 * i;
        idx += j * self.stride1;
        idx
    }
}
