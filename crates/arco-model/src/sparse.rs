//! Sparse containers keyed by entity id.

use serde::{Deserialize, Serialize};

/// A sparse vector of `f64` stored as parallel `ids` and `values`.
///
/// Well-formed vectors have strictly increasing non-negative ids and
/// `ids.len() == values.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseDoubleVector {
    pub ids: Vec<i64>,
    pub values: Vec<f64>,
}

impl SparseDoubleVector {
    pub fn new(ids: Vec<i64>, values: Vec<f64>) -> Self {
        Self { ids, values }
    }

    /// Build a vector from `(id, value)` pairs, keeping the given order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i64, f64)>) -> Self {
        let (ids, values) = pairs.into_iter().unzip();
        Self { ids, values }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over `(id, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.ids.iter().copied().zip(self.values.iter().copied())
    }
}

/// A sparse vector of `bool`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseBoolVector {
    pub ids: Vec<i64>,
    pub values: Vec<bool>,
}

impl SparseBoolVector {
    pub fn new(ids: Vec<i64>, values: Vec<bool>) -> Self {
        Self { ids, values }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A sparse vector of `i32`, used for branching priorities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseInt32Vector {
    pub ids: Vec<i64>,
    pub values: Vec<i32>,
}

impl SparseInt32Vector {
    pub fn new(ids: Vec<i64>, values: Vec<i32>) -> Self {
        Self { ids, values }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A sparse matrix in coordinate form, sorted row-major.
///
/// Entry `i` is `(row_ids[i], column_ids[i], coefficients[i])`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseDoubleMatrix {
    pub row_ids: Vec<i64>,
    pub column_ids: Vec<i64>,
    pub coefficients: Vec<f64>,
}

impl SparseDoubleMatrix {
    /// Build a matrix from `(row, column, coefficient)` triplets, keeping the given order.
    pub fn from_triplets(triplets: impl IntoIterator<Item = (i64, i64, f64)>) -> Self {
        let mut matrix = Self::default();
        for (row, column, coefficient) in triplets {
            matrix.row_ids.push(row);
            matrix.column_ids.push(column);
            matrix.coefficients.push(coefficient);
        }
        matrix
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.row_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_ids.is_empty()
    }
}

/// Restricts which entries of a returned sparse vector a solver reports.
///
/// With the default filter every id of the universe is returned, zeros
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseVectorFilter {
    /// Omit entries whose value is exactly zero.
    pub skip_zero_values: bool,
    /// Only return the ids listed in `filtered_ids`.
    pub filter_by_ids: bool,
    /// Strictly increasing ids; must be empty unless `filter_by_ids` is set.
    pub filtered_ids: Vec<i64>,
}

impl SparseVectorFilter {
    /// A filter that keeps only the given ids.
    pub fn only(ids: Vec<i64>) -> Self {
        Self {
            skip_zero_values: false,
            filter_by_ids: true,
            filtered_ids: ids,
        }
    }

    /// A filter that drops zero values.
    pub fn skip_zeros() -> Self {
        Self {
            skip_zero_values: true,
            ..Self::default()
        }
    }
}

/// An affine expression over variables: `sum(coefficients[i] * x[ids[i]]) + offset`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpression {
    pub ids: Vec<i64>,
    pub coefficients: Vec<f64>,
    pub offset: f64,
}

impl LinearExpression {
    pub fn new(ids: Vec<i64>, coefficients: Vec<f64>, offset: f64) -> Self {
        Self {
            ids,
            coefficients,
            offset,
        }
    }

    /// An expression consisting of a single variable with coefficient one.
    pub fn variable(id: i64) -> Self {
        Self::new(vec![id], vec![1.0], 0.0)
    }
}
