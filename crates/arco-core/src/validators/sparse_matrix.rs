//! Coordinate-form matrix checks.

use crate::bimap::IdNameBiMap;
use crate::error::{ArcoError, ResultExt};
use crate::validators::ids::check_ids_subset;
use crate::validators::scalar::check_scalar_no_nan_no_inf;
use arco_model::SparseDoubleMatrix;

/// Structural checks on `matrix` that need no id universe.
///
/// Entries must be sorted row-major with no repeated cell, ids in
/// `[0, i64::MAX)` and coefficients finite. With `enforce_upper_triangular`
/// every entry must have `row <= column`.
pub fn sparse_matrix_valid(
    matrix: &SparseDoubleMatrix,
    enforce_upper_triangular: bool,
) -> Result<(), ArcoError> {
    let len = matrix.row_ids.len();
    if matrix.column_ids.len() != len || matrix.coefficients.len() != len {
        return Err(ArcoError::invalid_argument(format!(
            "size mismatch: row_ids has {len} elements, column_ids has {}, coefficients has {}",
            matrix.column_ids.len(),
            matrix.coefficients.len()
        )));
    }
    let mut previous: Option<(i64, i64)> = None;
    for index in 0..len {
        let row = matrix.row_ids[index];
        let column = matrix.column_ids[index];
        if row < 0 || row == i64::MAX || column < 0 || column == i64::MAX {
            return Err(ArcoError::invalid_argument(format!(
                "ids out of range at index {index}: ({row}, {column})"
            )));
        }
        if let Some(previous) = previous {
            if (row, column) <= previous {
                return Err(ArcoError::invalid_argument(format!(
                    "entries should be strictly increasing in (row, column) order, but ({row}, {column}) at index {index} follows ({}, {})",
                    previous.0, previous.1
                )));
            }
        }
        if enforce_upper_triangular && row > column {
            return Err(ArcoError::invalid_argument(format!(
                "lower triangular entry ({row}, {column}) at index {index}"
            )));
        }
        check_scalar_no_nan_no_inf(matrix.coefficients[index])
            .with_context(|| format!("invalid coefficient at ({row}, {column})"))?;
        previous = Some((row, column));
    }
    Ok(())
}

/// Row ids must be in `rows` and column ids in `columns`.
pub fn sparse_matrix_ids_are_known(
    matrix: &SparseDoubleMatrix,
    rows: &IdNameBiMap,
    rows_description: &str,
    columns: &IdNameBiMap,
    columns_description: &str,
) -> Result<(), ArcoError> {
    check_ids_subset(&matrix.row_ids, rows, rows_description).context("invalid row_ids")?;
    check_ids_subset(&matrix.column_ids, columns, columns_description)
        .context("invalid column_ids")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_matrix() {
        let matrix = SparseDoubleMatrix::from_triplets([(0, 0, 1.0), (0, 2, 2.0), (1, 1, -1.0)]);
        assert!(sparse_matrix_valid(&matrix, true).is_ok());
        assert!(sparse_matrix_valid(&SparseDoubleMatrix::default(), true).is_ok());
    }

    #[test]
    fn test_rejects_size_mismatch() {
        let mut matrix = SparseDoubleMatrix::from_triplets([(0, 0, 1.0)]);
        matrix.coefficients.clear();
        let err = sparse_matrix_valid(&matrix, false).unwrap_err();
        assert!(err.message().contains("size mismatch"));
    }

    #[test]
    fn test_rejects_unsorted_and_duplicates() {
        let unsorted = SparseDoubleMatrix::from_triplets([(1, 0, 1.0), (0, 3, 1.0)]);
        assert!(sparse_matrix_valid(&unsorted, false).is_err());

        let duplicate = SparseDoubleMatrix::from_triplets([(0, 1, 1.0), (0, 1, 2.0)]);
        let err = sparse_matrix_valid(&duplicate, false).unwrap_err();
        assert!(err.message().contains("strictly increasing"));
    }

    #[test]
    fn test_upper_triangular_only_when_enforced() {
        let lower = SparseDoubleMatrix::from_triplets([(2, 1, 1.0)]);
        assert!(sparse_matrix_valid(&lower, false).is_ok());
        let err = sparse_matrix_valid(&lower, true).unwrap_err();
        assert!(err.message().contains("lower triangular"));
    }

    #[test]
    fn test_rejects_bad_ids_and_coefficients() {
        let negative = SparseDoubleMatrix::from_triplets([(-1, 0, 1.0)]);
        assert!(sparse_matrix_valid(&negative, false).is_err());

        let nan = SparseDoubleMatrix::from_triplets([(0, 0, f64::NAN)]);
        let err = sparse_matrix_valid(&nan, false).unwrap_err();
        assert_eq!(err.message(), "invalid coefficient at (0, 0): value is NaN");
    }

    #[test]
    fn test_ids_are_known() {
        let rows = IdNameBiMap::from_entries([(0, "c")], false).unwrap();
        let columns = IdNameBiMap::from_entries([(0, "x"), (1, "y")], false).unwrap();
        let matrix = SparseDoubleMatrix::from_triplets([(0, 1, 1.0)]);
        assert!(
            sparse_matrix_ids_are_known(&matrix, &rows, "linear constraint", &columns, "variable")
                .is_ok()
        );

        let unknown_row = SparseDoubleMatrix::from_triplets([(4, 1, 1.0)]);
        let err =
            sparse_matrix_ids_are_known(&unknown_row, &rows, "linear constraint", &columns, "variable")
                .unwrap_err();
        assert!(err.message().starts_with("invalid row_ids"));
    }
}
