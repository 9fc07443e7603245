//! Sparse vector and filter checks.

use crate::bimap::IdNameBiMap;
use crate::error::{ArcoError, ResultExt};
use crate::validators::ids::{
    check_ids_identical, check_ids_range_and_strictly_increasing, check_ids_subset,
    check_sorted_ids_subset,
};
use crate::validators::scalar::{DoubleOptions, check_scalar};
use arco_model::{SparseDoubleVector, SparseVectorFilter};

/// `ids` and the value vector must have the same length.
pub fn check_ids_and_values_size(ids: &[i64], values_len: usize) -> Result<(), ArcoError> {
    if ids.len() != values_len {
        return Err(ArcoError::invalid_argument(format!(
            "size mismatch: ids has {} elements but values has {values_len}",
            ids.len()
        )));
    }
    Ok(())
}

/// Ids valid and parallel to values; each value obeys `options`.
pub fn check_ids_and_values(
    vector: &SparseDoubleVector,
    options: DoubleOptions,
) -> Result<(), ArcoError> {
    check_ids_range_and_strictly_increasing(&vector.ids)?;
    check_ids_and_values_size(&vector.ids, vector.values.len())?;
    for (id, value) in vector.iter() {
        check_scalar(value, options).with_context(|| format!("invalid value for id {id}"))?;
    }
    Ok(())
}

/// Like [`check_ids_and_values`], and every id must be in `universe`.
pub fn check_known_ids_and_values(
    vector: &SparseDoubleVector,
    options: DoubleOptions,
    universe: &IdNameBiMap,
    universe_description: &str,
) -> Result<(), ArcoError> {
    check_ids_and_values(vector, options)?;
    check_ids_subset(&vector.ids, universe, universe_description)
}

/// A filter requested by the caller, checked against the ids it can select.
pub fn check_filter(
    filter: &SparseVectorFilter,
    universe: &IdNameBiMap,
    universe_description: &str,
) -> Result<(), ArcoError> {
    if !filter.filter_by_ids && !filter.filtered_ids.is_empty() {
        return Err(ArcoError::invalid_argument(
            "filtered_ids must be empty when filter_by_ids is false",
        ));
    }
    check_ids_range_and_strictly_increasing(&filter.filtered_ids)
        .context("invalid filtered_ids")?;
    check_ids_subset(&filter.filtered_ids, universe, universe_description)
        .context("invalid filtered_ids")
}

/// A returned vector must hold exactly the entries `filter` selects.
///
/// Without `skip_zero_values` the ids must equal the selected ids; with it
/// they must be a subset and no value may be zero.
pub fn check_vector_against_filter(
    vector: &SparseDoubleVector,
    filter: &SparseVectorFilter,
    universe: &IdNameBiMap,
    universe_description: &str,
) -> Result<(), ArcoError> {
    let expected: Vec<i64> = if filter.filter_by_ids {
        filter
            .filtered_ids
            .iter()
            .copied()
            .filter(|&id| universe.has_id(id))
            .collect()
    } else {
        universe.ids().collect()
    };
    if filter.skip_zero_values {
        if let Some((id, _)) = vector.iter().find(|&(_, value)| value == 0.0) {
            return Err(ArcoError::invalid_argument(format!(
                "zero value for id {id} returned although skip_zero_values is set"
            )));
        }
        check_sorted_ids_subset(&vector.ids, &expected, &format!("filtered {universe_description} ids"))
    } else {
        check_ids_identical(&vector.ids, expected, &format!("filtered {universe_description} ids"))
    }
}
