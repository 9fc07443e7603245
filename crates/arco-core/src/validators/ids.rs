//! Id sequence checks.

use crate::bimap::IdNameBiMap;
use crate::error::ArcoError;

/// Ids must be in `[0, i64::MAX)` and strictly increasing.
pub fn check_ids_range_and_strictly_increasing(ids: &[i64]) -> Result<(), ArcoError> {
    let mut previous: Option<i64> = None;
    for (index, &id) in ids.iter().enumerate() {
        if id < 0 {
            return Err(ArcoError::invalid_argument(format!(
                "ids should be nonnegative, but ids[{index}] = {id}"
            )));
        }
        if id == i64::MAX {
            return Err(ArcoError::invalid_argument(format!(
                "ids should be less than i64::MAX, but ids[{index}] = {id}"
            )));
        }
        if let Some(previous) = previous {
            if id <= previous {
                return Err(ArcoError::invalid_argument(format!(
                    "ids should be strictly increasing, but ids[{index}] = {id} follows {previous}"
                )));
            }
        }
        previous = Some(id);
    }
    Ok(())
}

/// Every id must exist in `universe`.
pub fn check_ids_subset(
    ids: &[i64],
    universe: &IdNameBiMap,
    universe_description: &str,
) -> Result<(), ArcoError> {
    for (index, &id) in ids.iter().enumerate() {
        if !universe.has_id(id) {
            return Err(ArcoError::invalid_argument(format!(
                "id {id} (at index {index}) is not an existing {universe_description} id"
            )));
        }
    }
    Ok(())
}

/// Every id must exist in the sorted slice `superset`.
pub fn check_sorted_ids_subset(
    ids: &[i64],
    superset: &[i64],
    superset_description: &str,
) -> Result<(), ArcoError> {
    for (index, id) in ids.iter().enumerate() {
        if superset.binary_search(id).is_err() {
            return Err(ArcoError::invalid_argument(format!(
                "id {id} (at index {index}) is not in {superset_description}"
            )));
        }
    }
    Ok(())
}

/// `ids` must equal `expected` element by element.
pub fn check_ids_identical(
    ids: &[i64],
    expected: impl IntoIterator<Item = i64>,
    expected_description: &str,
) -> Result<(), ArcoError> {
    let mut actual = ids.iter().copied();
    let mut expected = expected.into_iter();
    let mut index = 0usize;
    loop {
        match (actual.next(), expected.next()) {
            (None, None) => return Ok(()),
            (Some(id), None) => {
                return Err(ArcoError::invalid_argument(format!(
                    "unexpected id {id} at index {index}, {expected_description} has fewer ids"
                )));
            }
            (None, Some(missing)) => {
                return Err(ArcoError::invalid_argument(format!(
                    "missing id {missing} of {expected_description} at index {index}"
                )));
            }
            (Some(id), Some(wanted)) if id != wanted => {
                return Err(ArcoError::invalid_argument(format!(
                    "expected id {wanted} of {expected_description} at index {index}, found {id}"
                )));
            }
            _ => index += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_and_increasing() {
        assert!(check_ids_range_and_strictly_increasing(&[]).is_ok());
        assert!(check_ids_range_and_strictly_increasing(&[0, 2, 7]).is_ok());

        let err = check_ids_range_and_strictly_increasing(&[0, -1]).unwrap_err();
        assert!(err.message().contains("nonnegative"));

        let err = check_ids_range_and_strictly_increasing(&[i64::MAX]).unwrap_err();
        assert!(err.message().contains("i64::MAX"));

        let err = check_ids_range_and_strictly_increasing(&[1, 3, 3]).unwrap_err();
        assert!(err.message().contains("ids[2] = 3 follows 3"));
    }

    #[test]
    fn test_subset_of_universe() {
        let mut universe = IdNameBiMap::new(false);
        universe.insert(1, "").unwrap();
        universe.insert(4, "").unwrap();

        assert!(check_ids_subset(&[1, 4], &universe, "variable").is_ok());
        let err = check_ids_subset(&[1, 2], &universe, "variable").unwrap_err();
        assert!(err.message().contains("id 2 (at index 1)"));
        assert!(err.message().contains("variable"));
    }

    #[test]
    fn test_sorted_subset() {
        assert!(check_sorted_ids_subset(&[2, 5], &[1, 2, 5], "filtered_ids").is_ok());
        assert!(check_sorted_ids_subset(&[3], &[1, 2, 5], "filtered_ids").is_err());
    }

    #[test]
    fn test_identical() {
        assert!(check_ids_identical(&[1, 2], [1, 2], "variables").is_ok());
        assert!(check_ids_identical(&[1], [1, 2], "variables").is_err());
        assert!(check_ids_identical(&[1, 2, 3], [1, 2], "variables").is_err());
        let err = check_ids_identical(&[1, 3], [1, 2], "variables").unwrap_err();
        assert!(err.message().contains("expected id 2"));
    }
}
