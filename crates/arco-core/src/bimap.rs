//! Id/name registry for one kind of model entity.

use crate::error::{ArcoError, ResultExt};
use crate::validators::ids::check_ids_range_and_strictly_increasing;
use std::collections::{BTreeMap, HashMap};

/// Ordered map from id to name, plus a reverse index of non-empty names.
///
/// Ids are inserted in strictly increasing order and never reused, even after
/// erasure. When name checking is disabled the reverse index is not kept and
/// [`IdNameBiMap::has_name`] is always false.
///
/// Failed mutations are not rolled back: after an error the map may hold a
/// partially applied change and should be discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdNameBiMap {
    next_free_id: i64,
    id_to_name: BTreeMap<i64, String>,
    nonempty_name_to_id: Option<HashMap<String, i64>>,
}

impl IdNameBiMap {
    /// Create an empty map; `check_names` enables the unique-name index.
    pub fn new(check_names: bool) -> Self {
        Self {
            next_free_id: 0,
            id_to_name: BTreeMap::new(),
            nonempty_name_to_id: check_names.then(HashMap::new),
        }
    }

    /// Build a map from `(id, name)` pairs inserted in order.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (i64, &'a str)>,
        check_names: bool,
    ) -> Result<Self, ArcoError> {
        let mut map = Self::new(check_names);
        for (id, name) in entries {
            map.insert(id, name)?;
        }
        Ok(map)
    }

    pub fn checks_names(&self) -> bool {
        self.nonempty_name_to_id.is_some()
    }

    pub fn insert(&mut self, id: i64, name: &str) -> Result<(), ArcoError> {
        if id < self.next_free_id {
            return Err(ArcoError::invalid_argument(format!(
                "expected id={id} to be at least next_free_id={}",
                self.next_free_id
            )));
        }
        if id == i64::MAX {
            return Err(ArcoError::invalid_argument(
                "id=i64::MAX is reserved and cannot be inserted",
            ));
        }
        if let Some(index) = self.nonempty_name_to_id.as_mut() {
            if !name.is_empty() {
                if index.contains_key(name) {
                    return Err(ArcoError::invalid_argument(format!(
                        "duplicate name inserted: {name}"
                    )));
                }
                index.insert(name.to_string(), id);
            }
        }
        self.id_to_name.insert(id, name.to_string());
        self.next_free_id = id + 1;
        Ok(())
    }

    pub fn erase(&mut self, id: i64) -> Result<(), ArcoError> {
        let Some(name) = self.id_to_name.remove(&id) else {
            return Err(ArcoError::invalid_argument(format!(
                "cannot delete missing id {id}"
            )));
        };
        if let Some(index) = self.nonempty_name_to_id.as_mut() {
            if !name.is_empty() {
                index.remove(&name);
            }
        }
        Ok(())
    }

    pub fn has_id(&self, id: i64) -> bool {
        self.id_to_name.contains_key(&id)
    }

    /// Always false for the empty name or when name checking is disabled.
    pub fn has_name(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.nonempty_name_to_id
            .as_ref()
            .is_some_and(|index| index.contains_key(name))
    }

    /// The name of `id`, if present.
    pub fn name(&self, id: i64) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    /// The id registered under a non-empty `name`, when name checking is enabled.
    pub fn id_for_name(&self, name: &str) -> Option<i64> {
        self.nonempty_name_to_id
            .as_ref()
            .and_then(|index| index.get(name).copied())
    }

    pub fn size(&self) -> usize {
        self.id_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// One past the largest id ever inserted.
    pub fn next_free_id(&self) -> i64 {
        self.next_free_id
    }

    /// Move `next_free_id` to `new_next_free_id`.
    ///
    /// Fails unless the new value is strictly greater than the largest live
    /// id, or non-negative when the map is empty.
    pub fn set_next_free_id(&mut self, new_next_free_id: i64) -> Result<(), ArcoError> {
        match self.largest_id() {
            Some(largest) if new_next_free_id <= largest => {
                return Err(ArcoError::invalid_argument(format!(
                    "new_next_free_id={new_next_free_id} must be greater than the largest id={largest}"
                )));
            }
            None if new_next_free_id < 0 => {
                return Err(ArcoError::invalid_argument(format!(
                    "new_next_free_id={new_next_free_id} must be nonnegative"
                )));
            }
            _ => {}
        }
        self.next_free_id = new_next_free_id;
        Ok(())
    }

    pub fn largest_id(&self) -> Option<i64> {
        self.id_to_name.last_key_value().map(|(&id, _)| id)
    }

    /// Ids in increasing order.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.id_to_name.keys().copied()
    }

    /// `(id, name)` pairs in increasing id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> + '_ {
        self.id_to_name
            .iter()
            .map(|(&id, name)| (id, name.as_str()))
    }

    /// Erase `deleted_ids`, then insert `new_ids` with `names`.
    ///
    /// Both id lists are checked for range and strict ordering before any
    /// change is made. `names` is either empty or parallel to `new_ids`. An
    /// individual erase or insert failure leaves the earlier changes applied.
    pub fn bulk_update(
        &mut self,
        deleted_ids: &[i64],
        new_ids: &[i64],
        names: &[String],
    ) -> Result<(), ArcoError> {
        check_ids_range_and_strictly_increasing(deleted_ids).context("invalid deleted ids")?;
        check_ids_range_and_strictly_increasing(new_ids).context("invalid new ids")?;
        if !names.is_empty() && names.len() != new_ids.len() {
            return Err(ArcoError::invalid_argument(format!(
                "names had size {} but should be empty or match new ids size {}",
                names.len(),
                new_ids.len()
            )));
        }
        for &id in deleted_ids {
            self.erase(id)?;
        }
        for (index, &id) in new_ids.iter().enumerate() {
            let name = names.get(index).map(String::as_str).unwrap_or("");
            self.insert(id, name)?;
        }
        Ok(())
    }
}

impl Default for IdNameBiMap {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_new_map_is_empty() {
        let map = IdNameBiMap::new(true);
        assert!(map.is_empty());
        assert_eq!(map.size(), 0);
        assert_eq!(map.next_free_id(), 0);
        assert!(map.checks_names());
    }

    #[test]
    fn test_insert_advances_next_free_id() {
        let mut map = IdNameBiMap::new(true);
        map.insert(0, "x").unwrap();
        map.insert(5, "").unwrap();
        assert_eq!(map.next_free_id(), 6);
        assert_eq!(map.size(), 2);
        assert_eq!(map.name(0), Some("x"));
        assert_eq!(map.id_for_name("x"), Some(0));
        assert!(map.has_name("x"));
        assert!(!map.has_name(""));
    }

    #[test]
    fn test_insert_below_next_free_id_fails_after_erase() {
        let mut map = IdNameBiMap::new(true);
        map.insert(0, "a").unwrap();
        map.insert(2, "b").unwrap();
        map.erase(0).unwrap();

        let err = map.insert(1, "c").unwrap_err();
        assert!(err.message().contains("next_free_id=3"));
        assert_eq!(map.size(), 1);
    }

    #[test]
    fn test_insert_max_id_fails() {
        let mut map = IdNameBiMap::new(false);
        assert!(map.insert(i64::MAX, "").is_err());
        assert!(map.insert(i64::MAX - 1, "").is_ok());
    }

    #[test]
    fn test_duplicate_name_with_checking() {
        let mut map = IdNameBiMap::new(true);
        map.insert(0, "x").unwrap();
        let err = map.insert(1, "x").unwrap_err();
        assert!(err.message().contains("duplicate name"));
    }

    #[test]
    fn test_duplicate_name_without_checking() {
        let mut map = IdNameBiMap::new(false);
        map.insert(0, "x").unwrap();
        map.insert(1, "x").unwrap();
        assert!(!map.has_name("x"));
        assert_eq!(map.size(), 2);
    }

    #[test]
    fn test_empty_names_never_collide() {
        let mut map = IdNameBiMap::new(true);
        map.insert(0, "").unwrap();
        map.insert(1, "").unwrap();
        assert_eq!(map.size(), 2);
    }

    #[test]
    fn test_erase_frees_name() {
        let mut map = IdNameBiMap::new(true);
        map.insert(0, "x").unwrap();
        map.erase(0).unwrap();
        assert!(!map.has_name("x"));
        map.insert(1, "x").unwrap();
        assert_eq!(map.id_for_name("x"), Some(1));
    }

    #[test]
    fn test_erase_missing_fails() {
        let mut map = IdNameBiMap::new(true);
        let err = map.erase(3).unwrap_err();
        assert!(err.message().contains("missing id 3"));
    }

    #[test]
    fn test_set_next_free_id() {
        let mut map = IdNameBiMap::new(true);
        assert!(map.set_next_free_id(-1).is_err());
        map.set_next_free_id(4).unwrap();
        assert_eq!(map.next_free_id(), 4);
        assert!(map.insert(3, "").is_err());

        map.insert(4, "").unwrap();
        assert!(map.set_next_free_id(4).is_err());
        map.set_next_free_id(10).unwrap();
        assert_eq!(map.next_free_id(), 10);
    }

    #[test]
    fn test_bulk_update_deletes_then_inserts() {
        let mut map = IdNameBiMap::from_entries([(0, "a"), (1, "b")], true).unwrap();
        map.bulk_update(&[0], &[2, 3], &names(&["a", "c"])).unwrap();
        assert_eq!(map.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(map.id_for_name("a"), Some(2));
        assert_eq!(map.next_free_id(), 4);
    }

    #[test]
    fn test_bulk_update_rejects_unsorted_before_mutating() {
        let mut map = IdNameBiMap::from_entries([(0, "a"), (1, "b")], true).unwrap();
        let before = map.clone();

        let err = map.bulk_update(&[0], &[3, 2], &[]).unwrap_err();
        assert!(err.message().starts_with("invalid new ids"));
        assert_eq!(map, before);

        let err = map.bulk_update(&[1, 0], &[], &[]).unwrap_err();
        assert!(err.message().starts_with("invalid deleted ids"));
        assert_eq!(map, before);
    }

    #[test]
    fn test_bulk_update_rejects_mismatched_names() {
        let mut map = IdNameBiMap::new(true);
        let err = map.bulk_update(&[], &[0, 1], &names(&["a"])).unwrap_err();
        assert!(err.message().contains("names had size 1"));
    }

    #[test]
    fn test_bulk_update_is_not_transactional() {
        let mut map = IdNameBiMap::from_entries([(0, "a")], true).unwrap();
        // The deletion succeeds before the insert of a stale id fails.
        let err = map.bulk_update(&[0], &[0], &[]).unwrap_err();
        assert!(err.message().contains("next_free_id=1"));
        assert!(map.is_empty());
    }
}
