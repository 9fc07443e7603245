//! Property tests for IdNameBiMap and ModelSummary bookkeeping

use arco_core::{IdNameBiMap, ModelSummary, validate_model, validate_model_update};
use arco_model::{Model, ModelUpdate};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    /// Insert at `next_free_id + gap`, optionally named `n{name}`.
    Insert { gap: i64, name: Option<u8> },
    /// Erase the live id at this position (modulo the live count).
    Erase(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0i64..4, proptest::option::of(0u8..6)).prop_map(|(gap, name)| Op::Insert { gap, name }),
        1 => any::<usize>().prop_map(Op::Erase),
    ]
}

proptest! {
    /// Size tracks live ids and next_free_id is one past the largest id ever inserted
    #[test]
    fn size_and_next_free_id_follow_operations(ops in proptest::collection::vec(arb_op(), 0..60)) {
        let mut map = IdNameBiMap::new(true);
        let mut live: BTreeMap<i64, String> = BTreeMap::new();
        let mut largest_ever: Option<i64> = None;

        for op in ops {
            match op {
                Op::Insert { gap, name } => {
                    let id = map.next_free_id() + gap;
                    let name = name.map(|n| format!("n{n}")).unwrap_or_default();
                    let duplicate = !name.is_empty() && live.values().any(|existing| existing == &name);
                    let outcome = map.insert(id, &name);
                    prop_assert_eq!(outcome.is_err(), duplicate);
                    if !duplicate {
                        live.insert(id, name);
                        largest_ever = Some(id);
                    }
                }
                Op::Erase(position) => {
                    if live.is_empty() {
                        continue;
                    }
                    let id = *live.keys().nth(position % live.len()).unwrap();
                    prop_assert!(map.erase(id).is_ok());
                    live.remove(&id);
                    prop_assert!(map.erase(id).is_err());
                }
            }
            prop_assert_eq!(map.size(), live.len());
            prop_assert_eq!(map.next_free_id(), largest_ever.map_or(0, |id| id + 1));
            prop_assert_eq!(map.ids().collect::<Vec<_>>(), live.keys().copied().collect::<Vec<_>>());
        }
    }

    /// Without name checking any name sequence is accepted
    #[test]
    fn unchecked_names_never_fail(names in proptest::collection::vec(0u8..3, 0..30)) {
        let mut map = IdNameBiMap::new(false);
        for (id, name) in names.iter().enumerate() {
            let n = format!("n{name}");
            prop_assert!(map.insert(id as i64, &n).is_ok());
        }
        prop_assert_eq!(map.size(), names.len());
        prop_assert!(!map.has_name("n0"));
    }

    /// With name checking a repeated non-empty name is rejected
    #[test]
    fn checked_names_reject_repeats(names in proptest::collection::vec(0u8..3, 0..30)) {
        let mut map = IdNameBiMap::new(true);
        let mut seen = std::collections::HashSet::new();
        for (id, name) in names.iter().enumerate() {
            let name = format!("n{name}");
            let fresh = seen.insert(name.clone());
            prop_assert_eq!(map.insert(id as i64, &name).is_ok(), fresh);
        }
    }

    /// An empty update leaves the summary of any accepted model unchanged
    #[test]
    fn empty_update_is_noop(
        gaps in proptest::collection::vec(1i64..5, 0..20),
        constraint_count in 0usize..10,
        maximize in any::<bool>(),
    ) {
        let mut model = Model::new("generated");
        let mut id = -1;
        for gap in gaps {
            id += gap;
            model.variables.push(id, 0.0, 1.0, false, &format!("x{id}"));
        }
        for row in 0..constraint_count {
            model.linear_constraints.push(row as i64, f64::NEG_INFINITY, 1.0, "");
        }
        model.objective.maximize = maximize;

        let mut summary = validate_model(&model, true).unwrap();
        let before: ModelSummary = summary.clone();
        validate_model_update(&ModelUpdate::default(), &mut summary).unwrap();
        prop_assert_eq!(summary, before);
    }

    /// Appending fresh variables to an accepted model is accepted
    #[test]
    fn append_only_updates_are_accepted(existing in 0i64..10, added in 1i64..10) {
        let mut model = Model::new("generated");
        for id in 0..existing {
            model.variables.push(id, 0.0, 1.0, false, "");
        }
        let mut summary = validate_model(&model, true).unwrap();

        let mut update = ModelUpdate::default();
        for id in existing..existing + added {
            update.new_variables.push(id, f64::NEG_INFINITY, f64::INFINITY, true, "");
        }
        prop_assert!(validate_model_update(&update, &mut summary).is_ok());
        prop_assert_eq!(summary.variables.size() as i64, existing + added);
        prop_assert_eq!(summary.variables.next_free_id(), existing + added);
    }
}
