//! Incremental edits to a previously accepted [`Model`](crate::Model).
//!
//! An update first deletes, then adds new entities, then changes existing
//! ones. Changes may only target entities that existed before this update.

use crate::model::{
    IndicatorConstraintData, LinearConstraintsData, ObjectiveData, QuadraticConstraintData,
    SecondOrderConeConstraintData, SosConstraintData, VariablesData,
};
use crate::sparse::{SparseBoolVector, SparseDoubleMatrix, SparseDoubleVector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Changes to variables that existed before the update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableUpdates {
    pub lower_bounds: SparseDoubleVector,
    pub upper_bounds: SparseDoubleVector,
    pub integers: SparseBoolVector,
}

/// Changes to an existing objective. Unset fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveUpdates {
    /// `Some(true)` switches to maximization.
    pub direction_update: Option<bool>,
    pub offset_update: Option<f64>,
    pub priority_update: Option<i64>,
    /// New coefficient values; zero removes a term.
    pub linear_coefficients: SparseDoubleVector,
    pub quadratic_coefficients: SparseDoubleMatrix,
}

impl ObjectiveUpdates {
    pub fn is_empty(&self) -> bool {
        self.direction_update.is_none()
            && self.offset_update.is_none()
            && self.priority_update.is_none()
            && self.linear_coefficients.is_empty()
            && self.quadratic_coefficients.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxiliaryObjectivesUpdates {
    pub deleted_objective_ids: Vec<i64>,
    pub new_objectives: BTreeMap<i64, ObjectiveData>,
    /// Keyed by pre-existing auxiliary objective id.
    pub objective_updates: BTreeMap<i64, ObjectiveUpdates>,
}

/// Bound changes to linear constraints that existed before the update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConstraintUpdates {
    pub lower_bounds: SparseDoubleVector,
    pub upper_bounds: SparseDoubleVector,
}

/// Deletions and additions for a constraint kind stored as a map.
///
/// Mapped constraints cannot be modified in place; delete and re-add instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappedConstraintUpdates<C> {
    pub deleted_constraint_ids: Vec<i64>,
    pub new_constraints: BTreeMap<i64, C>,
}

impl<C> Default for MappedConstraintUpdates<C> {
    fn default() -> Self {
        Self {
            deleted_constraint_ids: Vec::new(),
            new_constraints: BTreeMap::new(),
        }
    }
}

impl<C> MappedConstraintUpdates<C> {
    pub fn is_empty(&self) -> bool {
        self.deleted_constraint_ids.is_empty() && self.new_constraints.is_empty()
    }
}

/// An incremental edit of a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelUpdate {
    pub deleted_variable_ids: Vec<i64>,
    pub deleted_linear_constraint_ids: Vec<i64>,
    pub variable_updates: VariableUpdates,
    pub objective_updates: ObjectiveUpdates,
    pub auxiliary_objectives_updates: AuxiliaryObjectivesUpdates,
    pub linear_constraint_updates: LinearConstraintUpdates,
    pub new_variables: VariablesData,
    pub new_linear_constraints: LinearConstraintsData,
    /// Coefficient changes; a zero coefficient removes the entry.
    pub linear_constraint_matrix_updates: SparseDoubleMatrix,
    pub quadratic_constraint_updates: MappedConstraintUpdates<QuadraticConstraintData>,
    pub second_order_cone_constraint_updates:
        MappedConstraintUpdates<SecondOrderConeConstraintData>,
    pub sos1_constraint_updates: MappedConstraintUpdates<SosConstraintData>,
    pub sos2_constraint_updates: MappedConstraintUpdates<SosConstraintData>,
    pub indicator_constraint_updates: MappedConstraintUpdates<IndicatorConstraintData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_update_is_empty() {
        let update = ModelUpdate::default();
        assert!(update.deleted_variable_ids.is_empty());
        assert!(update.objective_updates.is_empty());
        assert!(update.sos1_constraint_updates.is_empty());
        assert!(update.new_variables.is_empty());
    }

    #[test]
    fn test_mapped_updates_not_empty_with_deletion() {
        let updates = MappedConstraintUpdates::<SosConstraintData> {
            deleted_constraint_ids: vec![3],
            new_constraints: BTreeMap::new(),
        };
        assert!(!updates.is_empty());
    }

    #[test]
    fn test_objective_updates_with_direction_not_empty() {
        let updates = ObjectiveUpdates {
            direction_update: Some(true),
            ..ObjectiveUpdates::default()
        };
        assert!(!updates.is_empty());
    }
}
