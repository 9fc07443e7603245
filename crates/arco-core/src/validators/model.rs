//! Whole-model and incremental-update validation.

use crate::bimap::IdNameBiMap;
use crate::error::{ArcoError, ResultExt};
use crate::summary::ModelSummary;
use crate::validators::constraints::{ValidateConstraint, check_bounds};
use crate::validators::ids::{check_ids_range_and_strictly_increasing, check_ids_subset};
use crate::validators::scalar::{DoubleOptions, check_scalar, check_scalar_no_nan_no_inf};
use crate::validators::sparse_matrix::{sparse_matrix_ids_are_known, sparse_matrix_valid};
use crate::validators::sparse_vector::{
    check_ids_and_values, check_ids_and_values_size, check_known_ids_and_values,
};
use arco_model::{
    LinearConstraintsData, Model, ModelUpdate, ObjectiveData, ObjectiveUpdates,
    SparseDoubleMatrix, SparseDoubleVector, VariablesData,
};
use std::collections::BTreeMap;

/// Validate `model` and return its summary.
///
/// With `check_names`, names within each entity kind must be unique (empty
/// names excepted).
pub fn validate_model(model: &Model, check_names: bool) -> Result<ModelSummary, ArcoError> {
    let summary = ModelSummary::create(model, check_names)?;
    check_variables(&model.variables).context("invalid variables")?;
    check_objective(&model.objective, &summary.variables).context("invalid objective")?;
    for (id, objective) in &model.auxiliary_objectives {
        check_objective(objective, &summary.variables)
            .with_context(|| format!("invalid auxiliary_objectives[{id}]"))?;
    }
    check_linear_constraints(&model.linear_constraints).context("invalid linear_constraints")?;
    check_linear_constraint_matrix(&model.linear_constraint_matrix, &summary)
        .context("invalid linear_constraint_matrix")?;
    check_mapped(&model.quadratic_constraints, &summary.variables, "quadratic_constraints")?;
    check_mapped(
        &model.second_order_cone_constraints,
        &summary.variables,
        "second_order_cone_constraints",
    )?;
    check_mapped(&model.sos1_constraints, &summary.variables, "sos1_constraints")?;
    check_mapped(&model.sos2_constraints, &summary.variables, "sos2_constraints")?;
    check_mapped(&model.indicator_constraints, &summary.variables, "indicator_constraints")?;

    tracing::debug!(
        component = "model_validator",
        operation = "validate_model",
        status = "success",
        model = %model.name,
        variables = summary.variables.size(),
        linear_constraints = summary.linear_constraints.size(),
        matrix_entries = model.linear_constraint_matrix.len(),
        "Model validated"
    );
    Ok(summary)
}

/// Apply `update` to `summary` and validate it.
///
/// Bound, integrality and objective updates may only target entities that
/// existed before this update. On error the summary may be partially updated
/// and must be discarded.
pub fn validate_model_update(
    update: &ModelUpdate,
    summary: &mut ModelSummary,
) -> Result<(), ArcoError> {
    summary.update(update)?;

    let first_new_variable = first_new_id(&update.new_variables.ids, &summary.variables);
    let variable_updates = &update.variable_updates;
    check_ids_and_values(&variable_updates.lower_bounds, DoubleOptions::LOWER_BOUND)
        .and_then(|()| {
            check_existing_ids(
                &variable_updates.lower_bounds.ids,
                &summary.variables,
                first_new_variable,
                "variable",
            )
        })
        .context("invalid variable_updates.lower_bounds")?;
    check_ids_and_values(&variable_updates.upper_bounds, DoubleOptions::UPPER_BOUND)
        .and_then(|()| {
            check_existing_ids(
                &variable_updates.upper_bounds.ids,
                &summary.variables,
                first_new_variable,
                "variable",
            )
        })
        .context("invalid variable_updates.upper_bounds")?;
    check_ids_range_and_strictly_increasing(&variable_updates.integers.ids)
        .and_then(|()| {
            check_ids_and_values_size(
                &variable_updates.integers.ids,
                variable_updates.integers.values.len(),
            )
        })
        .and_then(|()| {
            check_existing_ids(
                &variable_updates.integers.ids,
                &summary.variables,
                first_new_variable,
                "variable",
            )
        })
        .context("invalid variable_updates.integers")?;
    check_variables(&update.new_variables).context("invalid new_variables")?;

    check_objective_updates(&update.objective_updates, &summary.variables)
        .context("invalid objective_updates")?;
    check_auxiliary_objectives_update(update, summary)?;

    let first_new_constraint = first_new_id(
        &update.new_linear_constraints.ids,
        &summary.linear_constraints,
    );
    let constraint_updates = &update.linear_constraint_updates;
    check_ids_and_values(&constraint_updates.lower_bounds, DoubleOptions::LOWER_BOUND)
        .and_then(|()| {
            check_existing_ids(
                &constraint_updates.lower_bounds.ids,
                &summary.linear_constraints,
                first_new_constraint,
                "linear constraint",
            )
        })
        .context("invalid linear_constraint_updates.lower_bounds")?;
    check_ids_and_values(&constraint_updates.upper_bounds, DoubleOptions::UPPER_BOUND)
        .and_then(|()| {
            check_existing_ids(
                &constraint_updates.upper_bounds.ids,
                &summary.linear_constraints,
                first_new_constraint,
                "linear constraint",
            )
        })
        .context("invalid linear_constraint_updates.upper_bounds")?;
    check_linear_constraints(&update.new_linear_constraints)
        .context("invalid new_linear_constraints")?;
    check_linear_constraint_matrix(&update.linear_constraint_matrix_updates, summary)
        .context("invalid linear_constraint_matrix_updates")?;

    check_mapped(
        &update.quadratic_constraint_updates.new_constraints,
        &summary.variables,
        "quadratic_constraints",
    )?;
    check_mapped(
        &update.second_order_cone_constraint_updates.new_constraints,
        &summary.variables,
        "second_order_cone_constraints",
    )?;
    check_mapped(
        &update.sos1_constraint_updates.new_constraints,
        &summary.variables,
        "sos1_constraints",
    )?;
    check_mapped(
        &update.sos2_constraint_updates.new_constraints,
        &summary.variables,
        "sos2_constraints",
    )?;
    check_mapped(
        &update.indicator_constraint_updates.new_constraints,
        &summary.variables,
        "indicator_constraints",
    )?;

    tracing::debug!(
        component = "model_validator",
        operation = "validate_model_update",
        status = "success",
        new_variables = update.new_variables.len(),
        deleted_variables = update.deleted_variable_ids.len(),
        new_linear_constraints = update.new_linear_constraints.len(),
        "Model update validated"
    );
    Ok(())
}

/// The smallest id added by the update, or the next free id if none was added.
fn first_new_id(new_ids: &[i64], universe: &IdNameBiMap) -> i64 {
    new_ids
        .first()
        .copied()
        .unwrap_or_else(|| universe.next_free_id())
}

/// Ids must be known and strictly below `first_new_id`.
fn check_existing_ids(
    ids: &[i64],
    universe: &IdNameBiMap,
    first_new_id: i64,
    description: &str,
) -> Result<(), ArcoError> {
    check_ids_subset(ids, universe, description)?;
    if let Some(&id) = ids.iter().find(|&&id| id >= first_new_id) {
        return Err(ArcoError::invalid_argument(format!(
            "id {id} refers to a {description} added by this update (first new id is {first_new_id})"
        )));
    }
    Ok(())
}

fn check_parallel(field: &str, len: usize, ids_len: usize) -> Result<(), ArcoError> {
    if len != ids_len {
        return Err(ArcoError::invalid_argument(format!(
            "{field} has {len} elements but ids has {ids_len}"
        )));
    }
    Ok(())
}

fn check_names_parallel(names: &[String], ids_len: usize) -> Result<(), ArcoError> {
    if !names.is_empty() {
        check_parallel("names", names.len(), ids_len)?;
    }
    Ok(())
}

fn check_bound_vectors(ids: &[i64], lower_bounds: &[f64], upper_bounds: &[f64]) -> Result<(), ArcoError> {
    check_parallel("lower_bounds", lower_bounds.len(), ids.len())?;
    check_parallel("upper_bounds", upper_bounds.len(), ids.len())?;
    for (index, &id) in ids.iter().enumerate() {
        check_bounds(lower_bounds[index], upper_bounds[index])
            .with_context(|| format!("id {id}"))?;
    }
    Ok(())
}

fn check_variables(variables: &VariablesData) -> Result<(), ArcoError> {
    check_ids_range_and_strictly_increasing(&variables.ids)?;
    check_parallel("integers", variables.integers.len(), variables.ids.len())?;
    check_names_parallel(&variables.names, variables.ids.len())?;
    check_bound_vectors(
        &variables.ids,
        &variables.lower_bounds,
        &variables.upper_bounds,
    )
}

fn check_linear_constraints(constraints: &LinearConstraintsData) -> Result<(), ArcoError> {
    check_ids_range_and_strictly_increasing(&constraints.ids)?;
    check_names_parallel(&constraints.names, constraints.ids.len())?;
    check_bound_vectors(
        &constraints.ids,
        &constraints.lower_bounds,
        &constraints.upper_bounds,
    )
}

fn check_linear_constraint_matrix(
    matrix: &SparseDoubleMatrix,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    sparse_matrix_valid(matrix, false)?;
    sparse_matrix_ids_are_known(
        matrix,
        &summary.linear_constraints,
        "linear constraint",
        &summary.variables,
        "variable",
    )
}

fn check_objective_terms(
    linear: &SparseDoubleVector,
    quadratic: &SparseDoubleMatrix,
    variables: &IdNameBiMap,
) -> Result<(), ArcoError> {
    check_known_ids_and_values(linear, DoubleOptions::FINITE, variables, "variable")
        .context("invalid linear_coefficients")?;
    sparse_matrix_valid(quadratic, true)
        .and_then(|()| sparse_matrix_ids_are_known(quadratic, variables, "variable", variables, "variable"))
        .context("invalid quadratic_coefficients")
}

fn check_priority(priority: i64) -> Result<(), ArcoError> {
    if priority < 0 {
        return Err(ArcoError::invalid_argument(format!(
            "priority must be nonnegative, got {priority}"
        )));
    }
    Ok(())
}

fn check_objective(objective: &ObjectiveData, variables: &IdNameBiMap) -> Result<(), ArcoError> {
    check_scalar_no_nan_no_inf(objective.offset).context("invalid offset")?;
    check_objective_terms(
        &objective.linear_coefficients,
        &objective.quadratic_coefficients,
        variables,
    )?;
    check_priority(objective.priority)
}

fn check_objective_updates(
    updates: &ObjectiveUpdates,
    variables: &IdNameBiMap,
) -> Result<(), ArcoError> {
    if let Some(offset) = updates.offset_update {
        check_scalar(offset, DoubleOptions::FINITE).context("invalid offset_update")?;
    }
    if let Some(priority) = updates.priority_update {
        check_priority(priority).context("invalid priority_update")?;
    }
    check_objective_terms(
        &updates.linear_coefficients,
        &updates.quadratic_coefficients,
        variables,
    )
}

fn check_auxiliary_objectives_update(
    update: &ModelUpdate,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    let aux = &update.auxiliary_objectives_updates;
    let new_ids: Vec<i64> = aux.new_objectives.keys().copied().collect();
    let first_new = first_new_id(&new_ids, &summary.auxiliary_objectives);
    let updated_ids: Vec<i64> = aux.objective_updates.keys().copied().collect();
    check_existing_ids(
        &updated_ids,
        &summary.auxiliary_objectives,
        first_new,
        "auxiliary objective",
    )
    .context("invalid auxiliary_objectives_updates.objective_updates")?;
    for (id, updates) in &aux.objective_updates {
        check_objective_updates(updates, &summary.variables)
            .with_context(|| format!("invalid auxiliary_objectives_updates.objective_updates[{id}]"))?;
    }
    for (id, objective) in &aux.new_objectives {
        check_objective(objective, &summary.variables)
            .with_context(|| format!("invalid auxiliary_objectives_updates.new_objectives[{id}]"))?;
    }
    Ok(())
}

fn check_mapped<C: ValidateConstraint>(
    constraints: &BTreeMap<i64, C>,
    variables: &IdNameBiMap,
    field: &str,
) -> Result<(), ArcoError> {
    for (id, constraint) in constraints {
        constraint
            .validate(variables)
            .with_context(|| format!("invalid {field}[{id}]"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arco_model::{IndicatorConstraintData, QuadraticConstraintData};

    fn base_model() -> Model {
        let mut model = Model::new("base");
        model.variables.push(0, 0.0, 10.0, false, "x");
        model.variables.push(1, f64::NEG_INFINITY, f64::INFINITY, true, "y");
        model.linear_constraints.push(0, f64::NEG_INFINITY, 4.0, "c0");
        model.linear_constraint_matrix = SparseDoubleMatrix::from_triplets([(0, 0, 1.0), (0, 1, 1.0)]);
        model.objective.linear_coefficients = SparseDoubleVector::new(vec![0], vec![2.0]);
        model
    }

    #[test]
    fn test_valid_model_returns_summary() {
        let summary = validate_model(&base_model(), true).unwrap();
        assert_eq!(summary.variables.size(), 2);
        assert_eq!(summary.linear_constraints.id_for_name("c0"), Some(0));
    }

    #[test]
    fn test_variable_bound_policy() {
        let mut model = base_model();
        model.variables.lower_bounds[0] = f64::INFINITY;
        let err = validate_model(&model, true).unwrap_err();
        assert_eq!(
            err.message(),
            "invalid variables: id 0: invalid lower_bound: value is +inf"
        );
    }

    #[test]
    fn test_variable_vectors_must_be_parallel() {
        let mut model = base_model();
        model.variables.integers.pop();
        let err = validate_model(&model, true).unwrap_err();
        assert!(err.message().contains("integers has 1 elements"));
    }

    #[test]
    fn test_objective_checks() {
        let mut model = base_model();
        model.objective.offset = f64::NAN;
        assert!(validate_model(&model, true).is_err());

        let mut model = base_model();
        model.objective.linear_coefficients = SparseDoubleVector::new(vec![4], vec![1.0]);
        let err = validate_model(&model, true).unwrap_err();
        assert!(err.message().starts_with("invalid objective: invalid linear_coefficients"));

        let mut model = base_model();
        model.objective.priority = -1;
        assert!(validate_model(&model, true).is_err());
    }

    #[test]
    fn test_matrix_checks() {
        let mut model = base_model();
        model.linear_constraint_matrix = SparseDoubleMatrix::from_triplets([(0, 1, 1.0), (0, 0, 1.0)]);
        assert!(validate_model(&model, true).is_err());

        let mut model = base_model();
        model.linear_constraint_matrix = SparseDoubleMatrix::from_triplets([(3, 0, 1.0)]);
        let err = validate_model(&model, true).unwrap_err();
        assert!(err.message().contains("linear constraint"));
    }

    #[test]
    fn test_mapped_constraints_use_variable_universe() {
        let mut model = base_model();
        model.indicator_constraints.insert(
            0,
            IndicatorConstraintData {
                indicator_id: Some(9),
                ..IndicatorConstraintData::default()
            },
        );
        let err = validate_model(&model, true).unwrap_err();
        assert!(err.message().starts_with("invalid indicator_constraints[0]"));
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut summary = validate_model(&base_model(), true).unwrap();
        let before = summary.clone();
        validate_model_update(&ModelUpdate::default(), &mut summary).unwrap();
        assert_eq!(summary, before);
    }

    #[test]
    fn test_append_only_update() {
        let mut summary = validate_model(&base_model(), true).unwrap();
        let mut update = ModelUpdate::default();
        update.new_variables.push(2, 0.0, 1.0, true, "z");
        update.new_linear_constraints.push(1, 0.0, 1.0, "c1");
        update.linear_constraint_matrix_updates =
            SparseDoubleMatrix::from_triplets([(0, 2, 1.0), (1, 0, 1.0), (1, 2, 3.0)]);
        update.objective_updates.linear_coefficients = SparseDoubleVector::new(vec![2], vec![1.0]);
        update.quadratic_constraint_updates.new_constraints.insert(
            0,
            QuadraticConstraintData {
                quadratic_terms: SparseDoubleMatrix::from_triplets([(2, 2, 1.0)]),
                upper_bound: 1.0,
                ..QuadraticConstraintData::default()
            },
        );

        validate_model_update(&update, &mut summary).unwrap();
        assert_eq!(summary.variables.next_free_id(), 3);
        assert!(summary.quadratic_constraints.has_id(0));
    }

    #[test]
    fn test_bound_update_on_new_variable_is_rejected() {
        let mut summary = validate_model(&base_model(), true).unwrap();
        let mut update = ModelUpdate::default();
        update.new_variables.push(2, 0.0, 1.0, false, "");
        update.variable_updates.upper_bounds = SparseDoubleVector::new(vec![2], vec![5.0]);
        let err = validate_model_update(&update, &mut summary).unwrap_err();
        assert!(err.message().contains("added by this update"));
    }

    #[test]
    fn test_bound_update_on_deleted_variable_is_rejected() {
        let mut summary = validate_model(&base_model(), true).unwrap();
        let mut update = ModelUpdate::default();
        update.deleted_variable_ids = vec![0];
        update.variable_updates.lower_bounds = SparseDoubleVector::new(vec![0], vec![1.0]);
        let err = validate_model_update(&update, &mut summary).unwrap_err();
        assert!(err.message().starts_with("invalid variable_updates.lower_bounds"));
    }

    #[test]
    fn test_auxiliary_objective_updates() {
        let mut model = base_model();
        model.auxiliary_objectives.insert(0, ObjectiveData::default());
        let mut summary = validate_model(&model, true).unwrap();

        let mut update = ModelUpdate::default();
        update.auxiliary_objectives_updates.objective_updates.insert(
            0,
            ObjectiveUpdates {
                priority_update: Some(2),
                ..ObjectiveUpdates::default()
            },
        );
        validate_model_update(&update, &mut summary).unwrap();

        let mut update = ModelUpdate::default();
        update.auxiliary_objectives_updates.objective_updates.insert(
            3,
            ObjectiveUpdates::default(),
        );
        assert!(validate_model_update(&update, &mut summary).is_err());
    }
}
