//! Solve and model-solve parameter checks.

use crate::error::{ArcoError, ResultExt};
use crate::summary::ModelSummary;
use crate::validators::ids::{check_ids_range_and_strictly_increasing, check_ids_subset};
use crate::validators::scalar::DoubleOptions;
use crate::validators::solution::validate_basis;
use crate::validators::sparse_vector::{
    check_filter, check_ids_and_values_size, check_known_ids_and_values,
};
use arco_model::{ModelSolveParameters, ObjectiveParameters, SolveParameters};

/// Check every solver-independent parameter and report all problems at once.
pub fn validate_solve_parameters(parameters: &SolveParameters) -> Result<(), ArcoError> {
    let mut errors: Vec<String> = Vec::new();
    if let Some(limit) = parameters.iteration_limit {
        if limit < 0 {
            errors.push(format!("iteration_limit = {limit} < 0"));
        }
    }
    if let Some(limit) = parameters.node_limit {
        if limit < 0 {
            errors.push(format!("node_limit = {limit} < 0"));
        }
    }
    for (field, value) in [
        ("cutoff_limit", parameters.cutoff_limit),
        ("objective_limit", parameters.objective_limit),
        ("best_bound_limit", parameters.best_bound_limit),
    ] {
        if value.is_some_and(f64::is_nan) {
            errors.push(format!("{field} is NaN"));
        }
    }
    for (field, value) in [
        ("solution_limit", parameters.solution_limit),
        ("threads", parameters.threads),
        ("solution_pool_size", parameters.solution_pool_size),
    ] {
        if let Some(value) = value {
            if value <= 0 {
                errors.push(format!("{field} = {value} <= 0"));
            }
        }
    }
    if let Some(seed) = parameters.random_seed {
        if seed < 0 {
            errors.push(format!("random_seed = {seed} < 0"));
        }
    }
    for (field, value) in [
        ("absolute_gap_tolerance", parameters.absolute_gap_tolerance),
        ("relative_gap_tolerance", parameters.relative_gap_tolerance),
    ] {
        if let Some(value) = value {
            if value.is_nan() {
                errors.push(format!("{field} is NaN"));
            } else if value < 0.0 {
                errors.push(format!("{field} = {value} < 0"));
            }
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ArcoError::invalid_argument(errors.join("; ")))
    }
}

fn check_objective_parameters(parameters: &ObjectiveParameters) -> Result<(), ArcoError> {
    for (field, value) in [
        (
            "objective_degradation_absolute_tolerance",
            parameters.objective_degradation_absolute_tolerance,
        ),
        (
            "objective_degradation_relative_tolerance",
            parameters.objective_degradation_relative_tolerance,
        ),
    ] {
        if let Some(value) = value {
            if value.is_nan() || value < 0.0 {
                return Err(ArcoError::invalid_argument(format!(
                    "{field} = {value} must be nonnegative"
                )));
            }
        }
    }
    Ok(())
}

/// Check model-specific parameters against the ids of the model.
pub fn validate_model_solve_parameters(
    parameters: &ModelSolveParameters,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    check_filter(&parameters.variable_values_filter, &summary.variables, "variable")
        .context("invalid variable_values_filter")?;
    check_filter(
        &parameters.dual_values_filter,
        &summary.linear_constraints,
        "linear constraint",
    )
    .context("invalid dual_values_filter")?;
    check_filter(
        &parameters.quadratic_dual_values_filter,
        &summary.quadratic_constraints,
        "quadratic constraint",
    )
    .context("invalid quadratic_dual_values_filter")?;
    check_filter(&parameters.reduced_costs_filter, &summary.variables, "variable")
        .context("invalid reduced_costs_filter")?;

    if let Some(basis) = &parameters.initial_basis {
        validate_basis(basis, summary).context("invalid initial_basis")?;
    }

    for (index, hint) in parameters.solution_hints.iter().enumerate() {
        check_known_ids_and_values(
            &hint.variable_values,
            DoubleOptions::FINITE,
            &summary.variables,
            "variable",
        )
        .with_context(|| format!("invalid solution_hints[{index}].variable_values"))?;
        check_known_ids_and_values(
            &hint.dual_values,
            DoubleOptions::FINITE,
            &summary.linear_constraints,
            "linear constraint",
        )
        .with_context(|| format!("invalid solution_hints[{index}].dual_values"))?;
    }

    let priorities = &parameters.branching_priorities;
    check_ids_range_and_strictly_increasing(&priorities.ids)
        .and_then(|()| check_ids_and_values_size(&priorities.ids, priorities.values.len()))
        .and_then(|()| check_ids_subset(&priorities.ids, &summary.variables, "variable"))
        .context("invalid branching_priorities")?;

    if let Some(primary) = &parameters.primary_objective_parameters {
        check_objective_parameters(primary).context("invalid primary_objective_parameters")?;
    }
    for (id, aux) in &parameters.auxiliary_objective_parameters {
        if !summary.auxiliary_objectives.has_id(*id) {
            return Err(ArcoError::invalid_argument(format!(
                "invalid auxiliary_objective_parameters: id {id} is not an existing auxiliary objective id"
            )));
        }
        check_objective_parameters(aux)
            .with_context(|| format!("invalid auxiliary_objective_parameters[{id}]"))?;
    }

    check_ids_range_and_strictly_increasing(&parameters.lazy_linear_constraint_ids)
        .and_then(|()| {
            check_ids_subset(
                &parameters.lazy_linear_constraint_ids,
                &summary.linear_constraints,
                "linear constraint",
            )
        })
        .context("invalid lazy_linear_constraint_ids")
}
