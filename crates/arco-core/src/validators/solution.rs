//! Solutions, bases and rays returned by a solver.

use crate::error::{ArcoError, ResultExt};
use crate::summary::ModelSummary;
use crate::validators::ids::{check_ids_identical, check_ids_range_and_strictly_increasing};
use crate::validators::scalar::{DoubleOptions, check_scalar_no_nan_no_inf};
use crate::validators::sparse_vector::{
    check_ids_and_values, check_ids_and_values_size, check_vector_against_filter,
};
use arco_model::{
    Basis, BasisStatus, DualRay, DualSolution, FeasibilityStatus, ModelSolveParameters,
    PrimalRay, PrimalSolution, Solution, SparseBasisStatusVector,
};

pub fn validate_primal_solution(
    solution: &PrimalSolution,
    parameters: &ModelSolveParameters,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    if solution.feasibility_status == FeasibilityStatus::Unspecified {
        return Err(ArcoError::invalid_argument(
            "feasibility_status must be specified",
        ));
    }
    check_ids_and_values(&solution.variable_values, DoubleOptions::FINITE)
        .and_then(|()| {
            check_vector_against_filter(
                &solution.variable_values,
                &parameters.variable_values_filter,
                &summary.variables,
                "variable",
            )
        })
        .context("invalid variable_values")?;
    check_scalar_no_nan_no_inf(solution.objective_value).context("invalid objective_value")?;
    let aux_ids: Vec<i64> = solution.auxiliary_objective_values.keys().copied().collect();
    check_ids_identical(
        &aux_ids,
        summary.auxiliary_objectives.ids(),
        "auxiliary objectives",
    )
    .context("invalid auxiliary_objective_values")?;
    for (id, &value) in &solution.auxiliary_objective_values {
        check_scalar_no_nan_no_inf(value)
            .with_context(|| format!("invalid auxiliary_objective_values[{id}]"))?;
    }
    Ok(())
}

pub fn validate_dual_solution(
    solution: &DualSolution,
    parameters: &ModelSolveParameters,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    if solution.feasibility_status == FeasibilityStatus::Unspecified {
        return Err(ArcoError::invalid_argument(
            "feasibility_status must be specified",
        ));
    }
    check_ids_and_values(&solution.dual_values, DoubleOptions::FINITE)
        .and_then(|()| {
            check_vector_against_filter(
                &solution.dual_values,
                &parameters.dual_values_filter,
                &summary.linear_constraints,
                "linear constraint",
            )
        })
        .context("invalid dual_values")?;
    check_ids_and_values(&solution.quadratic_dual_values, DoubleOptions::FINITE)
        .and_then(|()| {
            check_vector_against_filter(
                &solution.quadratic_dual_values,
                &parameters.quadratic_dual_values_filter,
                &summary.quadratic_constraints,
                "quadratic constraint",
            )
        })
        .context("invalid quadratic_dual_values")?;
    check_ids_and_values(&solution.reduced_costs, DoubleOptions::FINITE)
        .and_then(|()| {
            check_vector_against_filter(
                &solution.reduced_costs,
                &parameters.reduced_costs_filter,
                &summary.variables,
                "variable",
            )
        })
        .context("invalid reduced_costs")?;
    if let Some(objective_value) = solution.objective_value {
        check_scalar_no_nan_no_inf(objective_value).context("invalid objective_value")?;
    }
    Ok(())
}

fn check_basis_statuses(
    statuses: &SparseBasisStatusVector,
    expected_ids: impl IntoIterator<Item = i64>,
    description: &str,
) -> Result<usize, ArcoError> {
    check_ids_range_and_strictly_increasing(&statuses.ids)?;
    check_ids_and_values_size(&statuses.ids, statuses.values.len())?;
    check_ids_identical(&statuses.ids, expected_ids, description)?;
    let mut basic = 0;
    for (index, status) in statuses.values.iter().enumerate() {
        match status {
            BasisStatus::Unspecified => {
                return Err(ArcoError::invalid_argument(format!(
                    "status for id {} is unspecified",
                    statuses.ids[index]
                )));
            }
            BasisStatus::Basic => basic += 1,
            _ => {}
        }
    }
    Ok(basic)
}

/// Statuses cover exactly the model's variables and linear constraints, and
/// the number of basic entries equals the number of linear constraints.
pub fn validate_basis(basis: &Basis, summary: &ModelSummary) -> Result<(), ArcoError> {
    let basic_constraints = check_basis_statuses(
        &basis.constraint_status,
        summary.linear_constraints.ids(),
        "linear constraints",
    )
    .context("invalid constraint_status")?;
    let basic_variables = check_basis_statuses(
        &basis.variable_status,
        summary.variables.ids(),
        "variables",
    )
    .context("invalid variable_status")?;
    let basic = basic_constraints + basic_variables;
    let expected = summary.linear_constraints.size();
    if basic != expected {
        return Err(ArcoError::invalid_argument(format!(
            "number of basic variables and constraints ({basic}) is different from the number of linear constraints ({expected})"
        )));
    }
    Ok(())
}

pub fn validate_solution(
    solution: &Solution,
    parameters: &ModelSolveParameters,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    if solution.primal_solution.is_none()
        && solution.dual_solution.is_none()
        && solution.basis.is_none()
    {
        return Err(ArcoError::invalid_argument(
            "empty solution: at least one of primal_solution, dual_solution or basis must be set",
        ));
    }
    if let Some(primal) = &solution.primal_solution {
        validate_primal_solution(primal, parameters, summary).context("invalid primal_solution")?;
    }
    if let Some(dual) = &solution.dual_solution {
        validate_dual_solution(dual, parameters, summary).context("invalid dual_solution")?;
    }
    if let Some(basis) = &solution.basis {
        validate_basis(basis, summary).context("invalid basis")?;
        if basis.basic_dual_feasibility == FeasibilityStatus::Unspecified {
            return Err(ArcoError::invalid_argument(
                "invalid basis: basic_dual_feasibility must be specified",
            ));
        }
        if let Some(dual) = &solution.dual_solution {
            if basis.basic_dual_feasibility != dual.feasibility_status {
                return Err(ArcoError::invalid_argument(format!(
                    "basis.basic_dual_feasibility ({}) differs from dual_solution.feasibility_status ({})",
                    basis.basic_dual_feasibility, dual.feasibility_status
                )));
            }
        }
    }
    Ok(())
}

/// Validate each solution and their order: primal-feasible solutions first,
/// then, within each group, dual-feasible solutions first.
pub fn validate_solutions(
    solutions: &[Solution],
    parameters: &ModelSolveParameters,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    let mut previous_primal_feasible = true;
    let mut previous_dual_feasible = true;
    for (index, solution) in solutions.iter().enumerate() {
        validate_solution(solution, parameters, summary)
            .with_context(|| format!("invalid solutions[{index}]"))?;
        let primal_feasible = solution.is_primal_feasible();
        let dual_feasible = solution.is_dual_feasible();
        if primal_feasible && !previous_primal_feasible {
            return Err(ArcoError::invalid_argument(format!(
                "primal solution ordering not satisfied: solutions[{index}] is primal feasible but follows a solution that is not"
            )));
        }
        if primal_feasible == previous_primal_feasible && dual_feasible && !previous_dual_feasible
        {
            return Err(ArcoError::invalid_argument(format!(
                "dual solution ordering not satisfied: solutions[{index}] is dual feasible but follows a solution that is not"
            )));
        }
        previous_primal_feasible = primal_feasible;
        previous_dual_feasible = dual_feasible;
    }
    Ok(())
}

pub fn validate_primal_ray(
    ray: &PrimalRay,
    parameters: &ModelSolveParameters,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    check_ids_and_values(&ray.variable_values, DoubleOptions::FINITE)
        .and_then(|()| {
            check_vector_against_filter(
                &ray.variable_values,
                &parameters.variable_values_filter,
                &summary.variables,
                "variable",
            )
        })
        .context("invalid variable_values")
}

pub fn validate_dual_ray(
    ray: &DualRay,
    parameters: &ModelSolveParameters,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    check_ids_and_values(&ray.dual_values, DoubleOptions::FINITE)
        .and_then(|()| {
            check_vector_against_filter(
                &ray.dual_values,
                &parameters.dual_values_filter,
                &summary.linear_constraints,
                "linear constraint",
            )
        })
        .context("invalid dual_values")?;
    check_ids_and_values(&ray.reduced_costs, DoubleOptions::FINITE)
        .and_then(|()| {
            check_vector_against_filter(
                &ray.reduced_costs,
                &parameters.reduced_costs_filter,
                &summary.variables,
                "variable",
            )
        })
        .context("invalid reduced_costs")
}
