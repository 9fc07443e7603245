//! Validation of a whole [`SolveResult`] returned by a backend.

use crate::error::{ArcoError, ResultExt};
use crate::summary::ModelSummary;
use crate::validators::solution::{validate_dual_ray, validate_primal_ray, validate_solutions};
use crate::validators::termination::validate_termination;
use arco_model::{
    FeasibilityStatus, ModelSolveParameters, SolveResult, SolveStats, TerminationReason,
};

/// Counters must be non-negative.
pub fn validate_solve_stats(stats: &SolveStats) -> Result<(), ArcoError> {
    for (field, value) in [
        ("simplex_iterations", stats.simplex_iterations),
        ("barrier_iterations", stats.barrier_iterations),
        ("first_order_iterations", stats.first_order_iterations),
        ("node_count", stats.node_count),
    ] {
        if value < 0 {
            return Err(ArcoError::invalid_argument(format!(
                "{field} = {value} must be nonnegative"
            )));
        }
    }
    Ok(())
}

/// `candidate` is strictly better than `reference` for the objective direction.
fn is_better(candidate: f64, reference: f64, is_maximize: bool) -> bool {
    if is_maximize {
        candidate > reference
    } else {
        candidate < reference
    }
}

/// Validate `result` against the model summary and the parameters of the solve.
///
/// Expects [`SolveResult::upgrade_for_stats_migration`] to have been applied.
pub fn validate_result(
    result: &SolveResult,
    parameters: &ModelSolveParameters,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    let is_maximize = summary.maximize;
    let termination = &result.termination;
    validate_termination(termination, is_maximize).context("invalid termination")?;
    validate_solve_stats(&result.solve_stats).context("invalid solve_stats")?;
    validate_solutions(&result.solutions, parameters, summary)?;
    for (index, ray) in result.primal_rays.iter().enumerate() {
        validate_primal_ray(ray, parameters, summary)
            .with_context(|| format!("invalid primal_rays[{index}]"))?;
    }
    for (index, ray) in result.dual_rays.iter().enumerate() {
        validate_dual_ray(ray, parameters, summary)
            .with_context(|| format!("invalid dual_rays[{index}]"))?;
    }

    // Both are present once the termination is valid.
    let (Some(status), Some(bounds)) = (&termination.problem_status, &termination.objective_bounds)
    else {
        return Err(ArcoError::invalid_argument(
            "termination is missing problem_status or objective_bounds",
        ));
    };

    if matches!(
        termination.reason,
        TerminationReason::Optimal | TerminationReason::Feasible
    ) && !result
        .solutions
        .first()
        .is_some_and(|solution| solution.is_primal_feasible())
    {
        return Err(ArcoError::invalid_argument(format!(
            "termination reason is {} but the first solution is not primal feasible",
            termination.reason
        )));
    }

    let mut best_primal: Option<f64> = None;
    let mut best_dual: Option<f64> = None;
    for solution in &result.solutions {
        if let Some(primal) = solution
            .primal_solution
            .as_ref()
            .filter(|primal| primal.feasibility_status == FeasibilityStatus::Feasible)
        {
            if status.primal_status != FeasibilityStatus::Feasible {
                return Err(ArcoError::invalid_argument(format!(
                    "a primal feasible solution was returned but primal_status is {}",
                    status.primal_status
                )));
            }
            let value = primal.objective_value;
            if best_primal.is_none_or(|best| is_better(value, best, is_maximize)) {
                best_primal = Some(value);
            }
        }
        if let Some(dual) = solution
            .dual_solution
            .as_ref()
            .filter(|dual| dual.feasibility_status == FeasibilityStatus::Feasible)
        {
            if status.dual_status != FeasibilityStatus::Feasible {
                return Err(ArcoError::invalid_argument(format!(
                    "a dual feasible solution was returned but dual_status is {}",
                    status.dual_status
                )));
            }
            if let Some(value) = dual.objective_value {
                // The best dual objective is the tightest bound: largest when minimizing.
                if best_dual.is_none_or(|best| is_better(best, value, is_maximize)) {
                    best_dual = Some(value);
                }
            }
        }
    }

    if !result.primal_rays.is_empty() && status.dual_status == FeasibilityStatus::Feasible {
        return Err(ArcoError::invalid_argument(
            "primal rays were returned but dual_status is feasible",
        ));
    }
    if !result.dual_rays.is_empty() && status.primal_status == FeasibilityStatus::Feasible {
        return Err(ArcoError::invalid_argument(
            "dual rays were returned but primal_status is feasible",
        ));
    }

    if let Some(best) = best_primal {
        if is_better(best, bounds.primal_bound, is_maximize) {
            return Err(ArcoError::invalid_argument(format!(
                "best primal feasible solution objective = {best} is better than primal_bound = {}",
                bounds.primal_bound
            )));
        }
    }
    if let Some(best) = best_dual {
        if is_better(bounds.dual_bound, best, is_maximize) {
            return Err(ArcoError::invalid_argument(format!(
                "best dual feasible solution objective = {best} is better than dual_bound = {}",
                bounds.dual_bound
            )));
        }
    }

    tracing::debug!(
        component = "result_validator",
        operation = "validate_result",
        status = "success",
        termination = %termination.reason,
        solutions = result.solutions.len(),
        primal_rays = result.primal_rays.len(),
        dual_rays = result.dual_rays.len(),
        "Solve result validated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bimap::IdNameBiMap;
    use arco_model::{
        DualRay, DualSolution, Limit, PrimalRay, PrimalSolution, Solution, SparseDoubleVector,
        Termination,
    };

    fn summary(maximize: bool) -> ModelSummary {
        let mut summary = ModelSummary::new(true);
        summary.variables = IdNameBiMap::from_entries([(0, "x")], true).unwrap();
        summary.linear_constraints = IdNameBiMap::from_entries([(0, "c")], true).unwrap();
        summary.maximize = maximize;
        summary
    }

    fn primal_solution(objective_value: f64, status: FeasibilityStatus) -> Solution {
        Solution {
            primal_solution: Some(PrimalSolution {
                variable_values: SparseDoubleVector::new(vec![0], vec![objective_value]),
                objective_value,
                auxiliary_objective_values: Default::default(),
                feasibility_status: status,
            }),
            ..Solution::default()
        }
    }

    fn dual_solution(objective_value: f64) -> Solution {
        Solution {
            dual_solution: Some(DualSolution {
                dual_values: SparseDoubleVector::new(vec![0], vec![1.0]),
                reduced_costs: SparseDoubleVector::new(vec![0], vec![0.0]),
                objective_value: Some(objective_value),
                feasibility_status: FeasibilityStatus::Feasible,
                ..DualSolution::default()
            }),
            ..Solution::default()
        }
    }

    #[test]
    fn test_optimal_result() {
        let mut result = SolveResult::new(Termination::optimal(2.0, 2.0, ""));
        result.solutions.push(primal_solution(2.0, FeasibilityStatus::Feasible));
        result.solutions.push(dual_solution(2.0));
        let params = ModelSolveParameters::default();
        assert!(validate_result(&result, &params, &summary(false)).is_ok());
    }

    #[test]
    fn test_optimal_requires_primal_feasible_first_solution() {
        let result = SolveResult::new(Termination::optimal(2.0, 2.0, ""));
        let err = validate_result(&result, &ModelSolveParameters::default(), &summary(false))
            .unwrap_err();
        assert!(err.message().contains("first solution is not primal feasible"));
    }

    #[test]
    fn test_invalid_termination_is_prefixed() {
        let result = SolveResult::default();
        let err = validate_result(&result, &ModelSolveParameters::default(), &summary(false))
            .unwrap_err();
        assert!(err.message().starts_with("invalid termination"));
    }

    #[test]
    fn test_unbounded_maximization_with_ray() {
        let mut result = SolveResult::new(Termination::unbounded(true, ""));
        result.solutions.push(primal_solution(10.0, FeasibilityStatus::Feasible));
        result.primal_rays.push(PrimalRay {
            variable_values: SparseDoubleVector::new(vec![0], vec![1.0]),
        });
        assert!(validate_result(&result, &ModelSolveParameters::default(), &summary(true)).is_ok());
    }

    #[test]
    fn test_feasible_solution_needs_feasible_status() {
        let mut result = SolveResult::new(Termination::no_solution_found(false, Limit::Time, None, ""));
        result.solutions.push(primal_solution(1.0, FeasibilityStatus::Feasible));
        let err = validate_result(&result, &ModelSolveParameters::default(), &summary(false))
            .unwrap_err();
        assert!(err.message().contains("primal_status is undetermined"));
    }

    #[test]
    fn test_rays_conflicting_with_status() {
        let mut result = SolveResult::new(Termination::optimal(2.0, 2.0, ""));
        result.solutions.push(primal_solution(2.0, FeasibilityStatus::Feasible));
        result.dual_rays.push(DualRay {
            dual_values: SparseDoubleVector::new(vec![0], vec![1.0]),
            reduced_costs: SparseDoubleVector::new(vec![0], vec![1.0]),
        });
        let err = validate_result(&result, &ModelSolveParameters::default(), &summary(false))
            .unwrap_err();
        assert!(err.message().starts_with("dual rays were returned"));
    }

    #[test]
    fn test_objective_better_than_bounds() {
        let mut result =
            SolveResult::new(Termination::feasible(false, Limit::Time, 5.0, Some(1.0), ""));
        result.solutions.push(primal_solution(4.0, FeasibilityStatus::Feasible));
        let err = validate_result(&result, &ModelSolveParameters::default(), &summary(false))
            .unwrap_err();
        assert!(err.message().contains("is better than primal_bound"));

        let mut result =
            SolveResult::new(Termination::feasible(false, Limit::Time, 5.0, Some(1.0), ""));
        result.solutions.push(primal_solution(5.0, FeasibilityStatus::Feasible));
        result.solutions.push(dual_solution(3.0));
        let err = validate_result(&result, &ModelSolveParameters::default(), &summary(false))
            .unwrap_err();
        assert!(err.message().contains("is better than dual_bound"));
    }

    #[test]
    fn test_negative_stats_rejected() {
        let mut result = SolveResult::new(Termination::optimal(2.0, 2.0, ""));
        result.solutions.push(primal_solution(2.0, FeasibilityStatus::Feasible));
        result.solve_stats.node_count = -3;
        let err = validate_result(&result, &ModelSolveParameters::default(), &summary(false))
            .unwrap_err();
        assert!(err.message().starts_with("invalid solve_stats"));
    }
}
