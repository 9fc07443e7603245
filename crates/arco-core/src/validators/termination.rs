//! Consistency of termination reason, limit, problem status and objective bounds.

use crate::error::{ArcoError, ResultExt};
use arco_model::{FeasibilityStatus, Limit, ObjectiveBounds, ProblemStatus, Termination, TerminationReason};

/// Statuses must be specified; `primal_or_dual_infeasible` requires both to
/// be undetermined.
pub fn validate_problem_status(status: &ProblemStatus) -> Result<(), ArcoError> {
    if status.primal_status == FeasibilityStatus::Unspecified {
        return Err(ArcoError::invalid_argument("primal_status must be specified"));
    }
    if status.dual_status == FeasibilityStatus::Unspecified {
        return Err(ArcoError::invalid_argument("dual_status must be specified"));
    }
    if status.primal_or_dual_infeasible
        && (status.primal_status != FeasibilityStatus::Undetermined
            || status.dual_status != FeasibilityStatus::Undetermined)
    {
        return Err(ArcoError::invalid_argument(format!(
            "primal_or_dual_infeasible is set but primal_status = {} and dual_status = {}, both should be undetermined",
            status.primal_status, status.dual_status
        )));
    }
    Ok(())
}

/// The primal bound of an unbounded problem.
fn primal_unbounded_extreme(is_maximize: bool) -> f64 {
    if is_maximize {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

/// The dual bound of an infeasible problem with an unbounded dual.
fn dual_unbounded_extreme(is_maximize: bool) -> f64 {
    -primal_unbounded_extreme(is_maximize)
}

/// Bounds must be ordered for the objective direction and agree with `status`.
pub fn validate_objective_bounds(
    bounds: &ObjectiveBounds,
    status: &ProblemStatus,
    is_maximize: bool,
) -> Result<(), ArcoError> {
    let primal = bounds.primal_bound;
    let dual = bounds.dual_bound;
    if primal.is_nan() || dual.is_nan() {
        return Err(ArcoError::invalid_argument(format!(
            "bounds must not be NaN, got primal_bound = {primal} and dual_bound = {dual}"
        )));
    }
    if is_maximize && primal > dual {
        return Err(ArcoError::invalid_argument(format!(
            "primal_bound = {primal} is greater than dual_bound = {dual} for a maximization problem"
        )));
    }
    if !is_maximize && primal < dual {
        return Err(ArcoError::invalid_argument(format!(
            "primal_bound = {primal} is less than dual_bound = {dual} for a minimization problem"
        )));
    }

    let primal_status = status.primal_status;
    let dual_status = status.dual_status;
    if primal == primal_unbounded_extreme(is_maximize) {
        if primal_status != FeasibilityStatus::Feasible
            || dual_status != FeasibilityStatus::Infeasible
        {
            return Err(ArcoError::invalid_argument(format!(
                "primal_bound = {primal} requires primal_status = feasible and dual_status = infeasible, got {primal_status} and {dual_status}"
            )));
        }
        if dual != primal {
            return Err(ArcoError::invalid_argument(format!(
                "primal_bound = {primal} requires dual_bound = {primal}, got {dual}"
            )));
        }
    } else if primal_status == FeasibilityStatus::Feasible
        && dual_status == FeasibilityStatus::Infeasible
    {
        return Err(ArcoError::invalid_argument(format!(
            "primal_status = feasible and dual_status = infeasible require primal_bound = {}, got {primal}",
            primal_unbounded_extreme(is_maximize)
        )));
    }
    if dual == dual_unbounded_extreme(is_maximize) {
        if dual_status != FeasibilityStatus::Feasible
            || primal_status != FeasibilityStatus::Infeasible
        {
            return Err(ArcoError::invalid_argument(format!(
                "dual_bound = {dual} requires dual_status = feasible and primal_status = infeasible, got {dual_status} and {primal_status}"
            )));
        }
        if primal != dual {
            return Err(ArcoError::invalid_argument(format!(
                "dual_bound = {dual} requires primal_bound = {dual}, got {primal}"
            )));
        }
    } else if dual_status == FeasibilityStatus::Feasible
        && primal_status == FeasibilityStatus::Infeasible
    {
        return Err(ArcoError::invalid_argument(format!(
            "dual_status = feasible and primal_status = infeasible require dual_bound = {}, got {dual}",
            dual_unbounded_extreme(is_maximize)
        )));
    }
    if primal.is_finite() && primal_status != FeasibilityStatus::Feasible {
        return Err(ArcoError::invalid_argument(format!(
            "finite primal_bound = {primal} requires primal_status = feasible, got {primal_status}"
        )));
    }
    if dual.is_finite() && dual_status != FeasibilityStatus::Feasible {
        return Err(ArcoError::invalid_argument(format!(
            "finite dual_bound = {dual} requires dual_status = feasible, got {dual_status}"
        )));
    }
    Ok(())
}

fn expect_status(
    field: &str,
    actual: FeasibilityStatus,
    expected: FeasibilityStatus,
    reason: TerminationReason,
) -> Result<(), ArcoError> {
    if actual != expected {
        return Err(ArcoError::invalid_argument(format!(
            "{field} must be {expected} for termination reason {reason}, got {actual}"
        )));
    }
    Ok(())
}

fn expect_no_limit(termination: &Termination) -> Result<(), ArcoError> {
    if let Some(limit) = termination.limit {
        return Err(ArcoError::invalid_argument(format!(
            "limit must be unset for termination reason {}, got {limit}",
            termination.reason
        )));
    }
    Ok(())
}

fn expect_limit(termination: &Termination) -> Result<Limit, ArcoError> {
    termination.limit.ok_or_else(|| {
        ArcoError::invalid_argument(format!(
            "limit must be set for termination reason {}",
            termination.reason
        ))
    })
}

fn check_reason_rules(
    termination: &Termination,
    status: &ProblemStatus,
    bounds: &ObjectiveBounds,
) -> Result<(), ArcoError> {
    use FeasibilityStatus::{Feasible, Infeasible, Undetermined};

    let reason = termination.reason;
    match reason {
        TerminationReason::Unspecified => Err(ArcoError::invalid_argument(
            "termination reason must be specified",
        )),
        TerminationReason::Optimal => {
            expect_no_limit(termination)?;
            expect_status("primal_status", status.primal_status, Feasible, reason)?;
            expect_status("dual_status", status.dual_status, Feasible, reason)?;
            if !bounds.primal_bound.is_finite() {
                return Err(ArcoError::invalid_argument(format!(
                    "primal_bound must be finite for termination reason optimal, got {}",
                    bounds.primal_bound
                )));
            }
            Ok(())
        }
        TerminationReason::Infeasible => {
            expect_no_limit(termination)?;
            expect_status("primal_status", status.primal_status, Infeasible, reason)
        }
        TerminationReason::Unbounded => {
            expect_no_limit(termination)?;
            expect_status("primal_status", status.primal_status, Feasible, reason)?;
            expect_status("dual_status", status.dual_status, Infeasible, reason)
        }
        TerminationReason::InfeasibleOrUnbounded => {
            expect_no_limit(termination)?;
            expect_status("primal_status", status.primal_status, Undetermined, reason)?;
            if status.dual_status != Infeasible && !status.primal_or_dual_infeasible {
                return Err(ArcoError::invalid_argument(format!(
                    "termination reason infeasible_or_unbounded requires dual_status = infeasible or primal_or_dual_infeasible, got dual_status = {}",
                    status.dual_status
                )));
            }
            Ok(())
        }
        TerminationReason::Imprecise
        | TerminationReason::NumericalError
        | TerminationReason::OtherError => {
            expect_no_limit(termination)?;
            expect_status("primal_status", status.primal_status, Undetermined, reason)?;
            expect_status("dual_status", status.dual_status, Undetermined, reason)?;
            if status.primal_or_dual_infeasible {
                return Err(ArcoError::invalid_argument(format!(
                    "primal_or_dual_infeasible must be false for termination reason {reason}"
                )));
            }
            Ok(())
        }
        TerminationReason::Feasible => {
            let limit = expect_limit(termination)?;
            if limit == Limit::Cutoff {
                return Err(ArcoError::invalid_argument(
                    "limit cutoff is not allowed for termination reason feasible",
                ));
            }
            expect_status("primal_status", status.primal_status, Feasible, reason)?;
            if status.dual_status == Infeasible {
                return Err(ArcoError::invalid_argument(
                    "dual_status must not be infeasible for termination reason feasible",
                ));
            }
            if !bounds.primal_bound.is_finite() {
                return Err(ArcoError::invalid_argument(format!(
                    "primal_bound must be finite for termination reason feasible, got {}",
                    bounds.primal_bound
                )));
            }
            Ok(())
        }
        TerminationReason::NoSolutionFound => {
            expect_limit(termination)?;
            if status.primal_status == Infeasible {
                return Err(ArcoError::invalid_argument(
                    "primal_status must not be infeasible for termination reason no_solution_found",
                ));
            }
            Ok(())
        }
    }
}

/// Validate a termination for a problem with the given objective direction.
pub fn validate_termination(termination: &Termination, is_maximize: bool) -> Result<(), ArcoError> {
    if termination.reason == TerminationReason::Unspecified {
        return Err(ArcoError::invalid_argument(
            "termination reason must be specified",
        ));
    }
    if termination.limit == Some(Limit::Unspecified) {
        return Err(ArcoError::invalid_argument("limit must not be unspecified"));
    }
    let Some(status) = termination.problem_status.as_ref() else {
        return Err(ArcoError::invalid_argument("problem_status is missing"));
    };
    validate_problem_status(status).context("invalid problem_status")?;
    let Some(bounds) = termination.objective_bounds.as_ref() else {
        return Err(ArcoError::invalid_argument("objective_bounds is missing"));
    };
    validate_objective_bounds(bounds, status, is_maximize).context("invalid objective_bounds")?;
    check_reason_rules(termination, status, bounds)
}
