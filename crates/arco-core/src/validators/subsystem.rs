//! Infeasible subsystem result checks.

use crate::bimap::IdNameBiMap;
use crate::error::{ArcoError, ResultExt};
use crate::summary::{ConstraintKind, ModelSummary};
use crate::validators::ids::{check_ids_range_and_strictly_increasing, check_ids_subset};
use arco_model::{ComputeInfeasibleSubsystemResult, FeasibilityStatus, ModelSubset};

fn check_known_sorted(
    ids: &[i64],
    universe: &IdNameBiMap,
    description: &str,
) -> Result<(), ArcoError> {
    check_ids_range_and_strictly_increasing(ids)?;
    check_ids_subset(ids, universe, description)
}

/// Every id in `subset` must exist in the model.
pub fn validate_model_subset(subset: &ModelSubset, summary: &ModelSummary) -> Result<(), ArcoError> {
    let variable_ids: Vec<i64> = subset.variable_bounds.keys().copied().collect();
    check_known_sorted(&variable_ids, &summary.variables, "variable")
        .context("invalid variable_bounds")?;
    check_known_sorted(&subset.variable_integrality, &summary.variables, "variable")
        .context("invalid variable_integrality")?;
    let linear_ids: Vec<i64> = subset.linear_constraints.keys().copied().collect();
    check_known_sorted(&linear_ids, &summary.linear_constraints, "linear constraint")
        .context("invalid linear_constraints")?;
    let quadratic_ids: Vec<i64> = subset.quadratic_constraints.keys().copied().collect();
    for (kind, ids) in [
        (ConstraintKind::Quadratic, quadratic_ids.as_slice()),
        (
            ConstraintKind::SecondOrderCone,
            subset.second_order_cone_constraints.as_slice(),
        ),
        (ConstraintKind::Sos1, subset.sos1_constraints.as_slice()),
        (ConstraintKind::Sos2, subset.sos2_constraints.as_slice()),
        (ConstraintKind::Indicator, subset.indicator_constraints.as_slice()),
    ] {
        check_known_sorted(ids, summary.constraints(kind), kind.as_str())
            .with_context(|| format!("invalid {kind}"))?;
    }
    Ok(())
}

/// Only an infeasible result may carry a subsystem or claim minimality.
pub fn validate_compute_infeasible_subsystem_result(
    result: &ComputeInfeasibleSubsystemResult,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    if result.feasibility == FeasibilityStatus::Unspecified {
        return Err(ArcoError::invalid_argument("feasibility must be specified"));
    }
    if result.feasibility != FeasibilityStatus::Infeasible {
        if !result.infeasible_subsystem.is_empty() {
            return Err(ArcoError::invalid_argument(format!(
                "infeasible_subsystem must be empty when feasibility is {}",
                result.feasibility
            )));
        }
        if result.is_minimal {
            return Err(ArcoError::invalid_argument(format!(
                "is_minimal must be false when feasibility is {}",
                result.feasibility
            )));
        }
    }
    validate_model_subset(&result.infeasible_subsystem, summary)
        .context("invalid infeasible_subsystem")
}
