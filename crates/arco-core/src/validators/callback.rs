//! Callback registration, payload and reply checks.

use crate::error::{ArcoError, ResultExt};
use crate::summary::ModelSummary;
use crate::validators::constraints::check_bounds;
use crate::validators::scalar::DoubleOptions;
use crate::validators::sparse_vector::{
    check_filter, check_ids_and_values, check_known_ids_and_values, check_vector_against_filter,
};
use arco_model::{
    CallbackData, CallbackEvent, CallbackRegistration, CallbackResult, SparseDoubleVector,
    SparseVectorFilter,
};
use std::collections::BTreeSet;

pub fn validate_callback_registration(
    registration: &CallbackRegistration,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    let mut seen = BTreeSet::new();
    for &event in &registration.request_registration {
        if event == CallbackEvent::Unspecified {
            return Err(ArcoError::invalid_argument(
                "invalid request_registration: event must be specified",
            ));
        }
        if !seen.insert(event) {
            return Err(ArcoError::invalid_argument(format!(
                "invalid request_registration: event {event} is repeated"
            )));
        }
    }
    check_filter(&registration.mip_solution_filter, &summary.variables, "variable")
        .context("invalid mip_solution_filter")?;
    check_filter(&registration.mip_node_filter, &summary.variables, "variable")
        .context("invalid mip_node_filter")?;
    if registration.add_cuts && !seen.contains(&CallbackEvent::MipNode) {
        return Err(ArcoError::invalid_argument(
            "add_cuts is set but event mip_node is not registered",
        ));
    }
    if registration.add_lazy_constraints
        && !seen.contains(&CallbackEvent::MipNode)
        && !seen.contains(&CallbackEvent::MipSolution)
    {
        return Err(ArcoError::invalid_argument(
            "add_lazy_constraints is set but neither mip_node nor mip_solution is registered",
        ));
    }
    Ok(())
}

fn check_primal_vector(
    vector: &SparseDoubleVector,
    filter: &SparseVectorFilter,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    check_ids_and_values(vector, DoubleOptions::FINITE)?;
    check_vector_against_filter(vector, filter, &summary.variables, "variable")
}

/// Check what a backend sends to the user callback.
pub fn validate_callback_data(
    data: &CallbackData,
    registration: &CallbackRegistration,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    let event = data.event;
    if event == CallbackEvent::Unspecified {
        return Err(ArcoError::invalid_argument("event must be specified"));
    }
    if !registration.is_registered(event) {
        return Err(ArcoError::invalid_argument(format!(
            "event {event} is not registered"
        )));
    }
    match (event, &data.primal_solution_vector) {
        (CallbackEvent::MipSolution, None) => {
            return Err(ArcoError::invalid_argument(
                "primal_solution_vector is required for event mip_solution",
            ));
        }
        (CallbackEvent::MipSolution, Some(vector)) => {
            check_primal_vector(vector, &registration.mip_solution_filter, summary)
                .context("invalid primal_solution_vector")?;
        }
        (CallbackEvent::MipNode, Some(vector)) => {
            check_primal_vector(vector, &registration.mip_node_filter, summary)
                .context("invalid primal_solution_vector")?;
        }
        (CallbackEvent::MipNode, None) => {}
        (_, Some(_)) => {
            return Err(ArcoError::invalid_argument(format!(
                "primal_solution_vector must be unset for event {event}"
            )));
        }
        (_, None) => {}
    }
    if let Some(stats) = &data.mip_stats {
        for (field, value) in [
            ("explored_nodes", stats.explored_nodes),
            ("open_nodes", stats.open_nodes),
            ("simplex_iterations", stats.simplex_iterations),
            ("number_of_solutions_found", stats.number_of_solutions_found),
        ] {
            if value < 0 {
                return Err(ArcoError::invalid_argument(format!(
                    "invalid mip_stats: {field} = {value} must be nonnegative"
                )));
            }
        }
    }
    Ok(())
}

/// Check what the user callback returned for `event`.
pub fn validate_callback_result(
    result: &CallbackResult,
    event: CallbackEvent,
    registration: &CallbackRegistration,
    summary: &ModelSummary,
) -> Result<(), ArcoError> {
    let is_mip_event = matches!(event, CallbackEvent::MipNode | CallbackEvent::MipSolution);
    for (index, cut) in result.cuts.iter().enumerate() {
        let check = || -> Result<(), ArcoError> {
            if !is_mip_event {
                return Err(ArcoError::invalid_argument(format!(
                    "constraints can only be added at mip_node or mip_solution, not at {event}"
                )));
            }
            if cut.is_lazy && !registration.add_lazy_constraints {
                return Err(ArcoError::invalid_argument(
                    "lazy constraint added but add_lazy_constraints is not set",
                ));
            }
            if !cut.is_lazy {
                if !registration.add_cuts {
                    return Err(ArcoError::invalid_argument(
                        "cut added but add_cuts is not set",
                    ));
                }
                if event != CallbackEvent::MipNode {
                    return Err(ArcoError::invalid_argument(format!(
                        "cuts can only be added at mip_node, not at {event}"
                    )));
                }
            }
            check_known_ids_and_values(
                &cut.linear_expression,
                DoubleOptions::FINITE,
                &summary.variables,
                "variable",
            )
            .context("invalid linear_expression")?;
            check_bounds(cut.lower_bound, cut.upper_bound)
        };
        check().with_context(|| format!("invalid cuts[{index}]"))?;
    }
    if !result.suggested_solutions.is_empty() && event != CallbackEvent::MipNode {
        return Err(ArcoError::invalid_argument(format!(
            "suggested_solutions can only be returned at mip_node, not at {event}"
        )));
    }
    for (index, solution) in result.suggested_solutions.iter().enumerate() {
        check_known_ids_and_values(
            solution,
            DoubleOptions::FINITE,
            &summary.variables,
            "variable",
        )
        .with_context(|| format!("invalid suggested_solutions[{index}]"))?;
    }
    Ok(())
}
