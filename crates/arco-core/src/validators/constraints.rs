//! Per-kind checks for constraints stored as id-keyed maps.
//!
//! Each kind implements [`ValidateConstraint`]. Adding a kind means
//! implementing it here, adding a variant to
//! [`ConstraintKind`](crate::summary::ConstraintKind) and a map to
//! [`ModelSummary`](crate::summary::ModelSummary), and extending the per-kind
//! lists in `ModelSummary::create`, `ModelSummary::update` and the model
//! validator.

use crate::bimap::IdNameBiMap;
use crate::error::{ArcoError, ResultExt};
use crate::validators::ids::{check_ids_range_and_strictly_increasing, check_ids_subset};
use crate::validators::scalar::{DoubleOptions, check_scalar, check_scalar_no_nan_no_inf};
use crate::validators::sparse_matrix::{sparse_matrix_ids_are_known, sparse_matrix_valid};
use crate::validators::sparse_vector::{check_ids_and_values_size, check_known_ids_and_values};
use arco_model::{
    IndicatorConstraintData, LinearExpression, QuadraticConstraintData,
    SecondOrderConeConstraintData, SosConstraintData,
};

/// Data of one constraint that can be checked against the variable ids.
pub trait ValidateConstraint {
    /// Name registered in the model summary; may be empty.
    fn name(&self) -> &str;

    /// Check the constraint's own data and that it only references known variables.
    fn validate(&self, variable_universe: &IdNameBiMap) -> Result<(), ArcoError>;
}

/// Ids valid and known, coefficients and offset finite.
pub fn check_linear_expression(
    expression: &LinearExpression,
    variable_universe: &IdNameBiMap,
) -> Result<(), ArcoError> {
    check_ids_range_and_strictly_increasing(&expression.ids)?;
    check_ids_and_values_size(&expression.ids, expression.coefficients.len())?;
    for (index, &coefficient) in expression.coefficients.iter().enumerate() {
        check_scalar_no_nan_no_inf(coefficient)
            .with_context(|| format!("invalid coefficient for id {}", expression.ids[index]))?;
    }
    check_scalar_no_nan_no_inf(expression.offset).context("invalid offset")?;
    check_ids_subset(&expression.ids, variable_universe, "variable")
}

/// `lower_bound` may be `-inf` and `upper_bound` may be `+inf`.
pub fn check_bounds(lower_bound: f64, upper_bound: f64) -> Result<(), ArcoError> {
    check_scalar(lower_bound, DoubleOptions::LOWER_BOUND).context("invalid lower_bound")?;
    check_scalar(upper_bound, DoubleOptions::UPPER_BOUND).context("invalid upper_bound")
}

impl ValidateConstraint for QuadraticConstraintData {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, variable_universe: &IdNameBiMap) -> Result<(), ArcoError> {
        check_known_ids_and_values(
            &self.linear_terms,
            DoubleOptions::FINITE,
            variable_universe,
            "variable",
        )
        .context("invalid linear_terms")?;
        sparse_matrix_valid(&self.quadratic_terms, true).context("invalid quadratic_terms")?;
        sparse_matrix_ids_are_known(
            &self.quadratic_terms,
            variable_universe,
            "variable",
            variable_universe,
            "variable",
        )
        .context("invalid quadratic_terms")?;
        check_bounds(self.lower_bound, self.upper_bound)
    }
}

impl ValidateConstraint for SecondOrderConeConstraintData {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, variable_universe: &IdNameBiMap) -> Result<(), ArcoError> {
        check_linear_expression(&self.upper_bound, variable_universe)
            .context("invalid upper_bound")?;
        for (index, argument) in self.arguments_to_norm.iter().enumerate() {
            check_linear_expression(argument, variable_universe)
                .with_context(|| format!("invalid arguments_to_norm[{index}]"))?;
        }
        Ok(())
    }
}

impl ValidateConstraint for SosConstraintData {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, variable_universe: &IdNameBiMap) -> Result<(), ArcoError> {
        for (index, expression) in self.expressions.iter().enumerate() {
            check_linear_expression(expression, variable_universe)
                .with_context(|| format!("invalid expressions[{index}]"))?;
        }
        if self.weights.is_empty() {
            return Ok(());
        }
        if self.weights.len() != self.expressions.len() {
            return Err(ArcoError::invalid_argument(format!(
                "weights has {} elements but expressions has {}; weights must be empty or parallel to expressions",
                self.weights.len(),
                self.expressions.len()
            )));
        }
        for (index, &weight) in self.weights.iter().enumerate() {
            check_scalar_no_nan_no_inf(weight)
                .with_context(|| format!("invalid weights[{index}]"))?;
        }
        let mut sorted = self.weights.clone();
        sorted.sort_by(f64::total_cmp);
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ArcoError::invalid_argument(format!(
                "duplicate weight {}",
                pair[0]
            )));
        }
        Ok(())
    }
}

impl ValidateConstraint for IndicatorConstraintData {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, variable_universe: &IdNameBiMap) -> Result<(), ArcoError> {
        if let Some(indicator_id) = self.indicator_id {
            if !variable_universe.has_id(indicator_id) {
                return Err(ArcoError::invalid_argument(format!(
                    "indicator_id {indicator_id} is not an existing variable id"
                )));
            }
        }
        check_known_ids_and_values(
            &self.expression,
            DoubleOptions::FINITE,
            variable_universe,
            "variable",
        )
        .context("invalid expression")?;
        check_bounds(self.lower_bound, self.upper_bound)
    }
}
