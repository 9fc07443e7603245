//! The full optimization model record.

use crate::sparse::{LinearExpression, SparseDoubleMatrix, SparseDoubleVector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column-oriented variable data; all vectors are parallel to `ids`.
///
/// `names` is either empty (every variable unnamed) or parallel to `ids`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariablesData {
    pub ids: Vec<i64>,
    pub lower_bounds: Vec<f64>,
    pub upper_bounds: Vec<f64>,
    pub integers: Vec<bool>,
    pub names: Vec<String>,
}

impl VariablesData {
    /// Append a variable; the name vector is kept parallel once any name is set.
    pub fn push(&mut self, id: i64, lower: f64, upper: f64, is_integer: bool, name: &str) {
        if !name.is_empty() && self.names.len() < self.ids.len() {
            self.names.resize(self.ids.len(), String::new());
        }
        self.ids.push(id);
        self.lower_bounds.push(lower);
        self.upper_bounds.push(upper);
        self.integers.push(is_integer);
        if !self.names.is_empty() || !name.is_empty() {
            self.names.push(name.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A primary or auxiliary objective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveData {
    pub maximize: bool,
    pub offset: f64,
    pub linear_coefficients: SparseDoubleVector,
    /// Upper-triangular (row <= column) quadratic terms.
    pub quadratic_coefficients: SparseDoubleMatrix,
    pub name: String,
    /// Lower values are optimized first in hierarchical multi-objective solves.
    pub priority: i64,
}

/// Linear constraint rows; all vectors are parallel to `ids`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConstraintsData {
    pub ids: Vec<i64>,
    pub lower_bounds: Vec<f64>,
    pub upper_bounds: Vec<f64>,
    pub names: Vec<String>,
}

impl LinearConstraintsData {
    /// Append a constraint; the name vector is kept parallel once any name is set.
    pub fn push(&mut self, id: i64, lower: f64, upper: f64, name: &str) {
        if !name.is_empty() && self.names.len() < self.ids.len() {
            self.names.resize(self.ids.len(), String::new());
        }
        self.ids.push(id);
        self.lower_bounds.push(lower);
        self.upper_bounds.push(upper);
        if !self.names.is_empty() || !name.is_empty() {
            self.names.push(name.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// `lower_bound <= linear_terms + quadratic_terms <= upper_bound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadraticConstraintData {
    pub linear_terms: SparseDoubleVector,
    pub quadratic_terms: SparseDoubleMatrix,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub name: String,
}

impl Default for QuadraticConstraintData {
    fn default() -> Self {
        Self {
            linear_terms: SparseDoubleVector::default(),
            quadratic_terms: SparseDoubleMatrix::default(),
            lower_bound: f64::NEG_INFINITY,
            upper_bound: f64::INFINITY,
            name: String::new(),
        }
    }
}

/// `||arguments_to_norm||_2 <= upper_bound`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondOrderConeConstraintData {
    pub upper_bound: LinearExpression,
    pub arguments_to_norm: Vec<LinearExpression>,
    pub name: String,
}

/// An SOS1 or SOS2 constraint over expressions.
///
/// `weights` is either empty or parallel to `expressions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SosConstraintData {
    pub expressions: Vec<LinearExpression>,
    pub weights: Vec<f64>,
    pub name: String,
}

/// `indicator == (activate_on_zero ? 0 : 1)` implies
/// `lower_bound <= expression <= upper_bound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConstraintData {
    /// Unset when the indicator variable was deleted.
    pub indicator_id: Option<i64>,
    pub activate_on_zero: bool,
    pub expression: SparseDoubleVector,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub name: String,
}

impl Default for IndicatorConstraintData {
    fn default() -> Self {
        Self {
            indicator_id: None,
            activate_on_zero: false,
            expression: SparseDoubleVector::default(),
            lower_bound: f64::NEG_INFINITY,
            upper_bound: f64::INFINITY,
            name: String::new(),
        }
    }
}

/// A complete optimization model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    pub name: String,
    pub variables: VariablesData,
    pub objective: ObjectiveData,
    pub auxiliary_objectives: BTreeMap<i64, ObjectiveData>,
    pub linear_constraints: LinearConstraintsData,
    /// Rows are linear constraint ids, columns are variable ids.
    pub linear_constraint_matrix: SparseDoubleMatrix,
    pub quadratic_constraints: BTreeMap<i64, QuadraticConstraintData>,
    pub second_order_cone_constraints: BTreeMap<i64, SecondOrderConeConstraintData>,
    pub sos1_constraints: BTreeMap<i64, SosConstraintData>,
    pub sos2_constraints: BTreeMap<i64, SosConstraintData>,
    pub indicator_constraints: BTreeMap<i64, IndicatorConstraintData>,
}

impl Model {
    /// Create an empty model with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_maximize(&self) -> bool {
        self.objective.maximize
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_push_variable_keeps_names_parallel() {
        let mut variables = VariablesData::default();
        variables.push(0, 0.0, 1.0, false, "");
        assert!(variables.names.is_empty());

        variables.push(1, 0.0, 1.0, true, "y");
        assert_eq!(variables.names, vec![String::new(), "y".to_string()]);

        variables.push(4, -1.0, 1.0, false, "");
        assert_eq!(variables.names.len(), 3);
        assert_eq!(variables.ids, vec![0, 1, 4]);
        assert_eq!(variables.integers, vec![false, true, false]);
    }

    #[test]
    fn test_push_constraint_keeps_names_parallel() {
        let mut constraints = LinearConstraintsData::default();
        constraints.push(0, 1.0, 2.0, "c");
        constraints.push(1, 1.0, 2.0, "");
        assert_eq!(constraints.names, vec!["c".to_string(), String::new()]);
        assert_eq!(constraints.len(), 2);
    }

    #[test]
    fn test_constraint_defaults_are_free() {
        let quadratic = QuadraticConstraintData::default();
        assert_eq!(quadratic.lower_bound, f64::NEG_INFINITY);
        assert_eq!(quadratic.upper_bound, f64::INFINITY);

        let indicator = IndicatorConstraintData::default();
        assert!(indicator.indicator_id.is_none());
        assert_eq!(indicator.upper_bound, f64::INFINITY);
    }

    #[test]
    fn test_model_reads_from_sparse_json() {
        let model: Model = serde_json::from_str(
            r#"{
                "name": "diet",
                "variables": {"ids": [0, 1], "lower_bounds": [0.0, 0.0],
                              "upper_bounds": [1.0, 2.0], "integers": [false, true]},
                "objective": {"maximize": true,
                              "linear_coefficients": {"ids": [1], "values": [3.0]}}
            }"#,
        )
        .unwrap();
        assert_eq!(model.name, "diet");
        assert_eq!(model.variables.len(), 2);
        assert!(model.is_maximize());
        assert!(model.variables.names.is_empty());
        assert!(model.linear_constraints.is_empty());
    }
}
