//! Infeasible subsystem (IIS) results.

use crate::result::FeasibilityStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which sides of a two-sided bound belong to the subsystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSubsetBounds {
    pub lower: bool,
    pub upper: bool,
}

impl ModelSubsetBounds {
    pub fn new(lower: bool, upper: bool) -> Self {
        Self { lower, upper }
    }

    pub fn is_empty(&self) -> bool {
        !self.lower && !self.upper
    }
}

/// A subset of the constraints of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSubset {
    pub variable_bounds: BTreeMap<i64, ModelSubsetBounds>,
    /// Strictly increasing variable ids.
    pub variable_integrality: Vec<i64>,
    pub linear_constraints: BTreeMap<i64, ModelSubsetBounds>,
    pub quadratic_constraints: BTreeMap<i64, ModelSubsetBounds>,
    pub second_order_cone_constraints: Vec<i64>,
    pub sos1_constraints: Vec<i64>,
    pub sos2_constraints: Vec<i64>,
    pub indicator_constraints: Vec<i64>,
}

impl ModelSubset {
    pub fn is_empty(&self) -> bool {
        self.variable_bounds.is_empty()
            && self.variable_integrality.is_empty()
            && self.linear_constraints.is_empty()
            && self.quadratic_constraints.is_empty()
            && self.second_order_cone_constraints.is_empty()
            && self.sos1_constraints.is_empty()
            && self.sos2_constraints.is_empty()
            && self.indicator_constraints.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeInfeasibleSubsystemResult {
    /// `Infeasible` when a subsystem was found.
    pub feasibility: FeasibilityStatus,
    pub infeasible_subsystem: ModelSubset,
    /// True if removing any element of the subsystem makes it feasible.
    pub is_minimal: bool,
}
