//! Solve parameters shared by every backend, and model-specific solve parameters.

use crate::result::Basis;
use crate::sparse::{SparseDoubleVector, SparseInt32Vector, SparseVectorFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Algorithm used to solve linear programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LpAlgorithm {
    PrimalSimplex,
    DualSimplex,
    Barrier,
    FirstOrder,
}

/// Effort level for an optional solver feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emphasis {
    Off,
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Parameters controlling a single solve.
///
/// `None` means "use the backend default" for every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveParameters {
    /// Wall clock limit for the solve.
    pub time_limit: Option<Duration>,
    /// Limit on simplex/barrier/first-order iterations.
    pub iteration_limit: Option<i64>,
    /// Limit on branch-and-bound nodes.
    pub node_limit: Option<i64>,
    /// Stop when no solution better than this can be found.
    pub cutoff_limit: Option<f64>,
    /// Stop once a solution at least this good is found.
    pub objective_limit: Option<f64>,
    /// Stop once the best bound is at least this good.
    pub best_bound_limit: Option<f64>,
    /// Stop after finding this many feasible solutions.
    pub solution_limit: Option<i32>,
    /// Print the backend's own log.
    pub enable_output: bool,
    pub threads: Option<i32>,
    pub random_seed: Option<i32>,
    pub absolute_gap_tolerance: Option<f64>,
    pub relative_gap_tolerance: Option<f64>,
    /// Maximum number of solutions returned.
    pub solution_pool_size: Option<i32>,
    pub lp_algorithm: Option<LpAlgorithm>,
    pub presolve: Option<Emphasis>,
    pub cuts: Option<Emphasis>,
    pub heuristics: Option<Emphasis>,
    pub scaling: Option<Emphasis>,
}

impl SolveParameters {
    /// Create parameters with every field at its backend default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_iteration_limit(mut self, limit: i64) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    pub fn with_node_limit(mut self, limit: i64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_cutoff_limit(mut self, limit: f64) -> Self {
        self.cutoff_limit = Some(limit);
        self
    }

    pub fn with_objective_limit(mut self, limit: f64) -> Self {
        self.objective_limit = Some(limit);
        self
    }

    pub fn with_best_bound_limit(mut self, limit: f64) -> Self {
        self.best_bound_limit = Some(limit);
        self
    }

    pub fn with_solution_limit(mut self, limit: i32) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    /// Enable or disable the backend's own log output.
    pub fn with_enable_output(mut self, enabled: bool) -> Self {
        self.enable_output = enabled;
        self
    }

    pub fn with_threads(mut self, count: i32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_random_seed(mut self, seed: i32) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_absolute_gap_tolerance(mut self, tolerance: f64) -> Self {
        self.absolute_gap_tolerance = Some(tolerance);
        self
    }

    pub fn with_relative_gap_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_gap_tolerance = Some(tolerance);
        self
    }

    pub fn with_solution_pool_size(mut self, size: i32) -> Self {
        self.solution_pool_size = Some(size);
        self
    }

    pub fn with_lp_algorithm(mut self, algorithm: LpAlgorithm) -> Self {
        self.lp_algorithm = Some(algorithm);
        self
    }

    pub fn with_presolve(mut self, emphasis: Emphasis) -> Self {
        self.presolve = Some(emphasis);
        self
    }

    pub fn with_cuts(mut self, emphasis: Emphasis) -> Self {
        self.cuts = Some(emphasis);
        self
    }

    pub fn with_heuristics(mut self, emphasis: Emphasis) -> Self {
        self.heuristics = Some(emphasis);
        self
    }

    pub fn with_scaling(mut self, emphasis: Emphasis) -> Self {
        self.scaling = Some(emphasis);
        self
    }

    /// Check if every field is at its default.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A (possibly partial) starting point for the solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionHint {
    pub variable_values: SparseDoubleVector,
    pub dual_values: SparseDoubleVector,
}

/// Per-objective parameters for hierarchical multi-objective solves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveParameters {
    pub objective_degradation_absolute_tolerance: Option<f64>,
    pub objective_degradation_relative_tolerance: Option<f64>,
    pub time_limit: Option<Duration>,
}

/// Solve parameters that refer to entities of one specific model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSolveParameters {
    /// Applies to primal solutions, primal rays and callback primal values (variables).
    pub variable_values_filter: SparseVectorFilter,
    /// Applies to dual values of linear constraints.
    pub dual_values_filter: SparseVectorFilter,
    /// Applies to dual values of quadratic constraints.
    pub quadratic_dual_values_filter: SparseVectorFilter,
    /// Applies to reduced costs (variables).
    pub reduced_costs_filter: SparseVectorFilter,
    pub initial_basis: Option<Basis>,
    pub solution_hints: Vec<SolutionHint>,
    pub branching_priorities: SparseInt32Vector,
    pub primary_objective_parameters: Option<ObjectiveParameters>,
    /// Keyed by auxiliary objective id.
    pub auxiliary_objective_parameters: BTreeMap<i64, ObjectiveParameters>,
    /// Linear constraints the solver may treat lazily.
    pub lazy_linear_constraint_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_new_is_empty() {
        let parameters = SolveParameters::new();
        assert!(parameters.is_empty());
    }

    #[test]
    fn test_parameters_builder_pattern() {
        let parameters = SolveParameters::new()
            .with_time_limit(Duration::from_secs(60))
            .with_relative_gap_tolerance(0.01)
            .with_threads(4)
            .with_presolve(Emphasis::Off)
            .with_lp_algorithm(LpAlgorithm::DualSimplex)
            .with_enable_output(true);

        assert!(!parameters.is_empty());
        assert_eq!(parameters.time_limit, Some(Duration::from_secs(60)));
        assert_eq!(parameters.relative_gap_tolerance, Some(0.01));
        assert_eq!(parameters.threads, Some(4));
        assert_eq!(parameters.presolve, Some(Emphasis::Off));
        assert_eq!(parameters.lp_algorithm, Some(LpAlgorithm::DualSimplex));
        assert!(parameters.enable_output);
        assert_eq!(parameters.iteration_limit, None);
    }

    #[test]
    fn test_parameters_debug() {
        let parameters = SolveParameters::new().with_node_limit(10);
        let debug_str = format!("{:?}", parameters);
        assert!(debug_str.contains("node_limit"));
        assert!(debug_str.contains("10"));
    }

    #[test]
    fn test_model_parameters_default_filters_keep_everything() {
        let parameters = ModelSolveParameters::default();
        assert!(!parameters.variable_values_filter.filter_by_ids);
        assert!(!parameters.variable_values_filter.skip_zero_values);
        assert!(parameters.initial_basis.is_none());
    }
}
