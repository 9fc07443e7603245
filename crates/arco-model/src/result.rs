//! Solve results: termination, solutions, rays and statistics.

use crate::sparse::SparseDoubleVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Not set; never valid in a returned result.
    #[default]
    Unspecified,
    /// A provably optimal solution was found (within tolerances).
    Optimal,
    /// The primal problem has no feasible solution.
    Infeasible,
    /// The primal problem is feasible and has arbitrarily good solutions.
    Unbounded,
    /// The primal problem is either infeasible or unbounded.
    InfeasibleOrUnbounded,
    /// Solved to optimality, but with a relaxed tolerance.
    Imprecise,
    /// A limit was hit with at least one primal feasible solution.
    Feasible,
    /// A limit was hit before any primal feasible solution was found.
    NoSolutionFound,
    /// The backend hit an unrecoverable numerical problem.
    NumericalError,
    /// Any other failure inside the backend.
    OtherError,
}

impl TerminationReason {
    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::Unspecified => "unspecified",
            TerminationReason::Optimal => "optimal",
            TerminationReason::Infeasible => "infeasible",
            TerminationReason::Unbounded => "unbounded",
            TerminationReason::InfeasibleOrUnbounded => "infeasible_or_unbounded",
            TerminationReason::Imprecise => "imprecise",
            TerminationReason::Feasible => "feasible",
            TerminationReason::NoSolutionFound => "no_solution_found",
            TerminationReason::NumericalError => "numerical_error",
            TerminationReason::OtherError => "other_error",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which limit stopped a `Feasible` or `NoSolutionFound` solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limit {
    #[default]
    Unspecified,
    /// The backend does not expose which limit was hit.
    Undetermined,
    Iteration,
    Time,
    Node,
    Solution,
    Memory,
    Objective,
    Norm,
    Interrupted,
    SlowProgress,
    /// No solution better than the cutoff exists.
    Cutoff,
    Other,
}

impl Limit {
    pub fn as_str(self) -> &'static str {
        match self {
            Limit::Unspecified => "unspecified",
            Limit::Undetermined => "undetermined",
            Limit::Iteration => "iteration",
            Limit::Time => "time",
            Limit::Node => "node",
            Limit::Solution => "solution",
            Limit::Memory => "memory",
            Limit::Objective => "objective",
            Limit::Norm => "norm",
            Limit::Interrupted => "interrupted",
            Limit::SlowProgress => "slow_progress",
            Limit::Cutoff => "cutoff",
            Limit::Other => "other",
        }
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feasibility claimed for a problem, a solution, or a basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeasibilityStatus {
    #[default]
    Unspecified,
    Undetermined,
    Feasible,
    Infeasible,
}

impl FeasibilityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FeasibilityStatus::Unspecified => "unspecified",
            FeasibilityStatus::Undetermined => "undetermined",
            FeasibilityStatus::Feasible => "feasible",
            FeasibilityStatus::Infeasible => "infeasible",
        }
    }
}

impl std::fmt::Display for FeasibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feasibility of the primal and dual problems, independent of returned solutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemStatus {
    pub primal_status: FeasibilityStatus,
    pub dual_status: FeasibilityStatus,
    /// Set when the backend only knows one of the two problems is infeasible.
    pub primal_or_dual_infeasible: bool,
}

impl ProblemStatus {
    pub fn new(primal_status: FeasibilityStatus, dual_status: FeasibilityStatus) -> Self {
        Self {
            primal_status,
            dual_status,
            primal_or_dual_infeasible: false,
        }
    }
}

/// Best known primal objective value and best proven dual bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveBounds {
    pub primal_bound: f64,
    pub dual_bound: f64,
}

impl ObjectiveBounds {
    pub fn new(primal_bound: f64, dual_bound: f64) -> Self {
        Self {
            primal_bound,
            dual_bound,
        }
    }

    /// Bounds carrying no information for the given direction.
    pub fn unknown(is_maximize: bool) -> Self {
        Self::new(
            no_information_primal_bound(is_maximize),
            no_information_dual_bound(is_maximize),
        )
    }
}

/// The primal bound reported when no primal solution is known.
pub fn no_information_primal_bound(is_maximize: bool) -> f64 {
    if is_maximize {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

/// The dual bound reported when nothing has been proven.
pub fn no_information_dual_bound(is_maximize: bool) -> f64 {
    if is_maximize {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

/// Outcome summary of one solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Termination {
    pub reason: TerminationReason,
    /// Only set for `Feasible` and `NoSolutionFound`.
    pub limit: Option<Limit>,
    /// Free-form backend detail.
    pub detail: String,
    pub problem_status: Option<ProblemStatus>,
    pub objective_bounds: Option<ObjectiveBounds>,
}

impl Termination {
    fn with_status(
        reason: TerminationReason,
        limit: Option<Limit>,
        problem_status: ProblemStatus,
        objective_bounds: ObjectiveBounds,
        detail: &str,
    ) -> Self {
        Self {
            reason,
            limit,
            detail: detail.to_string(),
            problem_status: Some(problem_status),
            objective_bounds: Some(objective_bounds),
        }
    }

    /// Proven optimal with the given objective bounds.
    pub fn optimal(primal_bound: f64, dual_bound: f64, detail: &str) -> Self {
        Self::with_status(
            TerminationReason::Optimal,
            None,
            ProblemStatus::new(FeasibilityStatus::Feasible, FeasibilityStatus::Feasible),
            ObjectiveBounds::new(primal_bound, dual_bound),
            detail,
        )
    }

    /// Proven primal infeasible; `dual_status` is `Feasible` when the dual is unbounded.
    pub fn infeasible(is_maximize: bool, dual_status: FeasibilityStatus, detail: &str) -> Self {
        let primal_bound = no_information_primal_bound(is_maximize);
        let dual_bound = if dual_status == FeasibilityStatus::Feasible {
            primal_bound
        } else {
            no_information_dual_bound(is_maximize)
        };
        Self::with_status(
            TerminationReason::Infeasible,
            None,
            ProblemStatus::new(FeasibilityStatus::Infeasible, dual_status),
            ObjectiveBounds::new(primal_bound, dual_bound),
            detail,
        )
    }

    /// Proven primal unbounded.
    pub fn unbounded(is_maximize: bool, detail: &str) -> Self {
        let bound = if is_maximize {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
        Self::with_status(
            TerminationReason::Unbounded,
            None,
            ProblemStatus::new(FeasibilityStatus::Feasible, FeasibilityStatus::Infeasible),
            ObjectiveBounds::new(bound, bound),
            detail,
        )
    }

    /// Infeasible or unbounded; `dual_status` is `Infeasible` or `Undetermined`.
    pub fn infeasible_or_unbounded(
        is_maximize: bool,
        dual_status: FeasibilityStatus,
        detail: &str,
    ) -> Self {
        let mut problem_status = ProblemStatus::new(FeasibilityStatus::Undetermined, dual_status);
        problem_status.primal_or_dual_infeasible = dual_status == FeasibilityStatus::Undetermined;
        Self::with_status(
            TerminationReason::InfeasibleOrUnbounded,
            None,
            problem_status,
            ObjectiveBounds::unknown(is_maximize),
            detail,
        )
    }

    /// A limit was reached after finding a primal feasible solution.
    ///
    /// `dual_bound` makes the dual status `Feasible` when it is finite.
    pub fn feasible(
        is_maximize: bool,
        limit: Limit,
        primal_bound: f64,
        dual_bound: Option<f64>,
        detail: &str,
    ) -> Self {
        let (dual_status, dual_bound) = proven_dual_bound(is_maximize, dual_bound);
        Self::with_status(
            TerminationReason::Feasible,
            Some(limit),
            ProblemStatus::new(FeasibilityStatus::Feasible, dual_status),
            ObjectiveBounds::new(primal_bound, dual_bound),
            detail,
        )
    }

    /// A limit was reached before any primal feasible solution was found.
    pub fn no_solution_found(
        is_maximize: bool,
        limit: Limit,
        dual_bound: Option<f64>,
        detail: &str,
    ) -> Self {
        let (dual_status, dual_bound) = proven_dual_bound(is_maximize, dual_bound);
        Self::with_status(
            TerminationReason::NoSolutionFound,
            Some(limit),
            ProblemStatus::new(FeasibilityStatus::Undetermined, dual_status),
            ObjectiveBounds::new(no_information_primal_bound(is_maximize), dual_bound),
            detail,
        )
    }

    /// Termination for `Imprecise`, `NumericalError` or `OtherError`.
    pub fn undetermined(is_maximize: bool, reason: TerminationReason, detail: &str) -> Self {
        Self::with_status(
            reason,
            None,
            ProblemStatus::new(
                FeasibilityStatus::Undetermined,
                FeasibilityStatus::Undetermined,
            ),
            ObjectiveBounds::unknown(is_maximize),
            detail,
        )
    }
}

fn proven_dual_bound(is_maximize: bool, dual_bound: Option<f64>) -> (FeasibilityStatus, f64) {
    match dual_bound {
        Some(bound) if bound.is_finite() => (FeasibilityStatus::Feasible, bound),
        _ => (
            FeasibilityStatus::Undetermined,
            no_information_dual_bound(is_maximize),
        ),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimalSolution {
    pub variable_values: SparseDoubleVector,
    pub objective_value: f64,
    /// Keyed by auxiliary objective id.
    pub auxiliary_objective_values: BTreeMap<i64, f64>,
    pub feasibility_status: FeasibilityStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualSolution {
    /// Linear constraint duals.
    pub dual_values: SparseDoubleVector,
    pub quadratic_dual_values: SparseDoubleVector,
    pub reduced_costs: SparseDoubleVector,
    pub objective_value: Option<f64>,
    pub feasibility_status: FeasibilityStatus,
}

/// Simplex basis status of a variable or linear constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasisStatus {
    #[default]
    Unspecified,
    Free,
    AtLowerBound,
    AtUpperBound,
    FixedValue,
    Basic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseBasisStatusVector {
    pub ids: Vec<i64>,
    pub values: Vec<BasisStatus>,
}

impl SparseBasisStatusVector {
    pub fn new(ids: Vec<i64>, values: Vec<BasisStatus>) -> Self {
        Self { ids, values }
    }
}

/// A simplex basis; covers every variable and linear constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Basis {
    pub constraint_status: SparseBasisStatusVector,
    pub variable_status: SparseBasisStatusVector,
    pub basic_dual_feasibility: FeasibilityStatus,
}

/// One returned solution; at least one component must be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Solution {
    pub primal_solution: Option<PrimalSolution>,
    pub dual_solution: Option<DualSolution>,
    pub basis: Option<Basis>,
}

impl Solution {
    pub fn is_primal_feasible(&self) -> bool {
        self.primal_solution
            .as_ref()
            .is_some_and(|primal| primal.feasibility_status == FeasibilityStatus::Feasible)
    }

    pub fn is_dual_feasible(&self) -> bool {
        self.dual_solution
            .as_ref()
            .is_some_and(|dual| dual.feasibility_status == FeasibilityStatus::Feasible)
    }
}

/// Certificate of unboundedness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimalRay {
    pub variable_values: SparseDoubleVector,
}

/// Certificate of infeasibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualRay {
    pub dual_values: SparseDoubleVector,
    pub reduced_costs: SparseDoubleVector,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveStats {
    pub solve_time: Duration,
    pub simplex_iterations: i64,
    pub barrier_iterations: i64,
    pub first_order_iterations: i64,
    pub node_count: i64,
    /// Deprecated mirror of `Termination::problem_status`.
    pub problem_status: Option<ProblemStatus>,
    /// Deprecated mirror of `ObjectiveBounds::primal_bound`.
    pub best_primal_bound: Option<f64>,
    /// Deprecated mirror of `ObjectiveBounds::dual_bound`.
    pub best_dual_bound: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveResult {
    pub termination: Termination,
    /// Ordered best first: primal feasible, then dual feasible.
    pub solutions: Vec<Solution>,
    pub primal_rays: Vec<PrimalRay>,
    pub dual_rays: Vec<DualRay>,
    pub solve_stats: SolveStats,
}

impl SolveResult {
    pub fn new(termination: Termination) -> Self {
        Self {
            termination,
            ..Self::default()
        }
    }

    /// Fill the structured termination fields from the deprecated stats fields
    /// when a backend only set the latter, then mirror them back.
    pub fn upgrade_for_stats_migration(&mut self, is_maximize: bool) {
        if self.termination.problem_status.is_none() {
            self.termination.problem_status = self.solve_stats.problem_status;
        }
        if self.termination.objective_bounds.is_none() {
            self.termination.objective_bounds = Some(ObjectiveBounds::new(
                self.solve_stats
                    .best_primal_bound
                    .unwrap_or_else(|| no_information_primal_bound(is_maximize)),
                self.solve_stats
                    .best_dual_bound
                    .unwrap_or_else(|| no_information_dual_bound(is_maximize)),
            ));
        }
        self.solve_stats.problem_status = self.termination.problem_status;
        if let Some(bounds) = self.termination.objective_bounds {
            self.solve_stats.best_primal_bound = Some(bounds.primal_bound);
            self.solve_stats.best_dual_bound = Some(bounds.dual_bound);
        }
    }
}
