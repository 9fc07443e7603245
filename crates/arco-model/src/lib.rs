//! Records exchanged between Arco callers and solver backends.
//!
//! Every entity is keyed by a non-negative `i64` id. These records are plain
//! data: nothing here checks the ordering or numeric invariants, that is the
//! job of the validators in `arco-core`.
//!
//! # Overview
//!
//! - [`sparse`]: sparse vectors, matrices, filters and linear expressions
//! - [`model`]: a complete [`Model`]
//! - [`update`]: an incremental [`ModelUpdate`]
//! - [`parameters`]: [`SolveParameters`] and [`ModelSolveParameters`]
//! - [`result`]: [`SolveResult`], [`Termination`] and solutions
//! - [`callback`]: callback registration, payloads and results
//! - [`subsystem`]: infeasible subsystem results

pub mod callback;
pub mod model;
pub mod parameters;
pub mod result;
pub mod sparse;
pub mod subsystem;
pub mod update;

pub use callback::{
    CallbackData, CallbackEvent, CallbackRegistration, CallbackResult, GeneratedLinearConstraint,
    MipStats,
};
pub use model::{
    IndicatorConstraintData, LinearConstraintsData, Model, ObjectiveData, QuadraticConstraintData,
    SecondOrderConeConstraintData, SosConstraintData, VariablesData,
};
pub use parameters::{
    Emphasis, LpAlgorithm, ModelSolveParameters, ObjectiveParameters, SolutionHint,
    SolveParameters,
};
pub use result::{
    Basis, BasisStatus, DualRay, DualSolution, FeasibilityStatus, Limit, ObjectiveBounds,
    PrimalRay, PrimalSolution, ProblemStatus, Solution, SolveResult, SolveStats,
    SparseBasisStatusVector, Termination, TerminationReason,
};
pub use sparse::{
    LinearExpression, SparseBoolVector, SparseDoubleMatrix, SparseDoubleVector,
    SparseInt32Vector, SparseVectorFilter,
};
pub use subsystem::{ComputeInfeasibleSubsystemResult, ModelSubset, ModelSubsetBounds};
pub use update::{
    AuxiliaryObjectivesUpdates, LinearConstraintUpdates, MappedConstraintUpdates, ModelUpdate,
    ObjectiveUpdates, VariableUpdates,
};
