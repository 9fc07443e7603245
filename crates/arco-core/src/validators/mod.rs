//! Checks applied at the solver boundary.
//!
//! Every validator returns `Err` with [`ErrorKind::InvalidArgument`] and a
//! message prefixed by the path of the offending field. The session re-tags
//! failures on backend output as [`ErrorKind::Internal`].
//!
//! [`ErrorKind::InvalidArgument`]: crate::error::ErrorKind::InvalidArgument
//! [`ErrorKind::Internal`]: crate::error::ErrorKind::Internal

pub mod callback;
pub mod constraints;
pub mod ids;
pub mod model;
pub mod parameters;
pub mod result;
pub mod scalar;
pub mod solution;
pub mod sparse_matrix;
pub mod sparse_vector;
pub mod subsystem;
pub mod termination;

pub use callback::{
    validate_callback_data, validate_callback_registration, validate_callback_result,
};
pub use constraints::ValidateConstraint;
pub use model::{validate_model, validate_model_update};
pub use parameters::{validate_model_solve_parameters, validate_solve_parameters};
pub use result::{validate_result, validate_solve_stats};
pub use scalar::DoubleOptions;
pub use solution::{validate_basis, validate_solution, validate_solutions};
pub use subsystem::{validate_compute_infeasible_subsystem_result, validate_model_subset};
pub use termination::{validate_objective_bounds, validate_problem_status, validate_termination};
