//! Model summaries and validators for the Arco solver boundary.
//!
//! Everything a caller sends to a backend, and everything a backend sends
//! back, passes through the checks in this crate:
//!
//! - [`IdNameBiMap`]: ids and names of one entity kind
//! - [`ModelSummary`]: all id maps of a model, kept in sync with updates
//! - [`validators`]: models, updates, parameters, results, callbacks
//! - [`ArcoError`]: the error type shared with `arco-solver`

pub mod bimap;
pub mod error;
pub mod summary;
pub mod validators;

pub use bimap::IdNameBiMap;
pub use error::{ArcoError, ErrorKind, ResultExt};
pub use summary::{ConstraintKind, ModelSummary};
pub use validators::{
    validate_callback_data, validate_callback_registration, validate_callback_result,
    validate_compute_infeasible_subsystem_result, validate_model, validate_model_solve_parameters,
    validate_model_update, validate_result, validate_solve_parameters, validate_termination,
};
