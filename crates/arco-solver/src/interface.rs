//! The contract between a [`Solver`](crate::Solver) session and a backend.

use crate::init_args::SolverInitArgs;
use crate::interrupter::SolveInterrupter;
use arco_core::ArcoError;
use arco_model::{
    CallbackData, CallbackRegistration, CallbackResult, ComputeInfeasibleSubsystemResult, Model,
    ModelSolveParameters, ModelUpdate, SolveParameters, SolveResult,
};

/// Sink for backend log lines.
pub type MessageCallback<'a> = dyn FnMut(&[String]) + 'a;

/// User callback invoked by the backend on registered events.
pub type Callback<'a> = dyn FnMut(&CallbackData) -> Result<CallbackResult, ArcoError> + 'a;

/// Builds a backend for a model. Registered once per [`SolverType`](crate::SolverType).
pub type SolverFactory = Box<
    dyn Fn(&Model, &SolverInitArgs) -> Result<Box<dyn SolverInterface>, ArcoError> + Send + Sync,
>;

/// Trait for solver backends.
///
/// Backends may assume every input has already been validated against the
/// model they were built from (and the updates applied since). Everything
/// they return is validated by the session; contract violations surface to
/// the caller as [`ErrorKind::Internal`](arco_core::ErrorKind::Internal).
pub trait SolverInterface: Send {
    /// Solve the current model.
    ///
    /// `callback` is `None` exactly when `callback_registration` requests no
    /// events.
    fn solve(
        &mut self,
        parameters: &SolveParameters,
        model_parameters: &ModelSolveParameters,
        message_callback: Option<&mut MessageCallback<'_>>,
        callback_registration: &CallbackRegistration,
        callback: Option<&mut Callback<'_>>,
        interrupter: Option<&SolveInterrupter>,
    ) -> Result<SolveResult, ArcoError>;

    /// Apply an incremental change.
    ///
    /// Returns `Ok(false)` when the backend cannot apply this update in
    /// place; the session then discards the backend.
    fn update(&mut self, update: &ModelUpdate) -> Result<bool, ArcoError>;

    /// Search for an infeasible subsystem of the current model.
    fn compute_infeasible_subsystem(
        &mut self,
        _parameters: &SolveParameters,
        _message_callback: Option<&mut MessageCallback<'_>>,
        _interrupter: Option<&SolveInterrupter>,
    ) -> Result<ComputeInfeasibleSubsystemResult, ArcoError> {
        Err(ArcoError::unimplemented(
            "compute_infeasible_subsystem is not supported by this solver",
        ))
    }
}
