//! The validated solver session.

use crate::guard::{CallsTracker, ConcurrentCallsGuard};
use crate::init_args::SolverInitArgs;
use crate::interface::{Callback, MessageCallback, SolverInterface};
use crate::interrupter::SolveInterrupter;
use crate::registry::SolverRegistry;
use crate::solver_type::SolverType;
use arco_core::{
    ArcoError, ModelSummary, ResultExt, validate_callback_data, validate_callback_registration,
    validate_callback_result, validate_compute_infeasible_subsystem_result, validate_model,
    validate_model_solve_parameters, validate_model_update, validate_result,
    validate_solve_parameters,
};
use arco_model::{
    CallbackData, CallbackRegistration, CallbackResult, ComputeInfeasibleSubsystemResult, Model,
    ModelSolveParameters, ModelUpdate, SolveParameters, SolveResult,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

const PREVIOUS_FAILURE: &str = "a previous call to solve(), compute_infeasible_subsystem(), or \
                                update() failed, the Solver can't be used anymore";

/// Arguments of [`Solver::solve`].
#[derive(Default)]
pub struct SolveArgs<'a> {
    pub parameters: SolveParameters,
    pub model_parameters: ModelSolveParameters,
    pub message_callback: Option<Box<MessageCallback<'a>>>,
    pub callback_registration: CallbackRegistration,
    /// Required exactly when `callback_registration` requests events.
    pub user_callback: Option<Box<Callback<'a>>>,
    pub interrupter: Option<&'a SolveInterrupter>,
}

impl<'a> SolveArgs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(mut self, parameters: SolveParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_model_parameters(mut self, model_parameters: ModelSolveParameters) -> Self {
        self.model_parameters = model_parameters;
        self
    }

    pub fn with_message_callback(mut self, callback: impl FnMut(&[String]) + 'a) -> Self {
        self.message_callback = Some(Box::new(callback));
        self
    }

    pub fn with_callback(
        mut self,
        registration: CallbackRegistration,
        callback: impl FnMut(&CallbackData) -> Result<CallbackResult, ArcoError> + 'a,
    ) -> Self {
        self.callback_registration = registration;
        self.user_callback = Some(Box::new(callback));
        self
    }

    pub fn with_interrupter(mut self, interrupter: &'a SolveInterrupter) -> Self {
        self.interrupter = Some(interrupter);
        self
    }
}

/// Arguments of [`Solver::compute_infeasible_subsystem`].
#[derive(Default)]
pub struct ComputeInfeasibleSubsystemArgs<'a> {
    pub parameters: SolveParameters,
    pub message_callback: Option<Box<MessageCallback<'a>>>,
    pub interrupter: Option<&'a SolveInterrupter>,
}

impl<'a> ComputeInfeasibleSubsystemArgs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(mut self, parameters: SolveParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_message_callback(mut self, callback: impl FnMut(&[String]) + 'a) -> Self {
        self.message_callback = Some(Box::new(callback));
        self
    }

    pub fn with_interrupter(mut self, interrupter: &'a SolveInterrupter) -> Self {
        self.interrupter = Some(interrupter);
        self
    }
}

struct SessionState {
    /// `None` once the backend refused an update.
    backend: Option<Box<dyn SolverInterface>>,
    summary: ModelSummary,
}

impl SessionState {
    fn backend(&mut self) -> Result<&mut (dyn SolverInterface + 'static), ArcoError> {
        self.backend
            .as_deref_mut()
            .ok_or_else(|| ArcoError::failed_precondition(PREVIOUS_FAILURE))
    }

    fn solve(&mut self, args: SolveArgs<'_>) -> Result<SolveResult, ArcoError> {
        let SolveArgs {
            parameters,
            model_parameters,
            mut message_callback,
            callback_registration,
            mut user_callback,
            interrupter,
        } = args;

        validate_solve_parameters(&parameters).context("invalid parameters")?;
        validate_model_solve_parameters(&model_parameters, &self.summary)
            .context("invalid model_parameters")?;

        let summary = &self.summary;
        let registration = &callback_registration;
        let mut checked_callback = match user_callback.as_mut() {
            Some(user) => {
                validate_callback_registration(registration, summary)
                    .context("invalid callback_registration")?;
                Some(
                    move |data: &CallbackData| -> Result<CallbackResult, ArcoError> {
                        validate_callback_data(data, registration, summary).map_err(|err| {
                            err.context("invalid callback data from the solver")
                                .into_internal()
                        })?;
                        let result = user(data)?;
                        validate_callback_result(&result, data.event, registration, summary)
                            .with_context(|| {
                                format!("invalid callback result for event {}", data.event)
                            })?;
                        Ok(result)
                    },
                )
            }
            None => {
                if !registration.request_registration.is_empty() {
                    return Err(ArcoError::invalid_argument(
                        "no callback was provided to solve() but callback_registration \
                         requests events",
                    ));
                }
                None
            }
        };
        let callback = checked_callback
            .as_mut()
            .map(|callback| callback as &mut Callback<'_>);

        let Some(backend) = self.backend.as_mut() else {
            return Err(ArcoError::failed_precondition(PREVIOUS_FAILURE));
        };
        let mut result = backend.solve(
            &parameters,
            &model_parameters,
            message_callback.as_deref_mut(),
            registration,
            callback,
            interrupter,
        )?;

        result.upgrade_for_stats_migration(summary.maximize);
        validate_result(&result, &model_parameters, summary).map_err(|err| {
            err.context("invalid result returned by the solver")
                .into_internal()
        })?;
        Ok(result)
    }

    fn update(&mut self, update: &ModelUpdate) -> Result<bool, ArcoError> {
        validate_model_update(update, &mut self.summary)?;
        if self.backend()?.update(update)? {
            return Ok(true);
        }
        self.backend = None;
        Ok(false)
    }

    fn compute_infeasible_subsystem(
        &mut self,
        args: ComputeInfeasibleSubsystemArgs<'_>,
    ) -> Result<ComputeInfeasibleSubsystemResult, ArcoError> {
        let ComputeInfeasibleSubsystemArgs {
            parameters,
            mut message_callback,
            interrupter,
        } = args;
        validate_solve_parameters(&parameters).context("invalid parameters")?;

        let result = self.backend()?.compute_infeasible_subsystem(
            &parameters,
            message_callback.as_deref_mut(),
            interrupter,
        )?;
        validate_compute_infeasible_subsystem_result(&result, &self.summary).map_err(|err| {
            err.context("invalid result returned by the solver")
                .into_internal()
        })?;
        Ok(result)
    }
}

/// A session owning one backend instance.
///
/// Every call validates its inputs against the session's [`ModelSummary`]
/// before reaching the backend, and validates what the backend returns. Any
/// failed call retires the session: later calls fail with
/// [`ErrorKind::FailedPrecondition`](arco_core::ErrorKind::FailedPrecondition)
/// without touching the backend. Overlapping calls from several threads are
/// rejected, never queued.
///
/// # Example
///
/// ```ignore
/// let solver = Solver::new(&registry, SolverType::Highs, &model, &SolverInitArgs::new())?;
/// let result = solver.solve(SolveArgs::new())?;
/// ```
pub struct Solver {
    solver_type: SolverType,
    tracker: CallsTracker,
    /// Set for the duration of every call, cleared only on success.
    fatal_failure_occurred: AtomicBool,
    /// Set once a call leaves `fatal_failure_occurred` raised.
    retired: AtomicBool,
    state: Mutex<SessionState>,
}

impl Solver {
    /// Validate `model` and build a backend for it.
    pub fn new(
        registry: &SolverRegistry,
        solver_type: SolverType,
        model: &Model,
        init_args: &SolverInitArgs,
    ) -> Result<Self, ArcoError> {
        init_args.check_solver_type(solver_type)?;
        let summary = validate_model(model, true)?;
        let backend = registry.create(solver_type, model, init_args)?;
        tracing::debug!(
            component = "solver",
            operation = "create",
            status = "success",
            solver = %solver_type,
            model = %model.name,
            variables = summary.variables.size(),
            linear_constraints = summary.linear_constraints.size(),
            "Created solver session"
        );
        Ok(Self {
            solver_type,
            tracker: CallsTracker::new(),
            fatal_failure_occurred: AtomicBool::new(false),
            retired: AtomicBool::new(false),
            state: Mutex::new(SessionState {
                backend: Some(backend),
                summary,
            }),
        })
    }

    /// Build a session, solve once and drop it.
    pub fn non_incremental_solve(
        registry: &SolverRegistry,
        solver_type: SolverType,
        model: &Model,
        init_args: &SolverInitArgs,
        args: SolveArgs<'_>,
    ) -> Result<SolveResult, ArcoError> {
        Self::new(registry, solver_type, model, init_args)?.solve(args)
    }

    /// Build a session, compute an infeasible subsystem once and drop it.
    pub fn non_incremental_compute_infeasible_subsystem(
        registry: &SolverRegistry,
        solver_type: SolverType,
        model: &Model,
        init_args: &SolverInitArgs,
        args: ComputeInfeasibleSubsystemArgs<'_>,
    ) -> Result<ComputeInfeasibleSubsystemResult, ArcoError> {
        Self::new(registry, solver_type, model, init_args)?.compute_infeasible_subsystem(args)
    }

    pub fn solver_type(&self) -> SolverType {
        self.solver_type
    }

    /// Whether a previous call failed and the session refuses further calls.
    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::Acquire)
    }

    pub fn solve(&self, args: SolveArgs<'_>) -> Result<SolveResult, ArcoError> {
        let _guard = ConcurrentCallsGuard::try_acquire(&self.tracker)?;
        self.begin_call()?;
        let outcome = self.lock_state().solve(args);
        match &outcome {
            Ok(result) => {
                self.end_call();
                tracing::debug!(
                    component = "solver",
                    operation = "solve",
                    status = "success",
                    solver = %self.solver_type,
                    termination = %result.termination.reason,
                    solutions = result.solutions.len(),
                    "Solve finished"
                );
            }
            Err(err) => self.retire("solve", err),
        }
        outcome
    }

    /// Apply `update` to the model.
    ///
    /// Returns `Ok(false)` when the backend cannot apply it in place; the
    /// backend is then dropped and the session is retired.
    pub fn update(&self, update: &ModelUpdate) -> Result<bool, ArcoError> {
        let _guard = ConcurrentCallsGuard::try_acquire(&self.tracker)?;
        self.begin_call()?;
        let outcome = self.lock_state().update(update);
        match &outcome {
            Ok(true) => {
                self.end_call();
                tracing::debug!(
                    component = "solver",
                    operation = "update",
                    status = "success",
                    solver = %self.solver_type,
                    "Applied model update"
                );
            }
            Ok(false) => {
                self.retired.store(true, Ordering::Release);
                tracing::warn!(
                    component = "solver",
                    operation = "update",
                    status = "warn",
                    solver = %self.solver_type,
                    "Backend cannot apply the update in place, session retired"
                );
            }
            Err(err) => self.retire("update", err),
        }
        outcome
    }

    pub fn compute_infeasible_subsystem(
        &self,
        args: ComputeInfeasibleSubsystemArgs<'_>,
    ) -> Result<ComputeInfeasibleSubsystemResult, ArcoError> {
        let _guard = ConcurrentCallsGuard::try_acquire(&self.tracker)?;
        self.begin_call()?;
        let outcome = self.lock_state().compute_infeasible_subsystem(args);
        match &outcome {
            Ok(result) => {
                self.end_call();
                tracing::debug!(
                    component = "solver",
                    operation = "compute_infeasible_subsystem",
                    status = "success",
                    solver = %self.solver_type,
                    feasibility = %result.feasibility,
                    is_minimal = result.is_minimal,
                    "Infeasible subsystem computed"
                );
            }
            Err(err) => self.retire("compute_infeasible_subsystem", err),
        }
        outcome
    }

    fn begin_call(&self) -> Result<(), ArcoError> {
        if self.fatal_failure_occurred.swap(true, Ordering::AcqRel) {
            return Err(ArcoError::failed_precondition(PREVIOUS_FAILURE));
        }
        Ok(())
    }

    fn end_call(&self) {
        self.fatal_failure_occurred.store(false, Ordering::Release);
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn retire(&self, operation: &'static str, err: &ArcoError) {
        self.retired.store(true, Ordering::Release);
        tracing::warn!(
            component = "solver",
            operation,
            status = "error",
            solver = %self.solver_type,
            code = err.code(),
            error = %err.message(),
            "Call failed, session retired"
        );
    }
}

impl std::fmt::Debug for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("solver_type", &self.solver_type)
            .field("retired", &self.is_retired())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arco_core::ErrorKind;
    use arco_model::{Termination, TerminationReason};

    /// Backend answering every solve with a fixed result.
    struct FixedBackend {
        result: SolveResult,
    }

    impl SolverInterface for FixedBackend {
        fn solve(
            &mut self,
            _parameters: &SolveParameters,
            _model_parameters: &ModelSolveParameters,
            message_callback: Option<&mut MessageCallback<'_>>,
            _callback_registration: &CallbackRegistration,
            _callback: Option<&mut Callback<'_>>,
            _interrupter: Option<&SolveInterrupter>,
        ) -> Result<SolveResult, ArcoError> {
            if let Some(sink) = message_callback {
                sink(&["fixed backend".to_string()]);
            }
            Ok(self.result.clone())
        }

        fn update(&mut self, _update: &ModelUpdate) -> Result<bool, ArcoError> {
            Ok(true)
        }
    }

    fn registry(result: SolveResult) -> SolverRegistry {
        SolverRegistry::builder()
            .register(SolverType::Glop, move |_model: &Model, _args: &SolverInitArgs| {
                Ok(Box::new(FixedBackend {
                    result: result.clone(),
                }) as Box<dyn SolverInterface>)
            })
            .unwrap()
            .build()
    }

    fn model() -> Model {
        let mut model = Model::new("single");
        model.variables.push(0, 0.0, 1.0, false, "x");
        model
    }

    fn other_error() -> SolveResult {
        SolveResult::new(Termination::undetermined(
            false,
            TerminationReason::OtherError,
            "fixed",
        ))
    }

    #[test]
    fn test_solve_forwards_messages() {
        let solver = Solver::new(
            &registry(other_error()),
            SolverType::Glop,
            &model(),
            &SolverInitArgs::new(),
        )
        .unwrap();

        let mut lines = Vec::new();
        let result = solver
            .solve(SolveArgs::new().with_message_callback(|batch: &[String]| {
                lines.extend_from_slice(batch)
            }))
            .unwrap();
        assert_eq!(result.termination.reason, TerminationReason::OtherError);
        assert_eq!(lines, vec!["fixed backend".to_string()]);
        assert!(!solver.is_retired());
    }

    #[test]
    fn test_new_rejects_invalid_model() {
        let mut model = model();
        model.variables.lower_bounds[0] = f64::NAN;
        let err = Solver::new(
            &registry(other_error()),
            SolverType::Glop,
            &model,
            &SolverInitArgs::new(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_new_rejects_unregistered_solver() {
        let err = Solver::new(
            &registry(other_error()),
            SolverType::Gurobi,
            &model(),
            &SolverInitArgs::new(),
        )
        .unwrap_err();
        assert!(err.message().contains("gurobi is not registered"));
    }

    #[test]
    fn test_invalid_parameters_retire_the_session() {
        let solver = Solver::new(
            &registry(other_error()),
            SolverType::Glop,
            &model(),
            &SolverInitArgs::new(),
        )
        .unwrap();
        let params = SolveParameters::new().with_relative_gap_tolerance(-1.0);
        let err = solver
            .solve(SolveArgs::new().with_parameters(params))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.message().starts_with("invalid parameters"));
        assert!(solver.is_retired());

        let err = solver.solve(SolveArgs::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedPrecondition);
    }

    #[test]
    fn test_default_compute_infeasible_subsystem_is_unimplemented() {
        let solver = Solver::new(
            &registry(other_error()),
            SolverType::Glop,
            &model(),
            &SolverInitArgs::new(),
        )
        .unwrap();
        let err = solver
            .compute_infeasible_subsystem(ComputeInfeasibleSubsystemArgs::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unimplemented);
        assert!(solver.is_retired());
    }

    #[test]
    fn test_debug_shows_state() {
        let solver = Solver::new(
            &registry(other_error()),
            SolverType::Glop,
            &model(),
            &SolverInitArgs::new(),
        )
        .unwrap();
        let rendered = format!("{solver:?}");
        assert!(rendered.contains("Glop"));
        assert!(rendered.contains("retired: false"));
    }
}
