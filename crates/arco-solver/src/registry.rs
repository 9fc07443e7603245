//! Solver type to factory lookup.

use crate::init_args::SolverInitArgs;
use crate::interface::{SolverFactory, SolverInterface};
use crate::solver_type::SolverType;
use arco_core::ArcoError;
use arco_model::Model;
use std::collections::HashMap;
use std::sync::OnceLock;

static GLOBAL_REGISTRY: OnceLock<SolverRegistry> = OnceLock::new();

/// Read-only map from [`SolverType`] to the factory building that backend.
///
/// Built once through [`SolverRegistry::builder`] and passed to
/// [`Solver::new`](crate::Solver::new). A process-wide instance can be
/// installed with [`SolverRegistry::install_global`].
pub struct SolverRegistry {
    factories: HashMap<SolverType, SolverFactory>,
}

/// Collects factories before freezing them into a [`SolverRegistry`].
#[derive(Default)]
pub struct SolverRegistryBuilder {
    factories: HashMap<SolverType, SolverFactory>,
}

impl SolverRegistryBuilder {
    /// Add a factory. Registering the same solver type twice is an error.
    pub fn register<F>(mut self, solver_type: SolverType, factory: F) -> Result<Self, ArcoError>
    where
        F: Fn(&Model, &SolverInitArgs) -> Result<Box<dyn SolverInterface>, ArcoError>
            + Send
            + Sync
            + 'static,
    {
        if self.factories.contains_key(&solver_type) {
            return Err(ArcoError::invalid_argument(format!(
                "solver type {solver_type} is already registered"
            )));
        }
        self.factories.insert(solver_type, Box::new(factory));
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        tracing::debug!(
            component = "solver_registry",
            operation = "build",
            status = "success",
            solvers = self.factories.len(),
            "Built solver registry"
        );
        SolverRegistry {
            factories: self.factories,
        }
    }
}

impl SolverRegistry {
    pub fn builder() -> SolverRegistryBuilder {
        SolverRegistryBuilder::default()
    }

    pub fn is_registered(&self, solver_type: SolverType) -> bool {
        self.factories.contains_key(&solver_type)
    }

    /// Registered solver types in ascending order.
    pub fn registered_solvers(&self) -> Vec<SolverType> {
        let mut solvers: Vec<SolverType> = self.factories.keys().copied().collect();
        solvers.sort();
        solvers
    }

    /// Build a backend for `model`.
    ///
    /// The model must already be validated.
    pub fn create(
        &self,
        solver_type: SolverType,
        model: &Model,
        init_args: &SolverInitArgs,
    ) -> Result<Box<dyn SolverInterface>, ArcoError> {
        let Some(factory) = self.factories.get(&solver_type) else {
            return Err(ArcoError::invalid_argument(format!(
                "solver type {solver_type} is not registered, support for this solver has not been compiled in"
            )));
        };
        factory(model, init_args)
    }

    /// Install the process-wide registry. Only the first call succeeds.
    pub fn install_global(registry: SolverRegistry) -> Result<(), ArcoError> {
        GLOBAL_REGISTRY.set(registry).map_err(|_| {
            ArcoError::failed_precondition("a global solver registry is already installed")
        })
    }

    pub fn global() -> Option<&'static SolverRegistry> {
        GLOBAL_REGISTRY.get()
    }
}

impl std::fmt::Debug for SolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverRegistry")
            .field("solvers", &self.registered_solvers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{Callback, MessageCallback};
    use crate::interrupter::SolveInterrupter;
    use arco_core::ErrorKind;
    use arco_model::{
        CallbackRegistration, ModelSolveParameters, ModelUpdate, SolveParameters, SolveResult,
        Termination, TerminationReason,
    };

    struct NoopBackend;

    impl SolverInterface for NoopBackend {
        fn solve(
            &mut self,
            _parameters: &SolveParameters,
            _model_parameters: &ModelSolveParameters,
            _message_callback: Option<&mut MessageCallback<'_>>,
            _callback_registration: &CallbackRegistration,
            _callback: Option<&mut Callback<'_>>,
            _interrupter: Option<&SolveInterrupter>,
        ) -> Result<SolveResult, ArcoError> {
            Ok(SolveResult::new(Termination::undetermined(
                false,
                TerminationReason::OtherError,
                "noop",
            )))
        }

        fn update(&mut self, _update: &ModelUpdate) -> Result<bool, ArcoError> {
            Ok(true)
        }
    }

    fn noop_factory(
        _model: &Model,
        _init_args: &SolverInitArgs,
    ) -> Result<Box<dyn SolverInterface>, ArcoError> {
        Ok(Box::new(NoopBackend))
    }

    #[test]
    fn test_registry_lookup() {
        let registry = SolverRegistry::builder()
            .register(SolverType::Highs, noop_factory)
            .unwrap()
            .register(SolverType::Glop, noop_factory)
            .unwrap()
            .build();

        assert!(registry.is_registered(SolverType::Highs));
        assert!(!registry.is_registered(SolverType::Gurobi));
        assert_eq!(
            registry.registered_solvers(),
            vec![SolverType::Glop, SolverType::Highs]
        );
        assert!(
            registry
                .create(SolverType::Glop, &Model::default(), &SolverInitArgs::new())
                .is_ok()
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let err = SolverRegistry::builder()
            .register(SolverType::Highs, noop_factory)
            .unwrap()
            .register(SolverType::Highs, noop_factory)
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.message().contains("already registered"));
    }

    #[test]
    fn test_create_unregistered() {
        let registry = SolverRegistry::builder().build();
        let err = registry
            .create(SolverType::Scs, &Model::default(), &SolverInitArgs::new())
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.message().contains("scs is not registered"));
    }

    #[test]
    fn test_install_global_once() {
        let registry = SolverRegistry::builder()
            .register(SolverType::Pdlp, noop_factory)
            .unwrap()
            .build();
        assert!(SolverRegistry::install_global(registry).is_ok());
        assert!(SolverRegistry::global().unwrap().is_registered(SolverType::Pdlp));

        let err = SolverRegistry::install_global(SolverRegistry::builder().build()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedPrecondition);
    }
}
