//! Arguments used when building a backend.

use crate::solver_type::SolverType;
use arco_core::ArcoError;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Backend-specific construction arguments that cannot be serialized, such as
/// a license handle or a shared environment.
///
/// Backends downcast through [`as_any`](NonStreamableInitArgs::as_any) to
/// their own concrete type.
pub trait NonStreamableInitArgs: Any + Debug + Send + Sync {
    /// The only backend these arguments may be passed to.
    fn solver_type(&self) -> SolverType;

    fn as_any(&self) -> &dyn Any;
}

/// Arguments forwarded to a [`SolverFactory`](crate::SolverFactory).
#[derive(Debug, Clone, Default)]
pub struct SolverInitArgs {
    pub non_streamable: Option<Arc<dyn NonStreamableInitArgs>>,
}

impl SolverInitArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_non_streamable(mut self, args: impl NonStreamableInitArgs) -> Self {
        self.non_streamable = Some(Arc::new(args));
        self
    }

    /// Fails when non-streamable arguments target another backend.
    pub fn check_solver_type(&self, solver_type: SolverType) -> Result<(), ArcoError> {
        match &self.non_streamable {
            Some(args) if args.solver_type() != solver_type => {
                Err(ArcoError::invalid_argument(format!(
                    "invalid non_streamable init arguments for solver type {solver_type}: \
                     they were built for {}",
                    args.solver_type()
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arco_core::ErrorKind;

    #[derive(Debug)]
    struct GurobiEnv {
        isv_key: String,
    }

    impl NonStreamableInitArgs for GurobiEnv {
        fn solver_type(&self) -> SolverType {
            SolverType::Gurobi
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn gurobi_args() -> SolverInitArgs {
        SolverInitArgs::new().with_non_streamable(GurobiEnv {
            isv_key: "key".to_string(),
        })
    }

    #[test]
    fn test_empty_init_args_fit_any_solver() {
        let args = SolverInitArgs::new();
        for solver_type in SolverType::ALL {
            assert!(args.check_solver_type(solver_type).is_ok());
        }
    }

    #[test]
    fn test_non_streamable_solver_mismatch() {
        let args = gurobi_args();
        assert!(args.check_solver_type(SolverType::Gurobi).is_ok());
        let err = args.check_solver_type(SolverType::Highs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.message().contains("built for gurobi"));
    }

    #[test]
    fn test_downcast_non_streamable() {
        let args = gurobi_args();
        let env = args
            .non_streamable
            .as_ref()
            .and_then(|args| args.as_any().downcast_ref::<GurobiEnv>())
            .unwrap();
        assert_eq!(env.isv_key, "key");
    }
}
