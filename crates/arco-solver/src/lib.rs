//! Solver sessions and the backend contract for Arco.
//!
//! A [`Solver`] owns one backend instance built from a [`SolverRegistry`]
//! and validates everything that crosses the boundary in either direction.
//!
//! # Overview
//!
//! - [`SolverType`]: identifies a backend
//! - [`SolverInterface`]: trait every backend implements
//! - [`SolverRegistry`]: solver type to factory map, read-only once built
//! - [`SolverInitArgs`]: backend construction arguments
//! - [`SolveInterrupter`]: cancellation token handed to backends
//! - [`ConcurrentCallsGuard`]: rejects overlapping calls on one session
//! - [`Solver`]: the validated session

mod guard;
mod init_args;
mod interface;
mod interrupter;
mod registry;
mod solver;
mod solver_type;

pub use guard::{CallsTracker, ConcurrentCallsGuard};
pub use init_args::{NonStreamableInitArgs, SolverInitArgs};
pub use interface::{Callback, MessageCallback, SolverFactory, SolverInterface};
pub use interrupter::SolveInterrupter;
pub use registry::{SolverRegistry, SolverRegistryBuilder};
pub use solver::{ComputeInfeasibleSubsystemArgs, SolveArgs, Solver};
pub use solver_type::SolverType;
