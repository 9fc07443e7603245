//! Callback registration, payloads sent by backends, and user replies.

use crate::sparse::{SparseDoubleVector, SparseVectorFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Points during a solve where a backend invokes the user callback.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CallbackEvent {
    #[default]
    Unspecified,
    Presolve,
    Simplex,
    Mip,
    /// A new MIP incumbent was found.
    MipSolution,
    /// Inside a MIP node, before branching.
    MipNode,
    Barrier,
}

impl CallbackEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            CallbackEvent::Unspecified => "unspecified",
            CallbackEvent::Presolve => "presolve",
            CallbackEvent::Simplex => "simplex",
            CallbackEvent::Mip => "mip",
            CallbackEvent::MipSolution => "mip_solution",
            CallbackEvent::MipNode => "mip_node",
            CallbackEvent::Barrier => "barrier",
        }
    }
}

impl std::fmt::Display for CallbackEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the caller wants to hear about, and what it may send back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackRegistration {
    pub request_registration: Vec<CallbackEvent>,
    pub mip_solution_filter: SparseVectorFilter,
    pub mip_node_filter: SparseVectorFilter,
    /// The callback may add user cuts at `MipNode`.
    pub add_cuts: bool,
    /// The callback may add lazy constraints at `MipNode` or `MipSolution`.
    pub add_lazy_constraints: bool,
}

impl CallbackRegistration {
    /// Registration for the given events with default filters.
    pub fn for_events(events: impl IntoIterator<Item = CallbackEvent>) -> Self {
        Self {
            request_registration: events.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn events(&self) -> BTreeSet<CallbackEvent> {
        self.request_registration.iter().copied().collect()
    }

    pub fn is_registered(&self, event: CallbackEvent) -> bool {
        self.request_registration.contains(&event)
    }
}

/// Progress statistics shared with `Mip*` callbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MipStats {
    pub primal_bound: f64,
    pub dual_bound: f64,
    pub explored_nodes: i64,
    pub open_nodes: i64,
    pub simplex_iterations: i64,
    pub number_of_solutions_found: i64,
}

/// Payload a backend sends to the callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackData {
    pub event: CallbackEvent,
    /// Required for `MipSolution`, optional for `MipNode`, absent otherwise.
    pub primal_solution_vector: Option<SparseDoubleVector>,
    pub runtime: Duration,
    pub mip_stats: Option<MipStats>,
}

impl CallbackData {
    pub fn new(event: CallbackEvent) -> Self {
        Self {
            event,
            ..Self::default()
        }
    }
}

/// A cut or lazy constraint produced by the callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLinearConstraint {
    pub linear_expression: SparseDoubleVector,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub is_lazy: bool,
}

/// The callback's reply to one [`CallbackData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackResult {
    /// Ask the backend to stop as soon as possible.
    pub terminate: bool,
    pub cuts: Vec<GeneratedLinearConstraint>,
    /// Candidate primal solutions, only at `MipNode`.
    pub suggested_solutions: Vec<SparseDoubleVector>,
}
