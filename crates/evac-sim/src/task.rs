//! Pending effects.

use std::fmt;

use evac_core::{AgentId, EdgeId, NodeId};

/// An effect that lands when the world clock reaches its tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Task {
    /// The agent reaches `to` at the end of a goto.
    Arrive { agent: AgentId, to: NodeId },
    /// A vandal's road block takes effect.
    Block { agent: AgentId, edge: EdgeId },
}

impl Task {
    pub fn agent(&self) -> AgentId {
        match *self {
            Task::Arrive { agent, .. } | Task::Block { agent, .. } => agent,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Arrive { agent, to }  => write!(f, "arrive {agent} at {to}"),
            Task::Block { agent, edge } => write!(f, "block {edge} by {agent}"),
        }
    }
}
