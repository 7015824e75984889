use evac_core::{AgentId, NodeId};
use evac_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} has terminated and cannot move")]
    Terminated(AgentId),

    #[error("no road from {from} to {to}")]
    NoRoad { from: NodeId, to: NodeId },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type AgentResult<T> = Result<T, AgentError>;
