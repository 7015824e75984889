//! Graph-subsystem error type.

use thiserror::Error;

use evac_core::NodeId;

/// Errors produced by `evac-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// No unblocked path joins the two nodes.  Fatal to the query only:
    /// callers treat the target as infinitely far away.
    #[error("no path from {from} to {to}")]
    Disconnected { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("no vertex labelled {0:?}")]
    UnknownLabel(String),

    /// Duplicate edge, self-loop, or an edge that should exist but doesn't.
    /// Always a programming or input error; never recovered.
    #[error("graph invariant violated: {0}")]
    InvariantViolation(String),

    #[error("scenario declares {declared} vertices but defines {found}")]
    CountMismatch { declared: usize, found: usize },

    #[error("scenario parse error on line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
