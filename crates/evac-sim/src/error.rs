use evac_agent::AgentError;
use evac_core::CoreError;
use evac_graph::GraphError;
use evac_search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    /// Only non-exhaustion search failures end up here; an exhausted
    /// frontier makes the planner terminate instead.
    #[error("search error: {0}")]
    Search(#[from] SearchError),
}

pub type SimResult<T> = Result<T, SimError>;
