use evac_agent::AgentError;
use evac_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The frontier ran dry without reaching a goal or the budget.  Only
    /// possible for a search with no root plan to expand.
    #[error("search frontier exhausted")]
    Exhausted,

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),
}

pub type SearchResult<T> = Result<T, SearchError>;
