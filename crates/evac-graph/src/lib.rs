//! `evac-graph`: the road network, deadline-aware shortest paths, and
//! scenario loading.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`network`]| `Graph`, `Node`, `Edge`, `GraphBuilder`                      |
//! | [`paths`]  | `ShortestPaths`, `shortest_paths_from`, `shortest_paths_departing` |
//! | [`loader`] | `load_scenario_str`, `load_scenario_file`                    |
//! | [`random`] | `random_scenario`, `ScenarioParams`                          |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                               |
//!
//! # Blocking model
//!
//! Roads are undirected and never removed.  Blocking is a flag on the edge
//! (`blocked_at`), so every later shortest-path query sees it without the
//! graph being rebuilt.  An edge may also carry a `forecast`, the tick at
//! which it is expected to be blocked.  Only the time-aware query
//! ([`shortest_paths_departing`]) honours it.

pub mod error;
pub mod loader;
pub mod network;
pub mod paths;
pub mod random;


pub use error::{GraphError, GraphResult};
pub use loader::{load_scenario_file, load_scenario_str};
pub use network::{Edge, Graph, GraphBuilder, Node};
pub use paths::{ShortestPaths, shortest_paths_departing, shortest_paths_from};
pub use random::{ScenarioParams, random_scenario};
