//! `evac-search`: plan before you drive.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`heuristic`] | `estimate`, `unsavable`: people that can no longer be saved |
//! | [`plan`]      | `Plan`, `PlanArena` (parent links are arena indices)       |
//! | [`frontier`]  | `FrontierKey`, `TieBreak`, `Frontier` (total-order min-heap) |
//! | [`tree`]      | `SearchTree`, `Move`, `SearchOutcome`                      |
//! | [`policy`]    | `SearchPolicy`: greedy / unbounded / real-time budgets    |
//! | [`error`]     | `SearchError`, `SearchResult<T>`                           |
//!
//! # How a search uses the live world
//!
//! There is one graph and it belongs to the simulation.  A [`SearchTree`]
//! borrows it mutably together with the planning agent, jumps between
//! hypothetical states with `evac_agent::apply`, and puts the root state
//! back before [`SearchTree::search`] returns, whatever the outcome.
//!
//! # Cost
//!
//! `cost(state) = penalty(agent) + estimate(state)`.  The estimate counts
//! people who can no longer reach a shelter in time.  For a terminated
//! agent the count is exact, so a goal's cost is its true loss.  The
//! estimate is not admissible; searches are complete but not optimal.

pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod plan;
pub mod policy;
pub mod tree;


pub use error::{SearchError, SearchResult};
pub use frontier::{Frontier, FrontierKey, TieBreak};
pub use heuristic::{estimate, unsavable};
pub use plan::{Plan, PlanArena};
pub use policy::SearchPolicy;
pub use tree::{Move, SearchOutcome, SearchTree};
