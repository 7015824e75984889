//! `evac-agent`: what an evacuation agent is, and how it moves when nobody
//! else is watching.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`agent`]    | `Agent` (live record), `AgentSnapshot` (planning fields)    |
//! | [`state`]    | `State`, `capture`, `apply`                                 |
//! | [`action`]   | `Action`, `ActionKind`                                      |
//! | [`moves`]    | `possible_moves`, `is_reachable`, `local_goto`, `local_terminate`, `try_evacuate` |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                              |
//!
//! # Local vs. live
//!
//! Everything here mutates the graph and the agent immediately.  The live
//! simulation (`evac-sim`) wraps these calls with scheduling: transit time is
//! charged up front but the arrival only lands when its task fires.  The
//! search driver (`evac-search`) calls them directly on hypothetical states
//! and restores the live world afterwards with [`apply`].

pub mod action;
pub mod agent;
pub mod error;
pub mod moves;
pub mod state;


pub use action::{Action, ActionKind};
pub use agent::{Agent, AgentSnapshot};
pub use error::{AgentError, AgentResult};
pub use moves::{
    accumulated_penalty, is_reachable, local_goto, local_terminate, possible_moves, try_evacuate,
};
pub use state::{State, apply, capture};
