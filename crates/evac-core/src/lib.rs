//! `evac-core`: foundational types for the evacuation planner workspace.
//!
//! This crate is a dependency of every other `evac-*` crate.  It has no
//! `evac-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                          |
//! |------------|---------------------------------------------------|
//! | [`ids`]    | `AgentId`, `NodeId`, `EdgeId`, `PlanId`           |
//! | [`time`]   | `Tick` (integer clock, `Tick::NEVER` = no deadline) |
//! | [`config`] | `EvacConfig`: penalties, thinking time, budgets  |
//! | [`error`]  | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EvacConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, EdgeId, NodeId, PlanId};
pub use time::Tick;
