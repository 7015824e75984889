//! `evac-sim`: the live world: a clock, agents taking turns, and effects
//! landing when their time comes.
//!
//! # Tick loop
//!
//! ```text
//! while some agent is still active:
//!   ① Act     : every available agent (not terminated, own clock ≤ world
//!                clock) proposes actions, in ascending AgentId order.
//!                Terminate / NO-OP apply at once; goto and block push a
//!                task at their end tick.
//!   ② Advance : the world clock moves one tick.
//!   ③ Tasks   : tasks due by the new tick fire in registration order
//!                (arrivals, road blocks).
//!   ④ Horizon : once the clock has passed the latest node deadline,
//!                every remaining agent is terminated.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`sim`]       | `Sim` and its tick loop                                  |
//! | [`builder`]   | `SimBuilder`: placement, validation, forecast           |
//! | [`behavior`]  | `Behavior` (`Greedy`, `Vandal`, `Planner`)               |
//! | [`task`]      | `Task`: pending arrival / block                         |
//! | [`forecast`]  | `forecast_blockages`: vandal-only dry run               |
//! | [`observer`]  | `SimObserver` trait, `NoopObserver`                      |
//! | [`error`]     | `SimError`, `SimResult<T>`                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use evac_core::EvacConfig;
//! use evac_graph::load_scenario_str;
//! use evac_search::SearchPolicy;
//! use evac_sim::{Behavior, NoopObserver, SimBuilder};
//!
//! let graph = load_scenario_str(SCENARIO)?;
//! let mut sim = SimBuilder::new(EvacConfig::default(), graph)
//!     .agent_at("A*", "V4", Behavior::planner(SearchPolicy::Unbounded))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod behavior;
pub mod builder;
pub mod error;
pub mod forecast;
pub mod observer;
pub mod sim;
pub mod task;

#[cfg(test)]
mod tests;

pub use behavior::{Behavior, Planner, VandalMemory};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use forecast::forecast_blockages;
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use task::Task;
