//! Simulation observer trait for progress reporting and data collection.

use evac_agent::{Action, Agent};
use evac_core::Tick;

use crate::Task;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: action printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_action(&mut self, _tick: Tick, agent: &Agent, action: &Action) {
///         println!("{action}  → {agent}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after an action has been carried out (or started, for
    /// actions that end in a task).  `agent` is the state right after.
    fn on_action(&mut self, _tick: Tick, _agent: &Agent, _action: &Action) {}

    /// Called after a due task has been applied.
    fn on_task(&mut self, _tick: Tick, _task: &Task) {}

    /// Called at the end of each tick.  `acted` is the number of agents
    /// that were available this tick.
    fn on_tick_end(&mut self, _tick: Tick, _acted: usize) {}

    /// Called once after every agent has terminated.
    fn on_sim_end(&mut self, _final_tick: Tick, _agents: &[Agent]) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
