//! `evac-schedule`: pending effects keyed by the tick they land on.
//!
//! # Crate layout
//!
//! | Module         | Contents                                          |
//! |----------------|---------------------------------------------------|
//! | [`task_queue`] | `TaskQueue<T>` (`BTreeMap<Tick, Vec<T>>`)         |
//!
//! A goto or a road block takes time.  Instead of a callback, the simulator
//! pushes a task value at the action's end tick; when the world clock
//! reaches that tick it drains the tasks in the order they were pushed and
//! applies them.

pub mod task_queue;

#[cfg(test)]
mod tests;

pub use task_queue::TaskQueue;
