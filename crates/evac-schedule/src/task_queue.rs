//! `TaskQueue`: sparse per-tick queue of pending effects.
//!
//! `BTreeMap` keys keep ticks ordered, so `next_tick` is the first key and
//! draining a tick is a single `remove`.  Within one tick, tasks come back
//! in registration order.

use std::collections::BTreeMap;

use evac_core::Tick;

/// Tasks waiting for the world clock, grouped by the tick they fire on.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskQueue<T> {
    inner: BTreeMap<Tick, Vec<T>>,
    /// Cached total task count for O(1) `len()`.
    total: usize,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), total: 0 }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `tick`.
    pub fn push(&mut self, tick: Tick, task: T) {
        self.inner.entry(tick).or_default().push(task);
        self.total += 1;
    }

    /// Remove and return every task scheduled for exactly `tick`, oldest
    /// first.
    ///
    /// Returns `None` if nothing is queued for that tick.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<T>> {
        let tasks = self.inner.remove(&tick)?;
        self.total -= tasks.len();
        Some(tasks)
    }

    /// Remove and return every task scheduled at or before `tick`, in tick
    /// order then registration order.
    pub fn drain_through(&mut self, tick: Tick) -> Vec<T> {
        let later = match tick.0.checked_add(1) {
            Some(next) => self.inner.split_off(&Tick(next)),
            None       => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.inner, later);
        let tasks: Vec<T> = due.into_values().flatten().collect();
        self.total -= tasks.len();
        tasks
    }

    /// The earliest tick with at least one task, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of pending tasks across all ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct ticks that have at least one task.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
