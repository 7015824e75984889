//! Best-first frontier.
//!
//! Plans are ordered by [`FrontierKey`], a total order:
//!
//! 1. cost, ascending;
//! 2. among equal costs, unfinished plans before goals ([`TieBreak`]);
//! 3. unfinished plans: deeper first, then earlier agent clock;
//!    goals: earlier finish first, then deeper;
//! 4. plan id, ascending (older plans first).
//!
//! Ids are unique, so no two keys compare equal and the pop order is fully
//! deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use evac_core::{PlanId, Tick};

/// Equal-cost ordering.  Variant order is comparison order, then fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TieBreak {
    /// A plan that can still be expanded.
    Open { depth: Reverse<u32>, clock: Tick },
    /// A plan whose agent has terminated.
    Goal { clock: Tick, depth: Reverse<u32> },
}

impl TieBreak {
    pub fn new(goal: bool, depth: u32, clock: Tick) -> Self {
        if goal {
            TieBreak::Goal { clock, depth: Reverse(depth) }
        } else {
            TieBreak::Open { depth: Reverse(depth), clock }
        }
    }
}

/// Ordering key of one frontier entry.  Field order is comparison order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub cost: u64,
    pub tie:  TieBreak,
    pub id:   PlanId,
}

/// Min-heap of plan keys.
///
/// `BinaryHeap` is a max-heap, so keys are wrapped in `Reverse` to pop the
/// smallest first.
#[derive(Default)]
pub struct Frontier {
    heap:       BinaryHeap<Reverse<FrontierKey>>,
    high_water: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: FrontierKey) {
        self.heap.push(Reverse(key));
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove and return the best key.
    pub fn pop(&mut self) -> Option<FrontierKey> {
        self.heap.pop().map(|Reverse(k)| k)
    }

    pub fn peek(&self) -> Option<&FrontierKey> {
        self.heap.peek().map(|Reverse(k)| k)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier ever reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
