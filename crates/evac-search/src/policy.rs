//! Expansion budgets.

use std::fmt;

use evac_core::EvacConfig;

/// How much a planner may think per planning call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchPolicy {
    /// Expand a single plan, then commit to the best child's actions.
    GreedyOneStep,
    /// Expand until a goal is popped (capped by `expansion_ceiling`).
    Unbounded,
    /// Expand at most `limit` plans, execute one action, replan.
    RealTime { limit: u32 },
}

impl SearchPolicy {
    /// Real-time policy using the configured limit.
    pub fn real_time(config: &EvacConfig) -> Self {
        SearchPolicy::RealTime { limit: config.realtime_limit }
    }

    pub fn max_expansions(&self, config: &EvacConfig) -> u32 {
        match *self {
            SearchPolicy::GreedyOneStep     => 1,
            SearchPolicy::Unbounded         => config.expansion_ceiling,
            SearchPolicy::RealTime { limit } => limit,
        }
    }

    /// Ticks charged to the agent before a planning call.  The unbounded
    /// planner thinks for free.
    pub fn thinking_time(&self, config: &EvacConfig) -> u64 {
        match *self {
            SearchPolicy::Unbounded => 0,
            _ => self.max_expansions(config) as u64 * config.expansion_time_unit,
        }
    }

    /// Whether the planner executes the whole plan before replanning.
    pub fn keeps_plan(&self) -> bool {
        !matches!(self, SearchPolicy::RealTime { .. })
    }
}

impl fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPolicy::GreedyOneStep     => f.write_str("greedy-search"),
            SearchPolicy::Unbounded         => f.write_str("a-star"),
            SearchPolicy::RealTime { limit } => write!(f, "rta-star({limit})"),
        }
    }
}
