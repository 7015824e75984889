//! Run-wide tuning knobs.
//!
//! Typically built in code or loaded from a TOML/JSON file by the application
//! (enable the `serde` feature), then handed to the simulation builder.

use crate::{CoreError, CoreResult};

/// Top-level evacuation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvacConfig {
    /// Base penalty `K` charged when an agent terminates (losing the
    /// vehicle), on top of the victims still on board.  Default: 2.
    pub base_penalty: u64,

    /// Number of NO-OP turns a vandal takes before each block/move cycle.
    /// Default: 1.
    pub vandal_no_ops: u32,

    /// Ticks charged per budgeted expansion before a plan is used: the
    /// planner's "thinking time".  Default: 0 (planning is free).
    pub expansion_time_unit: u64,

    /// Expansion budget of the real-time planner per replanning call.
    /// Default: 10.
    pub realtime_limit: u32,

    /// Hard ceiling on expansions for the unbounded planner.  Default: 100 000.
    pub expansion_ceiling: u32,
}

impl Default for EvacConfig {
    fn default() -> Self {
        Self {
            base_penalty:        2,
            vandal_no_ops:       1,
            expansion_time_unit: 0,
            realtime_limit:      10,
            expansion_ceiling:   100_000,
        }
    }
}

impl EvacConfig {
    /// Reject settings that would make a planner unable to expand anything.
    pub fn validate(&self) -> CoreResult<()> {
        if self.realtime_limit == 0 {
            return Err(CoreError::Config("realtime_limit must be at least 1".into()));
        }
        if self.expansion_ceiling == 0 {
            return Err(CoreError::Config("expansion_ceiling must be at least 1".into()));
        }
        Ok(())
    }
}
