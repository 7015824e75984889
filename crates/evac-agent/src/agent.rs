//! The agent record.

use std::fmt;

use evac_core::{AgentId, NodeId, Tick};

// ── AgentSnapshot ─────────────────────────────────────────────────────────────

/// The planning-relevant fields of an agent, copied by value into a `State`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub location:   NodeId,
    pub time:       Tick,
    pub carrying:   u32,
    pub saved:      u32,
    pub penalty:    u64,
    pub terminated: bool,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One evacuation vehicle (or vandal).
///
/// `time` is the agent's own clock: the tick at which its current action
/// finishes.  The agent is available to act again once the world clock has
/// caught up with it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:   AgentId,
    pub name: String,

    /// Node the agent is standing on.  While a goto is in flight this stays
    /// the departure node until the arrival task fires.
    pub location: NodeId,

    pub time: Tick,

    /// People on board.
    pub carrying: u32,

    /// People delivered to a shelter.
    pub saved: u32,

    /// Set on termination: people on board plus the base penalty.
    pub penalty: u64,

    pub terminated: bool,
}

impl Agent {
    pub fn new(id: AgentId, name: impl Into<String>, location: NodeId) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            time: Tick::ZERO,
            carrying: 0,
            saved: 0,
            penalty: 0,
            terminated: false,
        }
    }

    /// `true` if the agent may act at world tick `now`.
    #[inline]
    pub fn is_available(&self, now: Tick) -> bool {
        !self.terminated && self.time <= now
    }

    /// Evacuation score: people saved minus penalty.
    pub fn score(&self) -> i64 {
        self.saved as i64 - self.penalty as i64
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            location:   self.location,
            time:       self.time,
            carrying:   self.carrying,
            saved:      self.saved,
            penalty:    self.penalty,
            terminated: self.terminated,
        }
    }

    /// Overwrite the planning fields from `snap`.  Identity is untouched.
    pub fn restore(&mut self, snap: &AgentSnapshot) {
        self.location   = snap.location;
        self.time       = snap.time;
        self.carrying   = snap.carrying;
        self.saved      = snap.saved;
        self.penalty    = snap.penalty;
        self.terminated = snap.terminated;
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|S{}|C{}|{}",
            self.name, self.location, self.saved, self.carrying, self.time
        )?;
        if self.terminated {
            write!(f, "[${}]", self.score())?;
        }
        Ok(())
    }
}
