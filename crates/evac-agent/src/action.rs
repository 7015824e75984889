//! Agent decisions as plain values.

use std::fmt;

use evac_core::{AgentId, EdgeId, NodeId, Tick};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Traverse the road `from → to`.
    Goto { from: NodeId, to: NodeId },
    /// Stop for good; takes effect immediately.
    Terminate,
    /// Block a road (vandals only).
    Block { edge: EdgeId },
    /// Wait one tick.
    NoOp,
}

/// A decision made by one agent at `start`, finishing at `end_time`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub agent:    AgentId,
    pub kind:     ActionKind,
    pub start:    Tick,
    pub end_time: Tick,
}

impl Action {
    pub fn goto(agent: AgentId, from: NodeId, to: NodeId, start: Tick, end_time: Tick) -> Self {
        Self { agent, kind: ActionKind::Goto { from, to }, start, end_time }
    }

    pub fn terminate(agent: AgentId, at: Tick) -> Self {
        Self { agent, kind: ActionKind::Terminate, start: at, end_time: at }
    }

    pub fn block(agent: AgentId, edge: EdgeId, start: Tick) -> Self {
        Self { agent, kind: ActionKind::Block { edge }, start, end_time: start + 1 }
    }

    pub fn no_op(agent: AgentId, start: Tick) -> Self {
        Self { agent, kind: ActionKind::NoOp, start, end_time: start + 1 }
    }

    /// Terminate and NO-OP need no scheduled task.
    #[inline]
    pub fn is_immediate(&self) -> bool {
        matches!(self.kind, ActionKind::Terminate | ActionKind::NoOp)
    }

    #[inline]
    pub fn is_terminate(&self) -> bool {
        self.kind == ActionKind::Terminate
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] agent {}: ", self.start, self.agent)?;
        match self.kind {
            ActionKind::Goto { from, to } => write!(f, "GOTO {from}->{to} (end {})", self.end_time),
            ActionKind::Terminate         => f.write_str("TERMINATE"),
            ActionKind::Block { edge }    => write!(f, "BLOCK {edge} (end {})", self.end_time),
            ActionKind::NoOp              => f.write_str("NO-OP"),
        }
    }
}
