//! World snapshots from one agent's point of view.
//!
//! A [`State`] holds just enough to rebuild the parts of the world a single
//! agent's plan can change: its own planning fields, which nodes still need
//! evacuating, and which roads are blocked.  [`capture`] and [`apply`] are
//! inverses: `capture` right after `apply(s)` returns `s` again.
//!
//! Victim counts aren't stored.  A node still requiring evacuation holds its
//! initial head count (pickup takes everyone at once), and an evacuated one
//! holds nobody.

use std::collections::{BTreeMap, BTreeSet};

use evac_core::{EdgeId, NodeId, Tick};
use evac_graph::Graph;

use crate::{Agent, AgentSnapshot};

/// A self-consistent snapshot used as a search-tree node payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub agent: AgentSnapshot,

    /// Non-shelter nodes not yet evacuated.
    pub requiring: BTreeSet<NodeId>,

    /// Blocked roads and the tick each block took effect.
    pub blocked: BTreeMap<EdgeId, Tick>,
}

impl State {
    /// A state is a goal once its agent has terminated.
    #[inline]
    pub fn is_goal(&self) -> bool {
        self.agent.terminated
    }

    /// People still waiting at the nodes this state lists as requiring
    /// evacuation.
    pub fn victims_waiting(&self, graph: &Graph) -> u64 {
        self.requiring
            .iter()
            .map(|&n| graph.node(n).initial_victims as u64)
            .sum()
    }
}

/// Copy the current world into a [`State`] for `agent`.
pub fn capture(graph: &Graph, agent: &Agent) -> State {
    State {
        agent:     agent.snapshot(),
        requiring: graph.nodes_requiring_evacuation().collect(),
        blocked:   graph.blocked_edges().collect(),
    }
}

/// Make the live `graph` and `agent` match `state`.
///
/// Rewrites every non-shelter node's evacuated flag and head count, every
/// road's blocked flag, and moves the agent's occupancy entry.  Forecast
/// block ticks are left alone: they aren't part of any state.
pub fn apply(graph: &mut Graph, agent: &mut Agent, state: &State) {
    graph.relocate(agent.id, agent.location, state.agent.location);
    agent.restore(&state.agent);

    for node in &mut graph.nodes {
        if node.shelter {
            continue;
        }
        node.evacuated = true;
        node.victims = 0;
    }
    for &n in &state.requiring {
        let node = graph.node_mut(n);
        node.evacuated = false;
        node.victims = node.initial_victims;
    }

    for i in 0..graph.edge_count() {
        let edge = EdgeId(i as u32);
        graph.set_blocked(edge, state.blocked.get(&edge).copied());
    }
}
