//! Single-agent moves applied straight to the graph.
//!
//! These are the "local" versions: transit time is charged and the arrival
//! effects (pickup, drop-off) happen at once.  The search driver explores
//! hypothetical futures with them; the live simulation calls
//! [`try_evacuate`] and [`is_reachable`] from its own scheduled tasks.

use evac_core::{NodeId, Tick};
use evac_graph::Graph;

use crate::{Agent, AgentError, AgentResult};

/// Whether `agent` can drive to neighbour `to` right now: the road exists,
/// is not blocked, and the trip ends by `to`'s deadline.
pub fn is_reachable(graph: &Graph, agent: &Agent, to: NodeId) -> bool {
    let Some(edge) = graph.edge_between(agent.location, to) else {
        return false;
    };
    let e = graph.edge(edge);
    !e.is_blocked() && agent.time + e.weight <= graph.node(to).deadline
}

/// Neighbours the agent could move to when planning, sorted by `NodeId`.
///
/// Stricter than [`is_reachable`]: a road with a forecast block at or before
/// the agent's clock is ruled out too.
pub fn possible_moves(graph: &Graph, agent: &Agent) -> Vec<NodeId> {
    graph
        .neighbours(agent.location)
        .filter(|&(v, edge)| graph.edge(edge).open_at(agent.time) && is_reachable(graph, agent, v))
        .map(|(v, _)| v)
        .collect()
}

/// Pick up everyone at the agent's node, or drop everyone off at a shelter.
///
/// Returns the number of people moved.  Does nothing for a terminated
/// agent.
pub fn try_evacuate(graph: &mut Graph, agent: &mut Agent) -> u32 {
    if agent.terminated {
        return 0;
    }
    let node = graph.node_mut(agent.location);
    if node.shelter {
        let dropped = agent.carrying;
        if dropped > 0 {
            tracing::trace!(agent = %agent.id, dropped, "drop-off");
        }
        agent.saved += dropped;
        agent.carrying = 0;
        dropped
    } else if !node.evacuated {
        let picked = node.victims;
        tracing::trace!(agent = %agent.id, picked, node = %node.label, "pickup");
        agent.carrying += picked;
        node.evacuated = true;
        node.victims = 0;
        picked
    } else {
        0
    }
}

/// Move `agent` along the road to `to`, charging the transit time, then
/// evacuate at the destination.  Returns the arrival tick.
pub fn local_goto(graph: &mut Graph, agent: &mut Agent, to: NodeId) -> AgentResult<Tick> {
    if agent.terminated {
        return Err(AgentError::Terminated(agent.id));
    }
    let from = agent.location;
    let edge = graph
        .edge_between(from, to)
        .ok_or(AgentError::NoRoad { from, to })?;
    agent.time += graph.edge(edge).weight;
    graph.relocate(agent.id, from, to);
    agent.location = to;
    try_evacuate(graph, agent);
    Ok(agent.time)
}

/// Terminate `agent`, losing everyone on board plus `base_penalty`.
pub fn local_terminate(agent: &mut Agent, base_penalty: u64) {
    agent.penalty = agent.carrying as u64 + base_penalty;
    agent.terminated = true;
}

#[inline]
pub fn accumulated_penalty(agent: &Agent) -> u64 {
    agent.penalty
}
