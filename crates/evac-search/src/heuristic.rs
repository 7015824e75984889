//! The unsavable-people estimate.
//!
//! A node still requiring evacuation is doomed when the agent cannot reach
//! it by its deadline, or when no shelter can be reached in time after the
//! pickup.  Both checks run time-aware shortest paths, so roads with a
//! forecast block are avoided from the forecast tick on.  Everything is
//! recomputed from scratch on every call.

use evac_agent::{Agent, AgentSnapshot, State, apply};
use evac_core::{NodeId, Tick};
use evac_graph::{Graph, shortest_paths_departing};

/// Apply `state` to the world and count the people who can no longer be
/// saved.  Leaves the world in `state`.
pub fn estimate(graph: &mut Graph, agent: &mut Agent, state: &State) -> u64 {
    apply(graph, agent, state);
    unsavable(graph, &state.agent)
}

/// Count unsavable people in the world as it stands, for an agent in
/// `snap`.
///
/// A terminated agent saves nobody else: every waiting person counts.
/// People on board of a live agent count when no shelter is reachable in
/// time from where it stands.
pub fn unsavable(graph: &Graph, snap: &AgentSnapshot) -> u64 {
    if snap.terminated {
        return graph.victims_remaining();
    }
    let now = snap.time;
    let from_here = shortest_paths_departing(graph, snap.location, now);

    let mut lost = 0u64;
    if snap.carrying > 0 && !shelter_in_time(graph, snap.location, now) {
        lost += snap.carrying as u64;
    }

    for v in graph.nodes_requiring_evacuation() {
        let node = graph.node(v);
        let doomed = match from_here.arrival(v) {
            None                                  => true,
            Some(pickup) if pickup > node.deadline => true,
            Some(pickup)                          => !shelter_in_time(graph, v, pickup),
        };
        if doomed {
            tracing::trace!(node = %node.label, victims = node.victims, "doomed");
            lost += node.victims as u64;
        }
    }
    lost
}

/// Whether some shelter can be reached from `from`, leaving at `at`,
/// no later than the shelter's deadline.
fn shelter_in_time(graph: &Graph, from: NodeId, at: Tick) -> bool {
    let sp = shortest_paths_departing(graph, from, at);
    graph
        .shelters()
        .any(|s| sp.arrival(s).is_some_and(|t| t <= graph.node(s).deadline))
}
