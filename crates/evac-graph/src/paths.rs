//! Single-source shortest paths over unblocked roads.
//!
//! # Two flavours
//!
//! - [`shortest_paths_from`] ignores time: a road is usable iff it is not
//!   currently blocked.
//! - [`shortest_paths_departing`] also honours edge deadlines: a road leaving
//!   `u` is usable only if the traveller reaches `u` strictly before the
//!   road's effective deadline.  Deadlines only ever remove roads later in
//!   time, so arriving earlier is never worse and plain Dijkstra labels stay
//!   optimal.
//!
//! Both run Dijkstra with a binary heap keyed by `(distance, NodeId)`.
//! Relaxation pushes a fresh entry and stale ones are skipped on pop, which
//! stands in for decrease-key.  The `NodeId` secondary key makes tie-breaking
//! deterministic across runs.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use evac_core::{NodeId, Tick};

use crate::network::Graph;
use crate::{GraphError, GraphResult};

/// Distance value for nodes the search never reached.
pub const UNREACHABLE: u64 = u64::MAX;

/// Result of one single-source query: distances and predecessors for every
/// node in the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths {
    source: NodeId,
    depart: Tick,
    dist:   Vec<u64>,
    prev:   Vec<NodeId>,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Transit distance from the source, or `None` if unreachable.
    #[inline]
    pub fn distance(&self, target: NodeId) -> Option<u64> {
        match self.dist[target.index()] {
            UNREACHABLE => None,
            d           => Some(d),
        }
    }

    #[inline]
    pub fn is_reachable(&self, target: NodeId) -> bool {
        self.dist[target.index()] != UNREACHABLE
    }

    /// Earliest arrival tick at `target` for a departure at the query's
    /// departure tick.
    pub fn arrival(&self, target: NodeId) -> Option<Tick> {
        self.distance(target).map(|d| self.depart + d)
    }

    /// Predecessor of `target` on its shortest path, `None` for the source
    /// and for unreachable nodes.
    pub fn predecessor(&self, target: NodeId) -> Option<NodeId> {
        match self.prev[target.index()] {
            NodeId::INVALID => None,
            p               => Some(p),
        }
    }

    /// The source's immediate next hop toward `target`.
    ///
    /// Walks predecessors back from `target` until reaching the node whose
    /// predecessor is the source.  `target == source` yields the source
    /// itself.
    pub fn path_successor(&self, target: NodeId) -> GraphResult<NodeId> {
        if target == self.source {
            return Ok(self.source);
        }
        let mut v = target;
        // A shortest path has at most |V| - 1 hops.
        for _ in 0..self.prev.len() {
            match self.predecessor(v) {
                Some(p) if p == self.source => return Ok(v),
                Some(p)                     => v = p,
                None                        => break,
            }
        }
        Err(self.disconnected(target))
    }

    /// Full node sequence `source ..= target`.
    pub fn reconstruct_path(&self, target: NodeId) -> GraphResult<Vec<NodeId>> {
        let mut path = vec![target];
        let mut v = target;
        for _ in 0..self.prev.len() {
            if v == self.source {
                path.reverse();
                return Ok(path);
            }
            match self.predecessor(v) {
                Some(p) => {
                    path.push(p);
                    v = p;
                }
                None => break,
            }
        }
        Err(self.disconnected(target))
    }

    fn disconnected(&self, target: NodeId) -> GraphError {
        GraphError::Disconnected { from: self.source, to: target }
    }
}

/// Shortest paths from `source` over roads that are not blocked.
pub fn shortest_paths_from(graph: &Graph, source: NodeId) -> ShortestPaths {
    dijkstra(graph, source, Tick::ZERO, false)
}

/// Shortest paths from `source` for a traveller leaving at `depart`, skipping
/// roads whose deadline has passed by the time they would be entered.
pub fn shortest_paths_departing(graph: &Graph, source: NodeId, depart: Tick) -> ShortestPaths {
    dijkstra(graph, source, depart, true)
}

fn dijkstra(graph: &Graph, source: NodeId, depart: Tick, timed: bool) -> ShortestPaths {
    let n = graph.node_count();
    let mut dist = vec![UNREACHABLE; n];
    let mut prev = vec![NodeId::INVALID; n];

    if !graph.contains(source) {
        return ShortestPaths { source, depart, dist, prev };
    }
    dist[source.index()] = 0;

    // Reverse turns the max-heap into a min-heap.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        // Skip stale heap entries.
        if d > dist[u.index()] {
            continue;
        }
        let leave = depart + d;

        for (v, edge) in graph.neighbours(u) {
            let e = graph.edge(edge);
            if timed && !e.open_at(leave) {
                continue;
            }
            let candidate = d.saturating_add(e.weight);
            if candidate < dist[v.index()] {
                dist[v.index()] = candidate;
                prev[v.index()] = u;
                heap.push(Reverse((candidate, v)));
            }
        }
    }

    ShortestPaths { source, depart, dist, prev }
}
