//! Road network representation and builder.
//!
//! # Data layout
//!
//! Nodes and edges live in `Vec`s indexed by `NodeId` / `EdgeId`.  Each node
//! keeps an adjacency list of `(neighbour, EdgeId)` pairs sorted by
//! neighbour id, so iteration order is deterministic and Dijkstra's inner
//! loop is a contiguous scan.  An `FxHashMap` keyed by the canonical
//! `(min, max)` node pair gives O(1) edge lookup in either direction.
//!
//! Roads are undirected: `(u, v)` and `(v, u)` resolve to the same `EdgeId`.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use evac_core::{AgentId, EdgeId, NodeId, Tick};

use crate::{GraphError, GraphResult};

/// Order a node pair so `(u, v)` and `(v, u)` produce the same key.
#[inline]
fn canonical(u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if u <= v { (u, v) } else { (v, u) }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A vertex: either a place with people awaiting pickup or a shelter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Identity label from the scenario file (e.g. `"V3"`).
    pub label: String,

    /// Latest tick at which an agent may arrive here.
    pub deadline: Tick,

    /// People currently waiting at this node.  Always 0 for shelters.
    pub victims: u32,

    /// People waiting here when the scenario was loaded.
    pub initial_victims: u32,

    /// Set once an agent has picked up everyone here.
    pub evacuated: bool,

    /// Shelters accept drop-offs and never require evacuation.
    pub shelter: bool,

    /// Agents currently located at this node (live occupancy).
    pub agents: BTreeSet<AgentId>,
}

impl Node {
    /// `true` for a non-shelter node nobody has evacuated yet.
    ///
    /// Nodes with zero people still count: an agent arriving there marks
    /// them evacuated just the same.
    #[inline]
    pub fn requires_evacuation(&self) -> bool {
        !self.shelter && !self.evacuated
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// An undirected road.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Scenario label (e.g. `"E2"`); empty for generated roads.
    pub name: String,

    /// Endpoints, canonicalised so `ends.0 <= ends.1`.
    pub ends: (NodeId, NodeId),

    /// Transit time in ticks.
    pub weight: u64,

    /// Tick at which the road was blocked, or `None` while open.
    pub blocked_at: Option<Tick>,

    /// Predicted blocking tick.  `Tick::NEVER` when no block is expected.
    pub forecast: Tick,
}

impl Edge {
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocked_at.is_some()
    }

    /// The earlier of the actual and the forecast blocking tick.
    #[inline]
    pub fn deadline(&self) -> Tick {
        match self.blocked_at {
            Some(at) => at.min(self.forecast),
            None     => self.forecast,
        }
    }

    /// Whether the road can be entered at `tick`.
    #[inline]
    pub fn open_at(&self, tick: Tick) -> bool {
        self.blocked_at.is_none() && tick < self.forecast
    }

    /// The endpoint opposite `node`.
    #[inline]
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.ends.0 == node { self.ends.1 } else { self.ends.0 }
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Undirected road graph with blockable edges.
///
/// Node and edge data are `pub` for direct indexed access; the adjacency
/// structure is private so the symmetry invariant can't be broken.  Build
/// with [`GraphBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    /// Indexed by `NodeId`.
    pub nodes: Vec<Node>,

    /// Indexed by `EdgeId`.
    pub edges: Vec<Edge>,

    /// `adjacency[u]` = `(v, edge)` for every road touching `u`, sorted by `v`.
    adjacency: Vec<Vec<(NodeId, EdgeId)>>,

    /// Canonical node pair → edge.
    edge_index: FxHashMap<(NodeId, NodeId), EdgeId>,
}

impl Graph {
    /// A graph with no nodes or edges.
    pub fn empty() -> Self {
        GraphBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over every `NodeId` in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// The road joining `u` and `v`, in either order.
    #[inline]
    pub fn edge_between(&self, u: NodeId, v: NodeId) -> Option<EdgeId> {
        self.edge_index.get(&canonical(u, v)).copied()
    }

    /// Like [`edge_between`](Self::edge_between) but a missing road is an
    /// invariant violation.
    pub fn require_edge(&self, u: NodeId, v: NodeId) -> GraphResult<EdgeId> {
        if !self.contains(u) {
            return Err(GraphError::UnknownNode(u));
        }
        if !self.contains(v) {
            return Err(GraphError::UnknownNode(v));
        }
        self.edge_between(u, v).ok_or_else(|| {
            GraphError::InvariantViolation(format!("({u},{v}) does not exist"))
        })
    }

    /// Find a node by its scenario label.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.label == label)
            .map(|i| NodeId(i as u32))
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Every road touching `u`, blocked or not, ordered by neighbour id.
    #[inline]
    pub fn incident(&self, u: NodeId) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        self.adjacency[u.index()].iter().copied()
    }

    /// Neighbours of `u` over roads that are not blocked.
    #[inline]
    pub fn neighbours(&self, u: NodeId) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        self.incident(u)
            .filter(move |&(_, e)| !self.edges[e.index()].is_blocked())
    }

    /// Number of roads touching `u`, blocked or not.
    pub fn degree(&self, u: NodeId) -> usize {
        self.adjacency[u.index()].len()
    }

    // ── Queries over node state ───────────────────────────────────────────

    pub fn shelters(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&n| self.node(n).shelter)
    }

    /// Non-shelter nodes not yet evacuated, in ascending id order.
    pub fn nodes_requiring_evacuation(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&n| self.node(n).requires_evacuation())
    }

    /// `(edge, blocked_at)` for every blocked road, in ascending id order.
    pub fn blocked_edges(&self) -> impl Iterator<Item = (EdgeId, Tick)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.blocked_at.map(|at| (EdgeId(i as u32), at)))
    }

    /// People still waiting across all nodes.
    pub fn victims_remaining(&self) -> u64 {
        self.nodes.iter().map(|n| n.victims as u64).sum()
    }

    /// The latest node deadline: after this tick nothing can be saved.
    pub fn horizon(&self) -> Tick {
        self.nodes
            .iter()
            .map(|n| n.deadline)
            .max()
            .unwrap_or(Tick::ZERO)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Block the road `(u, v)` as of `at`.  Takes effect for every later
    /// shortest-path query.
    pub fn block(&mut self, u: NodeId, v: NodeId, at: Tick) -> GraphResult<EdgeId> {
        let edge = self.require_edge(u, v)?;
        self.block_edge(edge, at);
        Ok(edge)
    }

    /// Block by id.  Re-blocking keeps the earliest tick.
    pub fn block_edge(&mut self, edge: EdgeId, at: Tick) {
        let e = &mut self.edges[edge.index()];
        e.blocked_at = Some(e.blocked_at.map_or(at, |prev| prev.min(at)));
    }

    /// Set or clear an edge's blocked flag directly (used by state restore).
    pub fn set_blocked(&mut self, edge: EdgeId, blocked_at: Option<Tick>) {
        self.edges[edge.index()].blocked_at = blocked_at;
    }

    /// Record a predicted blocking tick for `(u, v)` without blocking it.
    pub fn forecast_block(&mut self, u: NodeId, v: NodeId, at: Tick) -> GraphResult<EdgeId> {
        let edge = self.require_edge(u, v)?;
        let e = &mut self.edges[edge.index()];
        e.forecast = e.forecast.min(at);
        Ok(edge)
    }

    /// Move `agent`'s occupancy entry from `from` to `to`.  Either end may be
    /// `NodeId::INVALID` (placement / removal).
    pub fn relocate(&mut self, agent: AgentId, from: NodeId, to: NodeId) {
        if from == to {
            return;
        }
        if self.contains(from) {
            self.nodes[from.index()].agents.remove(&agent);
        }
        if self.contains(to) {
            self.nodes[to.index()].agents.insert(agent);
        }
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Edge insertion validates immediately: unknown endpoints, self-loops and
/// duplicate roads are rejected with [`GraphError::InvariantViolation`].
///
/// # Example
///
/// ```
/// use evac_core::Tick;
/// use evac_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let town    = b.add_node("V1", Tick(5), 3);
/// let shelter = b.add_shelter("V2", Tick(10));
/// b.add_edge(town, shelter, 2).unwrap();
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 1); // one undirected road
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    nodes:      Vec<Node>,
    edges:      Vec<Edge>,
    edge_index: FxHashMap<(NodeId, NodeId), EdgeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with `victims` people awaiting pickup.  Ids are sequential
    /// from 0.
    pub fn add_node(&mut self, label: impl Into<String>, deadline: Tick, victims: u32) -> NodeId {
        self.push_node(label.into(), deadline, victims, false)
    }

    /// Add a shelter node.
    pub fn add_shelter(&mut self, label: impl Into<String>, deadline: Tick) -> NodeId {
        self.push_node(label.into(), deadline, 0, true)
    }

    fn push_node(&mut self, label: String, deadline: Tick, victims: u32, shelter: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            label,
            deadline,
            victims,
            initial_victims: victims,
            evacuated: false,
            shelter,
            agents: BTreeSet::new(),
        });
        id
    }

    /// Add an undirected road of transit time `weight`.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: u64) -> GraphResult<EdgeId> {
        self.add_named_edge("", u, v, weight)
    }

    /// Add an undirected road carrying a scenario label.
    pub fn add_named_edge(
        &mut self,
        name:   impl Into<String>,
        u:      NodeId,
        v:      NodeId,
        weight: u64,
    ) -> GraphResult<EdgeId> {
        for n in [u, v] {
            if n.index() >= self.nodes.len() {
                return Err(GraphError::InvariantViolation(format!("{n} is not in V")));
            }
        }
        if u == v {
            return Err(GraphError::InvariantViolation(format!("self-loop at {u}")));
        }
        let key = canonical(u, v);
        if self.edge_index.contains_key(&key) {
            return Err(GraphError::InvariantViolation(format!("({u},{v}) already exists in E")));
        }
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            name: name.into(),
            ends: key,
            weight,
            blocked_at: None,
            forecast: Tick::NEVER,
        });
        self.edge_index.insert(key, id);
        Ok(id)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Look up a node added earlier by label (used by the scenario loader to
    /// resolve edge endpoints).
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.label == label)
            .map(|i| NodeId(i as u32))
    }

    /// Consume the builder and produce a [`Graph`].
    pub fn build(self) -> Graph {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for (i, e) in self.edges.iter().enumerate() {
            let id = EdgeId(i as u32);
            adjacency[e.ends.0.index()].push((e.ends.1, id));
            adjacency[e.ends.1.index()].push((e.ends.0, id));
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }

        Graph {
            nodes: self.nodes,
            edges: self.edges,
            adjacency,
            edge_index: self.edge_index,
        }
    }
}
