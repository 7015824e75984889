//! Seeded random scenario generator.
//!
//! Produces a connected graph: a random spanning tree (node `i` attaches to
//! a random earlier node) plus `extra_edges` random chords.  The first
//! `shelters` nodes are shelters; the rest hold a random number of people.
//! The same seed always yields the same graph.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use evac_core::{NodeId, Tick};

use crate::network::{Graph, GraphBuilder};

/// Shape of a generated scenario.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioParams {
    /// Total vertex count (at least 1).
    pub nodes: usize,
    /// How many of the vertices are shelters (clamped to `1..=nodes`).
    pub shelters: usize,
    /// Chords added on top of the spanning tree.  Duplicates are skipped.
    pub extra_edges: usize,
    /// Road weights are drawn from `1..=max_weight`.
    pub max_weight: u64,
    /// Node deadlines are drawn from `1..=max_deadline`.
    pub max_deadline: u64,
    /// People per non-shelter node are drawn from `0..=max_victims`.
    pub max_victims: u32,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            nodes:        6,
            shelters:     1,
            extra_edges:  3,
            max_weight:   4,
            max_deadline: 20,
            max_victims:  5,
        }
    }
}

/// Generate a scenario from `seed`.
pub fn random_scenario(seed: u64, params: &ScenarioParams) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let n = params.nodes.max(1);
    let shelters = params.shelters.clamp(1, n);
    let max_weight = params.max_weight.max(1);
    let max_deadline = params.max_deadline.max(1);

    let mut b = GraphBuilder::new();
    for i in 0..n {
        let label = format!("V{}", i + 1);
        let deadline = Tick(rng.gen_range(1..=max_deadline));
        if i < shelters {
            b.add_shelter(label, deadline);
        } else {
            let people = rng.gen_range(0..=params.max_victims);
            b.add_node(label, deadline, people);
        }
    }

    for i in 1..n {
        let j = rng.gen_range(0..i);
        let w = rng.gen_range(1..=max_weight);
        let _ = b.add_edge(NodeId(i as u32), NodeId(j as u32), w);
    }

    if n > 1 {
        for _ in 0..params.extra_edges {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            let w = rng.gen_range(1..=max_weight);
            // Self-loops and duplicates are rejected by the builder; skip them.
            let _ = b.add_edge(NodeId(u as u32), NodeId(v as u32), w);
        }
    }

    b.build()
}
