//! Fluent builder for constructing a [`Sim`].

use evac_agent::{Agent, try_evacuate};
use evac_core::{AgentId, EvacConfig, NodeId, Tick};
use evac_graph::{Graph, GraphError};
use evac_schedule::TaskQueue;

use crate::{Behavior, Sim, SimError, SimResult, forecast_blockages};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`EvacConfig`]: penalties, vandal no-ops, planner budgets
/// - [`Graph`]: the road network, e.g. from `evac_graph::load_scenario_str`
///
/// # Optional inputs
///
/// | Method              | Default                                      |
/// |---------------------|----------------------------------------------|
/// | `.agent(..)`        | no agents (the run ends immediately)         |
/// | `.agent_at(..)`     | as `.agent`, start node given by label       |
/// | `.forecast(bool)`   | `true`: dry-run vandals when planners exist  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(EvacConfig::default(), graph)
///     .agent_at("greedy", "V1", Behavior::greedy())
///     .agent_at("vandal", "V3", Behavior::vandal(1))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   EvacConfig,
    graph:    Graph,
    agents:   Vec<(String, NodeId, Behavior)>,
    labels:   Vec<(String, String, Behavior)>,
    forecast: bool,
}

impl SimBuilder {
    pub fn new(config: EvacConfig, graph: Graph) -> Self {
        Self {
            config,
            graph,
            agents:   Vec::new(),
            labels:   Vec::new(),
            forecast: true,
        }
    }

    /// Add an agent starting at `start`.  Agents get ids in insertion order
    /// (agents added with `agent_at` come after those added with `agent`).
    pub fn agent(mut self, name: impl Into<String>, start: NodeId, behavior: Behavior) -> Self {
        self.agents.push((name.into(), start, behavior));
        self
    }

    /// Add an agent starting at the node labelled `start`.
    pub fn agent_at(
        mut self,
        name:     impl Into<String>,
        start:    impl Into<String>,
        behavior: Behavior,
    ) -> Self {
        self.labels.push((name.into(), start.into(), behavior));
        self
    }

    /// Enable or disable the vandal-only forecast run.
    pub fn forecast(mut self, enabled: bool) -> Self {
        self.forecast = enabled;
        self
    }

    /// Validate inputs, place agents, run the forecast if needed, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let mut graph = self.graph;
        let mut specs = self.agents;
        for (name, label, behavior) in self.labels {
            let start = graph.find(&label).ok_or(GraphError::UnknownLabel(label))?;
            specs.push((name, start, behavior));
        }

        // ── Forecast before anyone is placed ──────────────────────────────
        let has_planner = specs.iter().any(|(_, _, b)| b.is_planner());
        let vandals: Vec<(String, NodeId, u32)> = specs
            .iter()
            .filter_map(|(name, start, b)| match b {
                Behavior::Vandal(m) => Some((name.clone(), *start, m.no_ops_left)),
                _                   => None,
            })
            .collect();
        if self.forecast && has_planner && !vandals.is_empty() {
            for (edge, at) in forecast_blockages(&self.config, &graph, &vandals)? {
                let (u, v) = graph.edge(edge).ends;
                graph.forecast_block(u, v, at)?;
            }
        }

        // ── Place agents ──────────────────────────────────────────────────
        let mut agents = Vec::with_capacity(specs.len());
        let mut behaviors = Vec::with_capacity(specs.len());
        for (i, (name, start, behavior)) in specs.into_iter().enumerate() {
            if !graph.contains(start) {
                return Err(GraphError::UnknownNode(start).into());
            }
            let id = AgentId::try_from(i)
                .map_err(|_| SimError::Config(format!("too many agents ({i})")))?;
            graph.relocate(id, NodeId::INVALID, start);
            tracing::debug!(agent = %id, %name, %behavior, at = %graph.node(start).label, "placed");
            let mut agent = Agent::new(id, name, start);
            // Vandals never carry anyone.
            if !behavior.is_vandal() {
                try_evacuate(&mut graph, &mut agent);
            }
            agents.push(agent);
            behaviors.push(behavior);
        }

        Ok(Sim {
            horizon: graph.horizon(),
            config: self.config,
            clock: Tick::ZERO,
            graph,
            agents,
            behaviors,
            tasks: TaskQueue::new(),
        })
    }
}
