//! The `Sim` struct and its tick loop.

use evac_agent::{Action, ActionKind, Agent, is_reachable, local_terminate, try_evacuate};
use evac_core::{AgentId, EvacConfig, NodeId, Tick};
use evac_graph::Graph;
use evac_schedule::TaskQueue;

use crate::{Behavior, SimObserver, SimResult, Task};

/// The live world.
///
/// `agents[i]` and `behaviors[i]` belong to `AgentId(i)`.  They are kept in
/// separate vectors so a behaviour can borrow its own agent and the graph
/// mutably at the same time.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: EvacConfig,

    /// World clock.
    pub clock: Tick,

    /// Latest node deadline.  Agents still active once the clock passes it
    /// are terminated.
    pub horizon: Tick,

    pub graph: Graph,

    pub agents: Vec<Agent>,

    pub behaviors: Vec<Behavior>,

    /// Arrivals and road blocks waiting for their tick.
    pub tasks: TaskQueue<Task>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every agent has terminated.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while !self.all_terminated() {
            self.step(observer)?;
        }
        tracing::info!(
            tick = %self.clock,
            saved = self.total_saved(),
            left_behind = self.graph.victims_remaining(),
            "simulation finished"
        );
        observer.on_sim_end(self.clock, &self.agents);
        Ok(())
    }

    /// Run exactly `n` ticks (or fewer, if everyone terminates first).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.all_terminated() {
                break;
            }
            self.step(observer)?;
        }
        Ok(())
    }

    /// One full tick: agents act, the clock advances, due tasks fire.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock;
        observer.on_tick_start(now);
        let acted = self.act(now, observer)?;
        observer.on_tick_end(now, acted);

        self.clock += 1;
        self.fire_due_tasks(observer);
        if self.clock > self.horizon {
            self.terminate_stragglers(observer);
        }
        Ok(())
    }

    pub fn all_terminated(&self) -> bool {
        self.agents.iter().all(|a| a.terminated)
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub fn behavior(&self, id: AgentId) -> &Behavior {
        &self.behaviors[id.index()]
    }

    /// Score of one agent (see [`Behavior::score`]).
    pub fn score(&self, id: AgentId) -> i64 {
        self.behaviors[id.index()].score(&self.agents[id.index()])
    }

    /// People delivered to shelters by all agents.
    pub fn total_saved(&self) -> u64 {
        self.agents.iter().map(|a| a.saved as u64).sum()
    }

    // ── Acting ────────────────────────────────────────────────────────────

    fn act<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        let mut acted = 0;
        for i in 0..self.agents.len() {
            if !self.agents[i].is_available(now) {
                continue;
            }
            acted += 1;
            let proposals =
                self.behaviors[i].propose(&mut self.graph, &mut self.agents[i], &self.config)?;
            for action in proposals {
                if self.agents[i].terminated {
                    break;
                }
                let done = self.perform(i, action);
                observer.on_action(now, &self.agents[i], &done);
            }
        }
        Ok(acted)
    }

    /// Carry out `action` for agent `i` in the live world.  Returns the
    /// action as actually executed (a goto that can't be made becomes a
    /// termination).
    fn perform(&mut self, i: usize, action: Action) -> Action {
        let agent = &mut self.agents[i];
        let start = agent.time;
        match action.kind {
            ActionKind::Goto { to, .. } => {
                let edge = self.graph.edge_between(agent.location, to);
                match edge {
                    Some(e) if is_reachable(&self.graph, agent, to) => {
                        let from = agent.location;
                        agent.time += self.graph.edge(e).weight;
                        self.tasks.push(agent.time, Task::Arrive { agent: agent.id, to });
                        tracing::debug!(agent = %agent.id, %from, %to, end = %agent.time, "goto");
                        Action::goto(agent.id, from, to, start, agent.time)
                    }
                    _ => {
                        tracing::info!(agent = %agent.id, %to, "cannot reach in time");
                        self.terminate(i)
                    }
                }
            }
            ActionKind::Terminate => self.terminate(i),
            ActionKind::Block { edge } => {
                agent.time += 1;
                self.tasks.push(agent.time, Task::Block { agent: agent.id, edge });
                Action::block(agent.id, edge, start)
            }
            ActionKind::NoOp => {
                agent.time += 1;
                Action::no_op(agent.id, start)
            }
        }
    }

    fn terminate(&mut self, i: usize) -> Action {
        let agent = &mut self.agents[i];
        local_terminate(agent, self.config.base_penalty);
        let score = self.behaviors[i].score(agent);
        tracing::info!(agent = %agent.id, name = %agent.name, score, "terminated");
        Action::terminate(agent.id, agent.time)
    }

    // ── Tasks ─────────────────────────────────────────────────────────────

    fn fire_due_tasks<O: SimObserver>(&mut self, observer: &mut O) {
        for task in self.tasks.drain_through(self.clock) {
            tracing::debug!(tick = %self.clock, %task, "task");
            match task {
                Task::Arrive { agent, to } => self.arrive(agent.index(), to, observer),
                Task::Block { agent, edge } => {
                    self.graph.block_edge(edge, self.clock);
                    if let Behavior::Vandal(memory) = &mut self.behaviors[agent.index()] {
                        memory.blocked += 1;
                    }
                }
            }
            observer.on_task(self.clock, &task);
        }
    }

    fn arrive<O: SimObserver>(&mut self, i: usize, to: NodeId, observer: &mut O) {
        let agent = &self.agents[i];
        if agent.terminated {
            return;
        }
        let blocked = self
            .graph
            .edge_between(agent.location, to)
            .is_none_or(|e| self.graph.edge(e).is_blocked());
        if blocked {
            tracing::info!(agent = %agent.id, %to, "road blocked under the agent");
            let done = self.terminate(i);
            observer.on_action(self.clock, &self.agents[i], &done);
            return;
        }

        let agent = &mut self.agents[i];
        self.graph.relocate(agent.id, agent.location, to);
        agent.location = to;
        if !self.behaviors[i].is_vandal() {
            try_evacuate(&mut self.graph, agent);
        }
    }

    fn terminate_stragglers<O: SimObserver>(&mut self, observer: &mut O) {
        for i in 0..self.agents.len() {
            if self.agents[i].terminated {
                continue;
            }
            tracing::info!(agent = %self.agents[i].id, horizon = %self.horizon, "past the horizon");
            let done = self.terminate(i);
            observer.on_action(self.clock, &self.agents[i], &done);
        }
    }
}
