//! What each kind of agent decides to do on its turn.
//!
//! Dispatch is a closed enum: the set of agent kinds is fixed, and each
//! variant carries whatever memory it needs between turns.

use std::collections::VecDeque;
use std::fmt;

use evac_agent::{Action, ActionKind, Agent, is_reachable};
use evac_core::{EvacConfig, NodeId};
use evac_graph::{Graph, shortest_paths_from};
use evac_search::{SearchError, SearchPolicy, SearchTree};

use crate::SimResult;

// ── Vandal memory ─────────────────────────────────────────────────────────────

/// Between-turn state of a vandal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VandalMemory {
    /// NO-OPs still to take before the next block or move.
    pub no_ops_left: u32,
    /// Kind of the last action proposed, if any.
    pub last: Option<ActionKind>,
    /// Roads this vandal has blocked so far.
    pub blocked: u32,
}

impl VandalMemory {
    pub fn new(no_ops: u32) -> Self {
        Self { no_ops_left: no_ops, last: None, blocked: 0 }
    }

    fn last_was_block(&self) -> bool {
        matches!(self.last, Some(ActionKind::Block { .. }))
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// A searching agent: plans with a [`SearchTree`], then replays the plan.
#[derive(Clone, Debug)]
pub struct Planner {
    pub policy: SearchPolicy,
    /// Actions still to execute from the last plan.
    pub queue: VecDeque<Action>,
    /// Planning calls made so far.
    pub searches: u32,
    /// Expansions spent across all planning calls.
    pub expansions: u64,
}

impl Planner {
    pub fn new(policy: SearchPolicy) -> Self {
        Self { policy, queue: VecDeque::new(), searches: 0, expansions: 0 }
    }

    fn propose(
        &mut self,
        graph:  &mut Graph,
        agent:  &mut Agent,
        config: &EvacConfig,
    ) -> SimResult<Vec<Action>> {
        if self.queue.is_empty() {
            agent.time += self.policy.thinking_time(config);
            let budget = self.policy.max_expansions(config);
            let outcome = SearchTree::new(graph, agent, config).search(budget);
            self.searches += 1;
            match outcome {
                Ok(out) => {
                    tracing::debug!(
                        agent = %agent.id,
                        policy = %self.policy,
                        expansions = out.expansions,
                        cost = out.cost,
                        steps = out.actions.len(),
                        goal = out.reached_goal,
                        "plan ready"
                    );
                    self.expansions += out.expansions as u64;
                    self.queue.extend(out.actions);
                }
                // Unreachable from a live agent: every expansion pushes a
                    // terminate child, so the frontier cannot run dry.
                Err(SearchError::Exhausted) => {
                    tracing::info!(agent = %agent.id, "search exhausted, terminating");
                    return Ok(vec![Action::terminate(agent.id, agent.time)]);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let next = self.queue.pop_front();
        if !self.policy.keeps_plan() {
            self.queue.clear();
        }
        Ok(vec![next.unwrap_or_else(|| Action::terminate(agent.id, agent.time))])
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum Behavior {
    /// Heads for the nearest unevacuated node, or the nearest shelter when
    /// carrying anyone.
    Greedy,
    /// Waits, blocks the lightest road, then drives down the lightest road.
    Vandal(VandalMemory),
    /// Searches before acting.
    Planner(Planner),
}

impl Behavior {
    pub fn greedy() -> Self {
        Behavior::Greedy
    }

    pub fn vandal(no_ops: u32) -> Self {
        Behavior::Vandal(VandalMemory::new(no_ops))
    }

    pub fn planner(policy: SearchPolicy) -> Self {
        Behavior::Planner(Planner::new(policy))
    }

    #[inline]
    pub fn is_vandal(&self) -> bool {
        matches!(self, Behavior::Vandal(_))
    }

    #[inline]
    pub fn is_planner(&self) -> bool {
        matches!(self, Behavior::Planner(_))
    }

    /// Performance score: roads blocked for a vandal, saved minus penalty
    /// for everyone else.
    pub fn score(&self, agent: &Agent) -> i64 {
        match self {
            Behavior::Vandal(m) => m.blocked as i64,
            _                   => agent.score(),
        }
    }

    /// Decide this turn's actions.  The planner may also charge thinking
    /// time to `agent`.
    pub fn propose(
        &mut self,
        graph:  &mut Graph,
        agent:  &mut Agent,
        config: &EvacConfig,
    ) -> SimResult<Vec<Action>> {
        match self {
            Behavior::Greedy     => Ok(vec![greedy_step(graph, agent)?]),
            Behavior::Vandal(m)  => Ok(vec![vandal_step(m, graph, agent, config)]),
            Behavior::Planner(p) => p.propose(graph, agent, config),
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Greedy     => f.write_str("greedy"),
            Behavior::Vandal(_)  => f.write_str("vandal"),
            Behavior::Planner(p) => write!(f, "{}", p.policy),
        }
    }
}

// ── Greedy ────────────────────────────────────────────────────────────────────

fn greedy_step(graph: &Graph, agent: &Agent) -> SimResult<Action> {
    let here = agent.location;
    let sp = shortest_paths_from(graph, here);
    let carrying = agent.carrying > 0;

    let target = graph
        .node_ids()
        .filter(|&v| v != here)
        .filter(|&v| {
            let node = graph.node(v);
            if carrying { node.shelter } else { node.requires_evacuation() }
        })
        .filter_map(|v| sp.distance(v).map(|d| (d, graph.node(v).label.as_str(), v)))
        .min();

    let Some((_, _, target)) = target else {
        return Ok(Action::terminate(agent.id, agent.time));
    };
    let next = sp.path_successor(target)?;
    Ok(goto_action(graph, agent, next))
}

// ── Vandal ────────────────────────────────────────────────────────────────────

fn vandal_step(
    memory: &mut VandalMemory,
    graph:  &Graph,
    agent:  &Agent,
    config: &EvacConfig,
) -> Action {
    if memory.no_ops_left > 0 {
        memory.no_ops_left -= 1;
        memory.last = Some(ActionKind::NoOp);
        return Action::no_op(agent.id, agent.time);
    }

    let moving = memory.last_was_block();
    let lightest = graph
        .neighbours(agent.location)
        .filter(|&(v, _)| !moving || is_reachable(graph, agent, v))
        .map(|(v, e)| (graph.edge(e).weight, graph.node(v).label.as_str(), v, e))
        .min();

    let action = match lightest {
        None => Action::terminate(agent.id, agent.time),
        Some((_, _, v, _)) if moving => {
            memory.no_ops_left = config.vandal_no_ops;
            goto_action(graph, agent, v)
        }
        Some((_, _, _, e)) => Action::block(agent.id, e, agent.time),
    };
    memory.last = Some(action.kind);
    action
}

fn goto_action(graph: &Graph, agent: &Agent, to: NodeId) -> Action {
    let w = graph
        .edge_between(agent.location, to)
        .map_or(0, |e| graph.edge(e).weight);
    Action::goto(agent.id, agent.location, to, agent.time, agent.time + w)
}
