//! The search driver.
//!
//! # Loop
//!
//! ```text
//! loop {
//!     pop the best plan            (empty frontier → Exhausted)
//!     goal?               → backtrack to it
//!     expansions < budget → expand it
//!     otherwise           → backtrack to it anyway (best so far)
//! }
//! ```
//!
//! Backtracking collects actions root → plan.  Whatever happens, the live
//! graph and agent are put back into the root state before `search`
//! returns.

use evac_agent::{
    Action, Agent, State, apply, capture, local_goto, local_terminate, possible_moves,
};
use evac_core::{EvacConfig, NodeId, PlanId};
use evac_graph::Graph;

use crate::heuristic::estimate;
use crate::{Frontier, Plan, PlanArena, SearchError, SearchResult};

/// One branch out of a plan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Goto(NodeId),
    Terminate,
}

/// What a search hands back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Number of plans expanded.
    pub expansions: u32,

    /// Actions from the root to the returned plan, in execution order.
    pub actions: Vec<Action>,

    /// Cost of the returned plan.
    pub cost: u64,

    /// Depth of the returned plan (equals `actions.len()`).
    pub depth: u32,

    /// `true` if the returned plan ends with the agent terminated.
    pub reached_goal: bool,

    /// Cheapest goal cost among all plans created, reached or not.
    pub incumbent: Option<u64>,

    /// Largest frontier size seen.
    pub frontier_high_water: usize,
}

/// A best-first search over one agent's hypothetical futures.
///
/// Holds the live graph and agent for its whole lifetime.  The root state
/// is captured on construction.
pub struct SearchTree<'a> {
    graph:      &'a mut Graph,
    agent:      &'a mut Agent,
    config:     &'a EvacConfig,
    arena:      PlanArena,
    frontier:   Frontier,
    root:       PlanId,
    expansions: u32,
    incumbent:  Option<u64>,
}

impl<'a> SearchTree<'a> {
    pub fn new(graph: &'a mut Graph, agent: &'a mut Agent, config: &'a EvacConfig) -> Self {
        let initial = capture(graph, agent);
        let mut arena = PlanArena::new();
        let root = arena.insert(0, initial, None, None);
        let mut frontier = Frontier::new();
        frontier.push(arena.get(root).key());
        Self {
            graph,
            agent,
            config,
            arena,
            frontier,
            root,
            expansions: 0,
            incumbent: None,
        }
    }

    /// The root plan: cost 0, no parent, no action.
    pub fn root_plan(&self) -> &Plan {
        self.arena.get(self.root)
    }

    pub fn plan(&self, id: PlanId) -> &Plan {
        self.arena.get(id)
    }

    /// Number of plans created so far, root included.
    pub fn plan_count(&self) -> usize {
        self.arena.len()
    }

    /// `penalty + estimate` for `state`.  Leaves the world in `state`.
    pub fn total_cost(&mut self, state: &State) -> u64 {
        let h = estimate(self.graph, self.agent, state);
        let cost = state.agent.penalty + h;
        tracing::trace!(g = state.agent.penalty, h, cost, "cost");
        cost
    }

    /// Generate the outcome of taking `mv` from `state`.  Leaves the world
    /// in the resulting state.
    pub fn successor(&mut self, state: &State, mv: Move) -> SearchResult<(Action, State)> {
        apply(self.graph, self.agent, state);
        let start = self.agent.time;
        let action = match mv {
            Move::Terminate => {
                local_terminate(self.agent, self.config.base_penalty);
                Action::terminate(self.agent.id, start)
            }
            Move::Goto(to) => {
                let from = self.agent.location;
                let end = local_goto(self.graph, self.agent, to)?;
                Action::goto(self.agent.id, from, to, start, end)
            }
        };
        Ok((action, capture(self.graph, self.agent)))
    }

    /// Add one child per possible move plus terminate.  Returns the number
    /// of children created.
    pub fn expand(&mut self, id: PlanId) -> SearchResult<usize> {
        let parent = self.arena.get(id).state.clone();
        apply(self.graph, self.agent, &parent);
        let mut moves: Vec<Move> = possible_moves(self.graph, self.agent)
            .into_iter()
            .map(Move::Goto)
            .collect();
        moves.push(Move::Terminate);

        let mut created = 0;
        for mv in moves {
            let (action, state) = self.successor(&parent, mv)?;
            let cost = self.total_cost(&state);
            if state.is_goal() {
                self.incumbent = Some(self.incumbent.map_or(cost, |c| c.min(cost)));
            }
            let child = self.arena.insert(cost, state, Some(action), Some(id));
            self.frontier.push(self.arena.get(child).key());
            created += 1;
        }
        self.expansions += 1;
        tracing::debug!(plan = %id, cost = self.arena.get(id).cost, children = created, "expanded");
        Ok(created)
    }

    /// Run the search for at most `max_expansions` expansions.
    ///
    /// The live world is restored to the root state on every exit path.
    pub fn search(&mut self, max_expansions: u32) -> SearchResult<SearchOutcome> {
        let result = self.run(max_expansions);
        self.restore();
        result
    }

    fn run(&mut self, max_expansions: u32) -> SearchResult<SearchOutcome> {
        loop {
            let key = self.frontier.pop().ok_or(SearchError::Exhausted)?;
            let plan = self.arena.get(key.id);
            if plan.is_goal() {
                tracing::debug!(plan = %key.id, cost = plan.cost, "goal reached");
                return Ok(self.backtrack(key.id));
            }
            if self.expansions < max_expansions {
                self.expand(key.id)?;
            } else {
                tracing::debug!(
                    plan = %key.id,
                    cost = plan.cost,
                    expansions = self.expansions,
                    "expansion budget spent, returning best so far"
                );
                return Ok(self.backtrack(key.id));
            }
        }
    }

    /// Actions root → `id`, and the root state put back.
    fn backtrack(&mut self, id: PlanId) -> SearchOutcome {
        let plan = self.arena.get(id);
        let outcome = SearchOutcome {
            expansions:          self.expansions,
            actions:             self.arena.actions_to(id),
            cost:                plan.cost,
            depth:               plan.depth,
            reached_goal:        plan.is_goal(),
            incumbent:           self.incumbent,
            frontier_high_water: self.frontier.high_water(),
        };
        self.restore();
        outcome
    }

    fn restore(&mut self) {
        let root = &self.arena.get(self.root).state;
        apply(self.graph, self.agent, root);
    }
}
