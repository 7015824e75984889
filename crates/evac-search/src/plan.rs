//! Search-tree nodes and their arena.

use evac_agent::{Action, State};
use evac_core::PlanId;

use crate::{FrontierKey, TieBreak};

/// One node of the search tree.  Immutable once inserted.
#[derive(Clone, Debug)]
pub struct Plan {
    pub id:     PlanId,
    pub cost:   u64,
    pub state:  State,
    /// The action that produced `state` from the parent's; `None` at the
    /// root.
    pub action: Option<Action>,
    pub parent: Option<PlanId>,
    pub depth:  u32,
}

impl Plan {
    pub fn key(&self) -> FrontierKey {
        FrontierKey {
            cost: self.cost,
            tie:  TieBreak::new(self.is_goal(), self.depth, self.state.agent.time),
            id:   self.id,
        }
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        self.state.is_goal()
    }
}

/// Append-only storage for every plan a search creates.  `PlanId`s are
/// indices, handed out in creation order.
#[derive(Default)]
pub struct PlanArena {
    plans: Vec<Plan>,
}

impl PlanArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new plan and return its id.  Depth is the parent's plus one.
    pub fn insert(
        &mut self,
        cost:   u64,
        state:  State,
        action: Option<Action>,
        parent: Option<PlanId>,
    ) -> PlanId {
        let id = PlanId(self.plans.len() as u32);
        let depth = parent.map_or(0, |p| self.get(p).depth + 1);
        self.plans.push(Plan { id, cost, state, action, parent, depth });
        id
    }

    #[inline]
    pub fn get(&self, id: PlanId) -> &Plan {
        &self.plans[id.index()]
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Actions from the root down to `id`.
    pub fn actions_to(&self, id: PlanId) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.get(id).depth as usize);
        let mut cur = self.get(id);
        while let (Some(action), Some(parent)) = (cur.action, cur.parent) {
            actions.push(action);
            cur = self.get(parent);
        }
        actions.reverse();
        actions
    }
}
