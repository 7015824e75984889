//! Integration tests for evac-sim.

use evac_agent::{Action, ActionKind, Agent};
use evac_core::{AgentId, EdgeId, EvacConfig, NodeId, Tick};
use evac_graph::{Graph, GraphBuilder};
use evac_search::SearchPolicy;

use crate::{Behavior, NoopObserver, SimBuilder, SimObserver, Task};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Line A – B – C, weights 1 and 1.
///
/// A: deadline 10, nobody waiting.  B: deadline 5, 3 people.
/// C: shelter, deadline 10.
fn line() -> Graph {
    line_weighted(1, 1)
}

fn line_weighted(ab: u64, bc: u64) -> Graph {
    let mut b = GraphBuilder::new();
    let a = b.add_node("A", Tick(10), 0);
    let bb = b.add_node("B", Tick(5), 3);
    let c = b.add_shelter("C", Tick(10));
    b.add_edge(a, bb, ab).unwrap();
    b.add_edge(bb, c, bc).unwrap();
    b.build()
}

/// Records every callback for later inspection.
#[derive(Default)]
struct Recorder {
    ticks:   Vec<Tick>,
    actions: Vec<(Tick, AgentId, ActionKind)>,
    tasks:   Vec<(Tick, Task)>,
    ended:   Option<Tick>,
}

impl Recorder {
    fn kinds_of(&self, agent: AgentId) -> Vec<ActionKind> {
        self.actions
            .iter()
            .filter(|(_, a, _)| *a == agent)
            .map(|&(_, _, k)| k)
            .collect()
    }
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.ticks.push(tick);
    }

    fn on_action(&mut self, tick: Tick, agent: &Agent, action: &Action) {
        self.actions.push((tick, agent.id, action.kind));
    }

    fn on_task(&mut self, tick: Tick, task: &Task) {
        self.tasks.push((tick, *task));
    }

    fn on_sim_end(&mut self, final_tick: Tick, _agents: &[Agent]) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn places_agents_in_order() {
        let sim = SimBuilder::new(EvacConfig::default(), line())
            .agent("g", NodeId(0), Behavior::greedy())
            .agent_at("v", "B", Behavior::vandal(1))
            .build()
            .unwrap();

        assert_eq!(sim.agents.len(), 2);
        assert_eq!(sim.agent(AgentId(0)).location, NodeId(0));
        assert_eq!(sim.agent(AgentId(1)).location, NodeId(1));
        assert!(sim.graph.node(NodeId(0)).agents.contains(&AgentId(0)));
        assert!(sim.graph.node(NodeId(1)).agents.contains(&AgentId(1)));
        assert_eq!(sim.horizon, Tick(10));
        assert_eq!(sim.clock, Tick::ZERO);
    }

    #[test]
    fn rescuer_picks_up_at_start() {
        let sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("g", "B", Behavior::greedy())
            .build()
            .unwrap();

        assert_eq!(sim.agent(AgentId(0)).carrying, 3);
        assert!(sim.graph.node(NodeId(1)).evacuated);
        assert_eq!(sim.graph.node(NodeId(1)).victims, 0);
        assert_eq!(sim.graph.victims_remaining(), 0);
    }

    #[test]
    fn vandal_leaves_start_untouched() {
        let sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("v", "B", Behavior::vandal(1))
            .build()
            .unwrap();

        assert_eq!(sim.agent(AgentId(0)).carrying, 0);
        assert!(!sim.graph.node(NodeId(1)).evacuated);
        assert_eq!(sim.graph.node(NodeId(1)).victims, 3);
    }

    #[test]
    fn unknown_label_errors() {
        let result = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("lost", "Z", Behavior::greedy())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn unknown_node_errors() {
        let result = SimBuilder::new(EvacConfig::default(), line())
            .agent("lost", NodeId(42), Behavior::greedy())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn invalid_config_errors() {
        let config = EvacConfig { realtime_limit: 0, ..EvacConfig::default() };
        let result = SimBuilder::new(config, line()).build();
        assert!(result.is_err());
    }

    #[test]
    fn no_agents_finishes_at_once() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.clock, Tick::ZERO);
        assert_eq!(rec.ended, Some(Tick::ZERO));
        assert!(rec.ticks.is_empty());
    }
}

// ── Greedy ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod greedy_tests {
    use super::*;

    #[test]
    fn rescues_everyone_on_the_line() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("g", "A", Behavior::greedy())
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let agent = sim.agent(AgentId(0));
        assert!(agent.terminated);
        assert_eq!(agent.saved, 3);
        assert_eq!(agent.carrying, 0);
        assert_eq!(agent.penalty, 2);
        assert_eq!(sim.score(AgentId(0)), 1);
        assert_eq!(sim.graph.victims_remaining(), 0);
        assert_eq!(sim.total_saved(), 3);
    }

    #[test]
    fn first_move_heads_for_the_people() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("g", "A", Behavior::greedy())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.step(&mut rec).unwrap();

        assert_eq!(
            rec.kinds_of(AgentId(0)),
            vec![ActionKind::Goto { from: NodeId(0), to: NodeId(1) }]
        );
        assert_eq!(sim.agent(AgentId(0)).time, Tick(1));
        // Arrival fired as the clock reached tick 1.
        assert_eq!(sim.agent(AgentId(0)).location, NodeId(1));
        assert_eq!(sim.agent(AgentId(0)).carrying, 3);
    }

    #[test]
    fn nothing_to_do_terminates() {
        let mut b = GraphBuilder::new();
        let a = b.add_shelter("A", Tick(4));
        let c = b.add_shelter("C", Tick(4));
        b.add_edge(a, c, 1).unwrap();

        let mut sim = SimBuilder::new(EvacConfig::default(), b.build())
            .agent("g", a, Behavior::greedy())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.kinds_of(AgentId(0)), vec![ActionKind::Terminate]);
        assert_eq!(sim.score(AgentId(0)), -2);
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;

    #[test]
    fn a_star_rescues_the_line() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("A*", "A", Behavior::planner(SearchPolicy::Unbounded))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(
            rec.kinds_of(AgentId(0)),
            vec![
                ActionKind::Goto { from: NodeId(0), to: NodeId(1) },
                ActionKind::Goto { from: NodeId(1), to: NodeId(2) },
                ActionKind::Terminate,
            ]
        );
        assert_eq!(sim.agent(AgentId(0)).saved, 3);
        assert_eq!(sim.graph.victims_remaining(), 0);
        assert_eq!(sim.score(AgentId(0)), 1);

        let Behavior::Planner(p) = sim.behavior(AgentId(0)) else {
            panic!("expected a planner");
        };
        assert_eq!(p.searches, 1);
        assert!(p.queue.is_empty());
    }

    #[test]
    fn greedy_search_commits_to_one_step() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("gs", "A", Behavior::planner(SearchPolicy::GreedyOneStep))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.step(&mut rec).unwrap();

        assert_eq!(
            rec.kinds_of(AgentId(0)),
            vec![ActionKind::Goto { from: NodeId(0), to: NodeId(1) }]
        );
        let Behavior::Planner(p) = sim.behavior(AgentId(0)) else {
            panic!("expected a planner");
        };
        assert_eq!(p.expansions, 1);
    }

    #[test]
    fn real_time_replans_every_turn() {
        let config = EvacConfig::default();
        let policy = SearchPolicy::real_time(&config);
        let mut sim = SimBuilder::new(config, line())
            .agent_at("rta", "A", Behavior::planner(policy))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert!(sim.all_terminated());
        let Behavior::Planner(p) = sim.behavior(AgentId(0)) else {
            panic!("expected a planner");
        };
        assert!(p.queue.is_empty());
        assert!(p.searches >= 2);
        assert!(p.expansions <= p.searches as u64 * 10);
    }

    #[test]
    fn thinking_time_is_charged() {
        let config = EvacConfig { expansion_time_unit: 1, ..EvacConfig::default() };
        let mut sim = SimBuilder::new(config, line())
            .agent_at("gs", "A", Behavior::planner(SearchPolicy::GreedyOneStep))
            .build()
            .unwrap();

        struct FirstAction(Option<Action>);
        impl SimObserver for FirstAction {
            fn on_action(&mut self, _tick: Tick, _agent: &Agent, action: &Action) {
                self.0.get_or_insert(*action);
            }
        }
        let mut first = FirstAction(None);
        sim.step(&mut first).unwrap();

        let action = first.0.unwrap();
        assert_eq!(action.start, Tick(1));
        assert_eq!(action.end_time, Tick(2));
    }

    #[test]
    fn unbounded_thinks_for_free() {
        let config = EvacConfig { expansion_time_unit: 5, ..EvacConfig::default() };
        let mut sim = SimBuilder::new(config, line())
            .agent_at("A*", "A", Behavior::planner(SearchPolicy::Unbounded))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.agent(AgentId(0)).saved, 3);
    }
}

// ── Vandal ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vandal_tests {
    use super::*;

    #[test]
    fn waits_blocks_then_moves() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("v", "B", Behavior::vandal(1))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(
            rec.kinds_of(AgentId(0)),
            vec![
                ActionKind::NoOp,
                ActionKind::Block { edge: EdgeId(0) },
                ActionKind::Goto { from: NodeId(1), to: NodeId(2) },
                ActionKind::NoOp,
                ActionKind::Block { edge: EdgeId(1) },
                ActionKind::Terminate,
            ]
        );
        assert_eq!(sim.graph.edge(EdgeId(0)).blocked_at, Some(Tick(2)));
        assert_eq!(sim.graph.edge(EdgeId(1)).blocked_at, Some(Tick(5)));
        assert_eq!(sim.score(AgentId(0)), 2);
    }

    #[test]
    fn does_not_pick_up() {
        // A–D is the lighter road: blocked first, then the vandal drives to B.
        let mut b = GraphBuilder::new();
        let a = b.add_node("A", Tick(10), 0);
        let bb = b.add_node("B", Tick(5), 3);
        let d = b.add_node("D", Tick(10), 0);
        b.add_edge(a, bb, 2).unwrap();
        b.add_edge(a, d, 1).unwrap();

        let mut sim = SimBuilder::new(EvacConfig::default(), b.build())
            .agent("v", a, Behavior::vandal(0))
            .build()
            .unwrap();
        sim.run_ticks(3, &mut NoopObserver).unwrap();

        let v = sim.agent(AgentId(0));
        assert_eq!(v.location, bb);
        assert_eq!(v.carrying, 0);
        assert_eq!(sim.graph.node(bb).victims, 3);
        assert!(!sim.graph.node(bb).evacuated);
    }

    #[test]
    fn block_counts_when_it_lands() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("v", "B", Behavior::vandal(0))
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        // Tick 0: the block is proposed, then lands as the clock reaches 1.
        sim.step(&mut rec).unwrap();
        assert_eq!(rec.tasks, vec![(Tick(1), Task::Block { agent: AgentId(0), edge: EdgeId(0) })]);
        let Behavior::Vandal(m) = sim.behavior(AgentId(0)) else {
            panic!("expected a vandal");
        };
        assert_eq!(m.blocked, 1);
        assert!(sim.graph.edge(EdgeId(0)).is_blocked());
    }

    #[test]
    fn blocked_road_under_an_agent_terminates_it() {
        // A–B weight 2 is lighter than B–C, so the vandal blocks it while
        // the greedy agent is still on it.
        let mut sim = SimBuilder::new(EvacConfig::default(), line_weighted(2, 3))
            .agent_at("g", "A", Behavior::greedy())
            .agent_at("v", "B", Behavior::vandal(0))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(2, &mut rec).unwrap();

        let g = sim.agent(AgentId(0));
        assert!(g.terminated);
        assert_eq!(g.location, NodeId(0));
        assert_eq!(g.penalty, 2);
        assert_eq!(
            rec.kinds_of(AgentId(0)),
            vec![ActionKind::Goto { from: NodeId(0), to: NodeId(1) }, ActionKind::Terminate]
        );
    }
}

// ── Forecast ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod forecast_tests {
    use super::*;
    use crate::forecast_blockages;

    #[test]
    fn dry_run_reports_block_ticks() {
        let blocks = forecast_blockages(
            &EvacConfig::default(),
            &line(),
            &[("v".to_string(), NodeId(1), 1)],
        )
        .unwrap();
        assert_eq!(blocks, vec![(EdgeId(0), Tick(2)), (EdgeId(1), Tick(5))]);
    }

    #[test]
    fn planner_and_vandal_get_forecasts() {
        let sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("A*", "A", Behavior::planner(SearchPolicy::Unbounded))
            .agent_at("v", "B", Behavior::vandal(1))
            .build()
            .unwrap();

        assert_eq!(sim.graph.edge(EdgeId(0)).forecast, Tick(2));
        assert_eq!(sim.graph.edge(EdgeId(1)).forecast, Tick(5));
        // Nothing is actually blocked yet.
        assert!(sim.graph.blocked_edges().next().is_none());
        // The dry run leaves no trace of its own agents.
        assert_eq!(sim.graph.node(NodeId(2)).agents.len(), 0);
    }

    #[test]
    fn no_planner_no_forecast() {
        let sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("g", "A", Behavior::greedy())
            .agent_at("v", "B", Behavior::vandal(1))
            .build()
            .unwrap();
        assert_eq!(sim.graph.edge(EdgeId(0)).forecast, Tick::NEVER);
    }

    #[test]
    fn forecast_can_be_disabled() {
        let sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("A*", "A", Behavior::planner(SearchPolicy::Unbounded))
            .agent_at("v", "B", Behavior::vandal(1))
            .forecast(false)
            .build()
            .unwrap();
        assert_eq!(sim.graph.edge(EdgeId(0)).forecast, Tick::NEVER);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn stragglers_terminate_past_the_horizon() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("idle", "A", Behavior::vandal(100))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(sim.clock, Tick(11));
        assert!(sim.agent(AgentId(0)).terminated);
        assert_eq!(rec.ticks.len(), 11);
        assert_eq!(rec.kinds_of(AgentId(0)).last(), Some(&ActionKind::Terminate));
        assert_eq!(sim.score(AgentId(0)), 0);
    }

    #[test]
    fn run_ticks_stops_early() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("idle", "A", Behavior::vandal(100))
            .build()
            .unwrap();
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock, Tick(3));
        assert!(!sim.all_terminated());
    }

    #[test]
    fn arrivals_fire_in_registration_order() {
        let mut sim = SimBuilder::new(EvacConfig::default(), line())
            .agent_at("g1", "A", Behavior::greedy())
            .agent_at("g2", "A", Behavior::greedy())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.step(&mut rec).unwrap();

        assert_eq!(
            rec.tasks,
            vec![
                (Tick(1), Task::Arrive { agent: AgentId(0), to: NodeId(1) }),
                (Tick(1), Task::Arrive { agent: AgentId(1), to: NodeId(1) }),
            ]
        );
        // The first to arrive takes everyone.
        assert_eq!(sim.agent(AgentId(0)).carrying, 3);
        assert_eq!(sim.agent(AgentId(1)).carrying, 0);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;
    use evac_graph::{ScenarioParams, random_scenario};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn every_run_ends(seed in any::<u64>()) {
            let graph = random_scenario(seed, &ScenarioParams::default());
            let initial: u64 = graph
                .node_ids()
                .map(|v| graph.node(v).initial_victims as u64)
                .sum();
            let config = EvacConfig::default();
            let policy = SearchPolicy::real_time(&config);

            let mut sim = SimBuilder::new(config, graph)
                .agent("g", NodeId(0), Behavior::greedy())
                .agent("rta", NodeId(1), Behavior::planner(policy))
                .agent("v", NodeId(2), Behavior::vandal(1))
                .build()
                .unwrap();
            sim.run(&mut NoopObserver).unwrap();

            prop_assert!(sim.all_terminated());
            prop_assert!(sim.clock <= sim.horizon + 1);
            prop_assert!(sim.total_saved() <= initial);
        }
    }
}
