//! hurricane: small evacuation scenario run against every agent kind.
//!
//! A six-town coastal network with two shelters.  Each run places one
//! rescue agent and one vandal on the same map and prints the trace and
//! final scores, so the planners can be compared side by side.
//!
//! Pass a scenario file path as the first argument to run that instead.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use evac_agent::{Action, Agent};
use evac_core::{AgentId, EvacConfig, Tick};
use evac_graph::{Graph, load_scenario_file, load_scenario_str};
use evac_search::SearchPolicy;
use evac_sim::{Behavior, SimBuilder, SimObserver};

// ── Scenario ──────────────────────────────────────────────────────────────────

const SCENARIO: &str = "\
Coastal towns, hurricane landfall in ~12 hours.
#N 6
#V1 D12 S
#V2 D6 P4
#V3 D8 P2
#V4 D12 P0
#V5 D5 P3
#V6 D12 S
#E1 1 2 W2
#E2 2 3 W1
#E3 3 4 W2
#E4 4 5 W1
#E5 5 6 W2
#E6 2 4 W3
#E7 1 4 W4
";

const RESCUER_START: &str = "V4";
const VANDAL_START:  &str = "V3";

// ── Trace printer ─────────────────────────────────────────────────────────────

struct Trace;

impl SimObserver for Trace {
    fn on_action(&mut self, tick: Tick, agent: &Agent, action: &Action) {
        println!("  {tick:>4}  {:<8} {action}", agent.name);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load() -> Result<Graph> {
    match std::env::args().nth(1) {
        Some(path) => Ok(load_scenario_file(Path::new(&path))?),
        None       => Ok(load_scenario_str(SCENARIO)?),
    }
}

fn main() -> Result<()> {
    println!("=== hurricane: evacuation planning ===");

    let config = EvacConfig::default();
    let graph = load()?;
    println!(
        "Road network: {} nodes, {} edges, {} people waiting",
        graph.node_count(),
        graph.edge_count(),
        graph.victims_remaining()
    );
    println!();

    let rescuers = [
        ("greedy", Behavior::greedy()),
        ("gsearch", Behavior::planner(SearchPolicy::GreedyOneStep)),
        ("rta", Behavior::planner(SearchPolicy::real_time(&config))),
        ("a-star", Behavior::planner(SearchPolicy::Unbounded)),
    ];

    let mut rows = Vec::with_capacity(rescuers.len());
    for (name, behavior) in rescuers {
        println!("── {name} ──");
        let mut sim = SimBuilder::new(config.clone(), graph.clone())
            .agent_at(name, RESCUER_START, behavior)
            .agent_at("vandal", VANDAL_START, Behavior::vandal(config.vandal_no_ops))
            .build()?;

        let t0 = Instant::now();
        sim.run(&mut Trace)?;
        let elapsed = t0.elapsed();

        let expansions = match sim.behavior(AgentId(0)) {
            Behavior::Planner(p) => p.expansions,
            _                    => 0,
        };
        rows.push((
            name,
            sim.agent(AgentId(0)).saved,
            sim.score(AgentId(0)),
            sim.score(AgentId(1)),
            expansions,
            sim.clock,
            elapsed,
        ));
        println!();
    }

    println!(
        "{:<10} {:>6} {:>7} {:>8} {:>11} {:>6} {:>10}",
        "Rescuer", "Saved", "Score", "Blocked", "Expansions", "Ticks", "Wall"
    );
    println!("{}", "-".repeat(64));
    for (name, saved, score, blocked, expansions, ticks, elapsed) in rows {
        println!(
            "{:<10} {:>6} {:>7} {:>8} {:>11} {:>6} {:>8.3}ms",
            name,
            saved,
            score,
            blocked,
            expansions,
            ticks.0,
            elapsed.as_secs_f64() * 1e3,
        );
    }

    Ok(())
}
