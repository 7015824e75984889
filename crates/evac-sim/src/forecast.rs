//! Predicting when vandals will block each road.
//!
//! Vandals ignore everyone else: their choices depend only on the road
//! network, the roads already blocked, and their own clock.  Running them
//! alone on a copy of the world therefore yields the exact tick each road
//! will be blocked in the real run.  Planners store those ticks as edge
//! deadlines so their searches can route around blocks before they happen.

use evac_core::{EdgeId, EvacConfig, NodeId, Tick};
use evac_graph::Graph;

use crate::{Behavior, NoopObserver, SimBuilder, SimResult};

/// Run `vandals` (name, start, no-ops) alone on a copy of `graph` and return
/// every road they block with its block tick, in ascending edge order.
pub fn forecast_blockages(
    config:  &EvacConfig,
    graph:   &Graph,
    vandals: &[(String, NodeId, u32)],
) -> SimResult<Vec<(EdgeId, Tick)>> {
    let mut builder = SimBuilder::new(config.clone(), graph.clone()).forecast(false);
    for (name, start, no_ops) in vandals {
        builder = builder.agent(name.clone(), *start, Behavior::vandal(*no_ops));
    }
    let mut dry_run = builder.build()?;
    dry_run.run(&mut NoopObserver)?;

    let blocks: Vec<(EdgeId, Tick)> = dry_run.graph.blocked_edges().collect();
    tracing::debug!(vandals = vandals.len(), blocks = blocks.len(), "forecast ready");
    Ok(blocks)
}
