//! Scenario generation (a collaborator, spec §1/§6): supplies agent
//! start/goal cells for a grid, either sampled at random or loaded from a
//! scenario file. The core itself never generates agents — it only
//! consumes them.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::info;

use crate::agent::Agent;
use crate::grid::Grid;

/// Loads agents from a scenario file: a JSON array of `{"id", "start",
/// "goal"}` objects, as written by `cbs-mapf --format json` or hand-built
/// by a caller. Does not validate against a grid — callers run
/// `validate_agents` themselves, same as for randomly generated agents.
pub fn load_agents(path: &Path) -> Result<Vec<Agent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    let agents: Vec<Agent> = serde_json::from_str(&text)
        .with_context(|| format!("parsing scenario file {}", path.display()))?;
    if agents.is_empty() {
        return Err(anyhow!("scenario file {} lists no agents", path.display()));
    }
    info!(num_agents = agents.len(), path = %path.display(), "loaded scenario");
    Ok(agents)
}

/// Samples `num_agents` agents on `grid`: starts and goals are each drawn
/// as distinct free cells (no two agents share a start cell; no two
/// agents share a goal cell), seeded for reproducibility. A single
/// agent's own start and goal may coincide.
pub fn generate_random_agents(grid: &Grid, num_agents: usize, seed: u64) -> Result<Vec<Agent>> {
    let mut rng = StdRng::seed_from_u64(seed);

    let free_cells: Vec<(usize, usize)> = (0..grid.height())
        .flat_map(|r| (0..grid.width()).map(move |c| (r, c)))
        .filter(|&cell| grid.is_free(cell))
        .collect();

    if free_cells.len() < num_agents {
        return Err(anyhow!(
            "grid has only {} free cells, cannot place {num_agents} agents",
            free_cells.len()
        ));
    }

    let mut starts = free_cells.clone();
    starts.shuffle(&mut rng);
    let mut goals = free_cells;
    goals.shuffle(&mut rng);

    let agents: Vec<Agent> = (0..num_agents)
        .map(|id| Agent::new(id, starts[id], goals[id]))
        .collect();

    info!(num_agents, seed, "generated random scenario");
    Ok(agents)
}
