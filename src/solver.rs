//! The solver façade: a single `solve` entry point over `(Grid, Agents,
//! Config)`, owning the CBS frontier and its budgets (spec §4.6).

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::agent::{validate_agents, Agent};
use crate::conflict::{Conflict, ConflictDetector};
use crate::error::CoreError;
use crate::grid::Grid;
use crate::highlevel::CbsNode;
use crate::plan::JointPlan;
use crate::stats::Stats;

/// Recognized solver options (spec §6). All have the defaults the spec
/// names; `Config::default()` matches them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// `H_max` for the low-level search.
    pub max_time_steps: usize,
    /// CBS frontier expansion budget.
    pub max_high_level_nodes: usize,
    /// Prefer lower `h` at equal `f` in the low-level tiebreak.
    pub tiebreak_prefer_h: bool,
    /// If true, `SolveStatus::Ok`'s companion conflict report lists every
    /// conflict rather than just the one CBS split on.
    pub enumerate_all_conflicts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_time_steps: 300,
            max_high_level_nodes: 1000,
            tiebreak_prefer_h: true,
            enumerate_all_conflicts: false,
        }
    }
}

/// The outcome of a `solve` call (spec §6's `Status`, carrying its payload
/// inline rather than as a side channel).
#[derive(Debug, Clone)]
pub enum SolveStatus {
    /// A conflict-free joint plan, optimal in sum-of-costs.
    Ok {
        plan: JointPlan,
        /// Populated only when `Config::enumerate_all_conflicts` is set;
        /// always empty for an `Ok` result (included for symmetry with the
        /// `BudgetExceeded` report and to make the flag's effect visible
        /// to callers that inspect every `SolveStatus`).
        all_conflicts: Vec<Conflict>,
    },
    /// The root was infeasible, or the frontier emptied without finding a
    /// conflict-free node.
    NoSolution,
    /// `max_high_level_nodes` was exhausted. Carries the best (lowest
    /// sum-of-costs) conflict-free node seen so far, if any were found
    /// before the budget ran out.
    BudgetExceeded { best: Option<JointPlan> },
}

pub struct Solver;

impl Solver {
    /// Runs one solve query. Pure: does not mutate `grid` or `agents`, and
    /// keeps no state across calls (spec §5).
    #[instrument(skip(grid, agents, config), fields(num_agents = agents.len()))]
    pub fn solve(
        grid: &Grid,
        agents: &[Agent],
        config: &Config,
    ) -> Result<SolveStatus, CoreError> {
        validate_agents(agents, grid)?;

        let start_time = Instant::now();
        let mut stats = Stats::default();
        let mut next_node_id: u64 = 1;

        let Some(root) = CbsNode::root(grid, agents, config) else {
            info!("root infeasible: no per-agent plan exists under empty constraints");
            return Ok(SolveStatus::NoSolution);
        };

        let mut frontier = BTreeSet::new();
        frontier.insert(root);
        let mut best_conflict_free: Option<JointPlan> = None;
        let mut expansions = 0usize;

        while let Some(current) = frontier.pop_first() {
            let Some(conflict) = current.first_conflict.clone() else {
                stats.high_level_expansions = expansions;
                stats.sum_of_costs = current.sum_of_costs;
                stats.wall_time = start_time.elapsed();
                stats.report();

                let all_conflicts = if config.enumerate_all_conflicts {
                    ConflictDetector::new(&current.joint_plan).all_conflicts()
                } else {
                    Vec::new()
                };
                return Ok(SolveStatus::Ok {
                    plan: current.joint_plan,
                    all_conflicts,
                });
            };

            if expansions >= config.max_high_level_nodes {
                debug!(expansions, "CBS node budget exhausted");
                return Ok(SolveStatus::BudgetExceeded {
                    best: best_conflict_free,
                });
            }

            for resolve_first in [true, false] {
                let child = current.child(
                    &conflict,
                    resolve_first,
                    grid,
                    agents,
                    config,
                    next_node_id,
                );
                next_node_id += 1;
                if let Some(child) = child {
                    if child.first_conflict.is_none() {
                        let better = best_conflict_free
                            .as_ref()
                            .map(|p| child.sum_of_costs < p.sum_of_costs())
                            .unwrap_or(true);
                        if better {
                            best_conflict_free = Some(child.joint_plan.clone());
                        }
                    }
                    frontier.insert(child);
                }
            }
            expansions += 1;
        }

        Ok(SolveStatus::NoSolution)
    }
}
