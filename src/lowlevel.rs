//! Time-expanded A*: single-agent shortest path under a [`ConstraintSet`],
//! searching over `(cell, time)` states (spec §4.3).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, instrument};

use crate::agent::Agent;
use crate::constraint::ConstraintSet;
use crate::grid::{Cell, Grid};
use crate::plan::Plan;

/// A search-tree node in `(cell, time)` space. `insertion_order` is the
/// canonical final tiebreak, giving a deterministic expansion order for
/// nodes that are otherwise equal (spec §4.3 "Determinism").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    cell: Cell,
    time: usize,
    g: usize,
    h: usize,
    insertion_order: u64,
    prefer_h: bool,
}

impl OpenNode {
    fn f(&self) -> usize {
        self.g + self.h
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse every comparison to get min-f
        // behavior, then (optionally) min-h, then earliest-inserted.
        other
            .f()
            .cmp(&self.f())
            .then_with(|| {
                if self.prefer_h {
                    other.h.cmp(&self.h)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| other.insertion_order.cmp(&self.insertion_order))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `plan(agent, constraints, horizon) -> Some(Plan) | None` (Infeasible).
///
/// `prefer_h` is `Config::tiebreak_prefer_h`: when true, ties at equal `f`
/// prefer the lower `h` (closer to goal); when false, ties fall straight
/// through to insertion order.
#[instrument(skip(grid, constraints), fields(agent = agent.id, start = ?agent.start, goal = ?agent.goal), level = "debug")]
pub fn plan(
    grid: &Grid,
    agent: &Agent,
    constraints: &ConstraintSet,
    horizon: usize,
    prefer_h: bool,
) -> Option<Plan> {
    let t_forbid = constraints.latest_vertex_constraint_at(agent.id, agent.goal);

    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<(Cell, usize), usize> = HashMap::new();
    let mut parent: HashMap<(Cell, usize), (Cell, usize)> = HashMap::new();
    let mut order: u64 = 0;

    let start_h = grid.manhattan(agent.start, agent.goal);
    best_g.insert((agent.start, 0), 0);
    open.push(OpenNode {
        cell: agent.start,
        time: 0,
        g: 0,
        h: start_h,
        insertion_order: order,
        prefer_h,
    });

    while let Some(current) = open.pop() {
        // A state can be pushed multiple times before being finalized;
        // skip stale entries whose recorded g has since improved.
        if best_g.get(&(current.cell, current.time)) != Some(&current.g) {
            continue;
        }

        if current.cell == agent.goal && current.time >= t_forbid {
            return Some(reconstruct(&parent, current.cell, current.time));
        }

        let next_time = current.time + 1;
        if next_time > horizon {
            continue;
        }

        for neighbor in grid.neighbors(current.cell) {
            if constraints.forbids_vertex(agent.id, neighbor, next_time) {
                continue;
            }
            if neighbor != current.cell
                && constraints.forbids_edge(agent.id, current.cell, neighbor, current.time)
            {
                continue;
            }

            let tentative_g = current.g + 1;
            let better = match best_g.get(&(neighbor, next_time)) {
                Some(&existing) => tentative_g < existing,
                None => true,
            };
            if better {
                best_g.insert((neighbor, next_time), tentative_g);
                parent.insert((neighbor, next_time), (current.cell, current.time));
                order += 1;
                open.push(OpenNode {
                    cell: neighbor,
                    time: next_time,
                    g: tentative_g,
                    h: grid.manhattan(neighbor, agent.goal),
                    insertion_order: order,
                    prefer_h,
                });
            }
        }
    }

    debug!("agent {} is infeasible within horizon {horizon}", agent.id);
    None
}

fn reconstruct(
    parent: &HashMap<(Cell, usize), (Cell, usize)>,
    goal_cell: Cell,
    goal_time: usize,
) -> Plan {
    let mut cells = vec![goal_cell];
    let mut current = (goal_cell, goal_time);
    while let Some(&prev) = parent.get(&current) {
        cells.push(prev.0);
        current = prev;
    }
    cells.reverse();
    Plan::new(cells)
}
