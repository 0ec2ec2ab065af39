use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::grid::{Cell, Grid};

/// An agent identified by a dense id in `[0, N)`, with distinct start and
/// goal cells. Agents are pure input data: the solver never mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    pub start: Cell,
    pub goal: Cell,
}

impl Agent {
    pub fn new(id: usize, start: Cell, goal: Cell) -> Self {
        Agent { id, start, goal }
    }

    /// Fails fast (spec §7) if `start` or `goal` is out of bounds or
    /// blocked.
    pub fn validate(&self, grid: &Grid) -> Result<(), CoreError> {
        for cell in [self.start, self.goal] {
            if !grid.in_bounds(cell) {
                return Err(CoreError::OutOfBoundsCell {
                    cell,
                    height: grid.height(),
                    width: grid.width(),
                });
            }
            if !grid.is_free(cell) {
                return Err(CoreError::BlockedStartOrGoal {
                    agent_id: self.id,
                    cell,
                });
            }
        }
        Ok(())
    }
}

/// Validates every agent's start/goal against `grid`. Duplicate ids are
/// not rejected here — the façade is responsible for dense-id invariants
/// coming from its own agent list construction.
pub fn validate_agents(agents: &[Agent], grid: &Grid) -> Result<(), CoreError> {
    for agent in agents {
        agent.validate(grid)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        let mut free = vec![vec![true; 3]; 3];
        free[1][1] = false;
        Grid::new(free)
    }

    #[test]
    fn validate_accepts_free_cells() {
        let agent = Agent::new(0, (0, 0), (2, 2));
        assert!(agent.validate(&grid()).is_ok());
    }

    #[test]
    fn validate_rejects_blocked_goal() {
        let agent = Agent::new(0, (0, 0), (1, 1));
        assert_eq!(
            agent.validate(&grid()),
            Err(CoreError::BlockedStartOrGoal {
                agent_id: 0,
                cell: (1, 1)
            })
        );
    }

    #[test]
    fn validate_rejects_out_of_bounds_start() {
        let agent = Agent::new(0, (5, 5), (0, 0));
        assert_eq!(
            agent.validate(&grid()),
            Err(CoreError::OutOfBoundsCell {
                cell: (5, 5),
                height: 3,
                width: 3,
            })
        );
    }

    #[test]
    fn start_equals_goal_is_allowed() {
        let agent = Agent::new(0, (2, 2), (2, 2));
        assert!(agent.validate(&grid()).is_ok());
    }
}
