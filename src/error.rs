use thiserror::Error;

use crate::grid::Cell;

/// Construction-time validation failures (spec §7). These are fail-fast:
/// raised before any search runs, never mid-solve. The search outcome
/// itself (`NoSolution` / `BudgetExceeded`) is not an error — it is a
/// variant of [`crate::solver::SolveStatus`], since a correctly exhausted
/// search is a valid, non-exceptional result of `solve`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("cell {cell:?} is out of bounds for a {height}x{width} grid")]
    OutOfBoundsCell {
        cell: Cell,
        height: usize,
        width: usize,
    },

    #[error("agent {agent_id} has a blocked start or goal cell ({cell:?})")]
    BlockedStartOrGoal { agent_id: usize, cell: Cell },
}
