//! Space-time constraints used by the high level to forbid cells/edges to a
//! single agent at a single timestep, and the set that accumulates them
//! along a CBS branch.

use std::collections::HashSet;

use crate::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexConstraint {
    pub agent: usize,
    pub cell: Cell,
    pub time: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeConstraint {
    pub agent: usize,
    pub from: Cell,
    pub to: Cell,
    pub time: usize,
}

/// Two hash sets of constraints, monotone-growing along a CBS branch.
/// Cloning is `O(constraints)`; CBS nodes are expected to clone this once
/// per split (see `HighLevelSearch`), which the spec allows as long as the
/// per-node memory stays bounded by the constraint count, not the whole
/// joint plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    vertex: HashSet<VertexConstraint>,
    edge: HashSet<EdgeConstraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        ConstraintSet::default()
    }

    pub fn add_vertex(&mut self, constraint: VertexConstraint) {
        self.vertex.insert(constraint);
    }

    pub fn add_edge(&mut self, constraint: EdgeConstraint) {
        self.edge.insert(constraint);
    }

    /// A copy of `self` with one additional vertex constraint. Used at CBS
    /// split points so the parent node is left untouched.
    pub fn with_vertex(&self, constraint: VertexConstraint) -> Self {
        let mut next = self.clone();
        next.add_vertex(constraint);
        next
    }

    /// A copy of `self` with one additional edge constraint.
    pub fn with_edge(&self, constraint: EdgeConstraint) -> Self {
        let mut next = self.clone();
        next.add_edge(constraint);
        next
    }

    pub fn forbids_vertex(&self, agent: usize, cell: Cell, time: usize) -> bool {
        self.vertex.contains(&VertexConstraint { agent, cell, time })
    }

    pub fn forbids_edge(&self, agent: usize, from: Cell, to: Cell, time: usize) -> bool {
        self.edge.contains(&EdgeConstraint {
            agent,
            from,
            to,
            time,
        })
    }

    /// The largest `time` of any vertex constraint `(agent, cell, time)`
    /// pinned on `cell`, or `0` if none exists. Used by the low level to
    /// implement `T_forbid` (spec §4.3).
    pub fn latest_vertex_constraint_at(&self, agent: usize, cell: Cell) -> usize {
        self.vertex
            .iter()
            .filter(|c| c.agent == agent && c.cell == cell)
            .map(|c| c.time)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.vertex.len() + self.edge.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
