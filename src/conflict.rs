//! Detects vertex/edge conflicts in a padded joint plan (spec §4.4).

use crate::grid::Cell;
use crate::plan::JointPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conflict {
    /// `a` and `b` (`a < b`) both occupy `cell` at `time`.
    Vertex {
        time: usize,
        a: usize,
        b: usize,
        cell: Cell,
    },
    /// `a` moves `cell_a -> cell_b` while `b` moves `cell_b -> cell_a`
    /// between `time` and `time + 1`.
    Edge {
        time: usize,
        a: usize,
        b: usize,
        cell_a: Cell,
        cell_b: Cell,
    },
}

impl Conflict {
    pub fn agents(&self) -> (usize, usize) {
        match *self {
            Conflict::Vertex { a, b, .. } => (a, b),
            Conflict::Edge { a, b, .. } => (a, b),
        }
    }

    pub fn time(&self) -> usize {
        match *self {
            Conflict::Vertex { time, .. } => time,
            Conflict::Edge { time, .. } => time,
        }
    }

    /// `vertex < edge`, used to order conflicts at equal `time`. Tuple-field
    /// order on the enum itself (`time` first) already gives the `(t,
    /// type, a, b)` lexicographic ordering the spec wants, since `Vertex`
    /// is declared before `Edge`... except `time` must compare first
    /// across variants, which `derive(Ord)` on an enum does not do (it
    /// orders by variant *then* fields). `sort_key` builds the correct
    /// tuple explicitly.
    fn sort_key(&self) -> (usize, u8, usize, usize) {
        let (a, b) = self.agents();
        let type_order = match self {
            Conflict::Vertex { .. } => 0,
            Conflict::Edge { .. } => 1,
        };
        (self.time(), type_order, a, b)
    }
}

/// Scans a joint plan for conflicts. With `enumerate_all = false`, only
/// `first_conflict` does any work; CBS always splits on one conflict
/// regardless of this flag (spec §4.4/§6).
pub struct ConflictDetector<'a> {
    joint_plan: &'a JointPlan,
}

impl<'a> ConflictDetector<'a> {
    pub fn new(joint_plan: &'a JointPlan) -> Self {
        ConflictDetector { joint_plan }
    }

    /// All conflicts in the padded joint plan, unordered.
    pub fn all_conflicts(&self) -> Vec<Conflict> {
        let mut agent_ids: Vec<usize> = self.joint_plan.agent_ids().collect();
        agent_ids.sort_unstable();
        let makespan = self.joint_plan.makespan();

        let mut conflicts = Vec::new();
        for t in 0..=makespan {
            for (i, &a) in agent_ids.iter().enumerate() {
                for &b in &agent_ids[i + 1..] {
                    let pos_a = self.joint_plan.position_of(a, t);
                    let pos_b = self.joint_plan.position_of(b, t);

                    if pos_a == pos_b {
                        conflicts.push(Conflict::Vertex {
                            time: t,
                            a,
                            b,
                            cell: pos_a,
                        });
                    }

                    if t >= 1 {
                        let prev_a = self.joint_plan.position_of(a, t - 1);
                        let prev_b = self.joint_plan.position_of(b, t - 1);
                        if prev_a == pos_b && prev_b == pos_a && pos_a != prev_a {
                            conflicts.push(Conflict::Edge {
                                time: t - 1,
                                a,
                                b,
                                cell_a: prev_a,
                                cell_b: pos_a,
                            });
                        }
                    }
                }
            }
        }
        conflicts
    }

    /// The lexicographically smallest conflict by `(time, type, a, b)`,
    /// `vertex < edge`. Deterministic: removes any tie-breaking ambiguity
    /// from CBS node expansion (spec §4.4).
    pub fn first_conflict(&self) -> Option<Conflict> {
        self.all_conflicts()
            .into_iter()
            .min_by_key(|c| c.sort_key())
    }
}
