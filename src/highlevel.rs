//! The CBS conflict tree: node representation, root construction, and
//! single-conflict expansion into two children (spec §4.5).

use std::cmp::Ordering;

use tracing::debug;

use crate::agent::Agent;
use crate::conflict::{Conflict, ConflictDetector};
use crate::constraint::{ConstraintSet, EdgeConstraint, VertexConstraint};
use crate::grid::Grid;
use crate::lowlevel;
use crate::plan::JointPlan;
use crate::solver::Config;

/// A node in the binary constraint tree. `node_id` is assigned in creation
/// order and used only to break ties deterministically; it carries no
/// search meaning.
#[derive(Debug, Clone)]
pub(crate) struct CbsNode {
    pub(crate) node_id: u64,
    pub(crate) constraints: ConstraintSet,
    pub(crate) joint_plan: JointPlan,
    pub(crate) sum_of_costs: usize,
    pub(crate) conflict_count: usize,
    pub(crate) first_conflict: Option<Conflict>,
}

impl CbsNode {
    fn recompute_conflicts(&mut self) {
        let detector = ConflictDetector::new(&self.joint_plan);
        let all = detector.all_conflicts();
        self.conflict_count = all.len();
        self.first_conflict = all.into_iter().min_by_key(|c| sort_key(c));
    }

    /// Builds the root node: every agent planned independently under an
    /// empty constraint set. `None` iff some agent is infeasible at the
    /// root (spec: "If any agent is infeasible at root, report
    /// NoSolution").
    pub(crate) fn root(grid: &Grid, agents: &[Agent], config: &Config) -> Option<Self> {
        let constraints = ConstraintSet::new();
        let mut joint_plan = JointPlan::new();
        let mut sum_of_costs = 0;

        for agent in agents {
            let plan = lowlevel::plan(
                grid,
                agent,
                &constraints,
                config.max_time_steps,
                config.tiebreak_prefer_h,
            )?;
            sum_of_costs += plan.cost();
            joint_plan.insert(agent.id, plan);
        }

        let mut node = CbsNode {
            node_id: 0,
            constraints,
            joint_plan,
            sum_of_costs,
            conflict_count: 0,
            first_conflict: None,
        };
        node.recompute_conflicts();
        Some(node)
    }

    /// Splits `self` on its own `first_conflict`, replanning only the
    /// chosen agent under one extra constraint. Returns `None` if that
    /// agent becomes infeasible (the branch is pruned, spec §4.5).
    ///
    /// `resolve_first` selects which of the conflict's two agents is
    /// constrained: `true` picks the first (`a`), `false` the second
    /// (`b`). For an edge conflict the two calls forbid the two symmetric
    /// directions of the swap, matching spec §4.5's directional
    /// requirement (this is the fix for the source's "lumps edge
    /// conflicts into vertex constraints" bug, spec §9).
    pub(crate) fn child(
        &self,
        conflict: &Conflict,
        resolve_first: bool,
        grid: &Grid,
        agents: &[Agent],
        config: &Config,
        node_id: u64,
    ) -> Option<Self> {
        let (a, b) = conflict.agents();
        let agent_to_replan = if resolve_first { a } else { b };

        let constraints = match *conflict {
            Conflict::Vertex { cell, time, .. } => self.constraints.with_vertex(VertexConstraint {
                agent: agent_to_replan,
                cell,
                time,
            }),
            Conflict::Edge {
                cell_a,
                cell_b,
                time,
                ..
            } => {
                let (from, to) = if resolve_first {
                    (cell_a, cell_b)
                } else {
                    (cell_b, cell_a)
                };
                self.constraints.with_edge(EdgeConstraint {
                    agent: agent_to_replan,
                    from,
                    to,
                    time,
                })
            }
        };

        let agent = agents
            .iter()
            .find(|a| a.id == agent_to_replan)
            .expect("conflict must reference a known agent");
        let new_plan = lowlevel::plan(
            grid,
            agent,
            &constraints,
            config.max_time_steps,
            config.tiebreak_prefer_h,
        )?;

        let mut joint_plan = self.joint_plan.clone();
        let old_cost = joint_plan
            .get(agent_to_replan)
            .expect("replanned agent must already have a plan")
            .cost();
        let new_cost = new_plan.cost();
        joint_plan.insert(agent_to_replan, new_plan);

        let mut child = CbsNode {
            node_id,
            constraints,
            joint_plan,
            sum_of_costs: self.sum_of_costs - old_cost + new_cost,
            conflict_count: 0,
            first_conflict: None,
        };
        debug!(
            parent = self.node_id,
            child = node_id,
            agent = agent_to_replan,
            "expanded CBS node"
        );
        child.recompute_conflicts();
        Some(child)
    }
}

fn sort_key(c: &Conflict) -> (usize, u8, usize, usize) {
    let (a, b) = c.agents();
    let type_order = match c {
        Conflict::Vertex { .. } => 0,
        Conflict::Edge { .. } => 1,
    };
    (c.time(), type_order, a, b)
}

impl PartialEq for CbsNode {
    fn eq(&self, other: &Self) -> bool {
        self.node_id == other.node_id
    }
}
impl Eq for CbsNode {}

impl Ord for CbsNode {
    /// Best-first by `sum_of_costs`, ties broken by fewer conflicts, then
    /// by lower `node_id` (spec §4.5).
    fn cmp(&self, other: &Self) -> Ordering {
        self.sum_of_costs
            .cmp(&other.sum_of_costs)
            .then_with(|| self.conflict_count.cmp(&other.conflict_count))
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

impl PartialOrd for CbsNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
