//! Core multi-agent path-finding solver: Conflict-Based Search (CBS) over
//! time-expanded A*. The `solver`, `highlevel`, `lowlevel`, `conflict`,
//! `constraint`, `grid`, `agent`, `plan` and `error` modules are the
//! core — pure, synchronous, single-threaded, with no I/O.
//!
//! `mapfile`, `scenario`, `cli` and `stats` are collaborators: map-file
//! parsing, random agent generation, the command-line surface, and
//! solve-time reporting.

pub mod agent;
pub mod cli;
pub mod conflict;
pub mod constraint;
pub mod error;
pub mod grid;
pub mod highlevel;
pub mod lowlevel;
pub mod mapfile;
pub mod plan;
pub mod scenario;
pub mod solver;
pub(crate) mod stats;

pub use agent::Agent;
pub use error::CoreError;
pub use grid::{Cell, Grid};
pub use plan::{JointPlan, Plan};
pub use solver::{Config, SolveStatus, Solver};
