//! CLI surface (a collaborator, spec §6): argument parsing and the
//! resolved `AppConfig` the binary runs with, in the teacher's
//! `clap`-derive idiom.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

use crate::solver::Config as SolverConfig;

#[derive(Parser, Debug)]
#[command(
    name = "cbs-mapf",
    about = "Optimal multi-agent path-finding via Conflict-Based Search.",
    version
)]
pub struct Cli {
    #[arg(long, help = "Path to the map file")]
    pub map_path: String,

    #[arg(
        long,
        help = "Path to a JSON scenario file; if omitted, agents are generated at random"
    )]
    pub scenario_path: Option<String>,

    #[arg(
        long,
        help = "Number of agents to generate when --scenario-path is not given",
        default_value_t = 10
    )]
    pub num_agents: usize,

    #[arg(long, help = "Seed for random scenario generation", default_value_t = 0)]
    pub seed: u64,

    #[arg(long, help = "Horizon for the low-level search", default_value_t = 300)]
    pub max_time_steps: usize,

    #[arg(
        long,
        help = "CBS node expansion budget",
        default_value_t = 1000
    )]
    pub max_high_level_nodes: usize,

    #[arg(
        long,
        help = "Prefer lower h at equal f in the low-level tiebreak",
        default_value_t = true
    )]
    pub tiebreak_prefer_h: bool,

    #[arg(
        long,
        help = "Report every conflict in the final plan, not just the split conflict"
    )]
    pub enumerate_all_conflicts: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Result output format")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub map_path: String,
    pub scenario_path: Option<String>,
    pub num_agents: usize,
    pub seed: u64,
    pub format: OutputFormat,
    pub solver: SolverConfig,
}

impl AppConfig {
    pub fn new(cli: &Cli) -> Self {
        AppConfig {
            map_path: cli.map_path.clone(),
            scenario_path: cli.scenario_path.clone(),
            num_agents: cli.num_agents,
            seed: cli.seed,
            format: cli.format,
            solver: SolverConfig {
                max_time_steps: cli.max_time_steps,
                max_high_level_nodes: cli.max_high_level_nodes,
                tiebreak_prefer_h: cli.tiebreak_prefer_h,
                enumerate_all_conflicts: cli.enumerate_all_conflicts,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.scenario_path.is_none() && self.num_agents == 0 {
            return Err(anyhow!("num_agents must be greater than 0"));
        }
        if self.solver.max_time_steps == 0 {
            return Err(anyhow!("max_time_steps must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli {
            map_path: "map.map".into(),
            scenario_path: None,
            num_agents: 5,
            seed: 0,
            max_time_steps: 300,
            max_high_level_nodes: 1000,
            tiebreak_prefer_h: true,
            enumerate_all_conflicts: false,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn validate_rejects_zero_agents() {
        let mut cli = base_cli();
        cli.num_agents = 0;
        let config = AppConfig::new(&cli);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_horizon() {
        let mut cli = base_cli();
        cli.max_time_steps = 0;
        let config = AppConfig::new(&cli);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        let config = AppConfig::new(&base_cli());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_allows_zero_num_agents_when_scenario_path_is_given() {
        let mut cli = base_cli();
        cli.num_agents = 0;
        cli.scenario_path = Some("scenario.json".into());
        let config = AppConfig::new(&cli);
        assert!(config.validate().is_ok());
    }
}
