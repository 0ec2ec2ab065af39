use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cbs_mapf::cli::{AppConfig, Cli, OutputFormat};
use cbs_mapf::mapfile;
use cbs_mapf::scenario;
use cbs_mapf::solver::{SolveStatus, Solver};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::new(&cli);
    config.validate().context("invalid configuration")?;

    let grid = mapfile::load_grid(&config.map_path)
        .with_context(|| format!("loading map file {}", config.map_path))?;
    let agents = match &config.scenario_path {
        Some(path) => scenario::load_agents(Path::new(path))
            .with_context(|| format!("loading scenario file {path}"))?,
        None => scenario::generate_random_agents(&grid, config.num_agents, config.seed)
            .context("generating scenario")?,
    };

    info!(
        map_path = %config.map_path,
        scenario_path = config.scenario_path.as_deref().unwrap_or("<random>"),
        num_agents = agents.len(),
        seed = config.seed,
        "starting solve"
    );

    let status = Solver::solve(&grid, &agents, &config.solver)?;

    match config.format {
        OutputFormat::Text => print_text(&status),
        OutputFormat::Json => print_json(&status),
    }

    Ok(())
}

fn print_text(status: &SolveStatus) {
    match status {
        SolveStatus::Ok { plan, all_conflicts } => {
            println!("Ok: sum_of_costs={}", plan.sum_of_costs());
            for agent_id in {
                let mut ids: Vec<usize> = plan.agent_ids().collect();
                ids.sort_unstable();
                ids
            } {
                let p = plan.get(agent_id).expect("agent must have a plan");
                println!("  agent {agent_id}: {:?} (cost {})", p.cells, p.cost());
            }
            if !all_conflicts.is_empty() {
                println!("  {} conflict(s) reported:", all_conflicts.len());
                for conflict in all_conflicts {
                    println!("    {conflict:?}");
                }
            }
        }
        SolveStatus::NoSolution => println!("NoSolution"),
        SolveStatus::BudgetExceeded { best } => match best {
            Some(plan) => println!(
                "BudgetExceeded: best sum_of_costs seen = {}",
                plan.sum_of_costs()
            ),
            None => println!("BudgetExceeded: no conflict-free plan found"),
        },
    }
}

fn print_json(status: &SolveStatus) {
    let value = match status {
        SolveStatus::Ok { plan, .. } => {
            let mut ids: Vec<usize> = plan.agent_ids().collect();
            ids.sort_unstable();
            let paths: Vec<_> = ids
                .iter()
                .map(|&id| {
                    let p = plan.get(id).expect("agent must have a plan");
                    json!({ "agent": id, "cells": p.cells, "cost": p.cost() })
                })
                .collect();
            json!({
                "status": "ok",
                "sum_of_costs": plan.sum_of_costs(),
                "paths": paths,
            })
        }
        SolveStatus::NoSolution => json!({ "status": "no_solution" }),
        SolveStatus::BudgetExceeded { best } => json!({
            "status": "budget_exceeded",
            "best_sum_of_costs": best.as_ref().map(|p| p.sum_of_costs()),
        }),
    };
    println!("{value}");
}
