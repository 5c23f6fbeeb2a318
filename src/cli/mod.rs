//! CLI module for the bucket allocator
//!
//! Provides subcommands operating on the experiments defined in configuration:
//! - `allocate`: assign one sample to a bucket
//! - `validate`: check and print every configured experiment
//! - `simulate`: allocate synthetic samples and compare observed shares

pub mod allocate;
pub mod simulate;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Bucket Allocator - deterministic A/B experiment bucketing
#[derive(Parser)]
#[command(name = "bucket-allocator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file with logging, metrics and experiment definitions
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Allocate a sample to a bucket
    Allocate(allocate::AllocateArgs),

    /// Validate configured experiments and print their slot tables
    Validate(validate::ValidateArgs),

    /// Allocate synthetic samples and report the observed distribution
    Simulate(simulate::SimulateArgs),
}

/// Load `.env`, the layered configuration, and install logging
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(path)?;
    logging::init_logging(&config.logging);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allocate() {
        let cli = Cli::parse_from([
            "bucket-allocator",
            "--config",
            "experiments.toml",
            "allocate",
            "--experiment",
            "exp-1",
            "--entity",
            "user",
            "--value",
            "user123",
            "--json",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("experiments.toml")));
        match cli.command {
            Command::Allocate(args) => {
                assert_eq!(args.experiment, "exp-1");
                assert_eq!(args.entity, "user");
                assert_eq!(args.value, "user123");
                assert!(args.json);
            }
            _ => panic!("expected allocate command"),
        }
    }

    #[test]
    fn test_parse_simulate_defaults() {
        let cli = Cli::parse_from(["bucket-allocator", "simulate", "--experiment", "exp-1"]);

        match cli.command {
            Command::Simulate(args) => {
                assert_eq!(args.experiment, "exp-1");
                assert_eq!(args.samples, 10_000);
                assert!(!args.metrics);
            }
            _ => panic!("expected simulate command"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["bucket-allocator", "validate", "-c", "local.toml"]);

        assert_eq!(cli.config, Some(PathBuf::from("local.toml")));
        assert!(matches!(cli.command, Command::Validate(_)));
    }
}
