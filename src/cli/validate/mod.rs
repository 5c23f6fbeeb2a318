//! Validate command - checks configured experiments and prints their slot tables

use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::bucket::{BucketDefinition, ExperimentConfig, Slot};

/// Arguments for the validate command
#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ExperimentReport {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    buckets: Vec<BucketDefinition>,
    slots: Vec<Slot>,
}

/// Run the validate command
///
/// Every experiment is checked even after a failure; the command fails if
/// any of them is invalid.
pub fn run(config: &AppConfig, args: ValidateArgs) -> anyhow::Result<()> {
    let reports: Vec<ExperimentReport> = config
        .experiments
        .iter()
        .map(|experiment| match ExperimentConfig::new(&experiment.id, &experiment.buckets) {
            Ok(validated) => ExperimentReport {
                id: experiment.id.clone(),
                error: None,
                buckets: validated.buckets().to_vec(),
                slots: validated.slot_table().slots().to_vec(),
            },
            Err(e) => {
                warn!(experiment_id = %experiment.id, error = %e, "Invalid experiment definition");
                ExperimentReport {
                    id: experiment.id.clone(),
                    error: Some(e.to_string()),
                    buckets: experiment.buckets.clone(),
                    slots: Vec::new(),
                }
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    let invalid = reports.iter().filter(|r| r.error.is_some()).count();

    if invalid > 0 {
        anyhow::bail!("{} of {} experiments are invalid", invalid, reports.len());
    }

    Ok(())
}

fn print_report(report: &ExperimentReport) {
    println!("{}", report.id);

    if let Some(error) = &report.error {
        println!("  invalid: {}", error);
        return;
    }

    for bucket in &report.buckets {
        println!("  bucket {:<24} {:>12.6}%", bucket.name(), bucket.percentage());
    }

    let mut lower = 0.0;

    for slot in &report.slots {
        println!(
            "  slot   {:<24} ({:.6}, {:.6}]",
            slot.bucket_name(),
            lower,
            slot.upper_bound()
        );
        lower = slot.upper_bound();
    }
}
