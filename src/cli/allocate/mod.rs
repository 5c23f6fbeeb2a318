//! Allocate command - assigns one sample to a bucket

use clap::Args;

use crate::config::AppConfig;
use crate::create_allocation_service;
use crate::domain::sample::Sample;

/// Arguments for the allocate command
#[derive(Args, Clone)]
pub struct AllocateArgs {
    /// Experiment to allocate against
    #[arg(long, short)]
    pub experiment: String,

    /// Kind of sampled entity (e.g. "user")
    #[arg(long)]
    pub entity: String,

    /// Value identifying the sampled entity
    #[arg(long)]
    pub value: String,

    /// Print the full allocation record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the allocate command
pub fn run(config: &AppConfig, args: AllocateArgs) -> anyhow::Result<()> {
    let service = create_allocation_service(config)?;
    let sample = Sample::new(args.experiment, args.entity, args.value);
    let record = service.allocate_sample(&sample)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", record.allocated_bucket());
    }

    Ok(())
}
