//! Simulate command - allocates synthetic samples and reports the distribution

use std::collections::BTreeMap;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::create_allocation_service;
use crate::infrastructure::observability::init_metrics;

/// Arguments for the simulate command
#[derive(Args, Clone)]
pub struct SimulateArgs {
    /// Experiment to simulate
    #[arg(long, short)]
    pub experiment: String,

    /// Number of synthetic samples
    #[arg(long, short = 'n', default_value_t = 10_000)]
    pub samples: u32,

    /// Entity kind used for the synthetic samples
    #[arg(long, default_value = "user")]
    pub entity: String,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,
}

/// Run the simulate command
pub fn run(config: &AppConfig, args: SimulateArgs) -> anyhow::Result<()> {
    let metrics = if args.metrics {
        init_metrics(&config.metrics)
    } else {
        None
    };

    let service = create_allocation_service(config)?;
    let experiment = service.registry().get_config(&args.experiment)?;

    info!(
        experiment_id = %args.experiment,
        samples = args.samples,
        "Simulating allocations"
    );

    let counts = count_allocations(args.samples, |i| {
        let value = format!("sample-{}", i);
        service.allocate(&args.experiment, &[args.entity.as_str(), value.as_str()])
    })?;

    println!(
        "{:<24} {:>12} {:>12} {:>10}",
        "bucket", "configured", "observed", "count"
    );

    for bucket in experiment.buckets() {
        let count = counts.get(bucket.name()).copied().unwrap_or(0);
        println!(
            "{:<24} {:>11.4}% {:>11.4}% {:>10}",
            bucket.name(),
            bucket.percentage(),
            share(count, args.samples),
            count
        );
    }

    if let Some(metrics) = metrics {
        println!();
        print!("{}", metrics.render());
    }

    Ok(())
}

fn count_allocations<F, E>(samples: u32, mut allocate: F) -> Result<BTreeMap<String, u32>, E>
where
    F: FnMut(u32) -> Result<String, E>,
{
    let mut counts = BTreeMap::new();

    for i in 0..samples {
        *counts.entry(allocate(i)?).or_insert(0) += 1;
    }

    Ok(counts)
}

fn share(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }

    f64::from(count) * 100.0 / f64::from(total)
}
