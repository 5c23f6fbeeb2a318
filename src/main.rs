use clap::Parser;
use bucket_allocator::cli::{self, Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Allocate(args) => cli::allocate::run(&config, args),
        Command::Validate(args) => cli::validate::run(&config, args),
        Command::Simulate(args) => cli::simulate::run(&config, args),
    }
}
