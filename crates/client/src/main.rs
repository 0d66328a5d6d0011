use clap::Parser;

use expense_tracker::{Result, args::Args, config};

mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "expense={level},expense_tracker={level},engine={level}",
                    level = config.level
                )
                .into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    commands::run(args.command, config).await
}
