mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{render, report};
use tracing_subscriber::EnvFilter;

/// Log to stderr; `-v` raises the crate's level to debug, `-vv` to trace. `RUST_LOG` still applies.
fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "electomap=info",
        1 => "electomap=debug",
        _ => "electomap=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

pub async fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args).await,
        Commands::Report(args) => report::run(&cli, args).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> { run().await }
