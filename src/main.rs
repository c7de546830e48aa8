//! GlueSync - push Microsoft-synced IT Glue contacts into Autotask

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod sync;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

/// Warnings by default; `--debug` raises this crate to debug. `RUST_LOG`
/// wins over both.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    if debug {
        builder.filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug);
    }
    builder.parse_default_env();
    builder.format_target(false).init();
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Orgs => cli::orgs::run(&opts).await,
        Commands::Plan { run } => cli::plan::run(&opts, &run).await,
        Commands::Sync { run, yes } => cli::sync::run(&opts, &run, yes).await,
        Commands::Version => {
            println!("gluesync version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
