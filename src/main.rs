use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use choromap::cli::{Cli, Commands};
use choromap::commands::{check, render};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise -v/-vv raise the default level.
    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match &cli.command {
        Commands::Render(args) => render::run(args),
        Commands::Check(args) => check::run(args),
    }
}
