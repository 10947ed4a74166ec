use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::fetch;

/// Choropleth CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "choromap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch both datasets and render the choropleth SVG
    Render(RenderArgs),

    /// Probe the dataset URLs without downloading them
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output SVG file
    #[arg(
        short,
        long,
        default_value = "choropleth.svg",
        value_hint = ValueHint::FilePath
    )]
    pub output: PathBuf,

    /// Education dataset URL
    #[arg(long, default_value = fetch::EDUCATION_URL)]
    pub education_url: String,

    /// County topology URL
    #[arg(long, default_value = fetch::COUNTIES_URL)]
    pub counties_url: String,

    /// Number of color buckets (3-9)
    #[arg(short, long, default_value_t = 7)]
    pub buckets: usize,

    /// Document width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: i32,

    /// Padding around the drawing in pixels
    #[arg(long, default_value_t = 10)]
    pub margin: i32,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Education dataset URL
    #[arg(long, default_value = fetch::EDUCATION_URL)]
    pub education_url: String,

    /// County topology URL
    #[arg(long, default_value = fetch::COUNTIES_URL)]
    pub counties_url: String,
}
