//! siteprofiler CLI — company-site crawl-plan discovery.
//!
//! Takes a company URL, discovers which pages are worth crawling, and
//! prints the assembled profile document as JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
