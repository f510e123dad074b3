//! CLI argument definitions, tracing setup, and command execution.

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;

use siteprofiler_core::{ProfileOptions, build_profile};
use siteprofiler_shared::{AppConfig, TenantId};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// siteprofiler — rank a company site's pages into a crawl plan.
#[derive(Parser)]
#[command(
    name = "siteprofiler",
    version,
    about = "Discover and rank the pages of a company website into a crawl plan.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Company URL (bare domain, full URL, or protocol-relative).
    pub url: String,

    /// Human-readable company name (defaults to the URL's host).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Pre-existing tenant identifier (a new one is minted when omitted).
    #[arg(long)]
    pub tenant: Option<String>,

    /// Maximum crawl plan length.
    #[arg(long, default_value_t = 20)]
    pub top_k: usize,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "siteprofiler=info",
        1 => "siteprofiler=debug",
        _ => "siteprofiler=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run one profiling request and print the response as pretty JSON.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load()?;
    config.top_k = cli.top_k;

    let options = ProfileOptions {
        tenant_id: cli.tenant.map(TenantId::from),
        company_name: cli.name,
    };

    let response = build_profile(&cli.url, options, &config).await?;

    info!(
        source = %response.source,
        blocked = response.blocked,
        plan_len = response.profile.crawl_plan.len(),
        "profile assembled"
    );

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
