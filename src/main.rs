use std::io;

use anyhow::Result;
use clap::Parser;
use library_catalog::{
    Catalog, CatalogOptions, Shell, history::DEFAULT_HISTORY_LIMIT, observers::TracingObserver,
    seed,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interactive in-memory library catalog
#[derive(Parser, Debug)]
#[command(name = "library-catalog", version, about)]
struct Cli {
    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Start with an empty catalog instead of the demo books and members
    #[arg(long)]
    no_sample_data: bool,

    /// Accept blank member names and IDs at the catalog level
    #[arg(long)]
    lenient_members: bool,

    /// Number of book state changes to remember
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,
}

/// Send logs to stderr so they never mix with the menu on stdout
fn initialize_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Parse flags, build the catalog and hand it to the shell
fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let options = CatalogOptions {
        strict_member_validation: !cli.lenient_members,
        history_limit: cli.history_limit,
    };
    let mut catalog = Catalog::with_options(options);
    catalog.register_observer(Box::new(TracingObserver));

    let stdin = io::stdin();
    let mut shell = Shell::new(catalog, stdin.lock(), io::stdout());

    if !cli.no_sample_data {
        let report = seed::load_sample_data(shell.catalog_mut());
        info!(%report, "sample data loaded");
        shell.notice(format!("Sample data loaded successfully! ({report})"));
    }

    shell.run()
}
