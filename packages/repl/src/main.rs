use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_core::config::{ENV_API_PREFIX, ENV_BASE_URL, ENV_RANGE_ROUTING, ENV_TIMEOUT_SECS};
use catalog_core::ClientConfig;
use catalog_repl::host::terminal::EDIT_MODE_ENV;

/// catalog - interactive client for the product catalog service
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server origin [env: CATALOG_BASE_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// Path of the products collection, e.g. /api/products [env: CATALOG_API_PREFIX]
    #[arg(long)]
    api_prefix: Option<String>,

    /// Where price-range searches go: inline or dedicated [env: CATALOG_RANGE_ROUTING]
    #[arg(long)]
    range_routing: Option<String>,

    /// Per-request timeout in seconds [env: CATALOG_TIMEOUT_SECS]
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Force vi editing mode
    #[arg(long)]
    vi: bool,

    /// Force emacs editing mode
    #[arg(long)]
    emacs: bool,

    /// Log filter, e.g. debug or catalog_core=trace (defaults to RUST_LOG, then warn)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// Flag values keyed like their environment variables.
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            ENV_BASE_URL => self.base_url.clone(),
            ENV_API_PREFIX => self.api_prefix.clone(),
            ENV_RANGE_ROUTING => self.range_routing.clone(),
            ENV_TIMEOUT_SECS => self.timeout_secs.map(|secs| secs.to_string()),
            _ => None,
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    if args.vi {
        std::env::set_var(EDIT_MODE_ENV, "vi");
    } else if args.emacs {
        std::env::set_var(EDIT_MODE_ENV, "emacs");
    }

    let config = match ClientConfig::from_env().and_then(|env| env.overlay(|key| args.lookup(key)))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = catalog_repl::run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
