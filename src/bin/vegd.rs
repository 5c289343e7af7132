//! vegd — Vegvisir daemon.
//!
//! Serves the cached traffic API over HTTP. Configuration comes from
//! CLI flags or `VEGVISIR_*` environment variables (a `.env` file is
//! loaded if present).

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use vegvisir::server::{self, Args};
use vegvisir::Vegvisir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("vegvisir={},info", args.log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("configuration error: {e}");
        std::process::exit(1);
    }

    let gateway = Vegvisir::builder()
        .upstream_url(args.upstream_url.clone())
        .fresh_ttl(args.fresh_ttl())
        .fetch_timeout(args.fetch_timeout())
        .max_concurrent_fetches(args.max_concurrent_fetches)
        .build()?;

    info!(
        version = vegvisir::version_string(),
        addr = %args.listen,
        upstream = %args.upstream_url,
        "vegd starting"
    );

    server::serve(args.listen, Arc::new(gateway)).await?;
    Ok(())
}
