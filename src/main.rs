use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use lounge_pos::telemetry::setup_tracing;
use lounge_pos::{serve, Config, InMemoryStore, PosService, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    setup_tracing(&config.log_filter);

    info!(bind = %config.bind, "starting lounge_pos");

    match config.database_url.as_deref() {
        #[cfg(feature = "postgres")]
        Some(url) => {
            let store =
                lounge_pos::PgStore::connect(url, config.max_connections, config.acquire_timeout())
                    .await?;
            store.migrate().await?;
            run(store, &config.bind).await?;
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => {
            warn!("built without the postgres feature; ignoring DATABASE_URL");
            run(InMemoryStore::new(), &config.bind).await?;
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store");
            run(InMemoryStore::new(), &config.bind).await?;
        }
    }

    info!("shutdown complete");
    Ok(())
}

async fn run<S: Store>(store: S, bind: &str) -> std::io::Result<()> {
    let service = Arc::new(PosService::new(store));
    serve(service, bind, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
