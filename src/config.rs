//! Runtime configuration, read from command-line flags or the environment.

use std::time::Duration;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "lounge_pos", version, about = "Café and gaming-lounge point-of-sale backend")]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "POS_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// PostgreSQL connection string. Without it the server keeps everything in memory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Upper bound on pooled database connections.
    #[arg(long, env = "POS_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a free pooled connection.
    #[arg(long, env = "POS_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// `tracing` filter directive, e.g. `info` or `lounge_pos=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}
