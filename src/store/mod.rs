//! Storage backends.
//!
//! `Store` is the seam between the HTTP service and persistence.
//! `InMemoryStore` keeps everything in a process-local map and backs the
//! tests; `PgStore` (feature `postgres`) talks to PostgreSQL through sqlx.

mod error;
mod in_memory;
#[cfg(feature = "postgres")]
mod postgres;
#[allow(clippy::module_inception)]
mod store;

pub use error::StoreError;
pub use in_memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PgStore;
pub use store::Store;
