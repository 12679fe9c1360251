//! Service layer: input validation, error mapping and the HTTP transport.
//!
//! `PosService<S>` wraps a `Store` and exposes the cart, order and catalog
//! operations. `router` maps those operations onto REST routes; `serve`
//! binds a listener and runs them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use lounge_pos::{service, InMemoryStore, PosService};
//!
//! let service = Arc::new(PosService::new(InMemoryStore::new()));
//! service::serve(service, "0.0.0.0:3000", async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await?;
//! ```

mod error;
mod http;
mod input;
#[allow(clippy::module_inception)]
mod service;

pub use error::ApiError;
pub use http::{router, serve};
pub use input::{decode, parse_id, AddToCartInput, ItemInput};
pub use service::PosService;
