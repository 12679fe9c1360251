//! Point-of-sale backend for a café and gaming lounge.
//!
//! Customers put drinks, food, top-ups and game top-ups into a cart. The
//! cart is an `Open` order whose `In-cart` line items carry a snapshot of
//! the catalog price taken when the line was added.
//!
//! - [`catalog`] - item kinds and priced catalog rows
//! - [`order`] - orders, line items, the cart view
//! - [`store`] - the `Store` trait with in-memory and PostgreSQL backends
//! - [`service`] - validation, error mapping and the axum HTTP transport

pub mod catalog;
pub mod config;
pub mod order;
pub mod service;
pub mod store;
pub mod telemetry;

pub use catalog::{ItemFields, ItemId, ItemType, PricedItem};
pub use config::Config;
pub use order::{
    AddedLine, Cart, CustomerId, DetailId, DetailStatus, NewLine, Order, OrderDetail, OrderId,
    OrderStatus, UnknownDetailStatus, UnknownOrderStatus,
};
pub use service::{router, serve, ApiError, PosService};
#[cfg(feature = "postgres")]
pub use store::PgStore;
pub use store::{InMemoryStore, Store, StoreError};
