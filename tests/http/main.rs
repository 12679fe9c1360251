//! HTTP integration tests.
//!
//! Starts the axum router over an in-memory store and exercises it with reqwest.


mod cart;
mod orders;
