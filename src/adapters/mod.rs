//! Adapters - Implementations of ports for external systems.
//!
//! - `memory` - In-memory repositories for tests and local development
//! - `postgres` - sqlx-backed repositories
//! - `stripe` - Stripe payment provider
//! - `http` - axum HTTP surface

pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
