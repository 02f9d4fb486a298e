//! Mentor Desk - mentor session booking and payment confirmation backend.
//!
//! This crate implements slot availability resolution, session booking with
//! conflict detection, idempotent payment reconciliation, and the session
//! lifecycle (reviews included) for a learning platform's mentoring module.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
