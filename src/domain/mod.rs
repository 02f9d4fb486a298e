//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `mentoring` - Availability, booking, payment confirmation, lifecycle, reviews

pub mod foundation;
pub mod mentoring;
