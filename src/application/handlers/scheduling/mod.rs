//! Scheduling handlers.
//!
//! Availability window management and slot resolution:
//!
//! ## Commands
//! - Creating, editing, and deleting weekly availability windows
//!
//! ## Queries
//! - Enumerating a mentor's bookable slots for a date
//!
//! ## Services
//! - `SlotConflictResolver` - shared availability/conflict check

mod create_availability;
mod delete_availability;
mod list_available_slots;
mod slot_resolver;
mod update_availability;

// Commands
pub use create_availability::{
    CreateAvailabilityCommand, CreateAvailabilityHandler, CreateAvailabilityResult,
};
pub use delete_availability::{DeleteAvailabilityCommand, DeleteAvailabilityHandler};
pub use update_availability::{
    UpdateAvailabilityCommand, UpdateAvailabilityHandler, UpdateAvailabilityResult,
};

// Queries
pub use list_available_slots::{
    ListAvailableSlotsHandler, ListAvailableSlotsQuery, ListAvailableSlotsResult, SlotEntry,
};

// Services
pub use slot_resolver::SlotConflictResolver;
