//! Mentor profile handlers.
//!
//! ## Commands
//! - Creating a mentor profile (unique per user)
//! - Editing profile fields, pricing, and the accepting-sessions gate

mod create_mentor_profile;
mod update_mentor_profile;

pub use create_mentor_profile::{
    CreateMentorProfileCommand, CreateMentorProfileHandler, CreateMentorProfileResult,
};
pub use update_mentor_profile::{
    UpdateMentorProfileCommand, UpdateMentorProfileHandler, UpdateMentorProfileResult,
};
