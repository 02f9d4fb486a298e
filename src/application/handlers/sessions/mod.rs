//! Session query handlers.
//!
//! ## Queries
//! - Get one session (participants and admins)
//! - List the acting user's sessions with an optional status filter

mod get_session;
mod list_sessions;

pub use get_session::{GetSessionHandler, GetSessionQuery, GetSessionResult};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery, ListSessionsResult};
