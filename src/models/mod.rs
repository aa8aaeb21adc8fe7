//! Typed payload models for the film app API
//!
//! This module defines the data shapes exchanged with the API: session
//! users, films and recommendations, and watchlist state. Field names
//! follow the API's camelCase wire format.

pub mod film;
pub mod user;
pub mod watchlist;

// Re-export commonly used types
pub use film::{Film, Recommendation};
pub use user::{SessionUser, UserRole};
pub use watchlist::{WatchlistEntry, WatchlistStatus};
