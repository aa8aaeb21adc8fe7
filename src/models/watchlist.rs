//! Watchlist models
//!
//! A user's saved films and the per-film membership status shown on
//! detail pages.

use serde::{Deserialize, Serialize};

/// One row of a user's watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    /// Watchlist row id
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Saved film id
    pub movie_id: u32,
    /// Whether the user starred this film
    pub is_favorite: bool,
}

/// Whether a film sits on the user's watchlist, and under which row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistStatus {
    /// True if the film is on the watchlist
    pub in_watchlist: bool,
    /// Id of the watchlist row, when present
    pub watch_list_id: Option<String>,
}

impl WatchlistStatus {
    /// Status for a film that is on the watchlist.
    pub fn listed(watch_list_id: impl Into<String>) -> Self {
        Self {
            in_watchlist: true,
            watch_list_id: Some(watch_list_id.into()),
        }
    }

    /// Status for a film that is not on the watchlist.
    pub fn not_listed() -> Self {
        Self {
            in_watchlist: false,
            watch_list_id: None,
        }
    }
}
