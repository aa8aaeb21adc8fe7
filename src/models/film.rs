//! Film catalog models
//!
//! Film details cached by the catalog cache, and the recommendation
//! entries served per user.

use serde::{Deserialize, Serialize};

/// A film as served by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Film id
    pub id: u32,
    /// Title
    pub title: String,
    /// Synopsis shown on the detail page
    pub overview: String,
    /// Trailer video URL
    pub trailer_url: String,
    /// Year of release
    pub release_year: u16,
    /// Genre category
    pub category: String,
    /// Poster image URL
    pub image_url: String,
    /// Average user rating, None until the first rating lands
    pub average_rating: Option<f64>,
    /// Runtime in minutes
    pub duration: Option<u32>,
}

/// One personalized recommendation for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommended film id
    pub id: u32,
    /// Film title
    pub title: String,
    /// Genre the recommendation was drawn from
    pub genre: String,
    /// Short pitch for the film
    pub description: String,
}

impl Recommendation {
    /// Creates a new Recommendation
    pub fn new(
        id: u32,
        title: impl Into<String>,
        genre: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genre: genre.into(),
            description: description.into(),
        }
    }
}
