//! API Client Module
//!
//! Outbound HTTP layer for the film app API. Builds typed requests for
//! the endpoints the services cache and maps transport, status, and
//! decode failures into the fetch error taxonomy.
//!
//! # Endpoints
//! - `GET /api/auth/user` - The signed-in user, wrapped in a `user` envelope
//! - `GET /api/recommendations?userId=` - Personalized recommendations
//! - `GET /api/watchlist?userId=` - A user's watchlist rows

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::{Recommendation, SessionUser, WatchlistEntry};

/// Body shape of API error responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Envelope around the auth endpoint's user payload
#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: SessionUser,
}

// == Api Client ==
/// HTTP client for the film app API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    // == Constructors ==
    /// Creates a client against the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Origin of the film app API, with or without a
    ///   trailing slash
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("reel-cache/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.api_base_url.as_str())
    }

    // == Endpoints ==
    /// Fetches the signed-in user from the auth endpoint.
    pub async fn session_user(&self) -> FetchResult<SessionUser> {
        let envelope: UserEnvelope = self.get_json("/api/auth/user", &[]).await?;
        Ok(envelope.user)
    }

    /// Fetches personalized recommendations for a user.
    pub async fn recommendations(&self, user_id: &str) -> FetchResult<Vec<Recommendation>> {
        self.get_json("/api/recommendations", &[("userId", user_id)])
            .await
    }

    /// Fetches a user's watchlist rows.
    pub async fn watchlist(&self, user_id: &str) -> FetchResult<Vec<WatchlistEntry>> {
        self.get_json("/api/watchlist", &[("userId", user_id)])
            .await
    }

    // == Request Helper ==
    /// GETs a JSON payload from `path` with the given query pairs.
    ///
    /// Non-success statuses become [`FetchError::Status`], carrying the
    /// API's `{"error": ...}` envelope message when the body has one.
    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
                .map(|body| body.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });

            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    // == Accessors ==
    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
