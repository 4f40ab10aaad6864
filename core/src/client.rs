//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and `api_key` and carries no
//! mutable state between calls. Each catalog operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the actual HTTP
//! round-trip, keeping the core deterministic and free of I/O dependencies.

use crate::category::Category;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Movie, MoviePage};

/// Synchronous, stateless client for the movie catalog API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    api_key: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Request for one category's listing, e.g. `/movie/now_playing`.
    pub fn build_list(&self, category: Category) -> HttpRequest {
        HttpRequest {
            url: format!(
                "{}/movie/{}?api_key={}",
                self.base_url,
                category.path(),
                self.api_key
            ),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Request for a single movie by id.
    pub fn build_movie(&self, id: u64) -> HttpRequest {
        HttpRequest {
            url: format!("{}/movie/{id}?api_key={}", self.base_url, self.api_key),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Parse a category listing response, unwrapping the page envelope.
    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Movie>, ApiError> {
        check_status(&response)?;
        let page: MoviePage =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(page.results)
    }

    /// Parse a single-movie response.
    pub fn parse_movie(&self, response: HttpResponse) -> Result<Movie, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Map non-success status codes to `ApiError::Request`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::Request {
        status: response.status,
        body: response.body.clone(),
    })
}
