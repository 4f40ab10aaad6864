//! Domain DTOs for the catalog API.
//!
//! # Design
//! These types mirror the mock server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. Fields
//! use owned types so values can move freely between the fetch threads and
//! screen state.

use serde::{Deserialize, Serialize};

/// Base URL every relative poster path is resolved against.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w300";

/// A single catalog entry returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub overview: String,
    /// Relative poster path; entries without artwork omit the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}

impl Movie {
    /// Full poster URL: base URL plus the relative path, or the base URL
    /// alone (no trailing artifact) when the entry has no poster.
    pub fn poster_url(&self) -> String {
        format!("{POSTER_BASE_URL}{}", self.poster_path.as_deref().unwrap_or(""))
    }
}

/// Listing envelope wrapping one category's results.
///
/// Only `results` is consumed by the screens; the paging fields are carried
/// because the remote API always sends them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<Movie>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

fn default_total_pages() -> u32 {
    1
}
