//! Synchronous client core for the CineNow movie catalog.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `CatalogClient` is stateless — it holds only `base_url` and `api_key`.
//! - Each catalog operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Screen state (`MovieListState`, `MovieDetailState`) lives here too: it
//!   consumes fetch results as plain `Result` values and never performs I/O,
//!   so every transition is directly testable.
//! - DTOs are defined independently from the mock-tmdb crate; integration
//!   tests catch schema drift.

pub mod category;
pub mod client;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use category::Category;
pub use client::CatalogClient;
pub use error::{ApiError, FetchError};
pub use http::{HttpRequest, HttpResponse};
pub use state::{FetchState, MovieDetailState, MovieListState};
pub use types::{Movie, MoviePage, POSTER_BASE_URL};
