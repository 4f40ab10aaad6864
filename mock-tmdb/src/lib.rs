use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Category path segments the mock serves listings for.
pub const CATEGORIES: [&str; 4] = ["now_playing", "top_rated", "popular", "upcoming"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Deserialize)]
struct KeyedQuery {
    #[serde(default)]
    api_key: String,
}

/// Read-only catalog the mock serves: per-category listings plus an id index.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    listings: HashMap<String, Vec<Movie>>,
    by_id: HashMap<u64, Movie>,
}

impl Catalog {
    /// Register one category's listing; every movie also becomes reachable
    /// via single-movie lookup.
    pub fn insert_listing(&mut self, category: &str, movies: Vec<Movie>) {
        for movie in &movies {
            self.by_id.insert(movie.id, movie.clone());
        }
        self.listings.insert(category.to_string(), movies);
    }
}

/// The fixed catalog the default `app()` serves. Each category gets a few
/// entries, one of them without poster art.
pub fn sample_catalog() -> Catalog {
    fn movie(id: u64, title: &str, overview: &str, poster: Option<&str>) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: overview.to_string(),
            poster_path: poster.map(str::to_string),
        }
    }

    let mut catalog = Catalog::default();
    catalog.insert_listing(
        "now_playing",
        vec![
            movie(101, "Glass Harbor", "A salvage crew finds a city under the ice.", Some("/glass-harbor.jpg")),
            movie(102, "Last Reel", "A projectionist refuses to close the town cinema.", Some("/last-reel.jpg")),
            movie(103, "Night Ferry", "Two strangers share the final crossing of the year.", None),
        ],
    );
    catalog.insert_listing(
        "top_rated",
        vec![
            movie(201, "The Cartographer", "Mapping a country that keeps moving.", Some("/cartographer.jpg")),
            movie(202, "Winter Orchard", "Three sisters inherit a frozen farm.", Some("/winter-orchard.jpg")),
        ],
    );
    catalog.insert_listing(
        "popular",
        vec![
            movie(301, "Signal Fire", "A lighthouse keeper answers a call nobody sent.", Some("/signal-fire.jpg")),
            movie(302, "Paper Planets", "An astronomer fakes a discovery and regrets it.", Some("/paper-planets.jpg")),
            movie(303, "Borrowed Time", "A watchmaker repairs more than watches.", Some("/borrowed-time.jpg")),
        ],
    );
    catalog.insert_listing(
        "upcoming",
        vec![
            movie(401, "Static", "The last radio station on the coast goes silent.", Some("/static.jpg")),
            movie(402, "Early Thaw", "Spring arrives two months early and nobody knows why.", None),
        ],
    );
    catalog
}

pub type Db = Arc<Catalog>;

/// Router serving the fixed sample catalog.
pub fn app() -> Router {
    app_with(sample_catalog())
}

/// Router serving a custom catalog; used by tests that need a known seed.
pub fn app_with(catalog: Catalog) -> Router {
    // Category listings and single-movie lookup share the `/movie/{key}` path
    // shape on the real API, so one handler dispatches on the key.
    Router::new()
        .route("/movie/{key}", get(movie_or_listing))
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn movie_or_listing(
    State(db): State<Db>,
    Path(key): Path<String>,
    Query(query): Query<KeyedQuery>,
) -> Response {
    if query.api_key.is_empty() {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if let Some(results) = db.listings.get(&key) {
        let page = MoviePage {
            page: 1,
            results: results.clone(),
            total_pages: 1,
            total_results: results.len() as u32,
        };
        return Json(page).into_response();
    }

    match key.parse::<u64>() {
        Ok(id) => match db.by_id.get(&id) {
            Some(movie) => Json(movie.clone()).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
