use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_tmdb::{app, app_with, Catalog, Movie, MoviePage, CATEGORIES};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- listings ---

#[tokio::test]
async fn every_category_listing_is_served() {
    for category in CATEGORIES {
        let app = app();
        let resp = app
            .oneshot(get(&format!("/movie/{category}?api_key=test-key")))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK, "{category}");
        let page: MoviePage = body_json(resp).await;
        assert!(!page.results.is_empty(), "{category} listing is empty");
        assert_eq!(page.page, 1);
    }
}

#[tokio::test]
async fn listing_reflects_seeded_catalog() {
    let mut catalog = Catalog::default();
    catalog.insert_listing(
        "popular",
        vec![Movie {
            id: 42,
            title: "The Answer".to_string(),
            overview: "Everything.".to_string(),
            poster_path: None,
        }],
    );

    let resp = app_with(catalog)
        .oneshot(get("/movie/popular?api_key=test-key"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: MoviePage = body_json(resp).await;
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].id, 42);
    assert!(page.results[0].poster_path.is_none());
}

// --- api key enforcement ---

#[tokio::test]
async fn missing_api_key_returns_401() {
    let resp = app().oneshot(get("/movie/popular")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_api_key_returns_401() {
    let resp = app().oneshot(get("/movie/popular?api_key=")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- single movie lookup ---

#[tokio::test]
async fn listed_movie_is_fetchable_by_id() {
    let app_listing = app();
    let resp = app_listing
        .oneshot(get("/movie/now_playing?api_key=test-key"))
        .await
        .unwrap();
    let page: MoviePage = body_json(resp).await;
    let first = page.results[0].clone();

    let resp = app()
        .oneshot(get(&format!("/movie/{}?api_key=test-key", first.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let movie: Movie = body_json(resp).await;
    assert_eq!(movie, first);
}

#[tokio::test]
async fn unknown_movie_id_returns_404() {
    let resp = app()
        .oneshot(get("/movie/999999?api_key=test-key"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn garbage_key_returns_400() {
    let resp = app()
        .oneshot(get("/movie/not-a-category?api_key=test-key"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
