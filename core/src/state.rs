//! Pure screen state for the list and detail views.
//!
//! # Design
//! Each screen owns exactly one state container and is its only writer.
//! Fetch results arrive as plain `Result` values; the state machines never
//! perform I/O, so every transition is deterministic and directly testable.
//! A category slice is replaced wholesale when its fetch completes — there is
//! no partial merging, and completion order across categories is immaterial.

use crate::category::Category;
use crate::error::FetchError;
use crate::types::Movie;

/// Lifecycle of a single fetch: `Idle → Loading → {Loaded | Failed}`.
///
/// `begin` is legal from every state; re-entering `Loading` from `Failed` is
/// the retry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Transition to `Loading`, discarding any previous outcome.
    pub fn begin(&mut self) {
        *self = FetchState::Loading;
    }

    /// Record a fetch outcome.
    pub fn finish(&mut self, result: Result<T, FetchError>) {
        *self = match result {
            Ok(value) => FetchState::Loaded(value),
            Err(err) => FetchState::Failed(err.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    /// The loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// State behind the list screen: one fetch slice per category.
///
/// `finish` is the single update entry point for a slice, which keeps the
/// single-writer rule visible in the API.
#[derive(Debug, Clone, Default)]
pub struct MovieListState {
    slices: [FetchState<Vec<Movie>>; 4],
}

impl MovieListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every category as loading, as on screen activation.
    pub fn begin_all(&mut self) {
        for category in Category::ALL {
            self.begin(category);
        }
    }

    pub fn begin(&mut self, category: Category) {
        self.slices[category.index()].begin();
    }

    pub fn finish(&mut self, category: Category, result: Result<Vec<Movie>, FetchError>) {
        self.slices[category.index()].finish(result);
    }

    pub fn slice(&self, category: Category) -> &FetchState<Vec<Movie>> {
        &self.slices[category.index()]
    }

    /// The loaded movies for a category; empty unless that slice is `Loaded`.
    pub fn movies(&self, category: Category) -> &[Movie] {
        self.slice(category).loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories currently in `Failed`, in display order.
    pub fn failed_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.slice(*c).is_failed())
            .collect()
    }

    /// True once no slice is still idle or loading.
    pub fn is_settled(&self) -> bool {
        self.slices
            .iter()
            .all(|s| !matches!(s, FetchState::Idle | FetchState::Loading))
    }
}

/// State behind the detail screen: one fetch for one movie id.
#[derive(Debug, Clone)]
pub struct MovieDetailState {
    movie_id: u64,
    state: FetchState<Movie>,
}

impl MovieDetailState {
    pub fn new(movie_id: u64) -> Self {
        Self {
            movie_id,
            state: FetchState::Idle,
        }
    }

    pub fn movie_id(&self) -> u64 {
        self.movie_id
    }

    pub fn begin(&mut self) {
        self.state.begin();
    }

    pub fn finish(&mut self, result: Result<Movie, FetchError>) {
        self.state.finish(result);
    }

    /// The fetched movie; `None` while loading and after a failure, so a
    /// failed fetch renders no title, poster or synopsis.
    pub fn movie(&self) -> Option<&Movie> {
        self.state.loaded()
    }

    pub fn state(&self) -> &FetchState<Movie> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: format!("overview of {title}"),
            poster_path: Some(format!("/{id}.jpg")),
        }
    }

    #[test]
    fn begin_all_marks_every_slice_loading() {
        let mut state = MovieListState::new();
        state.begin_all();
        for category in Category::ALL {
            assert!(state.slice(category).is_loading());
        }
        assert!(!state.is_settled());
    }

    #[test]
    fn slices_settle_independently_of_completion_order() {
        // Deliver the four responses in an order unrelated to display order;
        // each slice must end up holding exactly its own response.
        let mut state = MovieListState::new();
        state.begin_all();

        let responses = [
            (Category::Upcoming, vec![movie(4, "Up")]),
            (Category::NowPlaying, vec![movie(1, "Now"), movie(5, "Also Now")]),
            (Category::Popular, vec![movie(3, "Pop")]),
            (Category::TopRated, vec![movie(2, "Top")]),
        ];
        for (category, movies) in responses.clone() {
            state.finish(category, Ok(movies));
        }

        assert!(state.is_settled());
        for (category, movies) in responses {
            assert_eq!(state.movies(category), movies.as_slice());
        }
    }

    #[test]
    fn one_failure_does_not_touch_other_slices() {
        let mut state = MovieListState::new();
        state.begin_all();
        state.finish(Category::NowPlaying, Ok(vec![movie(1, "Now")]));
        state.finish(
            Category::TopRated,
            Err(FetchError::Network("connection refused".to_string())),
        );

        assert_eq!(state.movies(Category::NowPlaying).len(), 1);
        assert!(state.slice(Category::TopRated).is_failed());
        assert_eq!(state.failed_categories(), vec![Category::TopRated]);
        assert!(state.slice(Category::Popular).is_loading());
    }

    #[test]
    fn movies_is_empty_unless_loaded() {
        let mut state = MovieListState::new();
        assert!(state.movies(Category::Popular).is_empty());
        state.begin(Category::Popular);
        assert!(state.movies(Category::Popular).is_empty());
        state.finish(Category::Popular, Err(FetchError::Network("down".to_string())));
        assert!(state.movies(Category::Popular).is_empty());
    }

    #[test]
    fn retry_transitions_failed_back_through_loading() {
        let mut slice: FetchState<Vec<Movie>> = FetchState::Idle;
        slice.begin();
        slice.finish(Err(FetchError::Api(ApiError::Request {
            status: 500,
            body: "boom".to_string(),
        })));
        assert!(slice.is_failed());

        slice.begin();
        assert!(slice.is_loading());
        slice.finish(Ok(vec![movie(9, "Recovered")]));
        assert_eq!(slice.loaded().unwrap().len(), 1);
    }

    #[test]
    fn failed_detail_fetch_renders_nothing() {
        let mut detail = MovieDetailState::new(42);
        detail.begin();
        detail.finish(Err(FetchError::Api(ApiError::Request {
            status: 404,
            body: String::new(),
        })));

        assert!(detail.movie().is_none());
        assert!(detail.state().is_failed());
        assert_eq!(detail.movie_id(), 42);
    }

    #[test]
    fn detail_fetch_success_exposes_movie() {
        let mut detail = MovieDetailState::new(42);
        detail.begin();
        assert!(detail.movie().is_none());
        detail.finish(Ok(movie(42, "The Answer")));
        assert_eq!(detail.movie().unwrap().id, 42);
    }

    #[test]
    fn failure_message_is_preserved_for_display() {
        let mut slice: FetchState<Vec<Movie>> = FetchState::Idle;
        slice.begin();
        slice.finish(Err(FetchError::Network("timed out".to_string())));
        assert_eq!(slice.failure(), Some("network error: timed out"));
    }
}
