//! Application state and input handling for the two screens.
//!
//! The screens' fetch state lives in `cinenow-core`; this module adds what is
//! terminal-specific: which screen is showing, the card cursor, and the
//! generation bookkeeping that scopes in-flight fetches to the screen that
//! issued them. A completion whose generation no longer matches belongs to a
//! dismissed screen and is dropped instead of mutating state it doesn't own.

use cinenow_core::{Category, MovieDetailState, MovieListState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::fetch::{FetchMessage, FetchPayload, Fetcher};

/// Which screen is active.
#[derive(Debug)]
pub enum Screen {
    List,
    Detail(MovieDetailState),
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Position of the highlighted card on the list screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

pub struct App {
    pub screen: Screen,
    pub list: MovieListState,
    pub cursor: Cursor,
    fetcher: Fetcher,
    generation: u64,
}

impl App {
    /// Build the app and kick off the four category fetches.
    pub fn new(fetcher: Fetcher) -> Self {
        let mut app = Self {
            screen: Screen::List,
            list: MovieListState::new(),
            cursor: Cursor::default(),
            fetcher,
            generation: 0,
        };
        app.generation += 1;
        app.list.begin_all();
        for category in Category::ALL {
            app.fetcher.fetch_list(app.generation, category);
        }
        app
    }

    /// Apply a fetch completion, unless it belongs to a dismissed screen.
    pub fn on_fetch(&mut self, msg: FetchMessage) {
        if msg.generation != self.generation {
            tracing::debug!(
                generation = msg.generation,
                current = self.generation,
                "dropping completion from dismissed screen"
            );
            return;
        }
        match msg.payload {
            FetchPayload::List(category, result) => {
                if let Err(err) = &result {
                    tracing::warn!(category = category.path(), %err, "listing fetch failed");
                }
                self.list.finish(category, result);
                self.clamp_cursor();
            }
            FetchPayload::Movie(result) => {
                // A movie completion with the live generation implies the
                // detail screen is still up.
                if let Screen::Detail(detail) = &mut self.screen {
                    if let Err(err) = &result {
                        tracing::warn!(movie_id = detail.movie_id(), %err, "detail fetch failed");
                    }
                    detail.finish(result);
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match self.screen {
            Screen::List => self.handle_list_key(key.code),
            Screen::Detail(_) => self.handle_detail_key(key.code),
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter => {
                if let Some(id) = self.selected_movie_id() {
                    self.open_detail(id);
                }
            }
            KeyCode::Char('r') => self.retry_failed(),
            _ => {}
        }
        Action::Continue
    }

    fn handle_detail_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Esc | KeyCode::Backspace => self.close_detail(),
            KeyCode::Char('r') => {
                if let Screen::Detail(detail) = &mut self.screen {
                    if detail.state().is_failed() {
                        detail.begin();
                        self.fetcher.fetch_movie(self.generation, detail.movie_id());
                    }
                }
            }
            _ => {}
        }
        Action::Continue
    }

    /// Current screen activation; completions must match it to land.
    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Id of the movie under the cursor, if the highlighted slot holds one.
    pub fn selected_movie_id(&self) -> Option<u64> {
        let category = Category::ALL[self.cursor.row];
        self.list.movies(category).get(self.cursor.col).map(|m| m.id)
    }

    /// Navigate to the detail screen for `movie_id` and start its fetch.
    /// Bumping the generation orphans any listing fetches still in flight.
    fn open_detail(&mut self, movie_id: u64) {
        self.generation += 1;
        let mut detail = MovieDetailState::new(movie_id);
        detail.begin();
        self.fetcher.fetch_movie(self.generation, movie_id);
        self.screen = Screen::Detail(detail);
    }

    /// Return to the list. Loaded slices are kept; slices whose fetches were
    /// orphaned while the detail screen was up are re-issued.
    fn close_detail(&mut self) {
        self.generation += 1;
        self.screen = Screen::List;
        for category in Category::ALL {
            if self.list.slice(category).loaded().is_none() {
                self.list.begin(category);
                self.fetcher.fetch_list(self.generation, category);
            }
        }
    }

    /// Re-issue fetches for every failed category slice.
    fn retry_failed(&mut self) {
        for category in self.list.failed_categories() {
            self.list.begin(category);
            self.fetcher.fetch_list(self.generation, category);
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let rows = Category::ALL.len();
        let row = self.cursor.row.saturating_add_signed(d_row).min(rows - 1);
        let col = self.cursor.col.saturating_add_signed(d_col);
        self.cursor = Cursor { row, col };
        self.clamp_cursor();
    }

    /// Keep the column inside the current row's card count.
    fn clamp_cursor(&mut self) {
        let category = Category::ALL[self.cursor.row];
        let len = self.list.movies(category).len();
        self.cursor.col = self.cursor.col.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinenow_core::{CatalogClient, FetchError, Movie};
    use std::sync::mpsc;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: format!("overview of {title}"),
            poster_path: None,
        }
    }

    /// App wired to an unreachable host; tests drive state through
    /// `on_fetch` directly, so the orphaned worker threads are harmless.
    fn app() -> App {
        let client = CatalogClient::new("http://127.0.0.1:1", "test-key");
        // The receiver is dropped: worker sends go nowhere, which is fine
        // because these tests feed completions through `on_fetch` directly.
        let (tx, _rx) = mpsc::channel();
        App::new(Fetcher::new(client, tx))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app() -> App {
        let mut app = app();
        let generation = app.generation;
        app.on_fetch(FetchMessage {
            generation,
            payload: FetchPayload::List(
                Category::NowPlaying,
                Ok(vec![movie(41, "First"), movie(42, "Second")]),
            ),
        });
        app
    }

    #[test]
    fn new_app_starts_all_slices_loading() {
        let app = app();
        for category in Category::ALL {
            assert!(app.list.slice(category).is_loading());
        }
    }

    #[test]
    fn selecting_a_card_carries_its_id() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.selected_movie_id(), Some(42));

        app.handle_key(key(KeyCode::Enter));
        match &app.screen {
            Screen::Detail(detail) => assert_eq!(detail.movie_id(), 42),
            other => panic!("expected detail screen, got {other:?}"),
        }
    }

    #[test]
    fn enter_on_empty_slot_does_nothing() {
        let mut app = app();
        assert_eq!(app.selected_movie_id(), None);
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::List));
    }

    #[test]
    fn stale_generation_completion_is_dropped() {
        let mut app = loaded_app();
        let stale = app.generation;
        app.handle_key(key(KeyCode::Enter)); // to detail, bumps generation

        app.on_fetch(FetchMessage {
            generation: stale,
            payload: FetchPayload::List(Category::TopRated, Ok(vec![movie(9, "Late")])),
        });
        assert!(
            app.list.movies(Category::TopRated).is_empty(),
            "completion from a dismissed screen must not land"
        );
    }

    #[test]
    fn closing_detail_refetches_unsettled_slices() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Enter));
        let detail_generation = app.generation;
        app.handle_key(key(KeyCode::Esc));

        assert!(matches!(app.screen, Screen::List));
        assert!(app.generation > detail_generation);
        // NowPlaying was loaded and keeps its movies; the rest reload.
        assert_eq!(app.list.movies(Category::NowPlaying).len(), 2);
        for category in [Category::TopRated, Category::Popular, Category::Upcoming] {
            assert!(app.list.slice(category).is_loading());
        }
    }

    #[test]
    fn retry_reissues_only_failed_slices() {
        let mut app = loaded_app();
        let generation = app.generation;
        app.on_fetch(FetchMessage {
            generation,
            payload: FetchPayload::List(
                Category::Popular,
                Err(FetchError::Network("down".to_string())),
            ),
        });
        assert!(app.list.slice(Category::Popular).is_failed());

        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.list.slice(Category::Popular).is_loading());
        assert_eq!(app.list.movies(Category::NowPlaying).len(), 2);
    }

    #[test]
    fn failed_detail_shows_no_movie_and_retry_reloads() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Enter));
        let generation = app.generation;
        app.on_fetch(FetchMessage {
            generation,
            payload: FetchPayload::Movie(Err(FetchError::Network("down".to_string()))),
        });
        match &app.screen {
            Screen::Detail(detail) => {
                assert!(detail.movie().is_none());
                assert!(detail.state().is_failed());
            }
            other => panic!("expected detail screen, got {other:?}"),
        }

        app.handle_key(key(KeyCode::Char('r')));
        match &app.screen {
            Screen::Detail(detail) => assert!(detail.state().is_loading()),
            other => panic!("expected detail screen, got {other:?}"),
        }
    }

    #[test]
    fn cursor_clamps_to_row_contents() {
        let mut app = loaded_app();
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.cursor.col, 1, "two cards in the row");

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.cursor.row, 1);
        assert_eq!(app.cursor.col, 0, "empty row clamps the column");
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut app = loaded_app();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Action::Quit);
    }
}
