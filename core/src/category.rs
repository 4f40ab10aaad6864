//! The four fixed catalog groupings.

/// One of the four movie groupings exposed by the catalog API.
///
/// The set is fixed by the API; `ALL` gives the display order used by the
/// list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    NowPlaying,
    TopRated,
    Popular,
    Upcoming,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::NowPlaying,
        Category::TopRated,
        Category::Popular,
        Category::Upcoming,
    ];

    /// Path segment under `/movie/` on the remote API.
    pub fn path(self) -> &'static str {
        match self {
            Category::NowPlaying => "now_playing",
            Category::TopRated => "top_rated",
            Category::Popular => "popular",
            Category::Upcoming => "upcoming",
        }
    }

    /// Human-readable row label.
    pub fn label(self) -> &'static str {
        match self {
            Category::NowPlaying => "Now Playing",
            Category::TopRated => "Top Rated",
            Category::Popular => "Popular",
            Category::Upcoming => "Upcoming",
        }
    }

    /// Stable index into per-category storage.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
