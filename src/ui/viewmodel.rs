//! View models representing renderable page state.
//!
//! View models are computed by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel) and
//! consumed by the renderer. They hold display-ready data only: highlight
//! ranges are already computed, admin affordances already decided, and loading
//! or empty states already resolved into a [`Body`] variant.
//!
//! # Example
//!
//! ```rust
//! use marquee::ui::viewmodel::{Body, HeaderInfo, ViewModel};
//!
//! let vm = ViewModel {
//!     header: HeaderInfo { title: "Marquee".to_string(), admin: true, search: None },
//!     notice: None,
//!     body: Body::Loading("Loading movies...".to_string()),
//!     form: None,
//!     confirm_delete: None,
//! };
//! assert!(vm.form.is_none());
//! ```

/// Complete view model for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub header: HeaderInfo,

    /// One-line outcome of the last write (saved, deleted, failed).
    pub notice: Option<String>,

    pub body: Body,

    /// Add/edit form, when open.
    pub form: Option<FormView>,

    /// Delete confirmation, when requested.
    pub confirm_delete: Option<ConfirmView>,
}

/// Page heading plus the admin badge and search box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub admin: bool,
    /// Raw search input; `None` outside the home page.
    pub search: Option<String>,
}

/// Main content of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Initial load with nothing to show yet.
    Loading(String),

    /// The page's read failed.
    Failed {
        message: String,
        not_found: bool,
    },

    /// Home carousels. Empty categories are already dropped.
    Home(Vec<CarouselRow>),

    /// Nothing in the catalog at all.
    Empty(String),

    Search(SearchView),
    Grid(GridView),
    Movie(Box<MovieDetailView>),
    Person(PersonView),
    List(ListView),
}

/// One movie as a card.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub release_year: i32,
    pub genre: String,
    pub director: String,
    pub rating: Option<f64>,
    pub blurb: String,

    /// Title character ranges matched by the search term.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Whether edit and delete buttons are shown.
    pub show_admin_actions: bool,
}

/// A genre carousel on the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselRow {
    pub genre_name: String,
    pub movie_count: u32,
    pub cards: Vec<MovieCard>,
    pub show_left_arrow: bool,
    pub show_right_arrow: bool,
}

/// Search overlay state.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    /// Debounce window still open.
    Pending { term: String },
    Searching { term: String },
    Results { term: String, groups: Vec<SearchGroup> },
    NoResults { term: String },
    Failed { term: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchGroup {
    pub genre_name: String,
    pub cards: Vec<MovieCard>,
}

/// Infinite-scroll genre grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub genre: String,
    pub cards: Vec<MovieCard>,
    /// `(loaded, total)` once the first page arrived.
    pub progress: Option<(usize, u32)>,
    pub loading_more: bool,
    /// "You've reached the end" line; only once something was loaded.
    pub end_message: Option<String>,
    /// Shown in place of the grid when the genre is empty.
    pub empty_message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailView {
    pub card: MovieCard,
    pub description: Option<String>,
    pub language: Option<String>,
    pub cast: Vec<CastLine>,
    /// `None` while reviews are loading or after they failed to load.
    pub reviews: Option<Vec<ReviewLine>>,
    /// Load failure of the review list; the rest of the page is unaffected.
    pub reviews_error: Option<String>,
    pub review_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastLine {
    pub actor_id: i64,
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewLine {
    pub reviewer_name: String,
    pub rating: f64,
    pub comment: Option<String>,
    pub date: String,
}

/// Actor or director page.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonView {
    pub name: String,
    pub bio: Option<String>,
    pub birth_year: Option<i32>,
    pub filmography: Vec<MovieCard>,
}

/// Plain listing of actors, directors or genres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub items: Vec<ListItem>,
    pub empty_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: i64,
    pub name: String,
    pub detail: Option<String>,
}

/// Add or edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    /// "Add Movie" or "Edit Movie".
    pub heading: String,
    pub fields: Vec<(String, String)>,
    pub error: Option<String>,
    pub submitting: bool,
}

/// Delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmView {
    pub title: String,
    pub subtitle: String,
    pub director: String,
    pub deleting: bool,
}
