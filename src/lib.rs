//! Marquee: the client core of a movie catalog browser.
//!
//! Marquee talks to a movie catalog REST service and provides:
//! - A keyed query cache with request coalescing and tag-based invalidation
//! - A home page of per-genre carousels with filters
//! - Debounced, fuzzy-highlighted search grouped by genre
//! - Infinite-scroll genre pages driven by a visibility sentinel
//! - Admin create/edit/delete of movies and public reviews
//! - Optional OpenTelemetry span export to a rotating JSON-lines file

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, action dispatching               │
//! │  - Admin/edit context, view model computation       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Feature state │   │ Worker Layer  │
//! │ (ui/)         │   │ search/       │   │ (worker/)     │
//! │ - View models │   │ pagination/   │   │ - Query mount │
//! │ - Text render │   │               │   │ - Writes      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Query cache (query/) → Backend (api/)              │
//! │  - Tags, coalescing, refetch of mounted keys        │
//! │  - HTTP via reqwest, in-memory backend for tests    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), paths (infrastructure/),         │
//! │  tracing (observability/)                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Settings come from `config.toml` in the platform config directory (or
//! `--config`), then `MARQUEE_*` environment variables override them:
//!
//! ```toml
//! api_url = "http://localhost:8000"
//! request_timeout_secs = 30
//! limit_per_genre = 10
//! debounce_ms = 300
//! admin = true
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use marquee::{build_runtime, ui, Config, Event};
//!
//! # async fn demo() -> marquee::Result<()> {
//! let config = Config::load(None)?;
//! let mut runtime = build_runtime(&config)?;
//! runtime.dispatch(Event::ShowHome(None)).await?;
//! println!("{}", ui::render(runtime.state(), 100));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod pagination;
pub mod query;
pub mod search;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Runtime, View};
pub use domain::{MarqueeError, Result};

use api::{CatalogBackend, HttpBackend};
use pagination::{SentinelObserver, DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD};
use query::CatalogClient;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use worker::CatalogWorker;

/// Client configuration.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the catalog service. Default: `http://localhost:8000`
    pub api_url: String,

    /// Per-request timeout in seconds. Default: 30
    pub request_timeout_secs: u64,

    /// Movies per carousel on the home page. Default: 10
    pub limit_per_genre: u32,

    /// Quiet period before a search term is committed. Default: 300
    pub debounce_ms: u64,

    /// How far below the viewport the next page starts loading. Default: 100
    pub sentinel_margin_px: f64,

    /// Whether edit and delete controls are shown. Default: `true`
    pub admin: bool,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`.
    pub trace_level: Option<String>,

    /// Export spans as JSON lines to this file when set.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: api::DEFAULT_API_URL.to_string(),
            request_timeout_secs: api::DEFAULT_TIMEOUT.as_secs(),
            limit_per_genre: app::state::DEFAULT_LIMIT_PER_GENRE,
            debounce_ms: 300,
            sentinel_margin_px: DEFAULT_ROOT_MARGIN,
            admin: true,
            trace_level: None,
            trace_file: None,
        }
    }
}

fn parse_or<T: FromStr + Copy>(name: &str, raw: Option<String>, current: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(variable = name, value = %raw, "ignoring unparsable setting");
            current
        }),
        None => current,
    }
}

fn parse_flag(name: &str, raw: Option<String>, current: bool) -> bool {
    match raw.as_deref().map(str::trim) {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        Some(other) => {
            tracing::debug!(variable = name, value = other, "ignoring unparsable flag");
            current
        }
        None => current,
    }
}

impl Config {
    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Io`] when the file can't be read and
    /// [`MarqueeError::Config`] when it isn't valid TOML for this struct.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| MarqueeError::Config(format!("{}: {e}", path.display())))
    }

    /// Overrides fields from `MARQUEE_*` variables looked up through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marquee::Config;
    ///
    /// let config = Config::default().apply_env(|name| match name {
    ///     "MARQUEE_LIMIT_PER_GENRE" => Some("4".to_string()),
    ///     "MARQUEE_ADMIN" => Some("false".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.limit_per_genre, 4);
    /// assert!(!config.admin);
    /// ```
    #[must_use]
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("MARQUEE_API_URL").filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        self.request_timeout_secs = parse_or(
            "MARQUEE_TIMEOUT_SECS",
            lookup("MARQUEE_TIMEOUT_SECS"),
            self.request_timeout_secs,
        );
        self.limit_per_genre = parse_or(
            "MARQUEE_LIMIT_PER_GENRE",
            lookup("MARQUEE_LIMIT_PER_GENRE"),
            self.limit_per_genre,
        );
        self.debounce_ms = parse_or(
            "MARQUEE_DEBOUNCE_MS",
            lookup("MARQUEE_DEBOUNCE_MS"),
            self.debounce_ms,
        );
        self.sentinel_margin_px = parse_or(
            "MARQUEE_SENTINEL_MARGIN",
            lookup("MARQUEE_SENTINEL_MARGIN"),
            self.sentinel_margin_px,
        );
        self.admin = parse_flag("MARQUEE_ADMIN", lookup("MARQUEE_ADMIN"), self.admin);
        if let Some(level) = lookup("MARQUEE_TRACE_LEVEL") {
            self.trace_level = Some(level);
        }
        if let Some(file) = lookup("MARQUEE_TRACE_FILE") {
            self.trace_file = Some(PathBuf::from(file));
        }
        self
    }

    /// Loads the effective configuration.
    ///
    /// With `path`, that file must exist. Without it, the default config file
    /// is read if present. Environment variables are applied last.
    ///
    /// # Errors
    ///
    /// Propagates [`Config::from_file`] failures.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => match infrastructure::default_config_file() {
                Some(default) if default.is_file() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        Ok(base.apply_env(|name| std::env::var(name).ok()))
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Creates the initial application state.
///
/// # Example
///
/// ```rust
/// use marquee::{initialize, Config, View};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.view, View::Home);
/// assert_eq!(state.limit_per_genre(), 10);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        limit_per_genre = config.limit_per_genre,
        admin = config.admin,
        "initializing marquee"
    );
    let mut state = AppState::new(config.limit_per_genre, config.debounce(), config.admin);
    state.observer = SentinelObserver::new(config.sentinel_margin_px, DEFAULT_THRESHOLD);
    state
}

/// Wires state and worker around an arbitrary backend.
#[must_use]
pub fn runtime_with_backend(config: &Config, backend: Arc<dyn CatalogBackend>) -> Runtime {
    let worker = CatalogWorker::new(CatalogClient::new(backend));
    Runtime::new(initialize(config), worker)
}

/// Builds a runtime talking HTTP to `config.api_url`.
///
/// # Errors
///
/// Returns [`MarqueeError::Config`] when the URL is invalid or the HTTP
/// client can't be created.
pub fn build_runtime(config: &Config) -> Result<Runtime> {
    let backend = HttpBackend::new(&config.api_url, config.request_timeout())?;
    tracing::debug!(api_url = %backend.base_url(), "using http backend");
    Ok(runtime_with_backend(config, Arc::new(backend)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str("limit_per_genre = 6\nadmin = false").unwrap();
        assert_eq!(config.limit_per_genre, 6);
        assert!(!config.admin);
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn env_overrides_and_bad_values_are_ignored() {
        let config = Config::default().apply_env(env(&[
            ("MARQUEE_API_URL", "http://catalog.test"),
            ("MARQUEE_DEBOUNCE_MS", "fast"),
            ("MARQUEE_ADMIN", "maybe"),
            ("MARQUEE_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.api_url, "http://catalog.test");
        assert_eq!(config.debounce_ms, 300);
        assert!(config.admin);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn unknown_file_reports_io_error() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, MarqueeError::Io(_)));
    }

    #[test]
    fn initialize_applies_sentinel_margin() {
        let config = Config {
            sentinel_margin_px: 0.0,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.observer, SentinelObserver::new(0.0, DEFAULT_THRESHOLD));
    }

    #[test]
    fn bad_api_url_is_a_config_error() {
        let config = Config {
            api_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(build_runtime(&config), Err(MarqueeError::Config(_))));
    }
}
