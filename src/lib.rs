//! # Eddy
//!
//! A terminal dashboard for ranked news stories.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Decoder → Builder → Dashboard → UI
//! ```
//!
//! - [`fetcher`]: concurrent HTTP GETs that return bodies in request order
//! - [`decoder`]: JSON ranking API and RSS payloads into [`domain::Post`]s
//! - [`builder`]: all-or-nothing assembly of a [`domain::PostList`]
//! - [`tui`]: the selection/filter state machine and its ratatui front end
//!
//! ## Quick Start
//!
//! ```bash
//! # Top stories from the JSON API
//! eddy
//!
//! # Same filters, read from RSS instead
//! eddy --format syndication
//! ```

/// Application context and error types.
///
/// [`AppContext`](app::AppContext) wires the builder, the browser opener and
/// the per-filter URLs together from a [`Config`](config::Config).
pub mod app;

/// Opening article and discussion links in a browser.
pub mod browser;

/// Turns a filter URL into a complete list of posts or an error.
pub mod builder;

/// Command-line flags.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/eddy/config.toml`, supporting:
/// - Feed format, endpoints and fetch tuning
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

pub mod decoder;

/// Core domain models.
///
/// - [`Post`](domain::Post): one story
/// - [`PostList`](domain::PostList): a ranked batch of stories
/// - [`Filter`](domain::Filter): front page, best or newest
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single GET
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Concurrent batches with a semaphore
pub mod fetcher;

/// Terminal user interface.
///
/// A ranked story list with a key help pane on the right, the filter bar
/// and a status line below. Keybindings: j/k move, o opens the article,
/// c opens the discussion, f/b/n switch filter, q quits.
pub mod tui;
