//! Configuration management for Eddy.
//!
//! Configuration is read from `~/.config/eddy/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::builder::DEFAULT_BATCH_SIZE;
use crate::decoder::DEFAULT_DISCUSSION_URL;
use crate::domain::{FeedFormat, Filter, FilterUrls};
use crate::fetcher::parallel::DEFAULT_WORKERS;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub browser: BrowserConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Where stories come from and how they are fetched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub format: FeedFormat,
    pub batch_size: usize,
    pub api_base: String,
    /// `{id}` is replaced with the story id.
    pub discussion_url: String,
    pub request_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub workers: usize,
    pub batch_deadline_secs: Option<u64>,
    pub endpoints: EndpointTable,
    pub rss: RssTable,
}

/// Ranking endpoint name per filter, resolved as `<api_base>/<name>.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointTable {
    pub front: String,
    pub best: String,
    pub newest: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            front: "topstories".to_string(),
            best: "beststories".to_string(),
            newest: "newstories".to_string(),
        }
    }
}

/// Syndication feed URL per filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RssTable {
    pub front: String,
    pub best: String,
    pub newest: String,
}

impl Default for RssTable {
    fn default() -> Self {
        Self {
            front: "https://hnrss.org/frontpage".to_string(),
            best: "https://hnrss.org/best".to_string(),
            newest: "https://hnrss.org/newest".to_string(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            format: FeedFormat::Ranking,
            batch_size: DEFAULT_BATCH_SIZE,
            api_base: "https://hacker-news.firebaseio.com/v0".to_string(),
            discussion_url: DEFAULT_DISCUSSION_URL.to_string(),
            request_timeout_secs: 10,
            poll_interval_ms: 1000,
            workers: DEFAULT_WORKERS,
            batch_deadline_secs: None,
            endpoints: EndpointTable::default(),
            rss: RssTable::default(),
        }
    }
}

impl FeedConfig {
    /// Resolve the source URL of every filter for the configured format.
    pub fn filter_urls(&self) -> Result<FilterUrls, ConfigError> {
        let resolve = |filter: Filter| -> Result<String, ConfigError> {
            let url = match self.format {
                FeedFormat::Ranking => {
                    let endpoint = match filter {
                        Filter::Front => &self.endpoints.front,
                        Filter::Best => &self.endpoints.best,
                        Filter::Newest => &self.endpoints.newest,
                    };
                    format!("{}/{}.json", self.api_base.trim_end_matches('/'), endpoint)
                }
                FeedFormat::Syndication => match filter {
                    Filter::Front => self.rss.front.clone(),
                    Filter::Best => self.rss.best.clone(),
                    Filter::Newest => self.rss.newest.clone(),
                },
            };
            url::Url::parse(&url).map_err(|source| ConfigError::InvalidUrl {
                url: url.clone(),
                source,
            })?;
            Ok(url)
        };

        Ok(FilterUrls {
            front: resolve(Filter::Front)?,
            best: resolve(Filter::Best)?,
            newest: resolve(Filter::Newest)?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn batch_deadline(&self) -> Option<Duration> {
        self.batch_deadline_secs.map(Duration::from_secs)
    }
}

/// How links are opened.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Program to launch instead of the system default, e.g. `"firefox"`.
    pub command: Option<String>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/eddy/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("eddy").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Eddy Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[feed]
# "ranking" (JSON id list + one JSON object per story) or "syndication" (RSS)
format = "ranking"

# Stories shown at once
batch_size = 30

# Ranking API: <api_base>/<endpoint>.json and <api_base>/item/<id>.json
api_base = "https://hacker-news.firebaseio.com/v0"

# Discussion page; used when a story has no article link
discussion_url = "https://news.ycombinator.com/item?id={id}"

# Per-request timeout in seconds
request_timeout_secs = 10

# How often a waiting batch logs progress, in milliseconds
poll_interval_ms = 1000

# Concurrent requests per batch
workers = 30

# Give up on a whole batch after this many seconds (unset = wait forever)
# batch_deadline_secs = 60

[feed.endpoints]
front = "topstories"
best = "beststories"
newest = "newstories"

[feed.rss]
front = "https://hnrss.org/frontpage"
best = "https://hnrss.org/best"
newest = "https://hnrss.org/newest"

[browser]
# Launch this program instead of the system default opener
# command = "firefox"

[colors]
border = "DarkGray"
rank = "DarkGray"
tally = "Green"
help_key = "Cyan"
filter_key = "Green"
active_filter_fg = "Green"
active_filter_bg = "White"
selection_fg = "Black"
selection_bg = "Cyan"
status_fg = "White"
status_bg = "DarkGray"
error_fg = "LightRed"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
open_article = ["o", "Enter"]
open_comments = ["c"]
filter_front = ["f"]
filter_best = ["b"]
filter_newest = ["n"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid feed URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}
