use thiserror::Error;

use crate::config::ConfigError;

/// A single transfer failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request abandoned before it completed")]
    Abandoned,

    #[error("fetch task failed: {0}")]
    Task(String),
}

/// A payload could not be turned into posts.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed feed: {0}")]
    Xml(#[from] rss::Error),

    #[error("ranking list is not a JSON array")]
    NotAnArray,

    #[error("ranking entry {index} is not a story id")]
    InvalidId { index: usize },

    #[error("story body is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// A rebuild produced no list. Nothing partial is ever returned.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("failed to fetch {url}: {source}")]
    TransportFailed {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to decode ranking list: {0}")]
    RankingDecodeFailed(#[source] DecodeError),

    #[error("failed to decode story {id}: {source}")]
    StoryDecodeFailed {
        id: u64,
        #[source]
        source: DecodeError,
    },

    #[error("failed to decode feed items: {0}")]
    ItemDecodeFailed(#[source] DecodeError),

    #[error("{url} returned no stories")]
    EmptyResult { url: String },
}

#[derive(Error, Debug)]
pub enum EddyError {
    #[error("could not load the initial story list: {0}")]
    StartupFailed(#[source] BuildError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EddyError>;
