use std::fmt;

use chrono::{DateTime, Local};

/// The number shown next to a story title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    /// Points reported by a ranking API.
    Score(i64),
    /// Comment count scraped from a syndication item.
    Comments(u64),
    /// The feed did not say.
    Unknown,
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tally::Score(score) => write!(f, "{}", score),
            Tally::Comments(count) => write!(f, "{}", count),
            Tally::Unknown => f.write_str("?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Numeric story id; `None` for syndication items.
    pub id: Option<u64>,
    pub title: String,
    /// Article link, or the discussion thread when the story has no article.
    pub link: String,
    pub tally: Tally,
    pub comments_link: Option<String>,
}

impl Post {
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.link.trim().is_empty()
    }
}

/// An ordered batch of posts in feed rank order.
///
/// Never longer than the capacity it was built with. Lists are built once and replaced
/// wholesale, never edited in place.
#[derive(Debug, Clone)]
pub struct PostList {
    posts: Vec<Post>,
    fetched_at: DateTime<Local>,
}

impl PostList {
    /// Build a list from ranked posts, dropping anything past `capacity`.
    pub fn new(mut posts: Vec<Post>, capacity: usize) -> Self {
        posts.truncate(capacity);
        Self {
            posts,
            fetched_at: Local::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }

    pub fn fetched_at(&self) -> DateTime<Local> {
        self.fetched_at
    }
}
