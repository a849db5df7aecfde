use serde::Deserialize;

/// A named view onto the feed. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    Front,
    Best,
    Newest,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::Front, Filter::Best, Filter::Newest];

    pub fn label(self) -> &'static str {
        match self {
            Filter::Front => "Front Page",
            Filter::Best => "Best",
            Filter::Newest => "Newest",
        }
    }
}

/// Which decoder a feed needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// JSON id list plus one JSON object per story.
    #[default]
    Ranking,
    /// RSS 2.0 channel with inline items.
    Syndication,
}

/// The source URL bound to each filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterUrls {
    pub front: String,
    pub best: String,
    pub newest: String,
}

impl FilterUrls {
    pub fn url_for(&self, filter: Filter) -> &str {
        match filter {
            Filter::Front => &self.front,
            Filter::Best => &self.best,
            Filter::Newest => &self.newest,
        }
    }
}
