//! Builds a complete [`PostList`] from one filter URL or fails as a whole.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::app::BuildError;
use crate::decoder::{RankingDecoder, StoryRef, SyndicationDecoder};
use crate::domain::{FeedFormat, Post, PostList};
use crate::fetcher::ParallelFetcher;

pub const DEFAULT_BATCH_SIZE: usize = 30;

/// Anything that can produce a fresh list for a URL.
#[async_trait]
pub trait PostSource {
    async fn build(&self, url: &str) -> Result<PostList, BuildError>;
}

#[derive(Clone)]
pub struct PostListBuilder {
    fetcher: Arc<ParallelFetcher>,
    format: FeedFormat,
    batch_size: usize,
    api_base: String,
    ranking: RankingDecoder,
    syndication: SyndicationDecoder,
}

impl PostListBuilder {
    pub fn new(fetcher: Arc<ParallelFetcher>, format: FeedFormat) -> Self {
        Self {
            fetcher,
            format,
            batch_size: DEFAULT_BATCH_SIZE,
            api_base: String::new(),
            ranking: RankingDecoder::default(),
            syndication: SyndicationDecoder::new(),
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Base that per-story URLs hang off: `<api_base>/item/<id>.json`.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn ranking_decoder(mut self, decoder: RankingDecoder) -> Self {
        self.ranking = decoder;
        self
    }

    fn item_url(&self, story: StoryRef) -> String {
        format!("{}/item/{}.json", self.api_base, story.0)
    }

    async fn build_ranking(&self, url: &str) -> Result<PostList, BuildError> {
        let body = self
            .fetcher
            .fetch_one(url)
            .await
            .map_err(|source| BuildError::TransportFailed {
                url: url.to_string(),
                source,
            })?;

        let refs = self
            .ranking
            .decode_ranking_list(&body, self.batch_size)
            .map_err(BuildError::RankingDecodeFailed)?;

        if refs.is_empty() {
            return Err(BuildError::EmptyResult {
                url: url.to_string(),
            });
        }

        let item_urls: Vec<String> = refs.iter().map(|r| self.item_url(*r)).collect();
        let bodies = self.fetcher.fetch_many(&item_urls).await;

        let mut posts = Vec::with_capacity(refs.len());
        for ((story, item_url), body) in refs.iter().zip(item_urls).zip(bodies) {
            let body = body.map_err(|source| BuildError::TransportFailed {
                url: item_url,
                source,
            })?;
            let post = self
                .ranking
                .decode_story(&body, *story)
                .map_err(|source| BuildError::StoryDecodeFailed {
                    id: story.0,
                    source,
                })?;
            posts.push(post);
        }

        Ok(self.finish(posts))
    }

    async fn build_syndication(&self, url: &str) -> Result<PostList, BuildError> {
        let body = self
            .fetcher
            .fetch_one(url)
            .await
            .map_err(|source| BuildError::TransportFailed {
                url: url.to_string(),
                source,
            })?;

        let posts = self
            .syndication
            .decode_item_list(&body)
            .map_err(BuildError::ItemDecodeFailed)?;

        // Checked after truncation so a zero batch size is empty too.
        let list = self.finish(posts);
        if list.is_empty() {
            return Err(BuildError::EmptyResult {
                url: url.to_string(),
            });
        }

        Ok(list)
    }

    fn finish(&self, posts: Vec<Post>) -> PostList {
        debug_assert!(posts.iter().all(Post::is_valid));
        PostList::new(posts, self.batch_size)
    }
}

#[async_trait]
impl PostSource for PostListBuilder {
    async fn build(&self, url: &str) -> Result<PostList, BuildError> {
        let started = Instant::now();
        tracing::debug!("Building {:?} list from {}", self.format, url);
        let result = match self.format {
            FeedFormat::Ranking => self.build_ranking(url).await,
            FeedFormat::Syndication => self.build_syndication(url).await,
        };

        match &result {
            Ok(list) => tracing::info!(
                "Built {} posts from {} in {:?}",
                list.len(),
                url,
                started.elapsed()
            ),
            Err(e) => tracing::warn!("Build from {} failed after {:?}: {}", url, started.elapsed(), e),
        }

        result
    }
}
