use std::sync::Arc;

use crate::app::error::{EddyError, Result};
use crate::browser::BrowserOpener;
use crate::builder::{PostListBuilder, PostSource};
use crate::config::Config;
use crate::decoder::RankingDecoder;
use crate::domain::{Filter, FilterUrls, PostList};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::Fetcher;

/// Everything the dashboard needs to talk to the outside world.
pub struct AppContext {
    pub builder: PostListBuilder,
    pub opener: BrowserOpener,
    pub urls: FilterUrls,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_timeout(config.feed.request_timeout())?);
        Self::with_fetcher(config, fetcher)
    }

    /// Build a context around an arbitrary transport.
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let feed = &config.feed;
        let urls = feed.filter_urls()?;

        let parallel = ParallelFetcher::with_workers(fetcher, feed.workers)
            .poll_interval(feed.poll_interval())
            .deadline(feed.batch_deadline());

        let builder = PostListBuilder::new(Arc::new(parallel), feed.format)
            .batch_size(feed.batch_size)
            .api_base(feed.api_base.clone())
            .ranking_decoder(RankingDecoder::new(feed.discussion_url.clone()));

        Ok(Self {
            builder,
            opener: BrowserOpener::new(config.browser.command.clone()),
            urls,
        })
    }

    /// Build the list shown before the dashboard opens. There is nothing to
    /// fall back to, so a failure here ends the program.
    pub async fn initial_posts(&self, filter: Filter) -> Result<PostList> {
        self.builder
            .build(self.urls.url_for(filter))
            .await
            .map_err(EddyError::StartupFailed)
    }
}
