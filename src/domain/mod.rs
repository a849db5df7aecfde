pub mod filter;
pub mod post;

pub use filter::{FeedFormat, Filter, FilterUrls};
pub use post::{Post, PostList, Tally};
