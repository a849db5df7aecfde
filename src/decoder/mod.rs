//! Turns raw feed bodies into [`Post`](crate::domain::Post)s.
//!
//! Decoding is strict about mandatory fields and lenient about optional ones.
//! Every decoded string is owned, so the parsed document can be dropped as
//! soon as a call returns.

pub mod ranking;
pub mod syndication;

pub use ranking::{RankingDecoder, StoryRef, DEFAULT_DISCUSSION_URL};
pub use syndication::SyndicationDecoder;
