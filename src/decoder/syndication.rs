use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::DecodeError;
use crate::domain::{Post, Tally};

static COMMENT_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"# Comments: (\d+)").expect("comment count pattern is valid"));

/// Decoder for RSS channels whose items carry everything inline.
#[derive(Debug, Clone, Default)]
pub struct SyndicationDecoder;

impl SyndicationDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode every `<item>` in channel order.
    ///
    /// Fails if any item lacks a non-empty `title` or `link`. A missing
    /// `comments` link or comment count is fine.
    pub fn decode_item_list(&self, body: &[u8]) -> Result<Vec<Post>, DecodeError> {
        let channel = rss::Channel::read_from(body)?;

        channel
            .into_items()
            .into_iter()
            .map(|item| {
                let title = item
                    .title
                    .map(|t| decode_html_entities(&t).trim().to_string())
                    .filter(|t| !t.is_empty())
                    .ok_or(DecodeError::MissingField { field: "title" })?;

                let link = item
                    .link
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .ok_or(DecodeError::MissingField { field: "link" })?;

                let tally = item
                    .description
                    .as_deref()
                    .map(comment_count)
                    .unwrap_or(Tally::Unknown);

                Ok(Post {
                    id: None,
                    title,
                    link,
                    tally,
                    comments_link: item.comments.filter(|c| !c.trim().is_empty()),
                })
            })
            .collect()
    }
}

fn comment_count(description: &str) -> Tally {
    COMMENT_COUNT
        .captures(description)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .map(Tally::Comments)
        .unwrap_or(Tally::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Front Page</title>
    <link>https://news.example.com/</link>
    <description>Stories</description>
    <item>
      <title>Show: a tiny compiler</title>
      <link>https://example.com/compiler</link>
      <comments>https://news.example.com/item?id=1</comments>
      <description><![CDATA[<p>Points: 120</p><p># Comments: 42</p>]]></description>
    </item>
    <item>
      <title>Quiet post</title>
      <link>https://example.com/quiet</link>
      <description>No discussion yet</description>
    </item>
    <item>
      <title>Ben &amp;amp; Jerry&amp;#x27;s</title>
      <link>https://example.com/ice-cream</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_decode_items_in_order() {
        let posts = SyndicationDecoder::new()
            .decode_item_list(FEED.as_bytes())
            .unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "Show: a tiny compiler");
        assert_eq!(posts[0].link, "https://example.com/compiler");
        assert_eq!(
            posts[0].comments_link.as_deref(),
            Some("https://news.example.com/item?id=1")
        );
        assert_eq!(posts[1].title, "Quiet post");
        assert!(posts.iter().all(|p| p.id.is_none()));
    }

    #[test]
    fn test_comment_count_extracted() {
        let posts = SyndicationDecoder::new()
            .decode_item_list(FEED.as_bytes())
            .unwrap();
        assert_eq!(posts[0].tally, Tally::Comments(42));
        assert_eq!(posts[0].tally.to_string(), "42");
    }

    #[test]
    fn test_missing_comment_count_is_placeholder() {
        let posts = SyndicationDecoder::new()
            .decode_item_list(FEED.as_bytes())
            .unwrap();
        assert_eq!(posts[1].tally.to_string(), "?");
        assert_eq!(posts[2].tally, Tally::Unknown);
        assert!(posts[1].comments_link.is_none());
    }

    #[test]
    fn test_html_entities_in_title_are_decoded() {
        let posts = SyndicationDecoder::new()
            .decode_item_list(FEED.as_bytes())
            .unwrap();
        assert_eq!(posts[2].title, "Ben & Jerry's");
    }

    #[test]
    fn test_item_without_link_fails_whole_list() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description>
  <item><title>Fine</title><link>https://example.com/a</link></item>
  <item><title>No link</title></item>
</channel></rss>"#;
        let err = SyndicationDecoder::new()
            .decode_item_list(xml.as_bytes())
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "link" }));
    }

    #[test]
    fn test_item_without_title_fails() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description>
  <item><link>https://example.com/a</link></item>
</channel></rss>"#;
        let err = SyndicationDecoder::new()
            .decode_item_list(xml.as_bytes())
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "title" }));
    }

    #[test]
    fn test_empty_channel_decodes_to_nothing() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description></channel></rss>"#;
        let posts = SyndicationDecoder::new()
            .decode_item_list(xml.as_bytes())
            .unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_not_a_feed() {
        let err = SyndicationDecoder::new()
            .decode_item_list(b"<html><body>502 Bad Gateway</body></html>")
            .unwrap_err();
        assert!(matches!(err, DecodeError::Xml(_)));
    }

    #[test]
    fn test_comment_count_pattern() {
        assert_eq!(comment_count("Points: 3 # Comments: 0"), Tally::Comments(0));
        assert_eq!(comment_count("# Comments:"), Tally::Unknown);
        assert_eq!(comment_count(""), Tally::Unknown);
    }
}
