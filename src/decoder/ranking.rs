use serde_json::Value;

use crate::app::DecodeError;
use crate::domain::{Post, Tally};

pub const DEFAULT_DISCUSSION_URL: &str = "https://news.ycombinator.com/item?id={id}";

/// Opaque handle for a story listed in a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoryRef(pub u64);

/// Decoder for JSON ranking APIs: a flat array of ids, then one object per id.
#[derive(Debug, Clone)]
pub struct RankingDecoder {
    discussion_url: String,
}

impl Default for RankingDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_DISCUSSION_URL)
    }
}

impl RankingDecoder {
    /// `discussion_url` is a template; `{id}` is replaced by the story id.
    pub fn new(discussion_url: impl Into<String>) -> Self {
        Self {
            discussion_url: discussion_url.into(),
        }
    }

    pub fn discussion_url(&self, id: u64) -> String {
        self.discussion_url.replace("{id}", &id.to_string())
    }

    /// Read up to `batch_size` ids in rank order. Shorter lists stay short.
    pub fn decode_ranking_list(
        &self,
        body: &[u8],
        batch_size: usize,
    ) -> Result<Vec<StoryRef>, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        let ids = value.as_array().ok_or(DecodeError::NotAnArray)?;

        ids.iter()
            .take(batch_size)
            .enumerate()
            .map(|(index, id)| {
                id.as_u64()
                    .map(StoryRef)
                    .ok_or(DecodeError::InvalidId { index })
            })
            .collect()
    }

    pub fn decode_story(&self, body: &[u8], story: StoryRef) -> Result<Post, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

        let title = match object.get("title") {
            None | Some(Value::Null) => return Err(DecodeError::MissingField { field: "title" }),
            Some(Value::String(title)) if !title.trim().is_empty() => title.clone(),
            Some(Value::String(_)) => return Err(DecodeError::MissingField { field: "title" }),
            Some(_) => {
                return Err(DecodeError::WrongType {
                    field: "title",
                    expected: "a string",
                })
            }
        };

        let score = match object.get("score") {
            None | Some(Value::Null) => return Err(DecodeError::MissingField { field: "score" }),
            Some(score) => score_value(score).ok_or(DecodeError::WrongType {
                field: "score",
                expected: "a number",
            })?,
        };

        let discussion = self.discussion_url(story.0);

        // Ask HN and job posts have no article of their own.
        let link = object
            .get("url")
            .and_then(Value::as_str)
            .filter(|url| !url.trim().is_empty())
            .map(String::from)
            .unwrap_or_else(|| discussion.clone());

        Ok(Post {
            id: Some(story.0),
            title,
            link,
            tally: Tally::Score(score),
            comments_link: Some(discussion),
        })
    }
}

/// Any JSON number counts. Fractions are truncated and out-of-range values
/// saturate.
fn score_value(score: &Value) -> Option<i64> {
    score
        .as_i64()
        .or_else(|| score.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
        .or_else(|| score.as_f64().map(|f| f as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> RankingDecoder {
        RankingDecoder::new("https://news.example.com/item?id={id}")
    }

    #[test]
    fn test_ranking_list_truncates_to_batch() {
        let refs = decoder()
            .decode_ranking_list(b"[5, 4, 3, 2, 1]", 3)
            .unwrap();
        assert_eq!(refs, vec![StoryRef(5), StoryRef(4), StoryRef(3)]);
    }

    #[test]
    fn test_ranking_list_shorter_than_batch_is_not_padded() {
        let refs = decoder().decode_ranking_list(b"[101, 102]", 30).unwrap();
        assert_eq!(refs, vec![StoryRef(101), StoryRef(102)]);
    }

    #[test]
    fn test_ranking_list_rejects_non_array() {
        let err = decoder()
            .decode_ranking_list(br#"{"ids": [1]}"#, 30)
            .unwrap_err();
        assert!(matches!(err, DecodeError::NotAnArray));
    }

    #[test]
    fn test_ranking_list_rejects_malformed_json() {
        let err = decoder().decode_ranking_list(b"[1, 2", 30).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_ranking_list_rejects_non_numeric_id() {
        let err = decoder()
            .decode_ranking_list(br#"[1, "two", 3]"#, 30)
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidId { index: 1 }));
    }

    #[test]
    fn test_ranking_list_ignores_bad_ids_past_the_batch() {
        let refs = decoder()
            .decode_ranking_list(br#"[1, 2, "junk"]"#, 2)
            .unwrap();
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_story_with_url() {
        let post = decoder()
            .decode_story(br#"{"title": "B", "score": 9, "url": "http://x"}"#, StoryRef(102))
            .unwrap();

        assert_eq!(post.id, Some(102));
        assert_eq!(post.title, "B");
        assert_eq!(post.link, "http://x");
        assert_eq!(post.tally, Tally::Score(9));
        assert_eq!(
            post.comments_link.as_deref(),
            Some("https://news.example.com/item?id=102")
        );
    }

    #[test]
    fn test_story_without_url_falls_back_to_discussion() {
        let post = decoder()
            .decode_story(br#"{"title": "A", "score": 5}"#, StoryRef(101))
            .unwrap();

        assert_eq!(post.link, "https://news.example.com/item?id=101");
        assert!(post.is_valid());
    }

    #[test]
    fn test_story_missing_title_fails() {
        let err = decoder()
            .decode_story(br#"{"score": 5}"#, StoryRef(1))
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "title" }));
    }

    #[test]
    fn test_story_empty_title_fails() {
        let err = decoder()
            .decode_story(br#"{"title": "  ", "score": 5}"#, StoryRef(1))
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "title" }));
    }

    #[test]
    fn test_story_title_wrong_type_fails() {
        let err = decoder()
            .decode_story(br#"{"title": 12, "score": 5}"#, StoryRef(1))
            .unwrap_err();
        assert!(matches!(err, DecodeError::WrongType { field: "title", .. }));
    }

    #[test]
    fn test_story_score_must_be_a_number() {
        let err = decoder()
            .decode_story(br#"{"title": "A", "score": "5"}"#, StoryRef(1))
            .unwrap_err();
        assert!(matches!(err, DecodeError::WrongType { field: "score", .. }));

        let err = decoder()
            .decode_story(br#"{"title": "A"}"#, StoryRef(1))
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "score" }));
    }

    #[test]
    fn test_story_float_score_is_truncated() {
        let post = decoder()
            .decode_story(br#"{"title": "A", "score": 5.0}"#, StoryRef(1))
            .unwrap();
        assert_eq!(post.tally, Tally::Score(5));

        let post = decoder()
            .decode_story(br#"{"title": "A", "score": 7.9}"#, StoryRef(1))
            .unwrap();
        assert_eq!(post.tally, Tally::Score(7));

        let post = decoder()
            .decode_story(br#"{"title": "A", "score": 1e300}"#, StoryRef(1))
            .unwrap();
        assert_eq!(post.tally, Tally::Score(i64::MAX));
    }

    #[test]
    fn test_story_null_body_is_not_an_object() {
        // Deleted items come back as a literal `null`.
        let err = decoder().decode_story(b"null", StoryRef(1)).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject));
    }

    #[test]
    fn test_default_discussion_url() {
        assert_eq!(
            RankingDecoder::default().discussion_url(42),
            "https://news.ycombinator.com/item?id=42"
        );
    }
}
