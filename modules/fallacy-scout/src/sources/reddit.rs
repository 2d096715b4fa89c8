// Reddit source: hot post titles from one subreddit via the public JSON listing.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use fallacy_common::RawItem;

use super::{read_success_body, SourceAdapter, SourceError};

const BASE_URL: &str = "https://www.reddit.com";

pub struct RedditSource {
    client: reqwest::Client,
    subreddit: String,
    limit: usize,
}

impl RedditSource {
    pub fn new(client: reqwest::Client, subreddit: &str, limit: usize) -> Self {
        Self {
            client,
            subreddit: subreddit.trim_start_matches("r/").to_string(),
            limit,
        }
    }

    fn listing_url(&self) -> String {
        format!("{BASE_URL}/r/{}/hot.json", self.subreddit)
    }
}

#[async_trait]
impl SourceAdapter for RedditSource {
    fn name(&self) -> &str {
        "Reddit Debate Forums"
    }

    async fn fetch(&self) -> Result<Vec<RawItem>, SourceError> {
        info!(subreddit = self.subreddit.as_str(), limit = self.limit, "reddit: fetching hot posts");

        let resp = self
            .client
            .get(self.listing_url())
            .query(&[("limit", self.limit.to_string())])
            .send()
            .await?;
        let body = read_success_body(resp).await?;

        parse_listing(&body, &self.subreddit, self.limit)
    }
}

/// Turn a listing payload into items: title as text, permalink as URL.
/// Posts without a title are skipped.
pub fn parse_listing(body: &str, subreddit: &str, limit: usize) -> Result<Vec<RawItem>, SourceError> {
    let listing: Listing = serde_json::from_str(body)?;
    let source = format!("Reddit: r/{subreddit}");

    let items = listing
        .data
        .children
        .into_iter()
        .filter_map(|child| {
            let title = child.data.title.filter(|t| !t.trim().is_empty())?;
            let url = match child.data.permalink {
                Some(permalink) => format!("{BASE_URL}{permalink}"),
                None => format!("{BASE_URL}/r/{subreddit}"),
            };
            Some(RawItem {
                text: title,
                source: source.clone(),
                url,
            })
        })
        .take(limit)
        .collect();

    Ok(items)
}

// --- Listing response types ---

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    data: PostData,
}

#[derive(Deserialize)]
struct PostData {
    title: Option<String>,
    permalink: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(n: usize) -> String {
        let children: Vec<serde_json::Value> = (0..n)
            .map(|i| {
                serde_json::json!({
                    "kind": "t3",
                    "data": {
                        "title": format!("CMV: post number {i}"),
                        "permalink": format!("/r/changemyview/comments/{i}/post/"),
                        "score": 10
                    }
                })
            })
            .collect();
        serde_json::json!({ "kind": "Listing", "data": { "children": children } }).to_string()
    }

    #[test]
    fn parses_titles_and_permalinks() {
        let items = parse_listing(&listing(2), "changemyview", 5).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "CMV: post number 0");
        assert_eq!(items[0].source, "Reddit: r/changemyview");
        assert_eq!(
            items[0].url,
            "https://www.reddit.com/r/changemyview/comments/0/post/"
        );
    }

    #[test]
    fn caps_at_limit_preserving_order() {
        let items = parse_listing(&listing(25), "changemyview", 5).unwrap();

        assert_eq!(items.len(), 5);
        assert_eq!(items[4].text, "CMV: post number 4");
    }

    #[test]
    fn skips_untitled_posts() {
        let body = r#"{"data":{"children":[
            {"data":{"title":"","permalink":"/r/x/1"}},
            {"data":{"permalink":"/r/x/2"}},
            {"data":{"title":"kept","permalink":"/r/x/3"}}
        ]}}"#;

        let items = parse_listing(body, "x", 5).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "kept");
    }

    #[test]
    fn malformed_payload_is_parse_error() {
        let err = parse_listing("<html>rate limited</html>", "x", 5).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));

        let err = parse_listing(r#"{"error": 429}"#, "x", 5).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn strips_r_prefix_from_subreddit() {
        let source = RedditSource::new(reqwest::Client::new(), "r/changemyview", 5);
        assert_eq!(source.listing_url(), "https://www.reddit.com/r/changemyview/hot.json");
    }
}
