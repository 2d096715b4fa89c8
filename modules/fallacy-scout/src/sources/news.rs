// News source: headlines from configured RSS/Atom feeds. With no feeds
// configured the source is disabled and always yields nothing.

use async_trait::async_trait;
use tracing::{debug, info};

use fallacy_common::RawItem;

use super::{check_status, SourceAdapter, SourceError};

pub struct NewsFeedSource {
    client: reqwest::Client,
    feed_urls: Vec<String>,
    limit: usize,
}

impl NewsFeedSource {
    pub fn new(client: reqwest::Client, feed_urls: Vec<String>, limit: usize) -> Self {
        Self {
            client,
            feed_urls,
            limit,
        }
    }

    async fn fetch_feed(&self, feed_url: &str) -> Result<Vec<RawItem>, SourceError> {
        let resp = self.client.get(feed_url).send().await?;
        let bytes = check_status(resp).await?.bytes().await?;
        let items = parse_feed(&bytes, feed_url)?;
        info!(feed_url, items = items.len(), "news: parsed feed");
        Ok(items)
    }
}

#[async_trait]
impl SourceAdapter for NewsFeedSource {
    fn name(&self) -> &str {
        "News Comment Sections"
    }

    async fn fetch(&self) -> Result<Vec<RawItem>, SourceError> {
        if self.feed_urls.is_empty() {
            debug!("news: no feeds configured, skipping");
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for feed_url in &self.feed_urls {
            if items.len() >= self.limit {
                break;
            }
            items.extend(self.fetch_feed(feed_url).await?);
        }
        items.truncate(self.limit);
        Ok(items)
    }
}

/// Parse an RSS/Atom/JSON feed. Entry title plus summary becomes the text;
/// entries without a title or link are skipped.
pub fn parse_feed(bytes: &[u8], feed_url: &str) -> Result<Vec<RawItem>, SourceError> {
    let feed = feed_rs::parser::parse(bytes).map_err(|e| SourceError::Parse(e.to_string()))?;

    let feed_title = feed
        .title
        .map(|t| t.content)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| feed_url.to_string());
    let source = format!("News: {feed_title}");

    let items = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title.map(|t| t.content).filter(|t| !t.trim().is_empty())?;
            let url = entry.links.first().map(|l| l.href.clone())?;
            let text = match entry.summary.map(|s| s.content) {
                Some(summary) if !summary.trim().is_empty() => {
                    format!("{}\n\n{}", title.trim(), summary.trim())
                }
                _ => title.trim().to_string(),
            };
            Some(RawItem {
                text,
                source: source.clone(),
                url,
            })
        })
        .collect();

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Daily Opinion</title>
    <link>https://news.example.com</link>
    <description>Op-eds</description>
    <item>
      <title>If we allow this, eventually everything collapses</title>
      <link>https://news.example.com/a</link>
      <description>Readers respond.</description>
    </item>
    <item>
      <title>No link here</title>
    </item>
    <item>
      <title>Experts weigh in</title>
      <link>https://news.example.com/b</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_entries_with_title_and_link() {
        let items = parse_feed(RSS.as_bytes(), "https://news.example.com/rss").unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source, "News: Daily Opinion");
        assert_eq!(
            items[0].text,
            "If we allow this, eventually everything collapses\n\nReaders respond."
        );
        assert_eq!(items[1].text, "Experts weigh in");
        assert_eq!(items[1].url, "https://news.example.com/b");
    }

    #[test]
    fn garbage_is_parse_error() {
        let err = parse_feed(b"not a feed", "https://x").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    /// Serve one canned HTTP response on a local port and return its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/feed.xml")
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let url = serve_once("503 Service Unavailable", "busy").await;
        let source = NewsFeedSource::new(reqwest::Client::new(), vec![url], 5);

        match source.fetch().await.unwrap_err() {
            SourceError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "busy");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetches_and_parses_a_served_feed() {
        let url = serve_once("200 OK", RSS).await;
        let source = NewsFeedSource::new(reqwest::Client::new(), vec![url], 5);

        let items = source.fetch().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text, "Experts weigh in");
    }

    #[tokio::test]
    async fn disabled_without_feeds() {
        let source = NewsFeedSource::new(reqwest::Client::new(), Vec::new(), 5);
        assert!(source.fetch().await.unwrap().is_empty());
    }
}
