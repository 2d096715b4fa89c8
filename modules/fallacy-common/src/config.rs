use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::error::FallacyError;

/// External sources the aggregator can pull from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Reddit,
    Twitter,
    News,
}

impl FromStr for SourceKind {
    type Err = FallacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reddit" => Ok(SourceKind::Reddit),
            "twitter" => Ok(SourceKind::Twitter),
            "news" => Ok(SourceKind::News),
            other => Err(FallacyError::Config(format!("unknown source '{other}'"))),
        }
    }
}

/// Widget settings passed through to the embedding page untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
    pub api_url: String,
    pub theme: String,
    /// Seconds between client-side corpus refreshes.
    pub refresh_interval: u64,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Corpus + runs
    pub corpus_capacity: usize,
    pub run_interval: Duration,
    pub fetch_timeout: Duration,
    pub items_per_source: usize,
    pub enabled_sources: Vec<SourceKind>,

    // Sources
    pub reddit_subreddit: String,
    pub twitter_bearer_token: Option<String>,
    pub twitter_query: String,
    pub news_feed_urls: Vec<String>,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Widget
    pub embed: EmbedConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, FallacyError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Unset keys fall back
    /// to defaults; set but malformed keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FallacyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let corpus_capacity: usize = parse_or(&lookup, "CORPUS_CAPACITY", 50)?;
        if corpus_capacity == 0 {
            return Err(FallacyError::Config("CORPUS_CAPACITY must be at least 1".into()));
        }
        let run_interval_secs: u64 = parse_or(&lookup, "RUN_INTERVAL_SECS", 3600)?;
        if run_interval_secs == 0 {
            return Err(FallacyError::Config("RUN_INTERVAL_SECS must be at least 1".into()));
        }

        let fetch_timeout_secs: u64 = parse_or(&lookup, "FETCH_TIMEOUT_SECS", 5)?;
        if fetch_timeout_secs == 0 {
            return Err(FallacyError::Config("FETCH_TIMEOUT_SECS must be at least 1".into()));
        }
        let items_per_source: usize = parse_or(&lookup, "ITEMS_PER_SOURCE", 5)?;
        if items_per_source == 0 {
            return Err(FallacyError::Config("ITEMS_PER_SOURCE must be at least 1".into()));
        }

        let enabled_sources = lookup("ENABLED_SOURCES")
            .unwrap_or_else(|| "reddit,twitter,news".to_string())
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(SourceKind::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        let web_port = match lookup("WEB_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| FallacyError::Config(format!("WEB_PORT must be a number, got '{raw}'")))?,
            None => 3000,
        };

        Ok(Self {
            corpus_capacity,
            run_interval: Duration::from_secs(run_interval_secs),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            items_per_source,
            enabled_sources,
            reddit_subreddit: lookup("REDDIT_SUBREDDIT")
                .unwrap_or_else(|| "changemyview".to_string()),
            twitter_bearer_token: lookup("TWITTER_BEARER_TOKEN").filter(|t| !t.is_empty()),
            twitter_query: lookup("TWITTER_QUERY")
                .unwrap_or_else(|| "politics OR debate".to_string()),
            news_feed_urls: lookup("NEWS_FEED_URLS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            web_host: lookup("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
            embed: EmbedConfig {
                api_url: lookup("EMBED_API_URL")
                    .unwrap_or_else(|| "http://localhost:3000".to_string()),
                theme: lookup("EMBED_THEME").unwrap_or_else(|| "light".to_string()),
                refresh_interval: parse_or(&lookup, "EMBED_REFRESH_INTERVAL_SECS", 3600)?,
            },
        })
    }

    /// Log the effective configuration. Secrets are reported as set/unset only.
    pub fn log_redacted(&self) {
        info!(
            corpus_capacity = self.corpus_capacity,
            run_interval_secs = self.run_interval.as_secs(),
            fetch_timeout_secs = self.fetch_timeout.as_secs(),
            items_per_source = self.items_per_source,
            enabled_sources = ?self.enabled_sources,
            reddit_subreddit = self.reddit_subreddit.as_str(),
            twitter_bearer_token = if self.twitter_bearer_token.is_some() { "set" } else { "unset" },
            news_feeds = self.news_feed_urls.len(),
            web_host = self.web_host.as_str(),
            web_port = self.web_port,
            "Loaded configuration"
        );
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, FallacyError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| FallacyError::Config(format!("{key} has invalid value '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, FallacyError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.corpus_capacity, 50);
        assert_eq!(config.run_interval, Duration::from_secs(3600));
        assert_eq!(config.items_per_source, 5);
        assert_eq!(
            config.enabled_sources,
            vec![SourceKind::Reddit, SourceKind::Twitter, SourceKind::News]
        );
        assert!(config.twitter_bearer_token.is_none());
        assert!(config.news_feed_urls.is_empty());
        assert_eq!(config.web_port, 3000);
        assert_eq!(config.embed.theme, "light");
    }

    #[test]
    fn port_falls_back_to_port_var() {
        let config = config_from(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.web_port, 8080);
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = config_from(&[("CORPUS_CAPACITY", "lots")]).unwrap_err();
        assert!(matches!(err, FallacyError::Config(_)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(config_from(&[("CORPUS_CAPACITY", "0")]).is_err());
    }

    #[test]
    fn zero_fetch_timeout_or_item_cap_is_rejected() {
        for key in ["FETCH_TIMEOUT_SECS", "ITEMS_PER_SOURCE", "RUN_INTERVAL_SECS"] {
            match config_from(&[(key, "0")]) {
                Err(FallacyError::Config(msg)) => assert!(msg.contains(key), "{msg}"),
                other => panic!("{key}=0 should be rejected, got {other:?}"),
            }
        }
        let config = config_from(&[("FETCH_TIMEOUT_SECS", "1"), ("ITEMS_PER_SOURCE", "1")]).unwrap();
        assert_eq!(config.fetch_timeout, Duration::from_secs(1));
        assert_eq!(config.items_per_source, 1);
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(config_from(&[("ENABLED_SOURCES", "reddit,myspace")]).is_err());
    }

    #[test]
    fn source_list_and_feeds_are_trimmed() {
        let config = config_from(&[
            ("ENABLED_SOURCES", " news , reddit "),
            ("NEWS_FEED_URLS", "https://a.example/rss, ,https://b.example/atom"),
        ])
        .unwrap();

        assert_eq!(config.enabled_sources, vec![SourceKind::News, SourceKind::Reddit]);
        assert_eq!(
            config.news_feed_urls,
            vec!["https://a.example/rss", "https://b.example/atom"]
        );
    }

    #[test]
    fn empty_bearer_token_counts_as_unset() {
        let config = config_from(&[("TWITTER_BEARER_TOKEN", "")]).unwrap();
        assert!(config.twitter_bearer_token.is_none());
    }
}
