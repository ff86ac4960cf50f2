//! Malagasy Wikipedia search client
//!
//! Thin wrapper over the MediaWiki `list=search` query. Results are relayed
//! as `{title, snippet}` pairs; the translate lookup flattens the first
//! snippet to plain text.

use crate::config::WikipediaConfig;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Returned by translate when the search comes back empty
pub const NO_DEFINITION: &str = "Aucune définition trouvée";

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Wikipedia unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub lang: String,
    pub query: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub word: String,
    pub translation: String,
}

// MediaWiki response envelope; anything missing reads as "no results"
#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: ApiQuery,
}

#[derive(Debug, Default, Deserialize)]
struct ApiQuery {
    #[serde(default)]
    search: Vec<SearchResult>,
}

pub struct WikipediaClient {
    http: Client,
    api_url: String,
    lang: String,
    search_limit: usize,
}

impl WikipediaClient {
    pub fn new(config: &WikipediaConfig) -> Result<Self, ProxyError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ProxyError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            lang: config.lang.clone(),
            search_limit: config.search_limit,
        })
    }

    /// Search the encyclopedia for `query`
    pub async fn search(&self, query: &str) -> Result<SearchResponse, ProxyError> {
        let results = self.fetch(query).await?;

        Ok(SearchResponse {
            lang: self.lang.clone(),
            query: query.to_string(),
            results,
        })
    }

    /// First search hit for `word`, with markup removed
    pub async fn translate(&self, word: &str) -> Result<Translation, ProxyError> {
        let results = self.fetch(word).await?;

        let translation = results
            .first()
            .map(|hit| strip_tags(&hit.snippet))
            .unwrap_or_else(|| NO_DEFINITION.to_string());

        Ok(Translation {
            word: word.to_string(),
            translation,
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, ProxyError> {
        let limit = self.search_limit.to_string();
        let params = [
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("format", "json"),
            ("utf8", "1"),
        ];

        tracing::debug!(query, url = %self.api_url, "wikipedia search");

        let response = self
            .http
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::warn!(query, "wikipedia request failed: {}", e);
                ProxyError::Unavailable(e.to_string())
            })?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProxyError::Unavailable(e.to_string()))?;

        let mut results = body.query.search;
        results.truncate(self.search_limit);
        Ok(results)
    }
}

/// Remove HTML tags, keeping their text content
pub fn strip_tags(html: &str) -> String {
    HTML_TAG.replace_all(html, "").into_owned()
}
