//! HTTP client for the FreeSaurus backend.
//!
//! Thin wrapper over the REST API: word search, word detail with all
//! relations, per-relation lookups, and the auth endpoints. Every response
//! arrives in a `{"status": ...}` envelope; errors carry
//! `{"status": "error", "message": ...}`.
//!
//! This layer knows nothing about the local store; offline fallback is the
//! command modules' job.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::models::{RelationType, SearchFilters, SearchResponse, User, Word};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WordEnvelope {
    word: Word,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    results: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct RelatedEnvelope {
    related_words: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DefinitionsEnvelope {
    definitions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExamplesEnvelope {
    examples: Vec<String>,
}

/// Login/registration response: a bearer token plus the account profile.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        let base_url = Url::parse(&config.api.base_url)
            .with_context(|| format!("Invalid api.base_url: {}", config.api.base_url))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Search the thesaurus. `query` is a prefix unless `filters.exact_match`.
    pub async fn search_words(
        &self,
        query: &str,
        offset: i64,
        limit: i64,
        filters: &SearchFilters,
    ) -> Result<SearchResponse> {
        let url = self.endpoint(&["api", "search"])?;

        let mut params: Vec<(&str, String)> = vec![
            ("q", query.to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(pos) = &filters.pos {
            params.push(("pos", pos.clone()));
        }
        if filters.exact_match {
            params.push(("exact_match", "true".to_string()));
        }

        debug!(%query, offset, limit, "searching words");
        let envelope: SearchEnvelope = self.get_json(url, &params).await?;
        Ok(envelope.results)
    }

    /// Fetch a word record with every relation list populated in one call.
    pub async fn all_relations(&self, text: &str) -> Result<Word> {
        let url = self.word_endpoint("all", text)?;
        let envelope: WordEnvelope = self.get_json(url, &[]).await?;
        Ok(envelope.word)
    }

    /// Fetch one relation list for a word.
    pub async fn related_words(&self, text: &str, relation: RelationType) -> Result<Vec<String>> {
        let url = self.word_endpoint(relation.endpoint(), text)?;
        let envelope: RelatedEnvelope = self.get_json(url, &[]).await?;
        Ok(envelope.related_words)
    }

    pub async fn definitions(&self, text: &str) -> Result<Vec<String>> {
        let url = self.word_endpoint("definition", text)?;
        let envelope: DefinitionsEnvelope = self.get_json(url, &[]).await?;
        Ok(envelope.definitions)
    }

    pub async fn examples(&self, text: &str) -> Result<Vec<String>> {
        let url = self.word_endpoint("examples", text)?;
        let envelope: ExamplesEnvelope = self.get_json(url, &[]).await?;
        Ok(envelope.examples)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let url = self.endpoint(&["auth", "register"])?;
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        });
        self.post_json(url, &body).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = self.endpoint(&["auth", "login"])?;
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });
        self.post_json(url, &body).await
    }

    /// Build a URL from fixed path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("api.base_url cannot be a base URL"))?
            .extend(segments);
        Ok(url)
    }

    /// Build `/api/<kind>/<word>`, percent-encoding the word segment.
    fn word_endpoint(&self, kind: &str, word: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("api.base_url cannot be a base URL"))?
            .extend(["api", kind])
            .push(word);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.http.get(url.clone());
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        Self::decode(url, response).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        body: &serde_json::Value,
    ) -> Result<T> {
        let mut request = self.http.post(url.clone()).json(body);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        Self::decode(url, response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        url: Url,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            // Prefer the backend's message over the bare status code.
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|e| e.message);
            match message {
                Some(msg) => bail!("API error ({status}): {msg}"),
                None => bail!("API returned {status} for {url}"),
            }
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Unexpected response shape from {url}"))
    }
}
