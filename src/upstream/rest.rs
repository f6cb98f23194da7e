//! Blocking HTTP client for the Pokémon TCG API.
//!
//! Search endpoints are paginated; [`RestClient`] walks every page so callers
//! always get the complete, upstream-ordered result list.

use log::{debug, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;

use super::records::{ApiCard, ApiSet, Page, Single};
use super::CatalogBackend;
use crate::config::{self, Settings};
use crate::error::{CatalogError, Result};

/// Talks to the catalog over HTTP.
pub struct RestClient {
    /// Base URL without a trailing slash, e.g. `https://api.pokemontcg.io/v2`.
    pub base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    page_size: usize,
    client: OnceLock<Client>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            page_size: config::PAGE_SIZE,
            client: OnceLock::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.base_url.clone(),
            settings.api_key.clone(),
            settings.timeout,
        )
    }

    /// Override the page size used for searches (mainly for tests).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| CatalogError::Config("API key contains invalid header characters".into()))?;
            headers.insert("X-Api-Key", value);
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers(headers)
            .build()?;

        // A concurrent caller may have won the race; either client is fine.
        Ok(self.client.get_or_init(|| client))
    }

    /// The base URL extended by `segments`, each percent-encoded as one path
    /// segment. A `/` or `?` inside an id stays part of the id.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            CatalogError::Config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::Config(format!("Base URL '{}' cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET an endpoint and hand back the response if it was successful.
    /// Non-2xx answers become [`CatalogError::Upstream`].
    fn get(&self, url: Url, query: &[(&str, String)]) -> Result<Response> {
        debug!("GET {} {:?}", url, query);

        let resp = self.client()?.get(url.clone()).query(query).send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        let message = upstream_message(&body).unwrap_or_else(|| {
            format!("{} returned {}", url, status)
        });
        warn!("Upstream fault for {}: {} ({})", url, message, status);
        Err(CatalogError::upstream(Some(status.as_u16()), message))
    }

    /// Fetch every page of a search endpoint.
    fn search<T: DeserializeOwned>(&self, endpoint: &str, query: &str) -> Result<Vec<T>> {
        let url = self.endpoint(&[endpoint])?;
        let mut records = Vec::new();
        let mut page = 1usize;

        loop {
            let mut params = vec![
                ("page", page.to_string()),
                ("pageSize", self.page_size.to_string()),
            ];
            if !query.is_empty() {
                params.push(("q", query.to_string()));
            }

            let body: Page = decode_body(self.get(url.clone(), &params)?)?;
            let fetched = body.data.len();
            for value in body.data {
                records.push(decode_record(value)?);
            }

            // Without a totalCount only a short page ends the walk.
            let reached_total = body.total_count.is_some_and(|total| records.len() >= total);
            if fetched < self.page_size || reached_total {
                break;
            }
            page += 1;
        }

        debug!("{} '{}' -> {} records", endpoint, query, records.len());
        Ok(records)
    }
}

impl CatalogBackend for RestClient {
    fn find_card(&self, id: &str) -> Result<ApiCard> {
        match self.get(self.endpoint(&["cards", id])?, &[]) {
            Ok(resp) => {
                let body: Single = decode_body(resp)?;
                decode_record(body.data)
            }
            Err(CatalogError::Upstream {
                status: Some(code), ..
            }) if code == StatusCode::NOT_FOUND.as_u16() => {
                Err(CatalogError::NotFound(format!("Card '{}' not found", id)))
            }
            Err(e) => Err(e),
        }
    }

    fn search_cards(&self, query: &str) -> Result<Vec<ApiCard>> {
        self.search("cards", query)
    }

    fn search_sets(&self, query: &str) -> Result<Vec<ApiSet>> {
        self.search("sets", query)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a response envelope. A body that isn't the expected envelope is an
/// upstream fault, not a record problem.
fn decode_body<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status().as_u16();
    let text = resp.text()?;
    serde_json::from_str(&text).map_err(|e| {
        CatalogError::upstream(Some(status), format!("Malformed response body: {}", e))
    })
}

/// Decode one record out of an envelope. Type mismatches inside a record are
/// validation failures and name the offending field.
fn decode_record<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| CatalogError::Validation(e.to_string()))
}

/// Pull `error.message` out of an upstream error body, if it has one.
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}
