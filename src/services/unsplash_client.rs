// src/services/unsplash_client.rs
// DOCUMENTATION: Unsplash API client
// PURPOSE: Handle communication with the Unsplash photo search endpoint

use crate::config::{init_http_client, Config};
use crate::errors::ImageServiceError;
use crate::models::SizeKeyword;
use reqwest::Client;
use serde::Deserialize;

/// Unsplash API client
/// DOCUMENTATION: Holds the credential and base URL from Config.
/// Point `base_url` at a local server to exercise it without network access.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    /// HTTP client for making requests
    client: Client,
    /// Unsplash access key
    access_key: String,
    /// Base URL for the Unsplash API
    base_url: String,
}

/// Response from Unsplash `/search/photos`
#[derive(Debug, Deserialize)]
pub struct UnsplashSearchResponse {
    /// Matching photos in relevance order; absent means no matches
    #[serde(default)]
    pub results: Vec<UnsplashPhoto>,
}

/// Individual photo record from Unsplash
#[derive(Debug, Clone, Deserialize)]
pub struct UnsplashPhoto {
    pub id: String,
    /// Pre-rendered variants keyed by size keyword
    #[serde(default)]
    pub urls: PhotoUrls,
    pub description: Option<String>,
    pub alt_description: Option<String>,
}

/// Photo URLs keyed by size
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoUrls {
    pub raw: Option<String>,
    pub full: Option<String>,
    pub regular: Option<String>,
    pub small: Option<String>,
    pub thumb: Option<String>,
}

impl PhotoUrls {
    /// URL for a size keyword, ignoring empty strings
    pub fn get(&self, size: SizeKeyword) -> Option<&str> {
        let url = match size {
            SizeKeyword::Raw => &self.raw,
            SizeKeyword::Full => &self.full,
            SizeKeyword::Regular => &self.regular,
            SizeKeyword::Small => &self.small,
            SizeKeyword::Thumb => &self.thumb,
        };
        url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Error body returned by Unsplash on failures
#[derive(Debug, Deserialize)]
struct UnsplashErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

impl UnsplashClient {
    pub fn new(client: Client, access_key: String, base_url: String) -> Self {
        Self {
            client,
            access_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create client from application config
    /// DOCUMENTATION: Builds the underlying reqwest client with configured timeouts
    pub fn from_config(config: &Config) -> Result<Self, ImageServiceError> {
        let client = init_http_client(config).map_err(|e| {
            ImageServiceError::InternalError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self::new(
            client,
            config.unsplash_access_key.clone(),
            config.unsplash_api_url.clone(),
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search photos by keyword
    /// DOCUMENTATION: One request, no retry. Non-2xx responses become
    /// UpstreamError carrying Unsplash's own error text when it sends one.
    ///
    /// # Arguments
    /// * `query` - Search term
    /// * `per_page` - Number of results to request
    pub async fn search_photos(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<UnsplashPhoto>, ImageServiceError> {
        let url = format!("{}/search/photos", self.base_url);
        let per_page = per_page.to_string();

        log::debug!("Unsplash search: query='{}', per_page={}", query, per_page);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Unsplash API request failed: {}", e);
                ImageServiceError::UpstreamError(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = upstream_error_text(&body);
            log::error!("Unsplash API error {}: {}", status, reason);
            return Err(ImageServiceError::UpstreamError(format!(
                "API error {}: {}",
                status, reason
            )));
        }

        let api_response: UnsplashSearchResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Unsplash response: {}", e);
            ImageServiceError::UpstreamError(format!("Parse error: {}", e))
        })?;

        log::info!(
            "Unsplash search '{}' returned {} results",
            query,
            api_response.results.len()
        );

        Ok(api_response.results)
    }
}

/// Prefer the `errors` list Unsplash sends; fall back to the raw body
fn upstream_error_text(body: &str) -> String {
    match serde_json::from_str::<UnsplashErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join("; "),
        _ if body.trim().is_empty() => "no error details".to_string(),
        _ => body.trim().to_string(),
    }
}
