//! HTTP client for Kakao Local's `search/keyword` endpoint.

use std::time::Duration;

use mattour_core::Coordinate;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Url};

use crate::error::KakaoError;
use crate::types::{KakaoPlace, KeywordSearchResponse};

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/";
const KEYWORD_ENDPOINT: &str = "v2/local/search/keyword.json";

/// Client for the Kakao Local REST API.
///
/// Authenticates with an `Authorization: KakaoAK <key>` header.
pub struct KakaoClient {
    client: Client,
    auth_header: String,
    base_url: Url,
}

impl KakaoClient {
    /// Creates a client pointed at the production Kakao API.
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, KakaoError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`KakaoError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, KakaoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| KakaoError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            auth_header: format!("KakaoAK {api_key}"),
            base_url,
        })
    }

    /// Keyword search centred on `center`, limited to `radius_m` meters.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::Http`] on network failure or non-2xx status.
    /// - [`KakaoError::Deserialize`] if the body is not the expected shape.
    pub async fn keyword_search(
        &self,
        query: &str,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<KakaoPlace>, KakaoError> {
        let url = self.keyword_url(query, center, radius_m)?;

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let parsed: KeywordSearchResponse =
            serde_json::from_str(&body).map_err(|e| KakaoError::Deserialize {
                context: format!("keyword search (query={query})"),
                source: e,
            })?;

        tracing::debug!(query = %query, hits = parsed.documents.len(), "kakao keyword search");
        Ok(parsed.documents)
    }

    fn keyword_url(
        &self,
        query: &str,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Url, KakaoError> {
        let mut url = self
            .base_url
            .join(KEYWORD_ENDPOINT)
            .map_err(|e| KakaoError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("x", &center.lng.to_string())
            .append_pair("y", &center.lat.to_string())
            .append_pair("radius", &radius_m.to_string());
        Ok(url)
    }
}
