//! HTTP client for the Google Places and Geocoding web services.
//!
//! Wraps `reqwest` with API key management, envelope status checks, and
//! typed response deserialization. Every request asks for Korean results
//! (`language=ko`).

use std::time::Duration;

use mattour_core::{AttractionCandidate, Coordinate, RestaurantCandidate};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{DetailsEnvelope, GeocodeResult, ListEnvelope, PlaceDetails, PlaceResult, RawReview};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const LANGUAGE: &str = "ko";

/// Suffix appended to the region for attraction text searches.
pub const ATTRACTION_QUERY_SUFFIX: &str = "관광지";

/// Client for the Google Places / Geocoding JSON APIs.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a client pointed at the production Google Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retries on transient failures (timeouts, connect errors, 5xx).
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Searches `"{region} 관광지"` and keeps attractions with at least
    /// `min_reviews` ratings. Results missing a place ID or location are
    /// skipped.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the envelope status is not `OK`/`ZERO_RESULTS`.
    /// - [`PlacesError::Http`] on network failure or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body does not match the envelope.
    pub async fn search_attractions(
        &self,
        region: &str,
        min_reviews: u32,
    ) -> Result<Vec<AttractionCandidate>, PlacesError> {
        let query = format!("{} {ATTRACTION_QUERY_SUFFIX}", region.trim());
        let results = self.text_search(&query).await?;
        let total = results.len();

        let attractions: Vec<AttractionCandidate> = results
            .into_iter()
            .filter(|r| r.user_ratings_total.unwrap_or(0) >= min_reviews)
            .filter_map(PlaceResult::into_attraction)
            .collect();

        tracing::debug!(
            query = %query,
            total,
            kept = attractions.len(),
            min_reviews,
            "attraction text search"
        );
        Ok(attractions)
    }

    /// Raw text search.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::search_attractions`].
    pub async fn text_search(&self, query: &str) -> Result<Vec<PlaceResult>, PlacesError> {
        let url = self.build_url(
            "place/textsearch/json",
            &[("query", query), ("language", LANGUAGE)],
        )?;
        let envelope: ListEnvelope<PlaceResult> = self.get_json(&url).await?;
        Self::check_status(&envelope.status, envelope.error_message.as_deref())?;
        Ok(envelope.results)
    }

    /// Restaurants within `radius_m` of `center`, at most `limit` of them, in
    /// Google's order. Phone numbers are not populated here.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::search_attractions`].
    pub async fn nearby_restaurants(
        &self,
        center: Coordinate,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<RestaurantCandidate>, PlacesError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_m.to_string();
        let url = self.build_url(
            "place/nearbysearch/json",
            &[
                ("location", &location),
                ("radius", &radius),
                ("type", "restaurant"),
                ("language", LANGUAGE),
            ],
        )?;
        let envelope: ListEnvelope<PlaceResult> = self.get_json(&url).await?;
        Self::check_status(&envelope.status, envelope.error_message.as_deref())?;

        Ok(envelope
            .results
            .into_iter()
            .take(limit)
            .filter_map(PlaceResult::into_restaurant)
            .collect())
    }

    /// Fetches the requested `fields` of a place.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::search_attractions`].
    pub async fn place_details(
        &self,
        place_id: &str,
        fields: &str,
    ) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            "place/details/json",
            &[
                ("place_id", place_id),
                ("fields", fields),
                ("language", LANGUAGE),
            ],
        )?;
        let envelope: DetailsEnvelope = self.get_json(&url).await?;
        Self::check_status(&envelope.status, envelope.error_message.as_deref())?;
        Ok(envelope.result)
    }

    /// Formatted local phone number of a place, if Google has one.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::search_attractions`].
    pub async fn place_phone(&self, place_id: &str) -> Result<Option<String>, PlacesError> {
        let details = self
            .place_details(place_id, "name,formatted_address,formatted_phone_number")
            .await?;
        Ok(details
            .formatted_phone_number
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty()))
    }

    /// Reviews of a place in the order Google returned them.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::search_attractions`].
    pub async fn place_reviews(&self, place_id: &str) -> Result<Vec<RawReview>, PlacesError> {
        Ok(self.place_details(place_id, "review").await?.reviews)
    }

    /// Geocodes a free-form address. `Ok(None)` when Google has no result.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::search_attractions`].
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, PlacesError> {
        let url = self.build_url(
            "geocode/json",
            &[("address", address), ("language", LANGUAGE)],
        )?;
        let envelope: ListEnvelope<GeocodeResult> = self.get_json(&url).await?;
        Self::check_status(&envelope.status, envelope.error_message.as_deref())?;
        if envelope.status != "OK" {
            return Ok(None);
        }
        Ok(envelope
            .results
            .into_iter()
            .next()
            .and_then(|r| r.coordinate()))
    }

    /// Builds a Place Photo URL. The URL is not checked for reachability.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        let max_width = max_width.to_string();
        self.build_url(
            "place/photo",
            &[("maxwidth", &max_width), ("photoreference", photo_reference)],
        )
        .map(String::from)
        .unwrap_or_default()
    }

    /// Joins `endpoint` onto the base URL and appends `key` plus `extra`
    /// query pairs, percent-encoded.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// GET with retry, 2xx check, and JSON decoding.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, PlacesError> {
        let client = &self.client;
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = client.get(url.clone());
            async move {
                let response = request.send().await?.error_for_status()?;
                Ok::<String, PlacesError>(response.text().await?)
            }
        })
        .await?;

        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }

    /// Accepts `OK` and `ZERO_RESULTS`; anything else is an API error.
    fn check_status(status: &str, message: Option<&str>) -> Result<(), PlacesError> {
        match status {
            "OK" | "ZERO_RESULTS" => Ok(()),
            other => Err(PlacesError::ApiStatus {
                status: if other.is_empty() {
                    "MISSING_STATUS".to_owned()
                } else {
                    other.to_owned()
                },
                message: message.unwrap_or("no error message").to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> PlacesClient {
        PlacesClient::with_base_url("test-key", 30, "mattour-test", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_joins_endpoint_and_appends_key() {
        let client = test_client("https://maps.googleapis.com/maps/api");
        let url = client
            .build_url("place/details/json", &[("place_id", "abc")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/place/details/json?place_id=abc&key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_korean_query() {
        let client = test_client("https://maps.googleapis.com/maps/api/");
        let url = client
            .build_url("place/textsearch/json", &[("query", "제주 관광지")])
            .unwrap();
        assert!(
            url.as_str()
                .contains("query=%EC%A0%9C%EC%A3%BC+%EA%B4%80%EA%B4%91%EC%A7%80"),
            "query should be percent-encoded: {url}"
        );
    }

    #[test]
    fn photo_url_has_width_reference_and_key() {
        let client = test_client("https://maps.googleapis.com/maps/api/");
        assert_eq!(
            client.photo_url("PHOTO_REF", 400),
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photoreference=PHOTO_REF&key=test-key"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = PlacesClient::with_base_url("k", 30, "ua", "not a url");
        assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn check_status_accepts_zero_results() {
        assert!(PlacesClient::check_status("ZERO_RESULTS", None).is_ok());
        let err = PlacesClient::check_status("REQUEST_DENIED", Some("bad key")).unwrap_err();
        assert!(
            matches!(err, PlacesError::ApiStatus { ref status, ref message } if status == "REQUEST_DENIED" && message == "bad key")
        );
    }
}
