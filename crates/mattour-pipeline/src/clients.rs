//! Provider clients built from [`AppConfig`].
//!
//! Credentials are resolved here, before any client exists, so a missing key
//! stops a command without a single network call.

use mattour_core::AppConfig;
use mattour_kakao::KakaoClient;
use mattour_places::PlacesClient;

use crate::error::PipelineError;

/// Google client with the configured timeout, user agent and retry policy.
///
/// # Errors
///
/// - [`PipelineError::Config`] when `GOOGLE_MAPS_API_KEY` is unset.
/// - [`PipelineError::PlacesClient`] if the HTTP client cannot be built.
pub fn places_client(config: &AppConfig) -> Result<PlacesClient, PipelineError> {
    let client = PlacesClient::new(
        config.google_api_key()?,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(PipelineError::PlacesClient)?;
    Ok(client.with_retry(config.max_retries, config.retry_backoff_base_ms))
}

/// Kakao client with the configured timeout and user agent.
///
/// # Errors
///
/// - [`PipelineError::Config`] when `KAKAO_REST_API_KEY` is unset.
/// - [`PipelineError::KakaoClient`] if the HTTP client cannot be built.
pub fn kakao_client(config: &AppConfig) -> Result<KakaoClient, PipelineError> {
    KakaoClient::new(
        config.kakao_api_key()?,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(PipelineError::KakaoClient)
}
