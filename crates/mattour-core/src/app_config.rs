use crate::ConfigError;

pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const KAKAO_API_KEY_VAR: &str = "KAKAO_REST_API_KEY";

/// Runtime configuration for one `mattour` process.
///
/// Provider credentials are optional at load time: a command only fails with
/// [`ConfigError::MissingEnvVar`] when it actually needs a provider, via
/// [`AppConfig::google_api_key`] or [`AppConfig::kakao_api_key`].
#[derive(Clone)]
pub struct AppConfig {
    pub google_api_key: Option<String>,
    pub kakao_api_key: Option<String>,
    pub kakao_js_key: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub nearby_pause_ms: u64,
    /// Keep only restaurants rated strictly above 3.5.
    pub min_rating_filter: bool,
    pub match_radius_meters: u32,
    pub early_accept_meters: f64,
    pub min_attraction_reviews: u32,
    pub max_restaurants: usize,
}

impl AppConfig {
    /// Google Places key, or a configuration error if it was never set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `GOOGLE_MAPS_API_KEY` is unset.
    pub fn google_api_key(&self) -> Result<&str, ConfigError> {
        self.google_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(GOOGLE_API_KEY_VAR.to_string()))
    }

    /// Kakao REST key, or a configuration error if it was never set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `KAKAO_REST_API_KEY` is unset.
    pub fn kakao_api_key(&self) -> Result<&str, ConfigError> {
        self.kakao_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(KAKAO_API_KEY_VAR.to_string()))
    }

    /// App key for the Kakao Maps JavaScript SDK. Falls back to the REST key.
    #[must_use]
    pub fn kakao_map_key(&self) -> Option<&str> {
        self.kakao_js_key
            .as_deref()
            .or(self.kakao_api_key.as_deref())
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "kakao_api_key",
                &self.kakao_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "kakao_js_key",
                &self.kakao_js_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("nearby_pause_ms", &self.nearby_pause_ms)
            .field("min_rating_filter", &self.min_rating_filter)
            .field("match_radius_meters", &self.match_radius_meters)
            .field("early_accept_meters", &self.early_accept_meters)
            .field("min_attraction_reviews", &self.min_attraction_reviews)
            .field("max_restaurants", &self.max_restaurants)
            .finish()
    }
}
