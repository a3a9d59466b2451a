use thiserror::Error;

/// Conditions that stop an interaction: missing credentials, a provider
/// client that cannot be built, an ungeocodable attraction, or a failed
/// export. Failures of individual provider requests are absorbed inside the
/// pipeline and never show up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] mattour_core::ConfigError),

    /// The selected attraction's address could not be geocoded.
    #[error("could not geocode address '{address}'")]
    Geocode { address: String },

    #[error("failed to build Google Places client: {0}")]
    PlacesClient(#[source] mattour_places::PlacesError),

    #[error("failed to build Kakao client: {0}")]
    KakaoClient(#[source] mattour_kakao::KakaoError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
