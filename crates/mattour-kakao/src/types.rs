//! Kakao Local keyword-search response types.
//!
//! Kakao encodes coordinates as strings (`x` = longitude, `y` = latitude).

use mattour_core::Coordinate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct KeywordSearchResponse {
    #[serde(default)]
    pub documents: Vec<KakaoPlace>,
}

/// One keyword-search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoPlace {
    pub id: String,
    #[serde(default)]
    pub place_name: String,
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub place_url: String,
    /// Longitude as a decimal string.
    #[serde(default)]
    pub x: String,
    /// Latitude as a decimal string.
    #[serde(default)]
    pub y: String,
}

impl KakaoPlace {
    /// Parsed location, or `None` if either coordinate is missing or not a
    /// finite number.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lng = self.x.trim().parse::<f64>().ok()?;
        let lat = self.y.trim().parse::<f64>().ok()?;
        (lat.is_finite() && lng.is_finite()).then(|| Coordinate::new(lat, lng))
    }
}
