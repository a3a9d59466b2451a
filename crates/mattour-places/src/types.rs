//! Google Places / Geocoding response types.
//!
//! Every endpoint wraps its payload in a `{"status": "OK", ...}` envelope.
//! Fields Google may omit are `Option` or `#[serde(default)]`; callers pick
//! the fallback explicitly at the use site.

use mattour_core::{AttractionCandidate, Coordinate, RestaurantCandidate};
use serde::{Deserialize, Deserializer};

/// Envelope for list endpoints (`textsearch`, `nearbysearch`, `geocode`).
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<T>,
}

/// Envelope for the `details` endpoint.
#[derive(Debug, Deserialize)]
pub struct DetailsEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: PlaceDetails,
}

/// One entry from a text or nearby search.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    /// Coerced from a number or numeric string; anything else is `None`.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub photo_reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

impl Geometry {
    /// The location, if both components are present and finite.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        let location = self.location?;
        Some(Coordinate::new(location.lat?, location.lng?))
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
}

/// Payload of the `details` endpoint, restricted to the fields we request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

/// A review exactly as Google returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub time: Option<i64>,
}

/// Geocoding result; only the location is used.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl GeocodeResult {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.geometry.as_ref()?.coordinate()
    }
}

impl PlaceResult {
    /// Photo references in Google's order; photos without one are skipped.
    fn photo_refs(&self) -> Vec<String> {
        self.photos
            .iter()
            .filter_map(|p| p.photo_reference.clone())
            .filter(|r| !r.is_empty())
            .collect()
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.geometry.as_ref()?.coordinate()
    }

    /// Converts a text-search hit into an [`AttractionCandidate`].
    ///
    /// Returns `None` when the place ID or location is missing.
    #[must_use]
    pub fn into_attraction(self) -> Option<AttractionCandidate> {
        let photo_refs = self.photo_refs();
        let coordinate = self.coordinate()?;
        Some(AttractionCandidate {
            google_place_id: self.place_id?,
            name: self.name.unwrap_or_default(),
            formatted_address: self.formatted_address.unwrap_or_default(),
            rating: self.rating,
            review_count: self.user_ratings_total.unwrap_or(0),
            photo_refs,
            coordinate,
        })
    }

    /// Converts a nearby-search hit into a [`RestaurantCandidate`] with no
    /// phone number yet.
    ///
    /// Returns `None` when the place ID or location is missing.
    #[must_use]
    pub fn into_restaurant(self) -> Option<RestaurantCandidate> {
        let photo_refs = self.photo_refs();
        let coordinate = self.coordinate()?;
        Some(RestaurantCandidate {
            google_place_id: self.place_id?,
            name: self.name.unwrap_or_default(),
            vicinity: self.vicinity.unwrap_or_default(),
            rating: self.rating,
            coordinate,
            phone: None,
            photo_refs,
        })
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}
