//! Request-scoped domain records.
//!
//! Every value here is built for a single search interaction and thrown away
//! on the next one. Google Places identifiers are the source of truth for
//! photos and reviews; Kakao identifiers are only used for map links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::distance_meters;

/// WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance to `other` in meters.
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance_meters(self.lat, self.lng, other.lat, other.lng)
    }
}

/// A tourist attraction returned by the Google text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractionCandidate {
    pub google_place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub rating: Option<f64>,
    pub review_count: u32,
    /// Photo references in the order Google returned them.
    pub photo_refs: Vec<String>,
    pub coordinate: Coordinate,
}

impl AttractionCandidate {
    /// Canonical Google Maps link for this place.
    #[must_use]
    pub fn maps_url(&self) -> String {
        google_maps_url(&self.google_place_id)
    }
}

/// A restaurant returned by the Google nearby search, optionally enriched
/// with a phone number from the details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantCandidate {
    pub google_place_id: String,
    pub name: String,
    /// Short "vicinity" address as returned by the nearby search.
    pub vicinity: String,
    pub rating: Option<f64>,
    pub coordinate: Coordinate,
    pub phone: Option<String>,
    pub photo_refs: Vec<String>,
}

/// A [`RestaurantCandidate`] plus the Kakao place ID it was matched to.
///
/// `kakao_place_id` is `None` when no Kakao query returned a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRestaurant {
    pub restaurant: RestaurantCandidate,
    pub kakao_place_id: Option<String>,
}

/// Display-ready restaurant row produced by the cleaning stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRestaurantRecord {
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub coordinate: Coordinate,
    pub phone: Option<String>,
    pub google_place_id: String,
    pub kakao_place_id: Option<String>,
    pub photo_refs: Vec<String>,
}

impl CleanedRestaurantRecord {
    /// Key used to look the venue up on Kakao Map: the phone number when
    /// known, otherwise `"{address} {name}"`.
    #[must_use]
    pub fn search_key(&self) -> String {
        match self.phone.as_deref().map(str::trim) {
            Some(phone) if !phone.is_empty() => phone.to_owned(),
            _ => format!("{} {}", self.address, self.name),
        }
    }

    #[must_use]
    pub fn maps_url(&self) -> String {
        google_maps_url(&self.google_place_id)
    }
}

impl From<CleanedRestaurantRecord> for ReconciledRestaurant {
    fn from(record: CleanedRestaurantRecord) -> Self {
        Self {
            restaurant: RestaurantCandidate {
                google_place_id: record.google_place_id,
                name: record.name,
                vicinity: record.address,
                rating: Some(record.rating),
                coordinate: record.coordinate,
                phone: record.phone,
                photo_refs: record.photo_refs,
            },
            kakao_place_id: record.kakao_place_id,
        }
    }
}

/// A single user review from the Google details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: Option<f64>,
    /// Review body, already shortened for display.
    pub text: String,
    /// Unix timestamp in seconds.
    pub time: i64,
}

impl Review {
    #[must_use]
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

fn google_maps_url(place_id: &str) -> String {
    format!("https://www.google.com/maps/place/?q=place_id:{place_id}")
}
