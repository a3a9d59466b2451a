//! Client for the Google Places and Geocoding web services.

pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{PlaceDetails, PlaceResult, RawReview};
