//! One user interaction, end to end.
//!
//! Attraction search → (user picks one) → geocode → nearby restaurants →
//! per-restaurant phone lookup and Kakao reconciliation → cleaning.
//! Everything runs sequentially; latency grows linearly with the number of
//! restaurants.

use std::time::Duration;

use mattour_core::{
    AppConfig, AttractionCandidate, CleanedRestaurantRecord, Coordinate, ReconciledRestaurant,
};
use mattour_kakao::KakaoClient;
use mattour_places::PlacesClient;

use crate::clean::{clean, CleanPolicy};
use crate::enrich::fetch_phone;
use crate::error::PipelineError;
use crate::reconcile::{reconcile, region_hint, ReconcileSettings};

pub const DEFAULT_RESTAURANT_RADIUS_M: u32 = 2000;
pub const MIN_RESTAURANT_RADIUS_M: u32 = 500;
pub const MAX_RESTAURANT_RADIUS_M: u32 = 3000;

/// Knobs for a search interaction, usually derived from [`AppConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub min_attraction_reviews: u32,
    pub max_restaurants: usize,
    /// Pause after the nearby search, before any per-restaurant call.
    pub nearby_pause: Duration,
    pub reconcile: ReconcileSettings,
    pub clean: CleanPolicy,
}

impl SearchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            min_attraction_reviews: config.min_attraction_reviews,
            max_restaurants: config.max_restaurants,
            nearby_pause: Duration::from_millis(config.nearby_pause_ms),
            reconcile: ReconcileSettings {
                radius_m: config.match_radius_meters,
                early_accept_m: config.early_accept_meters,
            },
            clean: CleanPolicy::with_rating_filter(config.min_rating_filter),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_attraction_reviews: 50,
            max_restaurants: 15,
            nearby_pause: Duration::from_secs(1),
            reconcile: ReconcileSettings::default(),
            clean: CleanPolicy::default(),
        }
    }
}

/// Result of a restaurant search around one attraction.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantSearch {
    /// Geocoded location of the attraction; the map centre.
    pub center: Coordinate,
    pub restaurants: Vec<CleanedRestaurantRecord>,
}

/// Clamps a requested search radius to the supported range.
#[must_use]
pub fn clamp_radius(radius_m: u32) -> u32 {
    radius_m.clamp(MIN_RESTAURANT_RADIUS_M, MAX_RESTAURANT_RADIUS_M)
}

/// Attractions for `region` with enough reviews. A failed search yields an
/// empty list.
pub async fn search_attractions(
    places: &PlacesClient,
    region: &str,
    settings: &SearchSettings,
) -> Vec<AttractionCandidate> {
    match places
        .search_attractions(region, settings.min_attraction_reviews)
        .await
    {
        Ok(attractions) => {
            tracing::info!(region, count = attractions.len(), "attractions found");
            attractions
        }
        Err(e) => {
            tracing::warn!(region, error = %e, "attraction search failed");
            Vec::new()
        }
    }
}

/// Finds, reconciles and ranks restaurants near `attraction`.
///
/// # Errors
///
/// Returns [`PipelineError::Geocode`] when the attraction's address cannot be
/// geocoded. All other provider failures degrade to missing data.
pub async fn find_restaurants(
    places: &PlacesClient,
    kakao: &KakaoClient,
    attraction: &AttractionCandidate,
    radius_m: u32,
    settings: &SearchSettings,
) -> Result<RestaurantSearch, PipelineError> {
    let address = attraction.formatted_address.as_str();
    let center = match places.geocode(address).await {
        Ok(Some(coord)) => coord,
        Ok(None) => {
            return Err(PipelineError::Geocode {
                address: address.to_owned(),
            })
        }
        Err(e) => {
            tracing::warn!(address, error = %e, "geocode request failed");
            return Err(PipelineError::Geocode {
                address: address.to_owned(),
            });
        }
    };

    let radius_m = clamp_radius(radius_m);
    let candidates = match places
        .nearby_restaurants(center, radius_m, settings.max_restaurants)
        .await
    {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(attraction = %attraction.name, error = %e, "nearby search failed");
            Vec::new()
        }
    };
    tracing::info!(
        attraction = %attraction.name,
        radius_m,
        count = candidates.len(),
        "nearby restaurants fetched"
    );

    if !settings.nearby_pause.is_zero() {
        tokio::time::sleep(settings.nearby_pause).await;
    }

    let mut reconciled = Vec::with_capacity(candidates.len());
    for mut restaurant in candidates {
        restaurant.phone = fetch_phone(places, &restaurant.google_place_id).await;
        let region = region_hint(&restaurant.vicinity);
        let kakao_place_id = reconcile(kakao, &restaurant, &region, &settings.reconcile).await;
        reconciled.push(ReconciledRestaurant {
            restaurant,
            kakao_place_id,
        });
    }

    let matched = reconciled
        .iter()
        .filter(|r| r.kakao_place_id.is_some())
        .count();
    let restaurants = clean(reconciled, &settings.clean);
    tracing::info!(
        attraction = %attraction.name,
        matched,
        ranked = restaurants.len(),
        "restaurant search complete"
    );

    Ok(RestaurantSearch {
        center,
        restaurants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_radius_enforces_bounds() {
        assert_eq!(clamp_radius(100), 500);
        assert_eq!(clamp_radius(2000), 2000);
        assert_eq!(clamp_radius(10_000), 3000);
    }

    #[test]
    fn default_settings_match_documented_values() {
        let s = SearchSettings::default();
        assert_eq!(s.min_attraction_reviews, 50);
        assert_eq!(s.max_restaurants, 15);
        assert_eq!(s.nearby_pause, Duration::from_secs(1));
        assert_eq!(s.clean.min_rating, Some(3.5));
    }
}
