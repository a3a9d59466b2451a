//! Matching Google restaurants to Kakao place IDs.
//!
//! Google and Kakao share no identifier, so each restaurant is looked up with
//! Kakao keyword queries (phone first, then region plus name) around its
//! Google coordinate. The closest hit across all queries wins. A hit closer
//! than the early-accept threshold stops further queries; farther hits are
//! still returned if nothing closer turns up.

use mattour_core::RestaurantCandidate;
use mattour_kakao::KakaoClient;

/// Tunables for Kakao reconciliation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileSettings {
    /// Radius of each Kakao keyword search, in meters.
    pub radius_m: u32,
    /// Stop querying once a candidate is strictly closer than this.
    pub early_accept_m: f64,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            radius_m: 300,
            early_accept_m: 100.0,
        }
    }
}

/// Administrative prefix of a Korean address, used to scope keyword queries.
///
/// Returns everything up to and including the first `시` (city); failing
/// that, up to and including the first `도` (province); otherwise empty.
///
/// `"제주특별자치도 제주시 항골남길 46"` → `"제주특별자치도 제주시"`.
#[must_use]
pub fn region_hint(address: &str) -> String {
    ['시', '도']
        .into_iter()
        .find_map(|marker| {
            address
                .find(marker)
                .map(|idx| address[..idx + marker.len_utf8()].trim().to_owned())
        })
        .unwrap_or_default()
}

/// Hangul syllables of `name` with everything else removed.
fn hangul_only(name: &str) -> String {
    name.chars().filter(|c| ('가'..='힣').contains(c)).collect()
}

/// Keyword queries to try, most specific first.
#[must_use]
pub fn build_queries(restaurant: &RestaurantCandidate, region: &str) -> Vec<String> {
    let mut queries = Vec::with_capacity(2);

    if let Some(phone) = restaurant.phone.as_deref().map(str::trim) {
        if !phone.is_empty() {
            queries.push(phone.to_owned());
        }
    }

    let korean = hangul_only(&restaurant.name);
    let name = if korean.is_empty() {
        restaurant.name.trim()
    } else {
        korean.as_str()
    };
    let scoped = format!("{region} {name}").trim().to_owned();
    if !scoped.is_empty() {
        queries.push(scoped);
    }

    queries
}

/// Finds the Kakao place ID for `restaurant`.
///
/// Query failures count as "no candidates" for that query. `None` means no
/// query produced a usable candidate.
pub async fn reconcile(
    kakao: &KakaoClient,
    restaurant: &RestaurantCandidate,
    region: &str,
    settings: &ReconcileSettings,
) -> Option<String> {
    let origin = restaurant.coordinate;
    let mut best: Option<(String, f64)> = None;

    for query in build_queries(restaurant, region) {
        let documents = match kakao.keyword_search(&query, origin, settings.radius_m).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(
                    restaurant = %restaurant.name,
                    query = %query,
                    error = %e,
                    "kakao query failed; treating as no candidates"
                );
                continue;
            }
        };

        for doc in documents {
            let Some(coord) = doc.coordinate() else {
                tracing::debug!(id = %doc.id, "skipping kakao document without coordinates");
                continue;
            };
            let distance = origin.distance_to(&coord);
            if best.as_ref().is_none_or(|(_, d)| distance < *d) {
                best = Some((doc.id, distance));
            }
        }

        if let Some((id, distance)) = &best {
            if *distance < settings.early_accept_m {
                tracing::debug!(
                    restaurant = %restaurant.name,
                    query = %query,
                    kakao_id = %id,
                    distance_m = distance,
                    "early accept"
                );
                break;
            }
        }
    }

    match &best {
        Some((id, distance)) => tracing::debug!(
            restaurant = %restaurant.name,
            kakao_id = %id,
            distance_m = distance,
            "reconciled"
        ),
        None => tracing::debug!(restaurant = %restaurant.name, "no kakao match"),
    }

    best.map(|(id, _)| id)
}
