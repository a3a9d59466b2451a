//! Cleaning and ranking of reconciled restaurants.
//!
//! Order matters: names are deduplicated before ratings are checked, so a
//! first occurrence without a rating still suppresses later duplicates.

use std::collections::HashSet;
use std::sync::LazyLock;

use mattour_core::{CleanedRestaurantRecord, ReconciledRestaurant};
use regex::Regex;

/// Restaurants at or below this rating are dropped when the filter is on.
pub const HIGH_RATING_FLOOR: f64 = 3.5;

static COUNTRY_CODE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^KR, ?").expect("valid regex"));
static COUNTRY_NAME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^South Korea,?\s*").expect("valid regex"));
static LATIN_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 ,.\-]+$").expect("valid regex"));

/// Names that mean "no name".
const PLACEHOLDER_NAMES: &[&str] = &["", "-", "없음", "none"];

/// Cleaning options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanPolicy {
    /// Keep only records rated strictly above this value.
    pub min_rating: Option<f64>,
}

impl CleanPolicy {
    /// Policy with the 3.5 rating floor switched on or off.
    #[must_use]
    pub fn with_rating_filter(enabled: bool) -> Self {
        Self {
            min_rating: enabled.then_some(HIGH_RATING_FLOOR),
        }
    }
}

impl Default for CleanPolicy {
    fn default() -> Self {
        Self::with_rating_filter(true)
    }
}

#[must_use]
pub fn is_placeholder_name(name: &str) -> bool {
    PLACEHOLDER_NAMES
        .iter()
        .any(|p| p.eq_ignore_ascii_case(name))
}

/// Trims, removes leading `KR,` / `South Korea,` prefixes, and trailing `/`.
#[must_use]
pub fn normalize_address(raw: &str) -> String {
    let mut address = raw.trim().to_owned();
    loop {
        let stripped = COUNTRY_NAME_PREFIX
            .replace(&COUNTRY_CODE_PREFIX.replace(&address, ""), "")
            .into_owned();
        if stripped == address {
            break;
        }
        address = stripped;
    }
    address.trim_end_matches('/').trim().to_owned()
}

/// `true` when the address is made up only of Latin letters, digits, spaces
/// and `,.-`. Real Korean local addresses carry Hangul.
#[must_use]
pub fn is_latin_only(address: &str) -> bool {
    LATIN_ONLY.is_match(address)
}

/// Normalizes, deduplicates, filters and sorts restaurant records.
///
/// Output is sorted by rating descending; ties keep input order.
pub fn clean<I>(records: I, policy: &CleanPolicy) -> Vec<CleanedRestaurantRecord>
where
    I: IntoIterator<Item = ReconciledRestaurant>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut dropped_unrated = 0usize;
    let mut dropped_address = 0usize;

    let mut cleaned: Vec<CleanedRestaurantRecord> = records
        .into_iter()
        .filter_map(|record| {
            let ReconciledRestaurant {
                restaurant,
                kakao_place_id,
            } = record;

            let name = restaurant.name.trim().to_owned();
            if is_placeholder_name(&name) || !seen.insert(name.clone()) {
                return None;
            }

            let Some(rating) = restaurant.rating.filter(|r| r.is_finite()) else {
                dropped_unrated += 1;
                return None;
            };

            let address = normalize_address(&restaurant.vicinity);
            if address.is_empty() || is_latin_only(&address) {
                dropped_address += 1;
                return None;
            }

            Some(CleanedRestaurantRecord {
                name,
                address,
                rating,
                coordinate: restaurant.coordinate,
                phone: restaurant.phone,
                google_place_id: restaurant.google_place_id,
                kakao_place_id,
                photo_refs: restaurant.photo_refs,
            })
        })
        .collect();

    if let Some(floor) = policy.min_rating {
        cleaned.retain(|r| r.rating > floor);
    }

    cleaned.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    tracing::debug!(
        kept = cleaned.len(),
        dropped_unrated,
        dropped_address,
        rating_floor = ?policy.min_rating,
        "cleaned restaurant list"
    );
    cleaned
}

#[cfg(test)]
mod tests {
    use mattour_core::{Coordinate, RestaurantCandidate};

    use super::*;

    fn rec(name: &str, address: &str, rating: Option<f64>) -> ReconciledRestaurant {
        ReconciledRestaurant {
            restaurant: RestaurantCandidate {
                google_place_id: format!("g-{name}"),
                name: name.to_owned(),
                vicinity: address.to_owned(),
                rating,
                coordinate: Coordinate::new(33.5, 126.5),
                phone: None,
                photo_refs: Vec::new(),
            },
            kakao_place_id: None,
        }
    }

    fn names(records: &[CleanedRestaurantRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    const ADDR: &str = "제주시 항골남길 46";

    #[test]
    fn trims_names_and_drops_placeholders() {
        let input = vec![
            rec("  자매국수  ", ADDR, Some(4.5)),
            rec("-", ADDR, Some(4.9)),
            rec("없음", ADDR, Some(4.9)),
            rec("   ", ADDR, Some(4.9)),
            rec("None", ADDR, Some(4.9)),
        ];
        let out = clean(input, &CleanPolicy::default());
        assert_eq!(names(&out), vec!["자매국수"]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let input = vec![
            rec("올래국수", "제주시 귀아랑길 24", Some(4.2)),
            rec("올래국수 ", "제주시 다른길 1", Some(4.8)),
        ];
        let out = clean(input, &CleanPolicy::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].address, "제주시 귀아랑길 24");
    }

    #[test]
    fn unrated_first_occurrence_suppresses_later_duplicate() {
        let input = vec![rec("돈사돈", ADDR, None), rec("돈사돈", ADDR, Some(4.7))];
        assert!(clean(input, &CleanPolicy::default()).is_empty());
    }

    #[test]
    fn non_finite_rating_is_dropped_not_defaulted() {
        let input = vec![rec("a식당", ADDR, Some(f64::NAN)), rec("b식당", ADDR, None)];
        assert!(clean(input, &CleanPolicy::with_rating_filter(false)).is_empty());
    }

    #[test]
    fn normalize_address_strips_prefixes_and_slashes() {
        assert_eq!(normalize_address("  KR, 제주시 연동 1  "), "제주시 연동 1");
        assert_eq!(normalize_address("KR,제주시 연동"), "제주시 연동");
        assert_eq!(normalize_address("South Korea, 서귀포시"), "서귀포시");
        assert_eq!(normalize_address("South Korea 서귀포시"), "서귀포시");
        assert_eq!(normalize_address("제주시 노형동//"), "제주시 노형동");
        assert_eq!(normalize_address("KR, South Korea, 제주시"), "제주시");
    }

    #[test]
    fn latin_only_address_is_dropped() {
        let input = vec![
            rec("a식당", "123 Main St, Seoul", Some(4.5)),
            rec("b식당", "KR, 123-4 Jeju", Some(4.5)),
            rec("c식당", "서울 중구 123 Main St", Some(4.5)),
        ];
        let out = clean(input, &CleanPolicy::default());
        assert_eq!(names(&out), vec!["c식당"]);
    }

    #[test]
    fn empty_address_is_dropped() {
        let input = vec![rec("a식당", "  ", Some(4.5)), rec("b식당", "KR, ", Some(4.5))];
        assert!(clean(input, &CleanPolicy::default()).is_empty());
    }

    #[test]
    fn rating_filter_is_strictly_greater_than_floor() {
        let input = vec![
            rec("a", ADDR, Some(3.5)),
            rec("b", ADDR, Some(3.6)),
            rec("c", ADDR, Some(2.0)),
        ];
        let on = clean(input.clone(), &CleanPolicy::with_rating_filter(true));
        assert_eq!(names(&on), vec!["b"]);

        let off = clean(input, &CleanPolicy::with_rating_filter(false));
        assert_eq!(names(&off), vec!["b", "a", "c"]);
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let input = vec![
            rec("first-4.0", ADDR, Some(4.0)),
            rec("top", ADDR, Some(4.9)),
            rec("second-4.0", ADDR, Some(4.0)),
            rec("third-4.0", ADDR, Some(4.0)),
        ];
        let out = clean(input, &CleanPolicy::default());
        assert_eq!(
            names(&out),
            vec!["top", "first-4.0", "second-4.0", "third-4.0"]
        );
    }

    #[test]
    fn output_has_unique_names_and_input_ratings() {
        let input = vec![
            rec("x", ADDR, Some(4.1)),
            rec("y", ADDR, Some(4.4)),
            rec("x", ADDR, Some(3.9)),
            rec(" y", ADDR, Some(4.0)),
            rec("z", ADDR, Some(3.8)),
        ];
        let input_ratings: Vec<f64> = input.iter().filter_map(|r| r.restaurant.rating).collect();
        let out = clean(input, &CleanPolicy::default());

        let unique: HashSet<&str> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(unique.len(), out.len());
        assert!(out.iter().all(|r| input_ratings.contains(&r.rating)));
        assert!(out.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn clean_is_idempotent() {
        let input = vec![
            rec(" 자매국수 ", "KR, 제주시 항골남길 46/", Some(4.3)),
            rec("올래국수", "South Korea, 제주시 귀아랑길 24 /", Some(4.6)),
            rec("Burger", "1 Main St", Some(4.9)),
            rec("자매국수", ADDR, Some(4.9)),
            rec("우진해장국", "제주시 서사로 11", Some(4.3)),
        ];
        let once = clean(input, &CleanPolicy::default());
        let twice = clean(
            once.iter().cloned().map(ReconciledRestaurant::from),
            &CleanPolicy::default(),
        );
        assert_eq!(once, twice);
        assert_eq!(names(&once), vec!["올래국수", "자매국수", "우진해장국"]);
    }
}
