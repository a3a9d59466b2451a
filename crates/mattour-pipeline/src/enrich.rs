//! Fail-soft place detail lookups.
//!
//! Each lookup degrades to an absent/empty value on any provider failure so a
//! single venue can never abort the search.

use mattour_core::Review;
use mattour_places::{PlacesClient, RawReview};

/// Display width of a shortened review, in characters.
pub const REVIEW_TEXT_WIDTH: usize = 80;
pub const REVIEW_PLACEHOLDER: &str = "…";
pub const ANONYMOUS_AUTHOR: &str = "익명";
pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

/// Phone number for a Google place, or `None` on failure or absence.
pub async fn fetch_phone(places: &PlacesClient, place_id: &str) -> Option<String> {
    match places.place_phone(place_id).await {
        Ok(phone) => phone,
        Err(e) => {
            tracing::warn!(place_id, error = %e, "phone lookup failed");
            None
        }
    }
}

/// Newest `limit` reviews of a place, text shortened for display.
///
/// Returns an empty list when the lookup fails.
pub async fn fetch_reviews(places: &PlacesClient, place_id: &str, limit: usize) -> Vec<Review> {
    match places.place_reviews(place_id).await {
        Ok(raw) => latest_reviews(raw, limit),
        Err(e) => {
            tracing::warn!(place_id, error = %e, "review lookup failed");
            Vec::new()
        }
    }
}

/// Photo URL for the given reference. Not checked for reachability.
#[must_use]
pub fn fetch_photo_url(places: &PlacesClient, photo_reference: &str, max_width: u32) -> String {
    places.photo_url(photo_reference, max_width)
}

/// Sorts by timestamp descending (missing timestamps last), keeps `limit`,
/// and shortens each text.
#[must_use]
pub fn latest_reviews(raw: Vec<RawReview>, limit: usize) -> Vec<Review> {
    let mut reviews: Vec<Review> = raw
        .into_iter()
        .map(|r| Review {
            author: r
                .author_name
                .map(|a| a.trim().to_owned())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_owned()),
            rating: r.rating,
            text: shorten(
                r.text.as_deref().unwrap_or_default(),
                REVIEW_TEXT_WIDTH,
                REVIEW_PLACEHOLDER,
            ),
            time: r.time.unwrap_or(0),
        })
        .collect();
    reviews.sort_by(|a, b| b.time.cmp(&a.time));
    reviews.truncate(limit);
    reviews
}

/// Collapses whitespace and truncates `text` on a word boundary so that the
/// result, including `placeholder`, fits in `width` characters.
///
/// If not even the first word fits, returns just the placeholder.
#[must_use]
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut out = String::new();
    let mut used = 0usize;
    for word in words {
        let sep = usize::from(!out.is_empty());
        let len = word.chars().count();
        if used + sep + len > budget {
            break;
        }
        if sep == 1 {
            out.push(' ');
        }
        out.push_str(word);
        used += sep + len;
    }

    if out.is_empty() {
        return placeholder.trim_start().to_owned();
    }
    out.push_str(placeholder);
    out
}
