//! Command handlers for the CLI.
//!
//! Clients come from [`mattour_pipeline::clients`], so a missing key fails the
//! command without a single network call. Provider failures below that point
//! are handled inside the pipeline and show up as missing data.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use mattour_core::{AppConfig, AttractionCandidate, CleanedRestaurantRecord, Review};
use mattour_pipeline::enrich::{fetch_photo_url, fetch_reviews, DEFAULT_PHOTO_WIDTH};
use mattour_pipeline::export::{export_file_name, write_csv, NO_PHONE};
use mattour_pipeline::map::{markers, render_map_html};
use mattour_pipeline::{
    find_restaurants, kakao_client, places_client, search_attractions, SearchSession,
    SearchSettings,
};
use mattour_places::PlacesClient;

/// Reviews shown for the selected attraction.
pub(crate) const ATTRACTION_REVIEW_COUNT: usize = 3;
/// Restaurants that get a review preview.
pub(crate) const RESTAURANT_REVIEW_PREVIEWS: usize = 5;

/// Which attraction to search around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    /// 1-based position in the printed attraction list.
    Index(usize),
    Name(String),
}

/// Parses `--pick`: a positive integer is a list index, anything else a name.
///
/// # Errors
///
/// Rejects blank input and index `0`.
pub fn parse_pick(raw: &str) -> Result<Pick, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("attraction name or index must not be empty".to_string());
    }
    match raw.parse::<usize>() {
        Ok(0) => Err("attraction index starts at 1".to_string()),
        Ok(n) => Ok(Pick::Index(n)),
        Err(_) => Ok(Pick::Name(raw.to_string())),
    }
}

/// Where to write the restaurant table and map page, if anywhere.
#[derive(Debug, Default)]
pub(crate) struct RestaurantOutput {
    /// `Some(None)` means "write CSV under the default file name".
    pub csv: Option<Option<PathBuf>>,
    pub map: Option<PathBuf>,
}

fn fmt_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "-".to_string(), |r| format!("{r:.1}"))
}

fn print_attractions(attractions: &[AttractionCandidate]) {
    for (i, a) in attractions.iter().enumerate() {
        println!(
            "{:>3}. {} (★{}, {} reviews)",
            i + 1,
            a.name,
            fmt_rating(a.rating),
            a.review_count
        );
        println!("     {}", a.formatted_address);
        println!("     {}", a.maps_url());
    }
}

/// Two lines: author, rating and date, then the shortened text.
pub(crate) fn format_review(review: &Review, indent: &str) -> String {
    let date = review
        .posted_at()
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!(
        "{indent}{} ★{} {}\n{indent}  {}",
        review.author,
        fmt_rating(review.rating),
        date,
        review.text
    )
}

fn print_review(review: &Review, indent: &str) {
    println!("{}", format_review(review, indent));
}

/// Whether the row at `rank` (0-based) gets a review preview.
pub(crate) fn has_review_preview(rank: usize) -> bool {
    rank < RESTAURANT_REVIEW_PREVIEWS
}

/// Prints the ranked table; the first few rows also get their newest review.
async fn print_restaurants(places: &PlacesClient, restaurants: &[CleanedRestaurantRecord]) {
    for (i, r) in restaurants.iter().enumerate() {
        println!(
            "{:>3}. {} ★{:.1} | {} | {}",
            i + 1,
            r.name,
            r.rating,
            r.address,
            r.phone.as_deref().unwrap_or(NO_PHONE)
        );
        match &r.kakao_place_id {
            Some(id) => println!("     kakao: https://place.map.kakao.com/{id}"),
            None => println!("     kakao: no match"),
        }
        println!("     {}", r.maps_url());
        if has_review_preview(i) {
            if let Some(review) = fetch_reviews(places, &r.google_place_id, 1).await.first() {
                print_review(review, "     ");
            }
        }
    }
}

/// Lists attractions for `region`, best first in Google's order.
///
/// # Errors
///
/// Returns an error if the Google key is missing or the client cannot be built.
pub(crate) async fn run_attractions(
    config: &AppConfig,
    region: &str,
    top: Option<usize>,
) -> anyhow::Result<()> {
    let places = places_client(config)?;
    let settings = SearchSettings::from_app_config(config);

    let mut attractions = search_attractions(&places, region, &settings).await;
    if attractions.is_empty() {
        println!("no attractions found for {region}");
        return Ok(());
    }
    if let Some(top) = top {
        attractions.truncate(top);
    }
    print_attractions(&attractions);
    Ok(())
}

/// Searches attractions, picks one, and ranks the restaurants around it.
///
/// # Errors
///
/// Returns an error if either provider key is missing, the picked attraction
/// does not exist, its address cannot be geocoded, or an output file cannot
/// be written.
pub(crate) async fn run_restaurants(
    config: &AppConfig,
    region: &str,
    pick: Option<&Pick>,
    radius_m: u32,
    rating_filter: bool,
    output: &RestaurantOutput,
) -> anyhow::Result<()> {
    let places = places_client(config)?;
    let kakao = kakao_client(config)?;
    let mut settings = SearchSettings::from_app_config(config);
    if !rating_filter {
        settings.clean = mattour_pipeline::CleanPolicy::with_rating_filter(false);
    }

    let mut session = SearchSession::new();
    session.replace_attractions(search_attractions(&places, region, &settings).await);
    if session.attractions().is_empty() {
        println!("no attractions found for {region}");
        return Ok(());
    }

    let selected = match pick {
        None => session.select_index(0),
        Some(Pick::Index(n)) => session.select_index(n - 1),
        Some(Pick::Name(name)) => session.select_by_name(name),
    };
    let Some(attraction) = selected.cloned() else {
        print_attractions(session.attractions());
        anyhow::bail!("no attraction matching {pick:?} in {region}");
    };
    println!("{} ({})", attraction.name, attraction.formatted_address);
    if let Some(photo) = attraction.photo_refs.first() {
        println!("photo: {}", fetch_photo_url(&places, photo, DEFAULT_PHOTO_WIDTH));
    }
    for review in fetch_reviews(&places, &attraction.google_place_id, ATTRACTION_REVIEW_COUNT).await {
        print_review(&review, "  ");
    }
    println!("searching restaurants near {}", attraction.name);

    let result = find_restaurants(&places, &kakao, &attraction, radius_m, &settings).await?;
    session.replace_restaurants(result);
    let Some(result) = session.restaurants() else {
        return Ok(());
    };

    if result.restaurants.is_empty() {
        println!("no restaurants passed cleaning near {}", attraction.name);
        return Ok(());
    }
    print_restaurants(&places, &result.restaurants).await;

    if let Some(csv) = &output.csv {
        let path = csv
            .clone()
            .unwrap_or_else(|| PathBuf::from(export_file_name(&attraction.name)));
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        write_csv(file, &result.restaurants)?;
        println!("wrote {} rows to {}", result.restaurants.len(), path.display());
    }

    if let Some(path) = &output.map {
        let app_key = config.kakao_map_key().unwrap_or_default();
        let html = render_map_html(result.center, &markers(&result.restaurants), app_key);
        std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
        println!("wrote map to {}", path.display());
    }

    Ok(())
}

/// Prints the newest reviews of a place.
///
/// # Errors
///
/// Returns an error if the Google key is missing or the client cannot be built.
pub(crate) async fn run_reviews(
    config: &AppConfig,
    place_id: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let places = places_client(config)?;
    let reviews = fetch_reviews(&places, place_id, limit).await;
    if reviews.is_empty() {
        println!("no reviews for {place_id}");
        return Ok(());
    }

    for review in &reviews {
        print_review(review, "");
    }
    Ok(())
}
