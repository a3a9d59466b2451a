//! Restaurant discovery, Kakao reconciliation, cleaning and ranking.
//!
//! [`search`] drives one user interaction end to end. The stages are also
//! exposed individually: [`reconcile`], [`enrich`], [`clean`].

pub mod clean;
pub mod clients;
pub mod enrich;
pub mod error;
pub mod export;
pub mod map;
pub mod reconcile;
pub mod search;
pub mod state;

pub use clean::{clean, CleanPolicy};
pub use clients::{kakao_client, places_client};
pub use error::PipelineError;
pub use reconcile::{reconcile, region_hint, ReconcileSettings};
pub use search::{find_restaurants, search_attractions, RestaurantSearch, SearchSettings};
pub use state::SearchSession;
