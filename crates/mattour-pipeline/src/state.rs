//! Per-session search state.
//!
//! Results are only ever replaced wholesale. A new attraction search clears
//! the selection and any restaurant results derived from it.

use mattour_core::AttractionCandidate;

use crate::search::RestaurantSearch;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    attractions: Vec<AttractionCandidate>,
    selected: Option<usize>,
    restaurants: Option<RestaurantSearch>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the attraction list and resets everything downstream.
    pub fn replace_attractions(&mut self, attractions: Vec<AttractionCandidate>) {
        self.attractions = attractions;
        self.selected = None;
        self.restaurants = None;
    }

    #[must_use]
    pub fn attractions(&self) -> &[AttractionCandidate] {
        &self.attractions
    }

    /// Selects the first attraction whose name equals `name`.
    ///
    /// Returns the selection, or `None` (leaving state unchanged) if no
    /// attraction has that name.
    pub fn select_by_name(&mut self, name: &str) -> Option<&AttractionCandidate> {
        let idx = self.attractions.iter().position(|a| a.name == name)?;
        self.select_index(idx)
    }

    /// Selects the attraction at `idx`; `None` if out of range.
    pub fn select_index(&mut self, idx: usize) -> Option<&AttractionCandidate> {
        if idx >= self.attractions.len() {
            return None;
        }
        if self.selected != Some(idx) {
            self.restaurants = None;
        }
        self.selected = Some(idx);
        self.attractions.get(idx)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&AttractionCandidate> {
        self.selected.and_then(|idx| self.attractions.get(idx))
    }

    /// Replaces the restaurant result for the current selection.
    pub fn replace_restaurants(&mut self, search: RestaurantSearch) {
        self.restaurants = Some(search);
    }

    #[must_use]
    pub fn restaurants(&self) -> Option<&RestaurantSearch> {
        self.restaurants.as_ref()
    }
}
