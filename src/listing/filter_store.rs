//! Filter state store

use crate::models::{FilterPatch, FilterState};

/// Holds the filter state of one listing screen.
///
/// Any change to a field other than `page` sends the user back to page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStore {
    state: FilterState,
}

impl FilterStore {
    pub fn new(state: FilterState) -> Self {
        Self { state }
    }

    pub fn get(&self) -> FilterState {
        self.state.clone()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Shallow-merge `patch` into the current state
    pub fn set(&mut self, patch: FilterPatch) {
        self.state = self.preview(patch);
    }

    /// State `set(patch)` would produce, without applying it
    pub fn preview(&self, patch: FilterPatch) -> FilterState {
        let mut next = self.state.clone();
        let reset_page = patch.touches_filters();

        if let Some(search_term) = patch.search_term {
            next.search_term = search_term;
        }
        if let Some(event_type) = patch.event_type {
            next.event_type = event_type;
        }
        if let Some(location) = patch.location {
            next.location = location;
        }
        if let Some(price_category) = patch.price_category {
            next.price_category = price_category;
        }
        if let Some(sort_key) = patch.sort_key {
            next.sort_key = sort_key;
        }
        if let Some(page) = patch.page {
            next.page = page.max(1);
        }
        if reset_page {
            next.page = 1;
        }
        next
    }

    pub fn clear(&mut self) {
        self.state = FilterState::default();
    }
}
