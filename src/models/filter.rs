//! Browse intent: the filter state behind an event listing

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use unicode_normalization::UnicodeNormalization;
use utoipa::{IntoParams, ToSchema};

use super::enums::{EventType, PriceCategory, SortKey};

/// Current search/browse intent of one listing screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_term: String,
    pub event_type: Option<EventType>,
    pub location: String,
    pub price_category: Option<PriceCategory>,
    pub sort_key: SortKey,
    /// 1-based
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            event_type: None,
            location: String::new(),
            price_category: None,
            sort_key: SortKey::Default,
            page: 1,
        }
    }
}

impl FilterState {
    /// Rebuild the state carried in a listing URL.
    ///
    /// Unknown enum values, empty strings and unparsable pages fall back to
    /// the field default.
    pub fn from_query(query: &FilterQuery) -> Self {
        Self {
            search_term: query.search.as_deref().map(normalize_text).unwrap_or_default(),
            event_type: query.event_type.as_deref().and_then(EventType::from_param),
            location: query.location.as_deref().map(normalize_text).unwrap_or_default(),
            price_category: query
                .price_category
                .as_deref()
                .and_then(PriceCategory::from_param),
            sort_key: query
                .sort
                .as_deref()
                .and_then(SortKey::from_param)
                .unwrap_or_default(),
            page: query
                .page
                .as_deref()
                .and_then(|p| p.trim().parse::<u32>().ok())
                .unwrap_or(1)
                .max(1),
        }
    }

    /// True when every field other than `page` holds its default
    pub fn is_unfiltered(&self) -> bool {
        let defaults = Self::default();
        Self {
            page: defaults.page,
            ..self.clone()
        } == defaults
    }
}

fn normalize_text(value: &str) -> String {
    value.trim().nfc().collect()
}

/// Query-string form of `FilterState`, as found in listing URLs
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Event category
    #[serde(rename = "type", default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub event_type: Option<String>,
    /// Exact location match
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub location: Option<String>,
    /// Price band
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub price_category: Option<String>,
    /// Free-text search
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub search: Option<String>,
    /// default, popular, date, price-asc, price-desc
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub sort: Option<String>,
    /// Page number (1-based)
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub page: Option<String>,
}

/// Partial update merged into a `FilterState`.
///
/// `None` leaves the field untouched; for the optional enum fields
/// `Some(None)` clears the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search_term: Option<String>,
    pub event_type: Option<Option<EventType>>,
    pub location: Option<String>,
    pub price_category: Option<Option<PriceCategory>>,
    pub sort_key: Option<SortKey>,
    pub page: Option<u32>,
}

impl FilterPatch {
    pub fn search_term(mut self, value: impl Into<String>) -> Self {
        self.search_term = Some(value.into());
        self
    }

    pub fn event_type(mut self, value: Option<EventType>) -> Self {
        self.event_type = Some(value);
        self
    }

    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = Some(value.into());
        self
    }

    pub fn price_category(mut self, value: Option<PriceCategory>) -> Self {
        self.price_category = Some(value);
        self
    }

    pub fn sort_key(mut self, value: SortKey) -> Self {
        self.sort_key = Some(value);
        self
    }

    pub fn page(mut self, value: u32) -> Self {
        self.page = Some(value);
        self
    }

    /// Whether the patch touches anything besides `page`
    pub fn touches_filters(&self) -> bool {
        self.search_term.is_some()
            || self.event_type.is_some()
            || self.location.is_some()
            || self.price_category.is_some()
            || self.sort_key.is_some()
    }
}
