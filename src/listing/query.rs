//! Query builder: canonical query parameters for a filter state

use indexmap::IndexMap;
use reqwest::Url;
use serde::Serialize;

use crate::models::{FilterQuery, FilterState};

pub const KEY_TYPE: &str = "type";
pub const KEY_LOCATION: &str = "location";
pub const KEY_PRICE_CATEGORY: &str = "priceCategory";
pub const KEY_SEARCH: &str = "search";
pub const KEY_SORT: &str = "sort";
pub const KEY_PAGE: &str = "page";
pub const KEY_LIMIT: &str = "limit";

/// Ordered query parameters sent to the listing endpoint.
///
/// Keys keep insertion order, so two builds of the same state serialize to
/// the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParameters(IndexMap<String, String>);

impl QueryParameters {
    /// Build the canonical parameters for `state`.
    ///
    /// Fields equal to their default are left out; keys are emitted as
    /// type, location, priceCategory, search, sort, page.
    pub fn build(state: &FilterState) -> Self {
        let mut params = IndexMap::new();

        if let Some(event_type) = state.event_type {
            params.insert(KEY_TYPE.to_string(), event_type.as_str().to_string());
        }
        if !state.location.is_empty() {
            params.insert(KEY_LOCATION.to_string(), state.location.clone());
        }
        if let Some(price_category) = state.price_category {
            params.insert(KEY_PRICE_CATEGORY.to_string(), price_category.as_str().to_string());
        }
        if !state.search_term.is_empty() {
            params.insert(KEY_SEARCH.to_string(), state.search_term.clone());
        }
        if let Some(sort) = state.sort_key.wire_value() {
            params.insert(KEY_SORT.to_string(), sort.to_string());
        }
        if state.page > 1 {
            params.insert(KEY_PAGE.to_string(), state.page.to_string());
        }

        Self(params)
    }

    /// Append (or replace) a parameter after the canonical ones
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Form-encoded `k=v&k=v`, without the leading `?`
    pub fn to_query_string(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut url = Url::parse("http://localhost/").expect("static url");
        url.query_pairs_mut().extend_pairs(self.iter());
        url.query().unwrap_or_default().to_string()
    }

    /// `path` plus the query string, `?` only when there is one
    pub fn to_href(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }
}

/// `path` with `segment` appended as one percent-encoded path segment
pub fn segment_href(path: &str, segment: &str) -> String {
    let mut url = Url::parse("http://localhost/").expect("static url");
    url.set_path(path);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(segment);
    }
    url.path().to_string()
}

impl From<&QueryParameters> for FilterQuery {
    fn from(params: &QueryParameters) -> Self {
        let owned = |key: &str| params.get(key).map(str::to_string);
        FilterQuery {
            event_type: owned(KEY_TYPE),
            location: owned(KEY_LOCATION),
            price_category: owned(KEY_PRICE_CATEGORY),
            search: owned(KEY_SEARCH),
            sort: owned(KEY_SORT),
            page: owned(KEY_PAGE),
        }
    }
}
