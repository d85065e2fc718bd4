//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// Event category, exact-matched by the upstream `type` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Concert,
    Festival,
    Exhibition,
    Theatre,
    Sport,
    Conference,
    Tour,
    #[serde(other)]
    Other,
}

impl EventType {
    pub const ALL: [EventType; 8] = [
        EventType::Concert,
        EventType::Festival,
        EventType::Exhibition,
        EventType::Theatre,
        EventType::Sport,
        EventType::Conference,
        EventType::Tour,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Concert => "concert",
            EventType::Festival => "festival",
            EventType::Exhibition => "exhibition",
            EventType::Theatre => "theatre",
            EventType::Sport => "sport",
            EventType::Conference => "conference",
            EventType::Tour => "tour",
            EventType::Other => "other",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EventType::Concert => "Concert",
            EventType::Festival => "Festival",
            EventType::Exhibition => "Exhibition",
            EventType::Theatre => "Theatre",
            EventType::Sport => "Sport",
            EventType::Conference => "Conference",
            EventType::Tour => "Guided tour",
            EventType::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// PriceCategory
// ---------------------------------------------------------------------------

/// Price band, exact-matched by the upstream `priceCategory` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriceCategory {
    Free,
    Budget,
    Moderate,
    Premium,
}

impl PriceCategory {
    pub const ALL: [PriceCategory; 4] = [
        PriceCategory::Free,
        PriceCategory::Budget,
        PriceCategory::Moderate,
        PriceCategory::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceCategory::Free => "free",
            PriceCategory::Budget => "budget",
            PriceCategory::Moderate => "moderate",
            PriceCategory::Premium => "premium",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl std::fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PriceCategory::Free => "Free",
            PriceCategory::Budget => "Budget",
            PriceCategory::Moderate => "Moderate",
            PriceCategory::Premium => "Premium",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// SortKey
// ---------------------------------------------------------------------------

/// Listing order.
///
/// The state key (`price-asc`) differs from the value the upstream API
/// expects (`price-low`); `Default` is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    Popular,
    Date,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Default,
        SortKey::Popular,
        SortKey::Date,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::Popular => "popular",
            SortKey::Date => "date",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }

    /// Value of the upstream `sort` parameter
    pub fn wire_value(&self) -> Option<&'static str> {
        match self {
            SortKey::Default => None,
            SortKey::Popular => Some("popular"),
            SortKey::Date => Some("date"),
            SortKey::PriceAsc => Some("price-low"),
            SortKey::PriceDesc => Some("price-high"),
        }
    }

    /// Accepts both the state key and the wire value
    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value || s.wire_value() == Some(value))
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SortKey::Default => "Recommended",
            SortKey::Popular => "Most popular",
            SortKey::Date => "Date",
            SortKey::PriceAsc => "Price: low to high",
            SortKey::PriceDesc => "Price: high to low",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}
