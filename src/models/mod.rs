//! Data models for the City Guide

pub mod enums;
pub mod event;
pub mod filter;

// Re-export commonly used types
pub use enums::{EventType, PriceCategory, SortKey, Theme};
pub use event::{EventDetail, EventSummary, ListingPage, ListingResponse};
pub use filter::{FilterPatch, FilterQuery, FilterState};
