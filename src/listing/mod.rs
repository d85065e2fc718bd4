//! Event listing pipeline.
//!
//! filter state -> query parameters -> upstream fetch -> page window -> view

pub mod controller;
pub mod filter_store;
pub mod pagination;
pub mod query;
pub mod sort;
pub mod view;

pub use controller::{ListingController, ListingSnapshot};
pub use filter_store::FilterStore;
pub use pagination::{window, PageSlot, Pager};
pub use query::QueryParameters;
pub use view::{EventDetailView, ListingRenderer, ListingView};
