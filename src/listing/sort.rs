//! Local ordering of listing items.
//!
//! Used when the upstream answered with a bare array and so ignored `sort`.
//! Equal keys always fall back to `id` ascending so the order is total.

use std::cmp::Ordering;

use crate::models::{EventSummary, SortKey};

pub fn sort_events(items: &mut [EventSummary], key: SortKey) {
    items.sort_by(|a, b| compare(a, b, key).then_with(|| a.id.cmp(&b.id)));
}

fn compare(a: &EventSummary, b: &EventSummary, key: SortKey) -> Ordering {
    match key {
        SortKey::Default => b.featured.cmp(&a.featured).then_with(|| a.date.cmp(&b.date)),
        SortKey::Popular => b.view_count.cmp(&a.view_count),
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::PriceAsc => a.price.total_cmp(&b.price),
        SortKey::PriceDesc => b.price.total_cmp(&a.price),
    }
}
