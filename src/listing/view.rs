//! List renderer: turns a listing snapshot into the view sent to the browser

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    context::{DisplayContext, Label},
    listing::{
        controller::{ListingError, ListingSnapshot},
        filter_store::FilterStore,
        pagination::{PageSlot, Pager},
        query::{segment_href, QueryParameters},
    },
    models::{EventDetail, EventSummary, EventType, FilterPatch, FilterState, PriceCategory, SortKey},
};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub date_label: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub type_label: String,
    pub price: f64,
    pub price_label: String,
    pub image_ref: Option<String>,
    pub view_count: u64,
    pub featured: bool,
    pub href: String,
}

/// Entry of the page-number bar; ellipsis entries carry no page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    pub label: String,
    pub page: Option<u32>,
    pub href: Option<String>,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub href: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub page_number: u32,
    pub page_count: u32,
    pub page_size: u32,
    pub slots: Vec<PageLink>,
    pub prev: NavLink,
    pub next: NavLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
    /// Listing with this option toggled
    pub href: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacetsView {
    pub event_types: Vec<FacetOption>,
    pub price_categories: Vec<FacetOption>,
    pub sorts: Vec<FacetOption>,
    /// Unfiltered listing, absent when nothing is filtered
    pub clear: Option<NavLink>,
}

/// Rendered event listing
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub filters: FilterState,
    /// Canonical query string of `filters`
    pub query: String,
    pub is_loading: bool,
    pub has_error: bool,
    pub is_empty: bool,
    /// Placeholder text for the empty and error states
    pub message: Option<String>,
    pub error: Option<ListingError>,
    pub total_count: u64,
    pub cards: Vec<EventCard>,
    pub pagination: PaginationView,
    pub facets: FacetsView,
    pub context: DisplayContext,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailView {
    #[serde(flatten)]
    pub card: EventCard,
    pub description: Option<String>,
    pub end_date_label: Option<String>,
    pub address: Option<String>,
    pub organizer: Option<String>,
    pub website: Option<String>,
    pub context: DisplayContext,
}

pub struct ListingRenderer<'a> {
    ctx: &'a DisplayContext,
    base_path: &'a str,
    max_visible: u32,
}

impl<'a> ListingRenderer<'a> {
    pub fn new(ctx: &'a DisplayContext, base_path: &'a str, max_visible: u32) -> Self {
        Self {
            ctx,
            base_path,
            max_visible,
        }
    }

    pub fn render(&self, store: &FilterStore, snapshot: &ListingSnapshot) -> ListingView {
        let has_error = snapshot.has_error();
        let is_empty = snapshot.is_empty();
        let message = if has_error {
            Some(self.ctx.label(Label::Error).to_string())
        } else if is_empty {
            Some(self.ctx.label(Label::Empty).to_string())
        } else {
            None
        };

        ListingView {
            filters: store.get(),
            query: QueryParameters::build(store.state()).to_query_string(),
            is_loading: snapshot.is_loading,
            has_error,
            is_empty,
            message,
            error: snapshot.error.clone(),
            total_count: snapshot.page.total_count,
            cards: snapshot.page.items.iter().map(|e| self.card(e)).collect(),
            pagination: self.pagination(store, snapshot),
            facets: self.facets(store),
            context: self.ctx.clone(),
        }
    }

    pub fn render_detail(&self, detail: &EventDetail) -> EventDetailView {
        EventDetailView {
            card: self.card(&detail.summary),
            description: detail.description.clone(),
            end_date_label: detail.end_date.as_ref().map(|d| self.ctx.format_date(d)),
            address: detail.address.clone(),
            organizer: detail.organizer.clone(),
            website: detail.website.clone(),
            context: self.ctx.clone(),
        }
    }

    fn card(&self, event: &EventSummary) -> EventCard {
        EventCard {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.date,
            date_label: self.ctx.format_date(&event.date),
            location: event.location.clone(),
            event_type: event.event_type,
            type_label: event.event_type.to_string(),
            price: event.price,
            price_label: self.ctx.format_price(event.price),
            image_ref: event.image_ref.clone(),
            view_count: event.view_count,
            featured: event.featured,
            href: segment_href(self.base_path, &event.id),
        }
    }

    fn href(&self, state: &FilterState) -> String {
        QueryParameters::build(state).to_href(self.base_path)
    }

    fn page_href(&self, store: &FilterStore, page: u32) -> String {
        self.href(&store.preview(FilterPatch::default().page(page)))
    }

    fn pagination(&self, store: &FilterStore, snapshot: &ListingSnapshot) -> PaginationView {
        let pager = Pager::for_page(&snapshot.page);

        let slots = pager
            .window(self.max_visible)
            .into_iter()
            .map(|slot| match slot {
                PageSlot::Page(n) => PageLink {
                    label: slot.to_string(),
                    page: Some(n),
                    href: pager.go_to_page(n).map(|target| self.page_href(store, target)),
                    current: n == pager.current(),
                },
                PageSlot::Ellipsis => PageLink {
                    label: slot.to_string(),
                    page: None,
                    href: None,
                    current: false,
                },
            })
            .collect();

        PaginationView {
            page_number: pager.current(),
            page_count: snapshot.page.page_count,
            page_size: snapshot.page.page_size,
            slots,
            prev: NavLink {
                label: self.ctx.label(Label::Previous).to_string(),
                href: pager.prev().map(|p| self.page_href(store, p)),
                disabled: pager.prev_disabled(),
            },
            next: NavLink {
                label: self.ctx.label(Label::Next).to_string(),
                href: pager.next().map(|p| self.page_href(store, p)),
                disabled: pager.next_disabled(),
            },
        }
    }

    fn facets(&self, store: &FilterStore) -> FacetsView {
        let state = store.state();

        let event_types = EventType::ALL
            .into_iter()
            .map(|t| {
                let selected = state.event_type == Some(t);
                let toggled = if selected { None } else { Some(t) };
                FacetOption {
                    value: t.as_str().to_string(),
                    label: t.to_string(),
                    selected,
                    href: self.href(&store.preview(FilterPatch::default().event_type(toggled))),
                }
            })
            .collect();

        let price_categories = PriceCategory::ALL
            .into_iter()
            .map(|p| {
                let selected = state.price_category == Some(p);
                let toggled = if selected { None } else { Some(p) };
                FacetOption {
                    value: p.as_str().to_string(),
                    label: p.to_string(),
                    selected,
                    href: self.href(&store.preview(FilterPatch::default().price_category(toggled))),
                }
            })
            .collect();

        let sorts = SortKey::ALL
            .into_iter()
            .map(|s| FacetOption {
                value: s.as_str().to_string(),
                label: s.to_string(),
                selected: state.sort_key == s,
                href: self.href(&store.preview(FilterPatch::default().sort_key(s))),
            })
            .collect();

        let clear = (!state.is_unfiltered()).then(|| {
            let mut cleared = store.clone();
            cleared.clear();
            NavLink {
                label: self.ctx.label(Label::ClearFilters).to_string(),
                href: Some(self.href(cleared.state())),
                disabled: false,
            }
        });

        FacetsView {
            event_types,
            price_categories,
            sorts,
            clear,
        }
    }
}
