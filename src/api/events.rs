//! Event listing endpoints

use axum::{
    extract::{Path, Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use sha2::{Digest, Sha256};

use crate::{
    context::DisplayContext,
    error::{AppError, AppResult},
    listing::{EventDetailView, ListingView},
    models::{FilterQuery, FilterState},
};

/// List events matching the filter state carried in the query string
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(FilterQuery),
    responses(
        (status = 200, description = "Rendered event listing; upstream failures set hasError", body = ListingView),
        (status = 304, description = "Listing unchanged since the given ETag")
    )
)]
pub async fn list_events(
    State(state): State<crate::AppState>,
    ctx: DisplayContext,
    headers: HeaderMap,
    Query(query): Query<FilterQuery>,
) -> AppResult<Response> {
    let filters = FilterState::from_query(&query);
    let view = state.services.events.list(filters, &ctx).await;

    // error views are never cached
    if view.has_error {
        return Ok((
            [(CACHE_CONTROL, HeaderValue::from_static("no-store"))],
            Json(view),
        )
            .into_response());
    }

    let body = serde_json::to_vec(&view)
        .map_err(|e| AppError::Internal(format!("Failed to serialize listing: {}", e)))?;
    let etag = format!("\"{}\"", hex::encode(Sha256::digest(&body)));
    let etag_value = weak_etag(&etag)?;

    if etag_matches(&headers, &etag) {
        return Ok((StatusCode::NOT_MODIFIED, [(ETAG, etag_value)]).into_response());
    }

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (ETAG, etag_value),
            (CACHE_CONTROL, HeaderValue::from_static("no-cache")),
        ],
        body,
    )
        .into_response())
}

/// Weak validator: the compression layer may re-encode the body
fn weak_etag(etag: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&format!("W/{}", etag))
        .map_err(|e| AppError::Internal(format!("Invalid ETag: {}", e)))
}

/// Weak comparison of `If-None-Match` against the quoted `etag`
fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|tag| tag.trim().trim_start_matches("W/"))
        .any(|tag| tag == "*" || tag == etag)
}

/// Get event details by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = EventDetailView),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse),
        (status = 502, description = "Upstream API unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_event(
    State(state): State<crate::AppState>,
    ctx: DisplayContext,
    Path(id): Path<String>,
) -> AppResult<Json<EventDetailView>> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("Event id is required".to_string()));
    }
    let event = state.services.events.get_by_id(id, &ctx).await?;
    Ok(Json(event))
}
