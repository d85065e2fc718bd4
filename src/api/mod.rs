//! API handlers for City Guide REST endpoints

pub mod events;
pub mod health;
pub mod openapi;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};

use crate::{context::DisplayContext, AppState};

/// Client hint carrying the preferred color scheme
pub const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

#[async_trait]
impl FromRequestParts<AppState> for DisplayContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = |name: &str| parts.headers.get(name).and_then(|value| value.to_str().ok());

        Ok(DisplayContext::resolve(
            header(ACCEPT_LANGUAGE.as_str()),
            header(PREFERS_COLOR_SCHEME),
            &state.config.display,
        ))
    }
}
