//! Display context (locale and theme) handed explicitly to the renderer

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::DisplayConfig, models::Theme};

/// Per-request presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DisplayContext {
    pub locale: String,
    pub theme: Theme,
}

impl DisplayContext {
    /// Pick the first supported language of an `Accept-Language` header and
    /// the `Sec-CH-Prefers-Color-Scheme` hint, falling back to config.
    pub fn resolve(
        accept_language: Option<&str>,
        color_scheme: Option<&str>,
        config: &DisplayConfig,
    ) -> Self {
        let locale = accept_language
            .and_then(|header| negotiate_locale(header, &config.supported_locales))
            .unwrap_or_else(|| config.default_locale.clone());
        let theme = color_scheme
            .and_then(Theme::from_param)
            .or_else(|| Theme::from_param(&config.default_theme))
            .unwrap_or_default();
        Self { locale, theme }
    }

    pub fn format_date(&self, date: &DateTime<Utc>) -> String {
        let pattern = match self.locale.as_str() {
            "fr" | "es" => "%d/%m/%Y %H:%M",
            _ => "%b %-d, %Y %H:%M",
        };
        date.format(pattern).to_string()
    }

    pub fn format_price(&self, price: f64) -> String {
        if price <= 0.0 {
            return self.label(Label::Free).to_string();
        }
        match self.locale.as_str() {
            "fr" | "es" => format!("{:.2} €", price).replace('.', ","),
            _ => format!("€{:.2}", price),
        }
    }

    pub fn label(&self, label: Label) -> &'static str {
        match (self.locale.as_str(), label) {
            ("fr", Label::Free) => "Gratuit",
            ("fr", Label::Previous) => "Précédent",
            ("fr", Label::Next) => "Suivant",
            ("fr", Label::ClearFilters) => "Effacer les filtres",
            ("fr", Label::Empty) => "Aucun événement trouvé",
            ("fr", Label::Error) => "Impossible de charger les événements",
            ("es", Label::Free) => "Gratis",
            ("es", Label::Previous) => "Anterior",
            ("es", Label::Next) => "Siguiente",
            ("es", Label::ClearFilters) => "Borrar filtros",
            ("es", Label::Empty) => "No se encontraron eventos",
            ("es", Label::Error) => "No se pudieron cargar los eventos",
            (_, Label::Free) => "Free",
            (_, Label::Previous) => "Previous",
            (_, Label::Next) => "Next",
            (_, Label::ClearFilters) => "Clear filters",
            (_, Label::Empty) => "No events found",
            (_, Label::Error) => "Could not load events",
        }
    }
}

/// Fixed interface strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Free,
    Previous,
    Next,
    ClearFilters,
    Empty,
    Error,
}

fn negotiate_locale(header: &str, supported: &[String]) -> Option<String> {
    let mut ranges: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next()?.trim().to_ascii_lowercase();
            if tag.is_empty() {
                return None;
            }
            let quality = pieces
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((tag, quality))
        })
        .collect();
    // stable: equal weights keep header order
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranges
        .iter()
        .filter(|(_, q)| *q > 0.0)
        .filter_map(|(tag, _)| tag.split('-').next())
        .find_map(|primary| supported.iter().find(|s| s.eq_ignore_ascii_case(primary)))
        .cloned()
}
