//! Response headers shared by the entity endpoints.
//!
//! - Alert headers (`X-{app}-alert`, `X-{app}-params`) tell the client UI
//!   which notification to show after a successful mutation.
//! - Pagination headers (`X-Total-Count`, `Link`) describe the full result
//!   set behind a list response.

use axum::http::header::LINK;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};
use thema_core::pagination::{pagination_headers, Page};

pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAlert {
    Created,
    Updated,
    Deleted,
}

impl EntityAlert {
    fn suffix(self) -> &'static str {
        match self {
            EntityAlert::Created => "created",
            EntityAlert::Updated => "updated",
            EntityAlert::Deleted => "deleted",
        }
    }
}

/// Build the alert headers for a mutation of `entity` with the given id.
///
/// The alert value is a translation key, `{app}.{entity}.{created|...}`.
/// An `app_name` that is not a valid header token yields no headers.
pub fn entity_alert(app_name: &str, entity: &str, alert: EntityAlert, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let message = format!("{app_name}.{entity}.{}", alert.suffix());

    let alert_name = HeaderName::try_from(format!("X-{app_name}-alert"));
    let params_name = HeaderName::try_from(format!("X-{app_name}-params"));

    match (alert_name, params_name) {
        (Ok(alert_name), Ok(params_name)) => {
            if let Ok(value) = HeaderValue::try_from(message) {
                headers.insert(alert_name, value);
            }
            if let Ok(value) = HeaderValue::try_from(param) {
                headers.insert(params_name, value);
            }
        }
        _ => tracing::warn!(app_name, "App name is not a valid header token, skipping alert"),
    }

    headers
}

/// Build `X-Total-Count` and `Link` headers for a page served at `uri`.
pub fn pagination_header_map<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let values = pagination_headers(uri.path(), uri.query(), page);

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::try_from(values.total_count) {
        headers.insert(X_TOTAL_COUNT, value);
    }
    if let Ok(value) = HeaderValue::try_from(values.link) {
        headers.insert(LINK, value);
    }
    headers
}
