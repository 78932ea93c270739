//! Custom request extractors.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// JSON body that must be sent as `application/merge-patch+json`.
///
/// Rejects other content types with 415 and malformed bodies with 400, both
/// through [`AppError`] so the error envelope stays consistent.
///
/// ```ignore
/// async fn patch(MergePatch(patch): MergePatch<ThemaPatch>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct MergePatch<T>(pub T);

impl<S, T> FromRequest<S> for MergePatch<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if !is_merge_patch(content_type) {
            return Err(AppError::UnsupportedMediaType(format!(
                "Expected Content-Type {MERGE_PATCH_JSON}, got '{content_type}'"
            )));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(MergePatch(value))
    }
}

fn is_merge_patch(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|mime| mime.eq_ignore_ascii_case(MERGE_PATCH_JSON))
}
