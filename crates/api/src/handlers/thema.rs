//! Handlers for the Thema resource.
//!
//! Each handler validates the identifier rules, makes one repository call and
//! maps the result to a response. Mutations carry alert headers; the list
//! endpoint carries pagination headers.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use thema_core::pagination::PageRequest;
use thema_core::thema::{
    ensure_matches_path, ensure_new, reject, IdRejection, ENTITY_NAME, SORTABLE_FIELDS,
};
use thema_core::types::DbId;
use thema_db::models::thema::{ThemaInput, ThemaPatch};

use crate::error::AppResult;
use crate::extract::MergePatch;
use crate::headers::{entity_alert, pagination_header_map, EntityAlert};
use crate::state::AppState;

/// Path under which a created Thema is addressable (`Location` header).
const RESOURCE_PATH: &str = "/api/themas";

/// Fail with `idnotfound` unless a Thema with `id` is stored.
async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<()> {
    if !state.themas.exists_by_id(id).await? {
        return Err(reject(IdRejection::NotFound).into());
    }
    Ok(())
}

/// POST /api/themas
///
/// Create a new Thema. The payload must not carry an id.
pub async fn create_thema(
    State(state): State<AppState>,
    Json(input): Json<ThemaInput>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(?input, "REST request to save Thema");
    ensure_new(input.id)?;

    let thema = state.themas.save(&input).await?;

    tracing::info!(thema_id = thema.id, "Thema created");

    let location = format!("{RESOURCE_PATH}/{}", thema.id);
    let alert = entity_alert(
        &state.config.app_name,
        ENTITY_NAME,
        EntityAlert::Created,
        &thema.id.to_string(),
    );

    Ok((StatusCode::CREATED, [(LOCATION, location)], alert, Json(thema)))
}

/// PUT /api/themas/{id}
///
/// Replace every mutable field of an existing Thema.
pub async fn update_thema(
    State(state): State<AppState>,
    Path(thema_id): Path<DbId>,
    Json(input): Json<ThemaInput>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(thema_id, ?input, "REST request to update Thema");
    let id = ensure_matches_path(thema_id, input.id)?;
    ensure_exists(&state, id).await?;

    let thema = state.themas.save(&input).await?;

    tracing::info!(thema_id = id, "Thema updated");

    let alert = entity_alert(
        &state.config.app_name,
        ENTITY_NAME,
        EntityAlert::Updated,
        &id.to_string(),
    );
    Ok((alert, Json(thema)))
}

/// PATCH /api/themas/{id}
///
/// Merge the supplied fields into an existing Thema. Omitted fields are
/// kept, explicit `null` clears a field. Returns 404 if the Thema disappears
/// after the existence check.
pub async fn partial_update_thema(
    State(state): State<AppState>,
    Path(thema_id): Path<DbId>,
    MergePatch(patch): MergePatch<ThemaPatch>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(thema_id, ?patch, "REST request to partial update Thema");
    let id = ensure_matches_path(thema_id, patch.id)?;
    ensure_exists(&state, id).await?;

    let Some(mut thema) = state.themas.find_by_id(id).await? else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    thema.apply_patch(patch);
    let thema = state.themas.save(&ThemaInput::from(thema)).await?;

    tracing::info!(thema_id = id, "Thema partially updated");

    let alert = entity_alert(
        &state.config.app_name,
        ENTITY_NAME,
        EntityAlert::Updated,
        &id.to_string(),
    );
    Ok((alert, Json(thema)).into_response())
}

/// GET /api/themas?page=&size=&sort=
///
/// List one page of Themas. Repeated `sort` parameters are honoured in order.
pub async fn list_themas(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!("REST request to get a page of Themas");
    let request = PageRequest::from_query(&params)?;
    request.ensure_sortable(SORTABLE_FIELDS)?;

    let page = state.themas.find_all(&request).await?;
    let headers = pagination_header_map(&uri, &page);

    Ok((headers, Json(page.content)))
}

/// GET /api/themas/{id}
///
/// Returns 404 with an empty body if no Thema has that id.
pub async fn get_thema(
    State(state): State<AppState>,
    Path(thema_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(thema_id, "REST request to get Thema");

    match state.themas.find_by_id(thema_id).await? {
        Some(thema) => Ok(Json(thema).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// DELETE /api/themas/{id}
///
/// Deleting an id that does not exist still succeeds.
pub async fn delete_thema(
    State(state): State<AppState>,
    Path(thema_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(thema_id, "REST request to delete Thema");

    state.themas.delete_by_id(thema_id).await?;

    tracing::info!(thema_id, "Thema deleted");

    let alert = entity_alert(
        &state.config.app_name,
        ENTITY_NAME,
        EntityAlert::Deleted,
        &thema_id.to_string(),
    );
    Ok((StatusCode::NO_CONTENT, alert))
}
