//! Route definitions for the Thema resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::thema;
use crate::state::AppState;

/// Thema routes mounted at `/themas`.
///
/// ```text
/// GET    /      -> list_themas
/// POST   /      -> create_thema
/// GET    /{id}  -> get_thema
/// PUT    /{id}  -> update_thema
/// PATCH  /{id}  -> partial_update_thema (application/merge-patch+json)
/// DELETE /{id}  -> delete_thema
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(thema::list_themas).post(thema::create_thema))
        .route(
            "/{id}",
            get(thema::get_thema)
                .put(thema::update_thema)
                .patch(thema::partial_update_thema)
                .delete(thema::delete_thema),
        )
}
