pub mod health;
pub mod thema;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /themas                                          list, create
/// /themas/{id}                                     get, update, partial update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/themas", thema::router())
}
