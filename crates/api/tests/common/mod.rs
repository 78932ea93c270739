#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thema_core::pagination::{Direction, Page, PageRequest};
use thema_core::types::DbId;
use thema_db::models::thema::{Thema, ThemaInput};
use thema_db::repositories::{PgThemaRepo, ThemaRepository};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use thema_api::config::ServerConfig;
use thema_api::routes;
use thema_api::state::AppState;

// ---------------------------------------------------------------------------
// In-memory repository
// ---------------------------------------------------------------------------

/// `ThemaRepository` backed by a map, with a counter of write calls so tests
/// can assert that rejected requests never reach storage.
#[derive(Default)]
pub struct InMemoryThemaRepo {
    rows: Mutex<BTreeMap<DbId, Thema>>,
    next_id: Mutex<DbId>,
    writes: AtomicUsize,
}

impl InMemoryThemaRepo {
    pub fn writes(&self) -> usize {
        self.writes.load(AtomicOrdering::SeqCst)
    }

    pub fn stored(&self, id: DbId) -> Option<Thema> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ThemaRepository for InMemoryThemaRepo {
    async fn save(&self, input: &ThemaInput) -> Result<Thema, sqlx::Error> {
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);
        let mut rows = self.rows.lock().unwrap();

        let id = match input.id {
            Some(id) if rows.contains_key(&id) => id,
            Some(_) => return Err(sqlx::Error::RowNotFound),
            None => {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                *next
            }
        };

        let thema = Thema {
            id,
            name: input.name.clone(),
            rechte: input.rechte.clone(),
            displaycount: input.displaycount,
        };
        rows.insert(id, thema.clone());
        Ok(thema)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Thema>, sqlx::Error> {
        Ok(self.stored(id))
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Thema>, sqlx::Error> {
        let mut all: Vec<Thema> = self.rows.lock().unwrap().values().cloned().collect();

        all.sort_by(|a, b| {
            for order in &request.sort {
                let ord = match order.property.as_str() {
                    "name" => a.name.cmp(&b.name),
                    "rechte" => a.rechte.cmp(&b.rechte),
                    "displaycount" => a.displaycount.cmp(&b.displaycount),
                    "id" => a.id.cmp(&b.id),
                    _ => Ordering::Equal,
                };
                let ord = match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.id.cmp(&b.id)
        });

        let total = all.len() as i64;
        let content = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error> {
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// A Thema that is deleted by another request between the handler's
/// existence check and its read or write: `exists_by_id` still answers
/// `true`, every later lookup or replacement finds nothing.
pub struct VanishingThemaRepo;

#[async_trait]
impl ThemaRepository for VanishingThemaRepo {
    async fn save(&self, _input: &ThemaInput) -> Result<Thema, sqlx::Error> {
        Err(sqlx::Error::RowNotFound)
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Thema>, sqlx::Error> {
        Ok(None)
    }

    async fn exists_by_id(&self, _id: DbId) -> Result<bool, sqlx::Error> {
        Ok(true)
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Thema>, sqlx::Error> {
        Ok(Page::new(Vec::new(), request, 0))
    }

    async fn delete_by_id(&self, _id: DbId) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:9000".to_string()],
        request_timeout_secs: 30,
        app_name: "themaApp".to_string(),
    }
}

/// Build the full application router around the given repository.
///
/// The pool connects lazily and is only touched by `/health`, so these
/// tests need no database.
pub fn build_test_app(themas: Arc<dyn ThemaRepository>) -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://127.0.0.1:1/thema_test")
        .unwrap();
    build_app(pool, themas)
}

/// Build the full application router backed by Postgres.
pub fn build_pg_test_app(pool: PgPool) -> Router {
    let themas = Arc::new(PgThemaRepo::new(pool.clone()));
    build_app(pool, themas)
}

/// Mirrors the router construction in `main.rs`.
fn build_app(pool: PgPool, themas: Arc<dyn ThemaRepository>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        themas,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:9000".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, content_type: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, "application/json", body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PUT, uri, "application/json", body)).await
}

pub async fn patch_merge(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        json_request(Method::PATCH, uri, "application/merge-patch+json", body),
    )
    .await
}

pub async fn patch_with_content_type(
    app: Router,
    uri: &str,
    content_type: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PATCH, uri, content_type, body)).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
