//! Repository layer.
//!
//! Repositories are exposed as traits so handlers can hold them behind
//! `Arc<dyn ...>`; the Postgres implementations take a pool at construction.

pub mod thema_repo;

pub use thema_repo::{PgThemaRepo, ThemaRepository};
