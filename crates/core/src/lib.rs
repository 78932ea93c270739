//! Domain logic for the Thema service.
//!
//! Everything in this crate is pure: no database or HTTP types, so the rules
//! can be unit-tested in isolation and shared by the `db` and `api` crates.

pub mod error;
pub mod pagination;
pub mod patch;
pub mod thema;
pub mod types;
