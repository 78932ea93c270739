//! Identifier rules for Thema create and update requests.
//!
//! A new Thema must not carry an id; an update must carry one that matches the
//! path. The storage-backed existence check is done by the caller, which then
//! reports [`IdRejection::NotFound`] through [`reject`].

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in error payloads and alert headers.
pub const ENTITY_NAME: &str = "thema";

/// Columns a Thema listing may be sorted by.
pub const SORTABLE_FIELDS: &[&str] = &["id", "name", "rechte", "displaycount"];

/// Why a client-supplied identifier was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRejection {
    /// Create request already carries an id.
    Exists,
    /// Update request has no id in the body.
    Null,
    /// Body id differs from the path id.
    Invalid,
    /// No stored entity with that id.
    NotFound,
}

impl IdRejection {
    /// Machine-readable reason code returned to clients.
    pub fn error_key(self) -> &'static str {
        match self {
            IdRejection::Exists => "idexists",
            IdRejection::Null => "idnull",
            IdRejection::Invalid => "idinvalid",
            IdRejection::NotFound => "idnotfound",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            IdRejection::Exists => "A new thema cannot already have an ID",
            IdRejection::Null => "Invalid id",
            IdRejection::Invalid => "Invalid ID",
            IdRejection::NotFound => "Entity not found",
        }
    }
}

/// Build the [`CoreError`] for a rejected Thema identifier.
pub fn reject(reason: IdRejection) -> CoreError {
    CoreError::IdRejected {
        entity: ENTITY_NAME,
        reason,
    }
}

/// A create payload must not carry an id.
pub fn ensure_new(id: Option<DbId>) -> Result<(), CoreError> {
    match id {
        Some(_) => Err(reject(IdRejection::Exists)),
        None => Ok(()),
    }
}

/// An update payload must carry an id equal to the one in the path.
///
/// The null check runs first, so a body without an id always reports
/// `idnull` even when the path id is also nonsensical.
pub fn ensure_matches_path(path_id: DbId, body_id: Option<DbId>) -> Result<DbId, CoreError> {
    let id = body_id.ok_or_else(|| reject(IdRejection::Null))?;
    if id != path_id {
        return Err(reject(IdRejection::Invalid));
    }
    Ok(id)
}
