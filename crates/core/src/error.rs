use crate::thema::IdRejection;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A client-supplied identifier violates the create/update rules.
    #[error("{}", .reason.message())]
    IdRejected {
        entity: &'static str,
        reason: IdRejection,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}
