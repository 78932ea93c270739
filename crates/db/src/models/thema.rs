//! Thema model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thema_core::patch::PatchField;
use thema_core::types::DbId;

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `themas` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Thema {
    pub id: DbId,
    pub name: Option<String>,
    pub rechte: Option<String>,
    pub displaycount: Option<i32>,
}

impl Thema {
    /// Merge a patch into this entity. Absent fields are left untouched.
    pub fn apply_patch(&mut self, patch: ThemaPatch) {
        patch.name.apply_to(&mut self.name);
        patch.rechte.apply_to(&mut self.rechte);
        patch.displaycount.apply_to(&mut self.displaycount);
    }
}

impl From<Thema> for ThemaInput {
    fn from(thema: Thema) -> Self {
        Self {
            id: Some(thema.id),
            name: thema.name,
            rechte: thema.rechte,
            displaycount: thema.displaycount,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Full Thema payload for create (`id` absent) and replace (`id` present).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThemaInput {
    pub id: Option<DbId>,
    pub name: Option<String>,
    pub rechte: Option<String>,
    pub displaycount: Option<i32>,
}

/// Merge-patch payload: omitted keys keep the stored value, `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThemaPatch {
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: PatchField<String>,
    #[serde(default)]
    pub rechte: PatchField<String>,
    #[serde(default)]
    pub displaycount: PatchField<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Thema {
        Thema {
            id: 1,
            name: Some("A".into()),
            rechte: Some("R".into()),
            displaycount: Some(0),
        }
    }

    #[test]
    fn patch_with_only_displaycount_keeps_other_fields() {
        let patch: ThemaPatch = serde_json::from_str(r#"{"id": 1, "displaycount": 5}"#).unwrap();
        let mut thema = stored();
        thema.apply_patch(patch.clone());
        assert_eq!(thema.name.as_deref(), Some("A"));
        assert_eq!(thema.rechte.as_deref(), Some("R"));
        assert_eq!(thema.displaycount, Some(5));

        // Reapplying the same patch changes nothing.
        let before = thema.clone();
        thema.apply_patch(patch);
        assert_eq!(thema, before);
    }

    #[test]
    fn patch_with_explicit_null_clears_field() {
        let patch: ThemaPatch = serde_json::from_str(r#"{"id": 1, "rechte": null}"#).unwrap();
        let mut thema = stored();
        thema.apply_patch(patch);
        assert_eq!(thema.rechte, None);
        assert_eq!(thema.name.as_deref(), Some("A"));
    }

    #[test]
    fn input_from_thema_carries_id() {
        let input = ThemaInput::from(stored());
        assert_eq!(input.id, Some(1));
        assert_eq!(input.displaycount, Some(0));
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "A", "rechte": "R", "displaycount": 0})
        );
    }
}
