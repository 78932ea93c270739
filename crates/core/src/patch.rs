//! Tri-state fields for JSON merge-patch payloads.
//!
//! `Option<T>` alone cannot tell "key omitted" from "key set to null". Declare
//! patch fields as `#[serde(default)] PatchField<T>` instead: a missing key
//! stays [`PatchField::Absent`], `null` becomes [`PatchField::Null`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    /// Key not present in the payload; the stored value is kept.
    Absent,
    /// Key present with `null`; the stored value is cleared.
    Null,
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Absent
    }
}

impl<T> PatchField<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, PatchField::Absent)
    }

    /// Merge this field into a stored nullable value.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            PatchField::Absent => {}
            PatchField::Null => *target = None,
            PatchField::Value(v) => *target = Some(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for PatchField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; omitted keys use `Default`.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => PatchField::Value(v),
            None => PatchField::Null,
        })
    }
}
