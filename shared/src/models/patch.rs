//! Tri-state field for partial updates

use serde::{Deserialize, Deserializer};

/// A field of a PATCH body.
///
/// `Absent` when the key is missing, `Null` when the key is present with
/// `null`, `Value` otherwise. Fields must carry `#[serde(default)]` (or the
/// struct must) so a missing key deserializes to `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    /// Borrow the value when one was supplied
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Write into a nullable target: `Null` clears, `Value` overwrites
    pub fn apply_to_option(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Value(v) => *target = Some(v),
        }
    }

    /// Write into a non-nullable target. `Null` must be rejected before this
    /// is called; here it leaves the target untouched.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Value(v) = self {
            *target = v;
        }
    }
}
