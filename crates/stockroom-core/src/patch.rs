//! # Patch Module
//!
//! `Patch<T>` marks whether an update request supplied a field at all.
//!
//! ## Absent vs. Cleared
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JSON body                     Patch<Option<String>>   Effect          │
//! │  ───────────────────────────   ─────────────────────   ─────────────   │
//! │  { }                           Absent                  unchanged       │
//! │  { "email": null }             Set(None)               column → NULL   │
//! │  { "email": "a@b.io" }         Set(Some("a@b.io"))     column → value  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Patch structs put `#[serde(default)]` on the container so a missing key
//! deserializes to [`Patch::Absent`]. Any present key, `null` included, goes
//! through `T`'s own deserializer and becomes [`Patch::Set`].

use serde::{Deserialize, Deserializer};

/// A field in a partial update: either left alone or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The caller did not mention the field.
    Absent,
    /// The caller supplied a new value.
    Set(T),
}

impl<T> Patch<T> {
    /// Overwrites `target` when the field was supplied.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::Patch;
    ///
    /// let mut name = String::from("Old");
    /// Patch::Absent.apply(&mut name);
    /// assert_eq!(name, "Old");
    ///
    /// Patch::Set(String::from("New")).apply(&mut name);
    /// assert_eq!(name, "New");
    /// ```
    pub fn apply(self, target: &mut T) {
        if let Patch::Set(value) = self {
            *target = value;
        }
    }

    /// Returns the supplied value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            Patch::Absent => None,
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Set(value)
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
        T::deserialize(deserializer).map(Patch::Set)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
