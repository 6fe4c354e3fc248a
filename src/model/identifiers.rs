//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use std::fmt;

/// Opaque identifier of a search hit (`_id` on the wire).
///
/// Identity of a [`Hit`](crate::model::Hit) and the element type of the
/// selection set. NEVER export the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HitId(String);

impl HitId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidHitId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidHitId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== Error Types =====

/// Rejection reason for [`HitId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidHitId {
    /// The id was the empty string.
    #[error("Hit ID cannot be empty")]
    Empty,
}

// ===== Tests =====
