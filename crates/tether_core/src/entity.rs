//! Opaque entity identifier
//!
//! The host assigns identifiers at creation time. Whatever structure the host
//! packs into the 32 bits (index, generation, ...) is its own business; the
//! scripted side only compares and forwards them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned entity identifier.
///
/// Two identifiers with the same value denote the same host entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
