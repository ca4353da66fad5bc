//! Entity handle
//!
//! A weak reference to host-owned state: dropping an [`Entity`] does not
//! retire the host entity, and the host may retire it without telling us.

use crate::Transform;
use std::fmt;
use std::hash::{Hash, Hasher};
use tether_bridge::{BridgeResult, SharedBridge};
use tether_core::EntityId;

/// Handle to one host entity. Equality is identifier equality.
#[derive(Clone)]
pub struct Entity {
    id: EntityId,
    bridge: SharedBridge,
}

impl Entity {
    /// Ask the host for a new entity.
    pub fn create(bridge: &SharedBridge) -> BridgeResult<Self> {
        let id = bridge.create_entity()?;
        Ok(Self::from_id(bridge, id))
    }

    /// Wrap an identifier the host assigned elsewhere.
    pub fn from_id(bridge: &SharedBridge, id: EntityId) -> Self {
        Self {
            id,
            bridge: bridge.clone(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The gateway this handle forwards to.
    pub fn bridge(&self) -> &SharedBridge {
        &self.bridge
    }

    /// Request retirement. Calling this twice is a host-side no-op.
    pub fn destroy(&self) -> BridgeResult<()> {
        self.bridge.destroy_entity(self.id)
    }

    pub fn is_valid(&self) -> BridgeResult<bool> {
        self.bridge.is_entity_valid(self.id)
    }

    /// A fresh transform view over the same identifier.
    pub fn transform(&self) -> Transform {
        Transform::new(&self.bridge, self.id)
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entity").field(&self.id.raw()).finish()
    }
}
