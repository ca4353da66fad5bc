//! Transform accessor
//!
//! Every read and write is one round trip carrying the full tuple. There
//! are no partial updates; moving along one axis is an explicit
//! read-modify-write by the caller.

use std::fmt;
use tether_bridge::{BridgeResult, SharedBridge};
use tether_core::{EntityId, Quaternion, Vector3};

/// Position/rotation/scale view of one entity. Holds no geometry.
#[derive(Clone)]
pub struct Transform {
    entity: EntityId,
    bridge: SharedBridge,
}

impl Transform {
    pub fn new(bridge: &SharedBridge, entity: EntityId) -> Self {
        Self {
            entity,
            bridge: bridge.clone(),
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity
    }

    pub fn position(&self) -> BridgeResult<Vector3> {
        self.bridge.get_position(self.entity).map(Vector3::from)
    }

    pub fn set_position(&self, value: Vector3) -> BridgeResult<()> {
        self.bridge
            .set_position(self.entity, value.x, value.y, value.z)
    }

    pub fn rotation(&self) -> BridgeResult<Quaternion> {
        self.bridge
            .get_rotation(self.entity)
            .map(|(x, y, z, w)| Quaternion::new(x, y, z, w))
    }

    pub fn set_rotation(&self, value: Quaternion) -> BridgeResult<()> {
        self.bridge
            .set_rotation(self.entity, value.x, value.y, value.z, value.w)
    }

    pub fn scale(&self) -> BridgeResult<Vector3> {
        self.bridge.get_scale(self.entity).map(Vector3::from)
    }

    pub fn set_scale(&self, value: Vector3) -> BridgeResult<()> {
        self.bridge.set_scale(self.entity, value.x, value.y, value.z)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("entity", &self.entity.raw())
            .finish()
    }
}
