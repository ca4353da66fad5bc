//! Boundary call gateway
//!
//! Each method is one synchronous request to the host. Arity and numeric
//! widths mirror the host ABI: `u32` identifiers, `f32` geometry, `i32` key
//! codes.

use crate::BridgeResult;
use std::sync::Arc;
use tether_core::EntityId;

/// Shared handle to whichever host is installed.
pub type SharedBridge = Arc<dyn NativeBridge>;

/// The host engine, seen from the scripted side.
///
/// Implementations decide what an unknown identifier means. The scripted
/// layer never pre-checks validity, so every call on a stale identifier
/// reaches the host.
pub trait NativeBridge: Send + Sync {
    fn create_entity(&self) -> BridgeResult<EntityId>;
    fn destroy_entity(&self, entity: EntityId) -> BridgeResult<()>;
    fn is_entity_valid(&self, entity: EntityId) -> BridgeResult<bool>;

    fn get_position(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32)>;
    fn set_position(&self, entity: EntityId, x: f32, y: f32, z: f32) -> BridgeResult<()>;
    fn get_rotation(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32, f32)>;
    fn set_rotation(&self, entity: EntityId, x: f32, y: f32, z: f32, w: f32) -> BridgeResult<()>;
    fn get_scale(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32)>;
    fn set_scale(&self, entity: EntityId, x: f32, y: f32, z: f32) -> BridgeResult<()>;

    fn get_key(&self, key_code: i32) -> BridgeResult<bool>;
    fn get_key_down(&self, key_code: i32) -> BridgeResult<bool>;
    fn get_key_up(&self, key_code: i32) -> BridgeResult<bool>;
    fn get_mouse_position(&self) -> BridgeResult<(f32, f32)>;

    fn log(&self, message: &str) -> BridgeResult<()>;
}
