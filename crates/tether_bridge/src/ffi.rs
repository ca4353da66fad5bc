//! FFI layer between the bridge and a native host
//!
//! The host registers one [`HostApi`] table of `extern "C"` entry points.
//! Signatures are fixed: `u32` identifiers, `f32` geometry, `i32` key codes,
//! C `bool` predicates, out-pointers for tuple returns.

use crate::{BridgeResult, NativeBridge};
use tether_core::EntityId;

/// Entry points a native host registers with the bridge.
#[derive(Debug, Copy, Clone)]
#[repr(C)]
pub struct HostApi {
    pub entity_create: unsafe extern "C" fn() -> u32,
    pub entity_destroy: unsafe extern "C" fn(entity_id: u32),
    pub entity_is_valid: unsafe extern "C" fn(entity_id: u32) -> bool,

    pub transform_get_position:
        unsafe extern "C" fn(entity_id: u32, out_x: *mut f32, out_y: *mut f32, out_z: *mut f32),
    pub transform_set_position: unsafe extern "C" fn(entity_id: u32, x: f32, y: f32, z: f32),
    pub transform_get_rotation: unsafe extern "C" fn(
        entity_id: u32,
        out_x: *mut f32,
        out_y: *mut f32,
        out_z: *mut f32,
        out_w: *mut f32,
    ),
    pub transform_set_rotation:
        unsafe extern "C" fn(entity_id: u32, x: f32, y: f32, z: f32, w: f32),
    pub transform_get_scale:
        unsafe extern "C" fn(entity_id: u32, out_x: *mut f32, out_y: *mut f32, out_z: *mut f32),
    pub transform_set_scale: unsafe extern "C" fn(entity_id: u32, x: f32, y: f32, z: f32),

    pub input_get_key: unsafe extern "C" fn(key_code: i32) -> bool,
    pub input_get_key_down: unsafe extern "C" fn(key_code: i32) -> bool,
    pub input_get_key_up: unsafe extern "C" fn(key_code: i32) -> bool,
    pub input_get_mouse_position: unsafe extern "C" fn(out_x: *mut f32, out_y: *mut f32),

    /// UTF-8 bytes, not NUL-terminated.
    pub debug_log: unsafe extern "C" fn(message: *const u8, len: usize),
}

/// Gateway backed by a native [`HostApi`].
///
/// The C table has no error channel. Out-parameters are zeroed before every
/// call, so a host that ignores an unknown identifier yields zero tuples
/// rather than garbage; every call returns `Ok`.
#[derive(Debug, Clone)]
pub struct FfiBridge {
    api: HostApi,
}

impl FfiBridge {
    /// # Safety
    ///
    /// Every pointer in `api` must stay callable for the lifetime of the
    /// bridge, from any thread that uses it, and must honor the signatures
    /// above (write only through the provided out-pointers, read exactly
    /// `len` bytes of a log message).
    pub unsafe fn new(api: HostApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &HostApi {
        &self.api
    }
}

// SAFETY (all calls below): the constructor's contract guarantees the
// function pointers are valid, and every out-pointer refers to a live local.
impl NativeBridge for FfiBridge {
    fn create_entity(&self) -> BridgeResult<EntityId> {
        let raw = unsafe { (self.api.entity_create)() };
        Ok(EntityId::from_raw(raw))
    }

    fn destroy_entity(&self, entity: EntityId) -> BridgeResult<()> {
        unsafe { (self.api.entity_destroy)(entity.raw()) };
        Ok(())
    }

    fn is_entity_valid(&self, entity: EntityId) -> BridgeResult<bool> {
        Ok(unsafe { (self.api.entity_is_valid)(entity.raw()) })
    }

    fn get_position(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32)> {
        let (mut x, mut y, mut z) = (0.0f32, 0.0f32, 0.0f32);
        unsafe { (self.api.transform_get_position)(entity.raw(), &mut x, &mut y, &mut z) };
        Ok((x, y, z))
    }

    fn set_position(&self, entity: EntityId, x: f32, y: f32, z: f32) -> BridgeResult<()> {
        unsafe { (self.api.transform_set_position)(entity.raw(), x, y, z) };
        Ok(())
    }

    fn get_rotation(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32, f32)> {
        let (mut x, mut y, mut z, mut w) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        unsafe {
            (self.api.transform_get_rotation)(entity.raw(), &mut x, &mut y, &mut z, &mut w)
        };
        Ok((x, y, z, w))
    }

    fn set_rotation(&self, entity: EntityId, x: f32, y: f32, z: f32, w: f32) -> BridgeResult<()> {
        unsafe { (self.api.transform_set_rotation)(entity.raw(), x, y, z, w) };
        Ok(())
    }

    fn get_scale(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32)> {
        let (mut x, mut y, mut z) = (0.0f32, 0.0f32, 0.0f32);
        unsafe { (self.api.transform_get_scale)(entity.raw(), &mut x, &mut y, &mut z) };
        Ok((x, y, z))
    }

    fn set_scale(&self, entity: EntityId, x: f32, y: f32, z: f32) -> BridgeResult<()> {
        unsafe { (self.api.transform_set_scale)(entity.raw(), x, y, z) };
        Ok(())
    }

    fn get_key(&self, key_code: i32) -> BridgeResult<bool> {
        Ok(unsafe { (self.api.input_get_key)(key_code) })
    }

    fn get_key_down(&self, key_code: i32) -> BridgeResult<bool> {
        Ok(unsafe { (self.api.input_get_key_down)(key_code) })
    }

    fn get_key_up(&self, key_code: i32) -> BridgeResult<bool> {
        Ok(unsafe { (self.api.input_get_key_up)(key_code) })
    }

    fn get_mouse_position(&self) -> BridgeResult<(f32, f32)> {
        let (mut x, mut y) = (0.0f32, 0.0f32);
        unsafe { (self.api.input_get_mouse_position)(&mut x, &mut y) };
        Ok((x, y))
    }

    fn log(&self, message: &str) -> BridgeResult<()> {
        unsafe { (self.api.debug_log)(message.as_ptr(), message.len()) };
        Ok(())
    }
}
