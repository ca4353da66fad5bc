//! Input facade
//!
//! Read-only queries against host input state. `get_key_down` and
//! `get_key_up` are edge-triggered by the host and true only on the tick
//! the transition happened.

use std::fmt;
use tether_bridge::{BridgeResult, SharedBridge};
use tether_core::{KeyCode, Vector3};

#[derive(Clone)]
pub struct Input {
    bridge: SharedBridge,
}

impl Input {
    pub fn new(bridge: &SharedBridge) -> Self {
        Self {
            bridge: bridge.clone(),
        }
    }

    /// True for as long as the key is held.
    pub fn get_key(&self, key: KeyCode) -> BridgeResult<bool> {
        self.bridge.get_key(key.code())
    }

    pub fn get_key_down(&self, key: KeyCode) -> BridgeResult<bool> {
        self.bridge.get_key_down(key.code())
    }

    pub fn get_key_up(&self, key: KeyCode) -> BridgeResult<bool> {
        self.bridge.get_key_up(key.code())
    }

    /// Pointer location as reported by the host, with `z == 0`.
    pub fn mouse_position(&self) -> BridgeResult<Vector3> {
        let (x, y) = self.bridge.get_mouse_position()?;
        Ok(Vector3::new(x, y, 0.0))
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input").finish_non_exhaustive()
    }
}
