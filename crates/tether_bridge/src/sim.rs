//! In-process simulated host
//!
//! Implements the gateway against host state held behind a mutex, so entity
//! and input behaviour can be exercised deterministically without a native
//! engine. Host-side controls (key presses, pointer motion, tick boundaries,
//! out-of-band retirement) are plain methods on [`SimulatedHost`].

use crate::{BridgeError, BridgeResult, NativeBridge};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tether_core::{EntityId, Quaternion, Vector3};

/// Gateway entry points, for call accounting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    CreateEntity,
    DestroyEntity,
    IsEntityValid,
    GetPosition,
    SetPosition,
    GetRotation,
    SetRotation,
    GetScale,
    SetScale,
    GetKey,
    GetKeyDown,
    GetKeyUp,
    GetMousePosition,
    Log,
}

#[derive(Debug, Copy, Clone)]
struct TransformRecord {
    position: Vector3,
    rotation: Quaternion,
    scale: Vector3,
}

impl Default for TransformRecord {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vector3::ONE,
        }
    }
}

#[derive(Debug)]
struct HostState {
    // Wider than an identifier so u32::MAX can still be handed out.
    next_entity_id: u64,
    entities: BTreeMap<EntityId, TransformRecord>,
    keys_down: HashSet<i32>,
    keys_pressed: HashSet<i32>,
    keys_released: HashSet<i32>,
    mouse_position: (f32, f32),
    logs: Vec<String>,
    calls: HashMap<EntryPoint, usize>,
}

impl HostState {
    fn new() -> Self {
        Self {
            next_entity_id: 1,
            entities: BTreeMap::new(),
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            mouse_position: (0.0, 0.0),
            logs: Vec::new(),
            calls: HashMap::new(),
        }
    }

    fn record(&mut self, entry: EntryPoint) {
        *self.calls.entry(entry).or_insert(0) += 1;
    }

    fn transform_mut(&mut self, entity: EntityId) -> BridgeResult<&mut TransformRecord> {
        self.entities
            .get_mut(&entity)
            .ok_or(BridgeError::InvalidHandle(entity))
    }
}

/// Deterministic host used by tests and the demo runtime.
///
/// Identifiers start at 1 and are never reused. Unknown identifiers make
/// transform calls fail with [`BridgeError::InvalidHandle`]; destroying one
/// is a no-op.
#[derive(Debug)]
pub struct SimulatedHost {
    log_prefix: String,
    state: Mutex<HostState>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::with_log_prefix("")
    }

    /// Prefix prepended to every script log line the host records.
    pub fn with_log_prefix(prefix: impl Into<String>) -> Self {
        Self {
            log_prefix: prefix.into(),
            state: Mutex::new(HostState::new()),
        }
    }

    /// Start handing out identifiers at `first` instead of 1. Zero stays
    /// reserved.
    pub fn with_first_entity_id(self, first: u32) -> Self {
        self.state().next_entity_id = u64::from(first.max(1));
        self
    }

    // A panic while holding the lock cannot leave the plain-data state
    // half-updated in a way that matters here.
    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Host-side controls
    // ========================================================================

    /// A key went down this tick. Repeats while held do not re-trigger.
    pub fn press_key(&self, key_code: i32) {
        let mut state = self.state();
        if state.keys_down.insert(key_code) {
            state.keys_pressed.insert(key_code);
        }
    }

    pub fn release_key(&self, key_code: i32) {
        let mut state = self.state();
        state.keys_released.insert(key_code);
        state.keys_down.remove(&key_code);
    }

    pub fn move_mouse(&self, x: f32, y: f32) {
        self.state().mouse_position = (x, y);
    }

    /// Close the current tick: edge-triggered key state is cleared.
    pub fn end_tick(&self) {
        let mut state = self.state();
        state.keys_pressed.clear();
        state.keys_released.clear();
    }

    /// Retire an entity through some path other than the scripted side.
    pub fn retire(&self, entity: EntityId) -> bool {
        let removed = self.state().entities.remove(&entity).is_some();
        if removed {
            tracing::debug!(%entity, "host retired entity out-of-band");
        }
        removed
    }

    pub fn entity_count(&self) -> usize {
        self.state().entities.len()
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.state().logs.clone()
    }

    pub fn call_count(&self, entry: EntryPoint) -> usize {
        self.state().calls.get(&entry).copied().unwrap_or(0)
    }

    pub fn reset_call_counts(&self) {
        self.state().calls.clear();
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeBridge for SimulatedHost {
    fn create_entity(&self) -> BridgeResult<EntityId> {
        let mut state = self.state();
        state.record(EntryPoint::CreateEntity);

        let raw = u32::try_from(state.next_entity_id)
            .map_err(|_| BridgeError::Host("entity identifiers exhausted".into()))?;
        state.next_entity_id += 1;

        let id = EntityId::from_raw(raw);
        state.entities.insert(id, TransformRecord::default());

        tracing::debug!(entity = %id, "host created entity");
        Ok(id)
    }

    fn destroy_entity(&self, entity: EntityId) -> BridgeResult<()> {
        let mut state = self.state();
        state.record(EntryPoint::DestroyEntity);
        if state.entities.remove(&entity).is_some() {
            tracing::debug!(%entity, "host destroyed entity");
        }
        Ok(())
    }

    fn is_entity_valid(&self, entity: EntityId) -> BridgeResult<bool> {
        let mut state = self.state();
        state.record(EntryPoint::IsEntityValid);
        Ok(state.entities.contains_key(&entity))
    }

    fn get_position(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32)> {
        let mut state = self.state();
        state.record(EntryPoint::GetPosition);
        let p = state.transform_mut(entity)?.position;
        Ok((p.x, p.y, p.z))
    }

    fn set_position(&self, entity: EntityId, x: f32, y: f32, z: f32) -> BridgeResult<()> {
        let mut state = self.state();
        state.record(EntryPoint::SetPosition);
        state.transform_mut(entity)?.position = Vector3::new(x, y, z);
        Ok(())
    }

    fn get_rotation(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32, f32)> {
        let mut state = self.state();
        state.record(EntryPoint::GetRotation);
        let r = state.transform_mut(entity)?.rotation;
        Ok((r.x, r.y, r.z, r.w))
    }

    fn set_rotation(&self, entity: EntityId, x: f32, y: f32, z: f32, w: f32) -> BridgeResult<()> {
        let mut state = self.state();
        state.record(EntryPoint::SetRotation);
        state.transform_mut(entity)?.rotation = Quaternion::new(x, y, z, w);
        Ok(())
    }

    fn get_scale(&self, entity: EntityId) -> BridgeResult<(f32, f32, f32)> {
        let mut state = self.state();
        state.record(EntryPoint::GetScale);
        let s = state.transform_mut(entity)?.scale;
        Ok((s.x, s.y, s.z))
    }

    fn set_scale(&self, entity: EntityId, x: f32, y: f32, z: f32) -> BridgeResult<()> {
        let mut state = self.state();
        state.record(EntryPoint::SetScale);
        state.transform_mut(entity)?.scale = Vector3::new(x, y, z);
        Ok(())
    }

    fn get_key(&self, key_code: i32) -> BridgeResult<bool> {
        let mut state = self.state();
        state.record(EntryPoint::GetKey);
        Ok(state.keys_down.contains(&key_code))
    }

    fn get_key_down(&self, key_code: i32) -> BridgeResult<bool> {
        let mut state = self.state();
        state.record(EntryPoint::GetKeyDown);
        Ok(state.keys_pressed.contains(&key_code))
    }

    fn get_key_up(&self, key_code: i32) -> BridgeResult<bool> {
        let mut state = self.state();
        state.record(EntryPoint::GetKeyUp);
        Ok(state.keys_released.contains(&key_code))
    }

    fn get_mouse_position(&self) -> BridgeResult<(f32, f32)> {
        let mut state = self.state();
        state.record(EntryPoint::GetMousePosition);
        Ok(state.mouse_position)
    }

    fn log(&self, message: &str) -> BridgeResult<()> {
        let line = format!("{}{}", self.log_prefix, message);
        tracing::info!(target: "tether::script", "{line}");

        let mut state = self.state();
        state.record(EntryPoint::Log);
        state.logs.push(line);
        Ok(())
    }
}
