//! Host-side behaviour driver
//!
//! Owns one [`BehaviourSlot`] per entity and delivers hooks in the order the
//! lifecycle requires. Updates run in attach order so traces are
//! deterministic.

use crate::{BehaviourSlot, LifecycleError, LifecycleState, ScriptBehaviour};
use tether_bridge::SharedBridge;
use tether_core::EntityId;

/// Outcome of one [`ScriptDriver::tick`].
#[derive(Debug, Default)]
pub struct TickReport {
    pub updated: usize,
    pub failures: Vec<LifecycleError>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ScriptDriver {
    bridge: SharedBridge,
    slots: Vec<BehaviourSlot>,
}

impl ScriptDriver {
    pub fn new(bridge: SharedBridge) -> Self {
        Self {
            bridge,
            slots: Vec::new(),
        }
    }

    pub fn bridge(&self) -> &SharedBridge {
        &self.bridge
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entities currently driven, in attach order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().filter_map(BehaviourSlot::entity)
    }

    pub fn state_of(&self, entity: EntityId) -> Option<LifecycleState> {
        self.position_of(entity).map(|index| self.slots[index].state())
    }

    pub fn slot(&self, entity: EntityId) -> Option<&BehaviourSlot> {
        self.position_of(entity).map(|index| &self.slots[index])
    }

    fn position_of(&self, entity: EntityId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.entity() == Some(entity))
    }

    /// Drive `behaviour` for an entity the host already created.
    ///
    /// If `on_start` fails the behaviour stays attached and Active; the
    /// error is returned so the host can decide what to do with it.
    pub fn attach(
        &mut self,
        entity: EntityId,
        behaviour: impl ScriptBehaviour + 'static,
    ) -> Result<(), LifecycleError> {
        self.attach_boxed(entity, Box::new(behaviour))
    }

    pub fn attach_boxed(
        &mut self,
        entity: EntityId,
        behaviour: Box<dyn ScriptBehaviour>,
    ) -> Result<(), LifecycleError> {
        if self.position_of(entity).is_some() {
            return Err(LifecycleError::AlreadyBound { entity });
        }

        let mut slot = BehaviourSlot::from_boxed(behaviour);
        tracing::info!(%entity, behaviour = slot.name(), "attaching behaviour");
        let started = slot.activate(&self.bridge, entity);
        self.slots.push(slot);
        started
    }

    /// Create an entity through the host, then attach `behaviour` to it.
    pub fn spawn(
        &mut self,
        behaviour: impl ScriptBehaviour + 'static,
    ) -> Result<EntityId, LifecycleError> {
        let entity = self.bridge.create_entity()?;
        self.attach(entity, behaviour)?;
        Ok(entity)
    }

    /// Deliver one `on_update` to every Active behaviour.
    pub fn tick(&mut self, delta_time: f32) -> TickReport {
        let mut report = TickReport::default();
        for slot in &mut self.slots {
            if slot.state() != LifecycleState::Active {
                continue;
            }
            match slot.update(delta_time) {
                Ok(()) => report.updated += 1,
                Err(err) => {
                    tracing::error!(error = %err, "behaviour update failed");
                    report.updated += 1;
                    report.failures.push(err);
                }
            }
        }
        report
    }

    /// Run `on_destroy` and stop driving the entity. The host entity stays.
    pub fn detach(&mut self, entity: EntityId) -> Result<(), LifecycleError> {
        let index = self
            .position_of(entity)
            .ok_or(LifecycleError::UnknownEntity(entity))?;
        let mut slot = self.slots.remove(index);
        tracing::info!(%entity, behaviour = slot.name(), "detaching behaviour");
        slot.destroy()
    }

    /// Run `on_destroy`, then ask the host to retire the entity.
    ///
    /// The host call is made even if the hook failed; the hook error wins.
    pub fn despawn(&mut self, entity: EntityId) -> Result<(), LifecycleError> {
        let detached = self.detach(entity);
        if let Err(LifecycleError::UnknownEntity(_)) = detached {
            return detached;
        }
        let retired = self.bridge.destroy_entity(entity);
        detached?;
        retired.map_err(LifecycleError::from)
    }

    /// Destroy every remaining behaviour, newest first.
    pub fn shutdown(&mut self) -> Vec<LifecycleError> {
        let mut failures = Vec::new();
        while let Some(mut slot) = self.slots.pop() {
            if slot.state() != LifecycleState::Active {
                continue;
            }
            if let Err(err) = slot.destroy() {
                tracing::error!(error = %err, "behaviour shutdown failed");
                failures.push(err);
            }
        }
        tracing::info!(failures = failures.len(), "script driver shut down");
        failures
    }
}
