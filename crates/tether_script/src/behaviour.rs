//! Behaviour lifecycle
//!
//! A behaviour moves through three states:
//!
//! ```text
//! Unbound ──activate(id)──▶ Active ──destroy()──▶ Destroyed
//!                            │  ▲
//!                            └──┘ update(dt)
//! ```
//!
//! Hooks never enforce ordering themselves; [`BehaviourSlot`] does. The
//! [`ScriptContext`] (and the transform view inside it) is only built once
//! the host has assigned the identifier, so a behaviour can never observe a
//! view bound to a placeholder id.

use crate::{Debug, Entity, HookResult, Input, LifecycleError, Transform};
use std::fmt;
use tether_bridge::SharedBridge;
use tether_core::EntityId;

/// User-authored per-entity logic. Every hook defaults to a no-op.
pub trait ScriptBehaviour {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn on_start(&mut self, _ctx: &ScriptContext) -> HookResult {
        Ok(())
    }

    fn on_update(&mut self, _ctx: &ScriptContext, _delta_time: f32) -> HookResult {
        Ok(())
    }

    fn on_destroy(&mut self, _ctx: &ScriptContext) -> HookResult {
        Ok(())
    }
}

/// Everything a bound behaviour can reach, for the entity it is bound to.
#[derive(Debug, Clone)]
pub struct ScriptContext {
    entity: Entity,
    transform: Transform,
    input: Input,
    debug: Debug,
}

impl ScriptContext {
    pub fn bind(bridge: &SharedBridge, entity: EntityId) -> Self {
        let entity = Entity::from_id(bridge, entity);
        Self {
            transform: entity.transform(),
            input: Input::new(bridge),
            debug: Debug::new(bridge),
            entity,
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity.id()
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn debug(&self) -> &Debug {
        &self.debug
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Unbound,
    Active,
    Destroyed,
}

/// Which hook a failure came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Hook {
    Start,
    Update,
    Destroy,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hook::Start => "on_start",
            Hook::Update => "on_update",
            Hook::Destroy => "on_destroy",
        })
    }
}

enum Phase {
    Unbound,
    Active(ScriptContext),
    Destroyed(EntityId),
}

/// One behaviour and its position in the lifecycle.
///
/// Out-of-order requests are rejected with a [`LifecycleError`] and invoke
/// no hook. A hook that fails still completes its transition: the hook ran.
pub struct BehaviourSlot {
    behaviour: Box<dyn ScriptBehaviour>,
    phase: Phase,
    updates: u64,
}

impl BehaviourSlot {
    pub fn new(behaviour: impl ScriptBehaviour + 'static) -> Self {
        Self::from_boxed(Box::new(behaviour))
    }

    pub fn from_boxed(behaviour: Box<dyn ScriptBehaviour>) -> Self {
        Self {
            behaviour,
            phase: Phase::Unbound,
            updates: 0,
        }
    }

    pub fn name(&self) -> &str {
        self.behaviour.name()
    }

    pub fn state(&self) -> LifecycleState {
        match self.phase {
            Phase::Unbound => LifecycleState::Unbound,
            Phase::Active(_) => LifecycleState::Active,
            Phase::Destroyed(_) => LifecycleState::Destroyed,
        }
    }

    pub fn entity(&self) -> Option<EntityId> {
        match &self.phase {
            Phase::Unbound => None,
            Phase::Active(ctx) => Some(ctx.entity_id()),
            Phase::Destroyed(id) => Some(*id),
        }
    }

    /// Number of `on_update` calls delivered so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Bind to the host-assigned identifier, then run `on_start` once.
    pub fn activate(&mut self, bridge: &SharedBridge, entity: EntityId) -> Result<(), LifecycleError> {
        match &self.phase {
            Phase::Unbound => {}
            Phase::Active(ctx) => {
                return Err(LifecycleError::AlreadyBound {
                    entity: ctx.entity_id(),
                })
            }
            Phase::Destroyed(id) => return Err(LifecycleError::AlreadyDestroyed { entity: *id }),
        }

        self.phase = Phase::Active(ScriptContext::bind(bridge, entity));
        tracing::debug!(%entity, behaviour = self.behaviour.name(), "behaviour bound");

        let Phase::Active(ctx) = &self.phase else {
            unreachable!("phase was just set to Active");
        };
        self.behaviour
            .on_start(ctx)
            .map_err(|source| LifecycleError::Hook {
                entity,
                hook: Hook::Start,
                source,
            })
    }

    pub fn update(&mut self, delta_time: f32) -> Result<(), LifecycleError> {
        let ctx = match &self.phase {
            Phase::Active(ctx) => ctx,
            Phase::Unbound => {
                return Err(LifecycleError::NotActive {
                    state: LifecycleState::Unbound,
                })
            }
            Phase::Destroyed(id) => return Err(LifecycleError::AlreadyDestroyed { entity: *id }),
        };

        self.updates += 1;
        self.behaviour
            .on_update(ctx, delta_time)
            .map_err(|source| LifecycleError::Hook {
                entity: ctx.entity_id(),
                hook: Hook::Update,
                source,
            })
    }

    /// Run `on_destroy` once and enter the terminal state.
    pub fn destroy(&mut self) -> Result<(), LifecycleError> {
        let entity = match &self.phase {
            Phase::Active(ctx) => ctx.entity_id(),
            Phase::Unbound => {
                return Err(LifecycleError::NotActive {
                    state: LifecycleState::Unbound,
                })
            }
            Phase::Destroyed(id) => return Err(LifecycleError::AlreadyDestroyed { entity: *id }),
        };

        let Phase::Active(ctx) = std::mem::replace(&mut self.phase, Phase::Destroyed(entity)) else {
            unreachable!("phase was checked to be Active");
        };
        tracing::debug!(%entity, behaviour = self.behaviour.name(), updates = self.updates, "behaviour destroyed");

        self.behaviour
            .on_destroy(&ctx)
            .map_err(|source| LifecycleError::Hook {
                entity,
                hook: Hook::Destroy,
                source,
            })
    }
}

impl fmt::Debug for BehaviourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviourSlot")
            .field("behaviour", &self.behaviour.name())
            .field("state", &self.state())
            .field("entity", &self.entity())
            .field("updates", &self.updates)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptError;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use tether_bridge::{NativeBridge, SimulatedHost};
    use tether_core::Vector3;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Start(EntityId),
        Update(f32),
        Destroy,
    }

    struct Recorder {
        trace: Rc<RefCell<Vec<Call>>>,
        fail_update: bool,
    }

    impl ScriptBehaviour for Recorder {
        fn on_start(&mut self, ctx: &ScriptContext) -> HookResult {
            self.trace.borrow_mut().push(Call::Start(ctx.entity_id()));
            Ok(())
        }

        fn on_update(&mut self, _ctx: &ScriptContext, delta_time: f32) -> HookResult {
            self.trace.borrow_mut().push(Call::Update(delta_time));
            if self.fail_update {
                return Err(ScriptError::Custom("boom".into()));
            }
            Ok(())
        }

        fn on_destroy(&mut self, _ctx: &ScriptContext) -> HookResult {
            self.trace.borrow_mut().push(Call::Destroy);
            Ok(())
        }
    }

    fn recorder(fail_update: bool) -> (BehaviourSlot, Rc<RefCell<Vec<Call>>>) {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let slot = BehaviourSlot::new(Recorder {
            trace: trace.clone(),
            fail_update,
        });
        (slot, trace)
    }

    fn bridge() -> SharedBridge {
        Arc::new(SimulatedHost::new())
    }

    #[test]
    fn hooks_run_in_order() {
        let bridge = bridge();
        let id = bridge.create_entity().unwrap();
        let (mut slot, trace) = recorder(false);
        assert_eq!(slot.state(), LifecycleState::Unbound);

        slot.activate(&bridge, id).unwrap();
        slot.update(0.5).unwrap();
        slot.update(0.25).unwrap();
        slot.destroy().unwrap();

        assert_eq!(slot.state(), LifecycleState::Destroyed);
        assert_eq!(slot.updates(), 2);
        assert_eq!(
            *trace.borrow(),
            vec![Call::Start(id), Call::Update(0.5), Call::Update(0.25), Call::Destroy]
        );
    }

    #[test]
    fn update_before_activate_is_rejected() {
        let (mut slot, trace) = recorder(false);
        assert!(matches!(
            slot.update(0.1),
            Err(LifecycleError::NotActive {
                state: LifecycleState::Unbound
            })
        ));
        assert!(matches!(slot.destroy(), Err(LifecycleError::NotActive { .. })));
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn nothing_runs_after_destroy() {
        let bridge = bridge();
        let id = bridge.create_entity().unwrap();
        let (mut slot, trace) = recorder(false);
        slot.activate(&bridge, id).unwrap();
        slot.destroy().unwrap();

        assert!(matches!(
            slot.update(0.1),
            Err(LifecycleError::AlreadyDestroyed { entity }) if entity == id
        ));
        assert!(matches!(slot.destroy(), Err(LifecycleError::AlreadyDestroyed { .. })));
        assert!(matches!(
            slot.activate(&bridge, id),
            Err(LifecycleError::AlreadyDestroyed { .. })
        ));
        assert_eq!(trace.borrow().len(), 2);
    }

    #[test]
    fn second_activate_is_rejected() {
        let bridge = bridge();
        let first = bridge.create_entity().unwrap();
        let second = bridge.create_entity().unwrap();
        let (mut slot, trace) = recorder(false);

        slot.activate(&bridge, first).unwrap();
        assert!(matches!(
            slot.activate(&bridge, second),
            Err(LifecycleError::AlreadyBound { entity }) if entity == first
        ));
        assert_eq!(slot.entity(), Some(first));
        assert_eq!(*trace.borrow(), vec![Call::Start(first)]);
    }

    #[test]
    fn failing_hook_keeps_behaviour_active() {
        let bridge = bridge();
        let id = bridge.create_entity().unwrap();
        let (mut slot, _trace) = recorder(true);
        slot.activate(&bridge, id).unwrap();

        let err = slot.update(0.1).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Hook { hook: Hook::Update, .. }
        ));
        assert_eq!(slot.state(), LifecycleState::Active);
        slot.destroy().unwrap();
    }

    struct Mover;

    impl ScriptBehaviour for Mover {
        fn on_update(&mut self, ctx: &ScriptContext, delta_time: f32) -> HookResult {
            let mut position = ctx.transform().position()?;
            position.y += delta_time;
            ctx.transform().set_position(position)?;
            Ok(())
        }
    }

    #[test]
    fn transform_is_bound_to_assigned_identifier() {
        let bridge = bridge();
        bridge.create_entity().unwrap();
        let id = bridge.create_entity().unwrap();

        let mut slot = BehaviourSlot::new(Mover);
        slot.activate(&bridge, id).unwrap();
        slot.update(2.0).unwrap();

        assert_eq!(bridge.get_position(id).unwrap(), (0.0, 2.0, 0.0));
        assert_eq!(
            Transform::new(&bridge, id).position().unwrap(),
            Vector3::new(0.0, 2.0, 0.0)
        );
    }

    #[test]
    fn bridge_error_surfaces_from_hook() {
        let host = Arc::new(SimulatedHost::new());
        let bridge: SharedBridge = host.clone();
        let id = bridge.create_entity().unwrap();
        let mut slot = BehaviourSlot::new(Mover);
        slot.activate(&bridge, id).unwrap();

        host.retire(id);
        let err = slot.update(0.1).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Hook {
                source: ScriptError::Bridge(tether_bridge::BridgeError::InvalidHandle(_)),
                ..
            }
        ));
    }
}
