//! JavaScript behaviours
//!
//! A [`JsBehaviour`] is a script with optional global `onStart()`,
//! `onUpdate(dt)` and `onDestroy()` functions. When the behaviour starts, the
//! script gets these globals. All but the entity functions are bound to its
//! own entity:
//!
//! | global | maps to |
//! |---|---|
//! | `entityId` | the host identifier (number) |
//! | `log(message)` | `Debug::log` |
//! | `getPosition()` / `setPosition(x, y, z)` | `Transform` position |
//! | `getRotation()` / `setRotation(x, y, z, w)` | `Transform` rotation |
//! | `getScale()` / `setScale(x, y, z)` | `Transform` scale |
//! | `getKey(code)` / `getKeyDown(code)` / `getKeyUp(code)` | `Input` keys |
//! | `mousePosition()` | `Input::mouse_position` |
//! | `createEntity()` | `Entity::create`, returns the new identifier |
//! | `destroyEntity(id)` / `isEntityValid(id)` | `Entity` on any identifier |
//!
//! Getters return arrays (`[x, y, z]`, `[x, y, z, w]`). Bridge failures are
//! thrown as plain `Error` objects carrying the bridge error's message.

use crate::{Entity, HookResult, JsRuntime, ScriptBehaviour, ScriptContext, ScriptError};
use rquickjs::{Ctx, Exception, Function};
use std::path::Path;
use tether_bridge::BridgeError;
use tether_core::{EntityId, KeyCode, Quaternion, Vector3};

pub struct JsBehaviour {
    name: String,
    source: String,
    runtime: Option<JsRuntime>,
}

impl JsBehaviour {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            runtime: None,
        }
    }

    /// Load a script from disk, named after the file stem.
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Live only between `on_start` and `on_destroy`.
    pub fn runtime(&self) -> Option<&JsRuntime> {
        self.runtime.as_ref()
    }
}

impl ScriptBehaviour for JsBehaviour {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_start(&mut self, ctx: &ScriptContext) -> HookResult {
        let runtime = JsRuntime::new()?;
        install_api(&runtime, ctx)?;
        let runtime = self.runtime.insert(runtime);

        runtime.execute(&self.source)?;
        runtime.call_optional("onStart", ())?;
        Ok(())
    }

    fn on_update(&mut self, _ctx: &ScriptContext, delta_time: f32) -> HookResult {
        if let Some(runtime) = &self.runtime {
            runtime.call_optional("onUpdate", (delta_time,))?;
        }
        Ok(())
    }

    fn on_destroy(&mut self, _ctx: &ScriptContext) -> HookResult {
        if let Some(runtime) = self.runtime.take() {
            runtime.call_optional("onDestroy", ())?;
        }
        Ok(())
    }
}

/// Throw a bridge failure into the script as a plain `Error`.
fn thrown(js: &Ctx<'_>, err: BridgeError) -> rquickjs::Error {
    Exception::throw_message(js, &err.to_string())
}

fn install_api(runtime: &JsRuntime, ctx: &ScriptContext) -> Result<(), ScriptError> {
    runtime.context().with(|js| install_globals(&js, ctx))?;
    Ok(())
}

fn install_globals<'js>(js: &Ctx<'js>, ctx: &ScriptContext) -> rquickjs::Result<()> {
    let globals = js.globals();
    globals.set("entityId", ctx.entity_id().raw())?;

    let debug = ctx.debug().clone();
    globals.set(
        "log",
        Function::new(js.clone(), move |message: String| debug.log(&message))?,
    )?;

    // Entities
    let bridge = ctx.entity().bridge().clone();
    globals.set(
        "createEntity",
        Function::new(js.clone(), move |js: Ctx<'js>| -> rquickjs::Result<u32> {
            Entity::create(&bridge)
                .map(|entity| entity.id().raw())
                .map_err(|err| thrown(&js, err))
        })?,
    )?;
    let bridge = ctx.entity().bridge().clone();
    globals.set(
        "destroyEntity",
        Function::new(js.clone(), move |js: Ctx<'js>, id: u32| -> rquickjs::Result<()> {
            Entity::from_id(&bridge, EntityId::from_raw(id))
                .destroy()
                .map_err(|err| thrown(&js, err))
        })?,
    )?;
    let bridge = ctx.entity().bridge().clone();
    globals.set(
        "isEntityValid",
        Function::new(js.clone(), move |js: Ctx<'js>, id: u32| -> rquickjs::Result<bool> {
            Entity::from_id(&bridge, EntityId::from_raw(id))
                .is_valid()
                .map_err(|err| thrown(&js, err))
        })?,
    )?;

    // Transform
    let transform = ctx.transform().clone();
    globals.set(
        "getPosition",
        Function::new(js.clone(), move |js: Ctx<'js>| -> rquickjs::Result<Vec<f32>> {
            transform
                .position()
                .map(|v| v.to_array().to_vec())
                .map_err(|err| thrown(&js, err))
        })?,
    )?;
    let transform = ctx.transform().clone();
    globals.set(
        "setPosition",
        Function::new(
            js.clone(),
            move |js: Ctx<'js>, x: f32, y: f32, z: f32| -> rquickjs::Result<()> {
                transform
                    .set_position(Vector3::new(x, y, z))
                    .map_err(|err| thrown(&js, err))
            },
        )?,
    )?;
    let transform = ctx.transform().clone();
    globals.set(
        "getRotation",
        Function::new(js.clone(), move |js: Ctx<'js>| -> rquickjs::Result<Vec<f32>> {
            transform
                .rotation()
                .map(|q| q.to_array().to_vec())
                .map_err(|err| thrown(&js, err))
        })?,
    )?;
    let transform = ctx.transform().clone();
    globals.set(
        "setRotation",
        Function::new(
            js.clone(),
            move |js: Ctx<'js>, x: f32, y: f32, z: f32, w: f32| -> rquickjs::Result<()> {
                transform
                    .set_rotation(Quaternion::new(x, y, z, w))
                    .map_err(|err| thrown(&js, err))
            },
        )?,
    )?;
    let transform = ctx.transform().clone();
    globals.set(
        "getScale",
        Function::new(js.clone(), move |js: Ctx<'js>| -> rquickjs::Result<Vec<f32>> {
            transform
                .scale()
                .map(|v| v.to_array().to_vec())
                .map_err(|err| thrown(&js, err))
        })?,
    )?;
    let transform = ctx.transform().clone();
    globals.set(
        "setScale",
        Function::new(
            js.clone(),
            move |js: Ctx<'js>, x: f32, y: f32, z: f32| -> rquickjs::Result<()> {
                transform
                    .set_scale(Vector3::new(x, y, z))
                    .map_err(|err| thrown(&js, err))
            },
        )?,
    )?;

    // Input
    let input = ctx.input().clone();
    globals.set(
        "getKey",
        Function::new(js.clone(), move |js: Ctx<'js>, code: i32| -> rquickjs::Result<bool> {
            input.get_key(KeyCode(code)).map_err(|err| thrown(&js, err))
        })?,
    )?;
    let input = ctx.input().clone();
    globals.set(
        "getKeyDown",
        Function::new(js.clone(), move |js: Ctx<'js>, code: i32| -> rquickjs::Result<bool> {
            input
                .get_key_down(KeyCode(code))
                .map_err(|err| thrown(&js, err))
        })?,
    )?;
    let input = ctx.input().clone();
    globals.set(
        "getKeyUp",
        Function::new(js.clone(), move |js: Ctx<'js>, code: i32| -> rquickjs::Result<bool> {
            input
                .get_key_up(KeyCode(code))
                .map_err(|err| thrown(&js, err))
        })?,
    )?;
    let input = ctx.input().clone();
    globals.set(
        "mousePosition",
        Function::new(js.clone(), move |js: Ctx<'js>| -> rquickjs::Result<Vec<f32>> {
            input
                .mouse_position()
                .map(|v| v.to_array().to_vec())
                .map_err(|err| thrown(&js, err))
        })?,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BehaviourSlot, Hook, LifecycleError};
    use std::sync::Arc;
    use tether_bridge::{NativeBridge, SharedBridge, SimulatedHost};

    const WALKER: &str = r#"
        var ticks = 0;

        function onStart() {
            log("walker " + entityId + " ready");
            setScale(2, 2, 2);
        }

        function onUpdate(dt) {
            ticks += 1;
            var p = getPosition();
            var step = getKey(0x57) ? 10 : 1;
            setPosition(p[0] + step * dt, p[1], p[2]);
            if (getKeyDown(0x20)) {
                log("jump on tick " + ticks);
            }
        }

        function onDestroy() {
            log("walker done after " + ticks + " ticks");
        }
    "#;

    fn setup() -> (Arc<SimulatedHost>, SharedBridge) {
        let host = Arc::new(SimulatedHost::new());
        let bridge: SharedBridge = host.clone();
        (host, bridge)
    }

    #[test]
    fn script_drives_its_entity() {
        let (host, bridge) = setup();
        let id = bridge.create_entity().unwrap();
        let mut slot = BehaviourSlot::new(JsBehaviour::new("walker", WALKER));

        slot.activate(&bridge, id).unwrap();
        assert_eq!(host.get_scale(id).unwrap(), (2.0, 2.0, 2.0));

        slot.update(1.0).unwrap();
        host.press_key(KeyCode::W.code());
        host.press_key(KeyCode::SPACE.code());
        slot.update(0.5).unwrap();
        host.end_tick();
        slot.update(0.5).unwrap();
        slot.destroy().unwrap();

        assert_eq!(host.get_position(id).unwrap(), (11.0, 0.0, 0.0));
        assert_eq!(
            host.log_lines(),
            vec![
                "walker 1 ready".to_string(),
                "jump on tick 2".to_string(),
                "walker done after 3 ticks".to_string(),
            ]
        );
    }

    #[test]
    fn hooks_are_optional() {
        let (_host, bridge) = setup();
        let id = bridge.create_entity().unwrap();
        let mut slot = BehaviourSlot::new(JsBehaviour::new("empty", "var x = 1;"));

        slot.activate(&bridge, id).unwrap();
        slot.update(0.1).unwrap();
        slot.destroy().unwrap();
    }

    #[test]
    fn stale_handle_throws_plain_error_into_script() {
        let (host, bridge) = setup();
        let id = bridge.create_entity().unwrap();
        let source = r#"
            function onUpdate(dt) {
                try {
                    getPosition();
                    log("no error");
                } catch (e) {
                    log(e.name + "|" + e.message);
                }
            }
        "#;
        let mut slot = BehaviourSlot::new(JsBehaviour::new("careful", source));
        slot.activate(&bridge, id).unwrap();

        host.retire(id);
        slot.update(0.1).unwrap();
        assert_eq!(
            host.log_lines(),
            vec!["Error|entity #1 is not recognized by the host".to_string()]
        );
    }

    #[test]
    fn script_manages_other_entities() {
        let (host, bridge) = setup();
        let id = bridge.create_entity().unwrap();
        let source = r#"
            var spawned = 0;
            function onStart() {
                spawned = createEntity();
                log("spawned " + spawned + " valid=" + isEntityValid(spawned));
            }
            function onUpdate(dt) {
                destroyEntity(spawned);
                destroyEntity(spawned);
                log("after destroy valid=" + isEntityValid(spawned));
            }
        "#;
        let mut slot = BehaviourSlot::new(JsBehaviour::new("spawner", source));

        slot.activate(&bridge, id).unwrap();
        assert_eq!(host.entity_count(), 2);
        assert_eq!(bridge.is_entity_valid(EntityId::from_raw(2)), Ok(true));

        slot.update(0.1).unwrap();
        assert_eq!(host.entity_count(), 1);
        assert_eq!(bridge.is_entity_valid(EntityId::from_raw(2)), Ok(false));
        assert_eq!(bridge.is_entity_valid(id), Ok(true));
        assert_eq!(
            host.log_lines(),
            vec![
                "spawned 2 valid=true".to_string(),
                "after destroy valid=false".to_string(),
            ]
        );
    }

    #[test]
    fn script_can_retire_its_own_entity() {
        let (host, bridge) = setup();
        let id = bridge.create_entity().unwrap();
        let mut slot = BehaviourSlot::new(JsBehaviour::new(
            "quitter",
            "function onUpdate(dt) { destroyEntity(entityId); }",
        ));
        slot.activate(&bridge, id).unwrap();

        slot.update(0.1).unwrap();
        assert_eq!(bridge.is_entity_valid(id), Ok(false));
        assert_eq!(host.entity_count(), 0);
    }

    #[test]
    fn runtime_lives_between_start_and_destroy() {
        let (_host, bridge) = setup();
        let id = bridge.create_entity().unwrap();
        let ctx = ScriptContext::bind(&bridge, id);
        let mut behaviour = JsBehaviour::new("walker", WALKER);
        assert!(behaviour.runtime().is_none());

        behaviour.on_start(&ctx).unwrap();
        let runtime = behaviour.runtime().unwrap();
        assert!(runtime.has_function("onUpdate").unwrap());
        assert!(runtime.has_function("createEntity").unwrap());

        behaviour.on_destroy(&ctx).unwrap();
        assert!(behaviour.runtime().is_none());
    }

    #[test]
    fn uncaught_exception_is_a_hook_failure() {
        let (_host, bridge) = setup();
        let id = bridge.create_entity().unwrap();
        let source = "function onUpdate(dt) { throw new Error('bad tick'); }";
        let mut slot = BehaviourSlot::new(JsBehaviour::new("broken", source));
        slot.activate(&bridge, id).unwrap();

        let err = slot.update(0.1).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Hook {
                hook: Hook::Update,
                source: ScriptError::Exception(ref message),
                ..
            } if message == "bad tick"
        ));
    }

    #[test]
    fn mouse_position_reaches_script() {
        let (host, bridge) = setup();
        let id = bridge.create_entity().unwrap();
        host.move_mouse(12.0, 34.0);
        let source = r#"
            function onStart() {
                var m = mousePosition();
                log(m[0] + "," + m[1] + "," + m[2]);
            }
        "#;
        let mut slot = BehaviourSlot::new(JsBehaviour::new("pointer", source));
        slot.activate(&bridge, id).unwrap();
        assert_eq!(host.log_lines(), vec!["12,34,0".to_string()]);
    }
}
