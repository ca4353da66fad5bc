//! Tether Runtime
//!
//! Boots a simulated host, attaches sample behaviours (one Rust, plus any
//! number of JavaScript files) and runs the fixed-rate tick loop.
//!
//! Usage: `tether [settings.json]`

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tether_bridge::{EntryPoint, SharedBridge, SimulatedHost};
use tether_core::{KeyCode, Vector3};
use tether_script::{HookResult, JsBehaviour, ScriptBehaviour, ScriptContext, ScriptDriver, ScriptSettings};

const BOBBER_JS: &str = r#"
    var elapsed = 0;

    function onStart() {
        log("bobber " + entityId + " started");
    }

    function onUpdate(dt) {
        elapsed += dt;
        var p = getPosition();
        setPosition(p[0], Math.sin(elapsed * 2.0), p[2]);
        if (getKeyDown(0x20)) {
            log("bobber saw space at " + elapsed.toFixed(2) + "s");
        }
    }

    function onDestroy() {
        log("bobber stopped after " + elapsed.toFixed(2) + "s");
    }
"#;

/// Circles the origin, faster while W is held.
struct Orbiter {
    radius: f32,
    angle: f32,
}

impl ScriptBehaviour for Orbiter {
    fn name(&self) -> &str {
        "orbiter"
    }

    fn on_start(&mut self, ctx: &ScriptContext) -> HookResult {
        ctx.transform().set_scale(Vector3::new(0.5, 0.5, 0.5))?;
        ctx.debug().log(format!("orbiter {} started", ctx.entity_id()));
        Ok(())
    }

    fn on_update(&mut self, ctx: &ScriptContext, delta_time: f32) -> HookResult {
        let speed = if ctx.input().get_key(KeyCode::W)? { 4.0 } else { 1.0 };
        self.angle += speed * delta_time;

        let offset = glam::Vec3::new(self.angle.cos(), 0.0, self.angle.sin()) * self.radius;
        ctx.transform().set_position(offset.into())?;
        ctx.transform()
            .set_rotation(glam::Quat::from_rotation_y(-self.angle).into())?;
        Ok(())
    }

    fn on_destroy(&mut self, ctx: &ScriptContext) -> HookResult {
        let position = ctx.transform().position()?;
        ctx.debug().log(format!(
            "orbiter stopped at ({:.2}, {:.2}, {:.2})",
            position.x, position.y, position.z
        ));
        Ok(())
    }
}

fn load_settings() -> Result<ScriptSettings> {
    match std::env::args().nth(1) {
        Some(path) => ScriptSettings::load(Path::new(&path))
            .with_context(|| format!("loading settings from {path}")),
        None => Ok(ScriptSettings::default()),
    }
}

/// Scripted host input so the demo exercises key edges and pointer motion.
fn drive_input(host: &SimulatedHost, tick: u64) {
    match tick {
        10 => host.press_key(KeyCode::W.code()),
        40 => host.release_key(KeyCode::W.code()),
        60 => host.press_key(KeyCode::SPACE.code()),
        61 => host.release_key(KeyCode::SPACE.code()),
        _ => {}
    }
    host.move_mouse((tick % 640) as f32, 240.0);
}

fn main() -> Result<()> {
    let settings = load_settings()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(settings.log_level()?)
        .init();

    tracing::info!("Tether v{}", tether_core::VERSION);

    let host = Arc::new(SimulatedHost::with_log_prefix(settings.logging.script_prefix.clone()));
    let bridge: SharedBridge = host.clone();
    let mut driver = ScriptDriver::new(bridge);

    driver.spawn(Orbiter {
        radius: 3.0,
        angle: 0.0,
    })?;
    if settings.runtime.scripts.is_empty() {
        driver.spawn(JsBehaviour::new("bobber", BOBBER_JS))?;
    }
    for path in &settings.runtime.scripts {
        let behaviour = JsBehaviour::from_file(path)
            .with_context(|| format!("loading script {}", path.display()))?;
        driver.spawn(behaviour)?;
    }
    tracing::info!(behaviours = driver.len(), "behaviours attached");

    let mut clock = settings.clock();
    let mut failures = 0usize;
    while clock.tick_count() < settings.runtime.demo_ticks {
        drive_input(&host, clock.tick_count());
        let delta_time = clock.advance();

        let report = driver.tick(delta_time);
        failures += report.failures.len();
        host.end_tick();
    }

    let shutdown_failures = driver.shutdown();
    failures += shutdown_failures.len();

    tracing::info!(
        ticks = clock.tick_count(),
        simulated_ms = clock.total_time().as_millis() as u64,
        boundary_reads = host.call_count(EntryPoint::GetPosition),
        boundary_writes = host.call_count(EntryPoint::SetPosition),
        log_lines = host.log_lines().len(),
        failures,
        "run complete"
    );

    Ok(())
}
