//! Tether Scripting Surface
//!
//! What user-authored behaviours see of the host engine.
//!
//! ## Architecture
//!
//! - **Facades:** [`Entity`], [`Transform`], [`Input`] and [`Debug`] forward
//!   every call to the installed [`NativeBridge`](tether_bridge::NativeBridge);
//!   none of them cache.
//! - **Lifecycle:** [`ScriptBehaviour`] hooks are driven through a
//!   [`BehaviourSlot`] state machine (Unbound → Active → Destroyed), and a
//!   [`ScriptDriver`] runs one slot per entity.
//! - **JavaScript:** [`JsBehaviour`] runs a QuickJS script as a behaviour,
//!   with the same facades exposed as globals.

pub mod behaviour;
pub mod debug;
pub mod driver;
pub mod entity;
pub mod error;
pub mod input;
pub mod js;
pub mod runtime;
pub mod settings;
pub mod transform;

pub use behaviour::{BehaviourSlot, Hook, LifecycleState, ScriptBehaviour, ScriptContext};
pub use debug::Debug;
pub use driver::{ScriptDriver, TickReport};
pub use entity::Entity;
pub use error::{HookResult, LifecycleError, ScriptError};
pub use input::Input;
pub use js::JsBehaviour;
pub use runtime::JsRuntime;
pub use settings::{ScriptSettings, SettingsError};
pub use transform::Transform;

pub use rquickjs;
pub use tether_bridge;
pub use tether_core;
