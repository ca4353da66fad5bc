use crate::{Hook, LifecycleState};
use tether_bridge::BridgeError;
use tether_core::EntityId;
use thiserror::Error;

/// What a lifecycle hook returns.
pub type HookResult = Result<(), ScriptError>;

/// Failures raised from inside behaviour code.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("javascript engine error: {0}")]
    Js(#[from] rquickjs::Error),

    #[error("uncaught javascript exception: {0}")]
    Exception(String),

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

/// Misuse of the behaviour lifecycle, or a hook that failed.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("behaviour is {state:?}, expected Active")]
    NotActive { state: LifecycleState },

    #[error("behaviour is already bound to entity {entity}")]
    AlreadyBound { entity: EntityId },

    #[error("behaviour for entity {entity} was already destroyed")]
    AlreadyDestroyed { entity: EntityId },

    #[error("{hook} failed for entity {entity}: {source}")]
    Hook {
        entity: EntityId,
        hook: Hook,
        #[source]
        source: ScriptError,
    },

    #[error("no behaviour is attached to entity {0}")]
    UnknownEntity(EntityId),

    #[error(transparent)]
    Host(#[from] BridgeError),
}
