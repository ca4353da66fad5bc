use tether_core::EntityId;
use thiserror::Error;

/// Result of a single boundary call.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Failures a host can report for a boundary call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("entity {0} is not recognized by the host")]
    InvalidHandle(EntityId),

    #[error("host is not available")]
    HostUnavailable,

    #[error("host fault: {0}")]
    Host(String),
}
