//! Tether Bridge
//!
//! The boundary call gateway between scripted code and the host engine.
//!
//! ## Architecture
//!
//! - **Gateway:** [`NativeBridge`] is the closed set of host entry points.
//!   Scripted-side facades depend on it by abstraction only.
//! - **FFI:** [`FfiBridge`] forwards every call through a C function table
//!   ([`HostApi`]) registered by a native host.
//! - **Simulation:** [`SimulatedHost`] keeps host state in-process, for tests
//!   and for the demo runtime.
//!
//! No call is cached and no identifier is checked locally before forwarding.
//! The host is the only source of truth.

pub mod error;
pub mod ffi;
pub mod gateway;
pub mod sim;

pub use error::{BridgeError, BridgeResult};
pub use ffi::{FfiBridge, HostApi};
pub use gateway::{NativeBridge, SharedBridge};
pub use sim::{EntryPoint, SimulatedHost};
