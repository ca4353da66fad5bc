//! Debug facade
//!
//! Fire-and-forget logging through the host. No buffering or rate limiting.

use std::fmt;
use tether_bridge::SharedBridge;

#[derive(Clone)]
pub struct Debug {
    bridge: SharedBridge,
}

impl Debug {
    pub fn new(bridge: &SharedBridge) -> Self {
        Self {
            bridge: bridge.clone(),
        }
    }

    pub fn log(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if let Err(err) = self.bridge.log(message) {
            tracing::warn!(error = %err, line = message, "host rejected script log line");
        }
    }
}

impl fmt::Debug for Debug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debug").finish_non_exhaustive()
    }
}
