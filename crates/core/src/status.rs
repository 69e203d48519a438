//! Transient response envelope for write operations.

use serde::{Deserialize, Serialize};

/// Success flag plus a human-readable message. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    pub ok: bool,
    pub message: String,
}

impl StatusResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}
