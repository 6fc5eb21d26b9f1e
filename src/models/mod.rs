//! Data models for the bus registry backend.
//!
//! Field names serialize as camelCase to match the browser client and the stored JSON files.

mod bus;
mod driver;

pub use bus::*;
pub use driver::*;

use serde::{Deserialize, Serialize};

/// Generic `{success, message}` acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Body the client sends after a Google sign-in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginNotification {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
