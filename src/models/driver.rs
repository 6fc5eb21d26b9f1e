//! Bus driver registration model.

use serde::{Deserialize, Serialize};

/// Verification state of a driver registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Pending,
    Approved,
    Rejected,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Pending => "pending",
            DriverStatus::Approved => "approved",
            DriverStatus::Rejected => "rejected",
        }
    }
}

/// A bus driver registration as stored in the driver collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Public path of the uploaded profile photo
    pub photo: String,
    /// Public path of the uploaded licence scan
    pub license: String,
    pub status: DriverStatus,
    pub submitted_at: String,
}

/// Validated registration input, files already stored.
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub photo: String,
    pub license: String,
}

/// Public projection returned by the status lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverStatusView {
    pub id: String,
    pub name: String,
    pub status: DriverStatus,
}

impl From<&DriverRecord> for DriverStatusView {
    fn from(driver: &DriverRecord) -> Self {
        Self {
            id: driver.id.clone(),
            name: driver.name.clone(),
            status: driver.status,
        }
    }
}

/// Request body for approve/reject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// Query parameters for the status lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverStatusQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// Response to a successful registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterDriverResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}
