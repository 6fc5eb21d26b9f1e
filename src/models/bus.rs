//! Bus and route model.

use serde::{Deserialize, Serialize};

/// A bus as stored in the bus collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusRecord {
    pub id: String,
    /// Owning driver id, not checked against the driver collection
    pub driver_id: String,
    pub bus_number: String,
    pub start_point: String,
    pub end_point: String,
    #[serde(default)]
    pub stops: Vec<String>,
    #[serde(default)]
    pub times: Vec<String>,
    pub photo: String,
    pub created_at: String,
}

impl BusRecord {
    pub fn serves_route(&self, from: &str, to: &str) -> bool {
        self.start_point == from && self.end_point == to
    }
}

/// Validated bus input, photo already stored.
#[derive(Debug, Clone)]
pub struct NewBus {
    pub driver_id: String,
    pub bus_number: String,
    pub start_point: String,
    pub end_point: String,
    pub stops: Vec<String>,
    pub times: Vec<String>,
    pub photo: String,
}

/// Query parameters for `GET /bus/list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusListQuery {
    #[serde(default)]
    pub driver_id: Option<String>,
}

/// Query parameters for `GET /bus/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct BusSearchQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// Request body for `DELETE /bus/delete`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBusRequest {
    #[serde(default)]
    pub bus_id: Option<String>,
}

/// Response to a successful bus add.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBusResponse {
    pub success: bool,
    pub message: String,
    pub bus_id: String,
}
