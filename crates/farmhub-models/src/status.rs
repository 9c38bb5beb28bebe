//! Device status report written at `.../status/current`.

use serde::{Deserialize, Serialize};

use crate::DeviceStatus;

/// Self-reported connectivity and firmware info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: DeviceStatus,
    pub ip_address: String,
    pub firmware_version: String,
}

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            status: DeviceStatus::Online,
            ip_address: "192.168.1.100".to_string(),
            firmware_version: "1.0.0".to_string(),
        }
    }
}
