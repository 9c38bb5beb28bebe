//! Device record written at `users/{userId}/devices/{deviceId}`.

use serde::{Deserialize, Serialize};

/// Connectivity status of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive record for a controller.
///
/// Timestamps (`createdAt`, `lastUpdate`) are added at write time by the
/// provisioner, not carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    pub status: DeviceStatus,
    pub location: String,
    pub description: String,
}

impl Default for DeviceRecord {
    fn default() -> Self {
        Self {
            name: "Main Farm Controller".to_string(),
            status: DeviceStatus::Online,
            location: "Greenhouse 1".to_string(),
            description: "Primary automation controller for main farm area".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(DeviceStatus::Online.as_str(), "online");
        assert_eq!(DeviceStatus::Offline.as_str(), "offline");
    }

    #[test]
    fn test_default_record() {
        let record = DeviceRecord::default();
        assert_eq!(record.name, "Main Farm Controller");
        assert_eq!(record.status, DeviceStatus::Online);
        assert_eq!(record.location, "Greenhouse 1");
    }
}
