//! Provisioning configuration.
//!
//! The user and device identifiers are explicit inputs to every operation;
//! nothing here is global state. Environment variables override the bootstrap
//! defaults field by field.

use farmhub_models::{DeviceRecord, StatusReport, UserAccount};

/// Everything the provisioner needs to know about one user/device pair.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Firebase Auth UID that owns the device tree.
    pub user_id: String,
    /// Document id of the controller under `devices`.
    pub device_id: String,
    pub user: UserAccount,
    pub device: DeviceRecord,
    pub status: StatusReport,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            user_id: "demo-user".to_string(),
            device_id: "device_001".to_string(),
            user: UserAccount::default(),
            device: DeviceRecord::default(),
            status: StatusReport::default(),
        }
    }
}

impl ProvisionConfig {
    /// Create config from environment variables, falling back to the
    /// bootstrap defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(user_id) = std::env::var("FARMHUB_USER_ID") {
            if !user_id.is_empty() {
                config.user_id = user_id;
            }
        }
        if let Ok(device_id) = std::env::var("FARMHUB_DEVICE_ID") {
            if !device_id.is_empty() {
                config.device_id = device_id;
            }
        }
        if let Ok(email) = std::env::var("FARMHUB_USER_EMAIL") {
            config.user.email = email;
        }
        if let Ok(name) = std::env::var("FARMHUB_USER_NAME") {
            config.user.name = name;
        }
        if let Ok(name) = std::env::var("FARMHUB_DEVICE_NAME") {
            config.device.name = name;
        }
        if let Ok(location) = std::env::var("FARMHUB_DEVICE_LOCATION") {
            config.device.location = location;
        }
        if let Ok(description) = std::env::var("FARMHUB_DEVICE_DESCRIPTION") {
            config.device.description = description;
        }
        if let Ok(ip) = std::env::var("FARMHUB_DEVICE_IP") {
            config.status.ip_address = ip;
        }
        if let Ok(version) = std::env::var("FARMHUB_FIRMWARE_VERSION") {
            config.status.firmware_version = version;
        }

        config
    }
}
