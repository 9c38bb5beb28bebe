//! Path construction for the device document tree.
//!
//! All documents live under `users/{userId}/devices/{deviceId}`. The "current
//! state" collections hold exactly one document each, with the fixed id
//! `current`.

/// Document id used by every current-state collection.
pub const CURRENT_DOC: &str = "current";

/// Sub-collections the device firmware creates and appends to on its own.
/// The provisioner never writes them.
pub const FIRMWARE_COLLECTIONS: [&str; 3] = ["history", "triggerLog", "automationLog"];

/// Path builder for one user/device pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePath {
    user_id: String,
    device_id: String,
}

impl DevicePath {
    pub fn new(user_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            device_id: device_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Top-level users collection.
    pub fn users(&self) -> &'static str {
        "users"
    }

    /// Devices collection under the user.
    pub fn devices(&self) -> String {
        format!("users/{}/devices", self.user_id)
    }

    /// A current-state sub-collection under the device.
    pub fn subcollection(&self, name: &str) -> String {
        format!(
            "users/{}/devices/{}/{}",
            self.user_id, self.device_id, name
        )
    }

    /// Full path of the user document.
    pub fn user_doc(&self) -> String {
        format!("users/{}", self.user_id)
    }

    /// Full path of the device document.
    pub fn device_doc(&self) -> String {
        format!("users/{}/devices/{}", self.user_id, self.device_id)
    }

    /// Full path of a `current` document in a sub-collection.
    pub fn current_doc(&self, collection: &str) -> String {
        format!("{}/{}", self.subcollection(collection), CURRENT_DOC)
    }
}
