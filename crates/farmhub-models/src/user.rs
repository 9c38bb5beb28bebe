//! User record written at `users/{userId}`.

use serde::{Deserialize, Serialize};

/// The account that owns the device tree.
///
/// `createdAt` and `lastLogin` are stamped by the provisioner at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub name: String,
}

impl Default for UserAccount {
    fn default() -> Self {
        Self {
            email: "farm-owner@example.com".to_string(),
            name: "Farm Owner".to_string(),
        }
    }
}
