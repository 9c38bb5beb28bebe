//! Read-back verification of a provisioned device tree.

use tracing::{info, warn};

use farmhub_firestore::DocumentStore;

use crate::paths::{DevicePath, CURRENT_DOC};

/// Result of the three verification reads.
///
/// Each flag is `Some(exists)` when its read succeeded and `None` when the
/// read itself failed; a failed read is never interpreted as "missing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub user_exists: Option<bool>,
    pub device_exists: Option<bool>,
    pub rules_exist: Option<bool>,
    /// Sorted top-level field names of the rules document, empty when it is
    /// missing or unread.
    pub rule_keys: Vec<String>,
}

impl VerifyReport {
    /// True when all three reads succeeded and found their document.
    pub fn all_present(&self) -> bool {
        self.user_exists == Some(true)
            && self.device_exists == Some(true)
            && self.rules_exist == Some(true)
    }
}

/// Performs independent point reads of the user, device and rules documents.
pub struct Verifier<S> {
    store: S,
    path: DevicePath,
}

impl<S: DocumentStore> Verifier<S> {
    pub fn new(store: S, user_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            store,
            path: DevicePath::new(user_id, device_id),
        }
    }

    /// Run the three reads. Read failures are logged and leave the
    /// corresponding flag absent; they never abort the remaining reads.
    pub async fn verify(&self) -> VerifyReport {
        let mut report = VerifyReport::default();

        match self
            .store
            .get_document(self.path.users(), self.path.user_id())
            .await
        {
            Ok(doc) => report.user_exists = Some(doc.is_some()),
            Err(e) => warn!("User document read failed: {}", e),
        }

        match self
            .store
            .get_document(&self.path.devices(), self.path.device_id())
            .await
        {
            Ok(doc) => report.device_exists = Some(doc.is_some()),
            Err(e) => warn!("Device document read failed: {}", e),
        }

        match self
            .store
            .get_document(&self.path.subcollection("automationRules"), CURRENT_DOC)
            .await
        {
            Ok(doc) => {
                report.rules_exist = Some(doc.is_some());
                if let Some(doc) = doc {
                    report.rule_keys = doc.field_names();
                }
            }
            Err(e) => warn!("Automation rules read failed: {}", e),
        }

        info!(
            user = ?report.user_exists,
            device = ?report.device_exists,
            rules = ?report.rules_exist,
            rule_keys = ?report.rule_keys,
            "Verification complete"
        );
        report
    }
}
