//! Partial update of the automation rules document.

use tracing::info;

use farmhub_firestore::{DocumentStore, FirestoreResult};
use farmhub_models::RulePatch;

use crate::paths::{DevicePath, CURRENT_DOC};
use crate::payloads;

/// Applies field-level rule updates without touching the other actuators'
/// rules.
pub struct RulePatcher<S> {
    store: S,
    path: DevicePath,
}

impl<S: DocumentStore> RulePatcher<S> {
    pub fn new(store: S, user_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            store,
            path: DevicePath::new(user_id, device_id),
        }
    }

    /// Merge the motor and water rules into `automationRules/current`.
    ///
    /// Fails with a not-found error when the device was never provisioned;
    /// the patch never creates the document.
    pub async fn patch(&self, patch: &RulePatch) -> FirestoreResult<()> {
        let (fields, mask) = payloads::rule_patch_fields(patch);

        self.store
            .update_document(
                &self.path.subcollection("automationRules"),
                CURRENT_DOC,
                fields,
                mask,
            )
            .await?;

        info!(
            path = %self.path.current_doc("automationRules"),
            "Patched motor and water rules"
        );
        Ok(())
    }
}
