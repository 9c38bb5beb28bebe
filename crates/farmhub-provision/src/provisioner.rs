//! Device tree provisioning.
//!
//! Writes the fixed set of bootstrap documents for one user/device pair, in
//! parent-before-child order. Every write is a full-document replace, so a
//! re-run rewrites each document (timestamps included) without changing any
//! other field.

use std::sync::Arc;

use metrics::counter;
use tracing::info;

use farmhub_firestore::{DocumentStore, FirestoreResult};
use farmhub_models::{ActuatorBank, ActuatorStateSet, RuleSet, ScheduleBook, SensorSnapshot};

use crate::clock::Clock;
use crate::config::ProvisionConfig;
use crate::paths::{DevicePath, FIRMWARE_COLLECTIONS, CURRENT_DOC};
use crate::payloads;

/// Paths written by a provisioning run, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub written: Vec<String>,
}

impl ProvisionReport {
    fn record(&mut self, path: String) {
        self.written.push(path);
    }

    /// Collections the firmware will create on its own, for the summary.
    pub fn firmware_owned(&self) -> &'static [&'static str] {
        &FIRMWARE_COLLECTIONS
    }
}

/// Writes the bootstrap document tree.
pub struct Provisioner<S> {
    store: S,
    clock: Arc<dyn Clock>,
    config: ProvisionConfig,
    path: DevicePath,
}

impl<S: DocumentStore> Provisioner<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, config: ProvisionConfig) -> Self {
        let path = DevicePath::new(&config.user_id, &config.device_id);
        Self {
            store,
            clock,
            config,
            path,
        }
    }

    /// Issue the fixed write sequence.
    ///
    /// A failed write aborts the remaining writes and surfaces the error;
    /// documents already written stay written. No rollback is attempted.
    pub async fn run(&self) -> FirestoreResult<ProvisionReport> {
        let mut report = ProvisionReport::default();

        info!(
            user_id = %self.path.user_id(),
            device_id = %self.path.device_id(),
            "Provisioning device document tree"
        );

        self.store
            .set_document(
                self.path.users(),
                self.path.user_id(),
                payloads::user_fields(&self.config.user, self.clock.now()),
            )
            .await?;
        self.created("user", self.path.user_doc(), &mut report);

        self.store
            .set_document(
                &self.path.devices(),
                self.path.device_id(),
                payloads::device_fields(&self.config.device, self.clock.now()),
            )
            .await?;
        self.created("device", self.path.device_doc(), &mut report);

        self.store
            .set_document(
                &self.path.subcollection("sensorData"),
                CURRENT_DOC,
                payloads::sensor_fields(&SensorSnapshot::default(), self.clock.now()),
            )
            .await?;
        self.created("sensor data", self.path.current_doc("sensorData"), &mut report);

        self.store
            .set_document(
                &self.path.subcollection("actuators"),
                CURRENT_DOC,
                payloads::actuator_bank_fields(&ActuatorBank::default()),
            )
            .await?;
        self.created("actuators", self.path.current_doc("actuators"), &mut report);

        self.store
            .set_document(
                &self.path.subcollection("automationRules"),
                CURRENT_DOC,
                payloads::rule_set_fields(&RuleSet::default()),
            )
            .await?;
        self.created(
            "automation rules",
            self.path.current_doc("automationRules"),
            &mut report,
        );

        self.store
            .set_document(
                &self.path.subcollection("actuatorStates"),
                CURRENT_DOC,
                payloads::actuator_state_fields(&ActuatorStateSet::default()),
            )
            .await?;
        self.created(
            "actuator states",
            self.path.current_doc("actuatorStates"),
            &mut report,
        );

        self.store
            .set_document(
                &self.path.subcollection("testMode"),
                CURRENT_DOC,
                payloads::actuator_bank_fields(&ActuatorBank::default()),
            )
            .await?;
        self.created("test mode", self.path.current_doc("testMode"), &mut report);

        self.store
            .set_document(
                &self.path.subcollection("schedules"),
                CURRENT_DOC,
                payloads::schedule_fields(&ScheduleBook::default()),
            )
            .await?;
        self.created("schedules", self.path.current_doc("schedules"), &mut report);

        self.store
            .set_document(
                &self.path.subcollection("status"),
                CURRENT_DOC,
                payloads::status_fields(&self.config.status, self.clock.now()),
            )
            .await?;
        self.created("status", self.path.current_doc("status"), &mut report);

        info!(
            documents = report.written.len(),
            "Device document tree provisioned"
        );
        Ok(report)
    }

    fn created(&self, what: &str, path: String, report: &mut ProvisionReport) {
        info!("Created {} document: {}", what, path);
        counter!("provision_documents_written_total").increment(1);
        report.record(path);
    }
}
