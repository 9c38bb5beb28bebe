//! Shared data models for the FarmHub provisioning tool.
//!
//! This crate provides the types for every document the provisioner writes:
//! - User and device records
//! - Sensor snapshots and actuator banks
//! - Automation rules and rule patches
//! - Schedules and device status reports
//!
//! The `Default` impls carry the bootstrap payloads the ESP8266 firmware
//! expects on first boot.

pub mod actuator;
pub mod device;
pub mod rules;
pub mod schedule;
pub mod sensor;
pub mod status;
pub mod user;

// Re-export common types
pub use actuator::{Actuator, ActuatorBank, ActuatorState, ActuatorStateSet, TriggerSource};
pub use device::{DeviceRecord, DeviceStatus};
pub use rules::{AutomationRule, RuleOperator, RulePatch, RuleSet, SensorField};
pub use schedule::{ScheduleBook, ScheduleEntry, Weekday};
pub use sensor::SensorSnapshot;
pub use status::StatusReport;
pub use user::UserAccount;
