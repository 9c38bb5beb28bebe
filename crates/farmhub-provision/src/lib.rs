//! Firestore bootstrap tool for FarmHub controllers.
//!
//! Provisions the document tree an ESP8266 farm controller expects on first
//! boot, applies a partial rules update, and verifies the result with point
//! reads. The three phases are independent: a failure in one is logged and
//! the next still runs.

pub mod clock;
pub mod config;
pub mod paths;
pub mod payloads;
pub mod patcher;
pub mod provisioner;
pub mod verifier;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ProvisionConfig;
pub use paths::{DevicePath, CURRENT_DOC, FIRMWARE_COLLECTIONS};
pub use patcher::RulePatcher;
pub use provisioner::{ProvisionReport, Provisioner};
pub use verifier::{Verifier, VerifyReport};
