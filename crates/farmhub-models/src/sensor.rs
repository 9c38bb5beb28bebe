//! Sensor snapshot written at `.../sensorData/current`.
//!
//! The store keeps exactly one live snapshot; history is appended by the
//! firmware into its own collection, never by this tool.

use serde::{Deserialize, Serialize};

/// Latest readings of the DHT sensor pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
}

impl Default for SensorSnapshot {
    /// Plausible greenhouse seed values so dashboards render before the
    /// device reports for the first time.
    fn default() -> Self {
        Self {
            temperature: 25.6,
            humidity: 65.4,
        }
    }
}
