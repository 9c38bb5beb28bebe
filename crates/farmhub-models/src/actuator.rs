//! Actuator identities and runtime state.
//!
//! The controller drives four actuators. Three documents are keyed by them:
//! the on/off bank (`actuators/current`), the test-mode bank
//! (`testMode/current`) and the detailed state set (`actuatorStates/current`).

use serde::{Deserialize, Serialize};

/// The four actuators wired to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actuator {
    Motor,
    Water,
    Light,
    Siren,
}

impl Actuator {
    /// All actuators, in document field order.
    pub const ALL: [Actuator; 4] = [
        Actuator::Motor,
        Actuator::Water,
        Actuator::Light,
        Actuator::Siren,
    ];

    /// Field name used in Firestore documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Actuator::Motor => "motor",
            Actuator::Water => "water",
            Actuator::Light => "light",
            Actuator::Siren => "siren",
        }
    }
}

impl std::fmt::Display for Actuator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One boolean per actuator.
///
/// Used for both `actuators/current` (is the output driven) and
/// `testMode/current` (is the actuator under manual test override).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorBank {
    pub motor: bool,
    pub water: bool,
    pub light: bool,
    pub siren: bool,
}

impl ActuatorBank {
    /// Read the flag for one actuator.
    pub fn get(&self, actuator: Actuator) -> bool {
        match actuator {
            Actuator::Motor => self.motor,
            Actuator::Water => self.water,
            Actuator::Light => self.light,
            Actuator::Siren => self.siren,
        }
    }
}

/// What caused an actuator to switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerSource {
    /// Operator toggled it from the app.
    #[default]
    Manual,
    /// A time-of-day schedule fired.
    Schedule,
    /// An automation rule threshold fired.
    Rule,
}

impl TriggerSource {
    /// Wire representation stored in `actuatorStates/current`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Manual => "manual",
            TriggerSource::Schedule => "schedule",
            TriggerSource::Rule => "rule",
        }
    }
}

impl std::fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detailed runtime state of a single actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActuatorState {
    /// Whether the output is currently driven.
    pub is_on: bool,
    /// Configured run duration in seconds (0 = unbounded).
    pub duration: u32,
    /// Seconds left of the current run.
    pub remaining_time: u32,
    /// Whether the actuator is in test mode.
    pub is_test_mode: bool,
    /// What switched the actuator on.
    pub trigger_source: TriggerSource,
}

impl Default for ActuatorState {
    fn default() -> Self {
        Self {
            is_on: false,
            duration: 0,
            remaining_time: 0,
            is_test_mode: false,
            trigger_source: TriggerSource::Manual,
        }
    }
}

/// State for every actuator, written as `actuatorStates/current`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorStateSet {
    pub motor: ActuatorState,
    pub water: ActuatorState,
    pub light: ActuatorState,
    pub siren: ActuatorState,
}

impl ActuatorStateSet {
    /// Read the state of one actuator.
    pub fn get(&self, actuator: Actuator) -> &ActuatorState {
        match actuator {
            Actuator::Motor => &self.motor,
            Actuator::Water => &self.water,
            Actuator::Light => &self.light,
            Actuator::Siren => &self.siren,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actuator_field_names() {
        let names: Vec<&str> = Actuator::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(names, vec!["motor", "water", "light", "siren"]);
    }

    #[test]
    fn test_bank_defaults_to_all_off() {
        let bank = ActuatorBank::default();
        for actuator in Actuator::ALL {
            assert!(!bank.get(actuator));
        }
    }

    #[test]
    fn test_state_defaults() {
        let state = ActuatorState::default();
        assert!(!state.is_on);
        assert_eq!(state.duration, 0);
        assert_eq!(state.remaining_time, 0);
        assert!(!state.is_test_mode);
        assert_eq!(state.trigger_source, TriggerSource::Manual);
    }

    #[test]
    fn test_trigger_source_wire_values() {
        assert_eq!(TriggerSource::Manual.as_str(), "manual");
        assert_eq!(TriggerSource::Schedule.as_str(), "schedule");
        assert_eq!(TriggerSource::Rule.as_str(), "rule");
    }
}
