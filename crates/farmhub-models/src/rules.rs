//! Automation rules written at `.../automationRules/current`.
//!
//! Each actuator gets one threshold rule: "when <sensor field> <operator>
//! <value>, switch on (optionally for <duration> seconds)". The firmware
//! evaluates these against `sensorData/current` on every loop.

use serde::{Deserialize, Serialize};

use crate::Actuator;

/// Sensor field a rule compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorField {
    Temperature,
    Humidity,
}

impl SensorField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorField::Temperature => "temperature",
            SensorField::Humidity => "humidity",
        }
    }
}

impl std::fmt::Display for SensorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparison operator of a rule, stored as its symbol (`>`, `<`, `>=`, `<=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOperator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
}

impl RuleOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleOperator::GreaterThan => ">",
            RuleOperator::LessThan => "<",
            RuleOperator::GreaterOrEqual => ">=",
            RuleOperator::LessOrEqual => "<=",
        }
    }
}

impl std::fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRule {
    /// Sensor field the rule watches.
    pub when: SensorField,
    /// Comparison applied to the sensor value.
    pub operator: RuleOperator,
    /// Threshold the sensor value is compared against.
    pub value: i64,
    /// How long to keep the actuator on, in seconds. `None` means the rule
    /// holds the actuator on while the condition is true.
    pub duration: Option<u32>,
}

impl AutomationRule {
    pub fn new(when: SensorField, operator: RuleOperator, value: i64) -> Self {
        Self {
            when,
            operator,
            value,
            duration: None,
        }
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// One rule per actuator, the full `automationRules/current` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub motor: AutomationRule,
    pub water: AutomationRule,
    pub light: AutomationRule,
    pub siren: AutomationRule,
}

impl RuleSet {
    /// Read the rule for one actuator.
    pub fn get(&self, actuator: Actuator) -> &AutomationRule {
        match actuator {
            Actuator::Motor => &self.motor,
            Actuator::Water => &self.water,
            Actuator::Light => &self.light,
            Actuator::Siren => &self.siren,
        }
    }
}

impl Default for RuleSet {
    /// Bootstrap rules: ventilate above 35°C, irrigate below 40% humidity,
    /// grow-light below 20°C, siren at 40°C and above.
    fn default() -> Self {
        Self {
            motor: AutomationRule::new(SensorField::Temperature, RuleOperator::GreaterThan, 35)
                .with_duration(300),
            water: AutomationRule::new(SensorField::Humidity, RuleOperator::LessThan, 40),
            light: AutomationRule::new(SensorField::Temperature, RuleOperator::LessThan, 20),
            siren: AutomationRule::new(SensorField::Temperature, RuleOperator::GreaterOrEqual, 40),
        }
    }
}

/// Partial rules update: replaces only the motor and water entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePatch {
    pub motor: AutomationRule,
    pub water: AutomationRule,
}

impl Default for RulePatch {
    /// Tighter test thresholds: motor above 30°C for 60s, water below 50%.
    fn default() -> Self {
        Self {
            motor: AutomationRule::new(SensorField::Temperature, RuleOperator::GreaterThan, 30)
                .with_duration(60),
            water: AutomationRule::new(SensorField::Humidity, RuleOperator::LessThan, 50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols() {
        assert_eq!(RuleOperator::GreaterThan.as_str(), ">");
        assert_eq!(RuleOperator::LessThan.as_str(), "<");
        assert_eq!(RuleOperator::GreaterOrEqual.as_str(), ">=");
        assert_eq!(RuleOperator::LessOrEqual.as_str(), "<=");
    }

    #[test]
    fn test_default_rule_set() {
        let rules = RuleSet::default();
        assert_eq!(rules.motor.when, SensorField::Temperature);
        assert_eq!(rules.motor.value, 35);
        assert_eq!(rules.motor.duration, Some(300));
        assert_eq!(rules.water.when, SensorField::Humidity);
        assert_eq!(rules.water.duration, None);
        assert_eq!(rules.siren.operator, RuleOperator::GreaterOrEqual);
    }

    #[test]
    fn test_default_patch_tightens_thresholds() {
        let rules = RuleSet::default();
        let patch = RulePatch::default();
        assert!(patch.motor.value < rules.motor.value);
        assert!(patch.water.value > rules.water.value);
        assert_eq!(patch.motor.duration, Some(60));
    }

    #[test]
    fn test_operator_serde_uses_symbols() {
        let json = serde_json::to_string(&RuleOperator::GreaterOrEqual).unwrap();
        assert_eq!(json, "\">=\"");
    }
}
