//! Firestore payload builders.
//!
//! One function per provisioned document, mapping the snake_case models onto
//! the camelCase wire fields the ESP8266 firmware reads. Timestamps are
//! passed in from the caller's [`Clock`](crate::Clock).

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use farmhub_firestore::{ToFirestoreValue, Value};
use farmhub_models::{
    Actuator, ActuatorBank, ActuatorState, ActuatorStateSet, AutomationRule, DeviceRecord,
    RulePatch, RuleSet, ScheduleBook, ScheduleEntry, SensorSnapshot, StatusReport, UserAccount,
};

/// `users/{userId}` fields.
pub fn user_fields(user: &UserAccount, now: DateTime<Utc>) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("email".to_string(), user.email.to_firestore_value());
    fields.insert("name".to_string(), user.name.to_firestore_value());
    fields.insert("createdAt".to_string(), now.to_firestore_value());
    fields.insert("lastLogin".to_string(), now.to_firestore_value());
    fields
}

/// `.../devices/{deviceId}` fields.
pub fn device_fields(device: &DeviceRecord, now: DateTime<Utc>) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("name".to_string(), device.name.to_firestore_value());
    fields.insert("status".to_string(), device.status.as_str().to_firestore_value());
    fields.insert("createdAt".to_string(), now.to_firestore_value());
    fields.insert("lastUpdate".to_string(), now.to_firestore_value());
    fields.insert("location".to_string(), device.location.to_firestore_value());
    fields.insert(
        "description".to_string(),
        device.description.to_firestore_value(),
    );
    fields
}

/// `.../sensorData/current` fields.
pub fn sensor_fields(snapshot: &SensorSnapshot, now: DateTime<Utc>) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert(
        "temperature".to_string(),
        snapshot.temperature.to_firestore_value(),
    );
    fields.insert("humidity".to_string(), snapshot.humidity.to_firestore_value());
    fields.insert("lastUpdate".to_string(), now.to_firestore_value());
    fields
}

/// `.../actuators/current` and `.../testMode/current` fields: one boolean
/// per actuator.
pub fn actuator_bank_fields(bank: &ActuatorBank) -> HashMap<String, Value> {
    Actuator::ALL
        .iter()
        .map(|a| (a.as_str().to_string(), bank.get(*a).to_firestore_value()))
        .collect()
}

fn rule_value(rule: &AutomationRule) -> Value {
    let mut fields = HashMap::new();
    fields.insert("when".to_string(), rule.when.as_str().to_firestore_value());
    fields.insert(
        "operator".to_string(),
        rule.operator.as_str().to_firestore_value(),
    );
    fields.insert("value".to_string(), rule.value.to_firestore_value());
    if let Some(duration) = rule.duration {
        fields.insert("duration".to_string(), duration.to_firestore_value());
    }
    Value::map(fields)
}

/// `.../automationRules/current` fields: one rule map per actuator.
pub fn rule_set_fields(rules: &RuleSet) -> HashMap<String, Value> {
    Actuator::ALL
        .iter()
        .map(|a| (a.as_str().to_string(), rule_value(rules.get(*a))))
        .collect()
}

/// Fields and update mask for the partial rules update. Only the motor and
/// water entries are touched.
pub fn rule_patch_fields(patch: &RulePatch) -> (HashMap<String, Value>, Vec<String>) {
    let mut fields = HashMap::new();
    fields.insert("motor".to_string(), rule_value(&patch.motor));
    fields.insert("water".to_string(), rule_value(&patch.water));
    let mask = vec!["motor".to_string(), "water".to_string()];
    (fields, mask)
}

fn actuator_state_value(state: &ActuatorState) -> Value {
    let mut fields = HashMap::new();
    fields.insert("isOn".to_string(), state.is_on.to_firestore_value());
    fields.insert("duration".to_string(), state.duration.to_firestore_value());
    fields.insert(
        "remainingTime".to_string(),
        state.remaining_time.to_firestore_value(),
    );
    fields.insert(
        "isTestMode".to_string(),
        state.is_test_mode.to_firestore_value(),
    );
    fields.insert(
        "triggerSource".to_string(),
        state.trigger_source.as_str().to_firestore_value(),
    );
    Value::map(fields)
}

/// `.../actuatorStates/current` fields: one state map per actuator.
pub fn actuator_state_fields(states: &ActuatorStateSet) -> HashMap<String, Value> {
    Actuator::ALL
        .iter()
        .map(|a| (a.as_str().to_string(), actuator_state_value(states.get(*a))))
        .collect()
}

fn schedule_entry_value(entry: &ScheduleEntry) -> Value {
    let mut fields = HashMap::new();
    fields.insert("isActive".to_string(), entry.is_active.to_firestore_value());
    fields.insert(
        "actuator".to_string(),
        entry.actuator.as_str().to_firestore_value(),
    );
    fields.insert("value".to_string(), entry.value.to_firestore_value());
    fields.insert("startTime".to_string(), entry.start_time.to_firestore_value());
    fields.insert("endTime".to_string(), entry.end_time.to_firestore_value());
    fields.insert(
        "days".to_string(),
        Value::array(
            entry
                .days
                .iter()
                .map(|d| d.as_str().to_firestore_value())
                .collect(),
        ),
    );
    Value::map(fields)
}

/// `.../schedules/current` fields: one map per named schedule entry.
pub fn schedule_fields(book: &ScheduleBook) -> HashMap<String, Value> {
    book.entries
        .iter()
        .map(|(name, entry)| (name.clone(), schedule_entry_value(entry)))
        .collect()
}

/// `.../status/current` fields.
pub fn status_fields(report: &StatusReport, now: DateTime<Utc>) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("status".to_string(), report.status.as_str().to_firestore_value());
    fields.insert("lastUpdate".to_string(), now.to_firestore_value());
    fields.insert(
        "ipAddress".to_string(),
        report.ip_address.to_firestore_value(),
    );
    fields.insert(
        "firmwareVersion".to_string(),
        report.firmware_version.to_firestore_value(),
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_user_fields() {
        let fields = user_fields(&UserAccount::default(), noon());
        assert_eq!(
            fields["email"],
            Value::StringValue("farm-owner@example.com".to_string())
        );
        assert_eq!(fields["name"], Value::StringValue("Farm Owner".to_string()));
        assert_eq!(fields["createdAt"], noon().to_firestore_value());
        assert_eq!(fields["lastLogin"], noon().to_firestore_value());
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_device_fields() {
        let fields = device_fields(&DeviceRecord::default(), noon());
        assert_eq!(fields["status"], Value::StringValue("online".to_string()));
        assert_eq!(
            fields["location"],
            Value::StringValue("Greenhouse 1".to_string())
        );
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn test_sensor_fields_are_doubles() {
        let fields = sensor_fields(&SensorSnapshot::default(), noon());
        assert_eq!(fields["temperature"], Value::DoubleValue(25.6));
        assert_eq!(fields["humidity"], Value::DoubleValue(65.4));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_actuator_bank_all_off() {
        let fields = actuator_bank_fields(&ActuatorBank::default());
        assert_eq!(fields.len(), 4);
        for name in ["motor", "water", "light", "siren"] {
            assert_eq!(fields[name], Value::BooleanValue(false));
        }
    }

    #[test]
    fn test_rule_set_fields_motor_has_duration() {
        let fields = rule_set_fields(&RuleSet::default());
        let motor = fields["motor"].as_map().unwrap();
        assert_eq!(motor["when"], Value::StringValue("temperature".to_string()));
        assert_eq!(motor["operator"], Value::StringValue(">".to_string()));
        assert_eq!(motor["value"], Value::IntegerValue("35".to_string()));
        assert_eq!(motor["duration"], Value::IntegerValue("300".to_string()));

        // Rules without a duration must not carry the field at all
        let water = fields["water"].as_map().unwrap();
        assert_eq!(water.len(), 3);
        assert!(!water.contains_key("duration"));
    }

    #[test]
    fn test_rule_patch_mask_covers_exactly_motor_and_water() {
        let (fields, mask) = rule_patch_fields(&RulePatch::default());
        assert_eq!(mask, vec!["motor".to_string(), "water".to_string()]);
        assert_eq!(fields.len(), 2);

        let motor = fields["motor"].as_map().unwrap();
        assert_eq!(motor["value"], Value::IntegerValue("30".to_string()));
        assert_eq!(motor["duration"], Value::IntegerValue("60".to_string()));

        let water = fields["water"].as_map().unwrap();
        assert_eq!(water["value"], Value::IntegerValue("50".to_string()));
    }

    #[test]
    fn test_actuator_state_fields() {
        let fields = actuator_state_fields(&ActuatorStateSet::default());
        assert_eq!(fields.len(), 4);
        let motor = fields["motor"].as_map().unwrap();
        assert_eq!(motor["isOn"], Value::BooleanValue(false));
        assert_eq!(motor["duration"], Value::IntegerValue("0".to_string()));
        assert_eq!(motor["remainingTime"], Value::IntegerValue("0".to_string()));
        assert_eq!(motor["isTestMode"], Value::BooleanValue(false));
        assert_eq!(
            motor["triggerSource"],
            Value::StringValue("manual".to_string())
        );
    }

    #[test]
    fn test_schedule_fields() {
        let fields = schedule_fields(&ScheduleBook::default());
        assert_eq!(fields.len(), 2);

        let light = fields["morning_light"].as_map().unwrap();
        assert_eq!(light["actuator"], Value::StringValue("light".to_string()));
        assert_eq!(light["startTime"], Value::IntegerValue("21600".to_string()));
        assert_eq!(light["endTime"], Value::IntegerValue("28800".to_string()));
        assert_eq!(light["isActive"], Value::BooleanValue(true));

        match &light["days"] {
            Value::ArrayValue(days) => {
                let days = days.values.as_ref().unwrap();
                assert_eq!(days.len(), 7);
                assert_eq!(days[0], Value::StringValue("Monday".to_string()));
                assert_eq!(days[6], Value::StringValue("Sunday".to_string()));
            }
            other => panic!("days should be an array, got {:?}", other),
        }
    }

    #[test]
    fn test_status_fields() {
        let fields = status_fields(&StatusReport::default(), noon());
        assert_eq!(fields["status"], Value::StringValue("online".to_string()));
        assert_eq!(
            fields["ipAddress"],
            Value::StringValue("192.168.1.100".to_string())
        );
        assert_eq!(
            fields["firmwareVersion"],
            Value::StringValue("1.0.0".to_string())
        );
        assert_eq!(fields["lastUpdate"], noon().to_firestore_value());
        assert_eq!(fields.len(), 4);
    }
}
