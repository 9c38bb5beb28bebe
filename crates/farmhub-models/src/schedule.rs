//! Time-of-day schedules written at `.../schedules/current`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Actuator;

/// Day of the week, stored as its full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Every day, Monday first, matching the firmware's RTC mapping.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One named schedule entry.
///
/// Times are seconds since local midnight, the unit the firmware compares
/// against its RTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub is_active: bool,
    pub actuator: Actuator,
    /// Level to drive while the window is open.
    pub value: bool,
    pub start_time: u32,
    pub end_time: u32,
    pub days: Vec<Weekday>,
}

impl ScheduleEntry {
    /// Daily window driving `actuator` on between `start_time` and `end_time`.
    pub fn daily(actuator: Actuator, start_time: u32, end_time: u32) -> Self {
        Self {
            is_active: true,
            actuator,
            value: true,
            start_time,
            end_time,
            days: Weekday::ALL.to_vec(),
        }
    }
}

/// The full `schedules/current` document: named entries, stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBook {
    pub entries: BTreeMap<String, ScheduleEntry>,
}

impl ScheduleBook {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScheduleBook {
    /// Bootstrap schedules: grow light 06:00-08:00, irrigation 18:00-19:00,
    /// every day.
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "morning_light".to_string(),
            ScheduleEntry::daily(Actuator::Light, 21_600, 28_800),
        );
        entries.insert(
            "evening_water".to_string(),
            ScheduleEntry::daily(Actuator::Water, 64_800, 68_400),
        );
        Self { entries }
    }
}
