//! Firestore REST API wire types.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Firestore field value.
///
/// Only the variants the provisioning documents use are modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// Integers travel as decimal strings on the wire.
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

impl Value {
    /// Build a map value from field entries.
    pub fn map(fields: HashMap<String, Value>) -> Self {
        Value::MapValue(MapValue {
            fields: Some(fields),
        })
    }

    /// Build an array value from elements.
    pub fn array(values: Vec<Value>) -> Self {
        Value::ArrayValue(ArrayValue {
            values: Some(values),
        })
    }

    /// Field entries if this is a map value.
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::MapValue(map) => map.fields.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    pub values: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    pub fields: Option<HashMap<String, Value>>,
}

/// A Firestore document as it appears in REST responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, absent on request bodies.
    pub name: Option<String>,
    pub fields: Option<HashMap<String, Value>>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

impl Document {
    /// Request body carrying only fields.
    pub fn new(fields: HashMap<String, Value>) -> Self {
        Self {
            name: None,
            fields: Some(fields),
            create_time: None,
            update_time: None,
        }
    }

    /// Sorted top-level field names, empty when the document has no fields.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .fields
            .as_ref()
            .map(|f| f.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

/// Conversion into a wire [`Value`], implemented for the scalar types the
/// payload builders use.
pub trait ToFirestoreValue {
    fn to_firestore_value(&self) -> Value;
}

impl ToFirestoreValue for String {
    fn to_firestore_value(&self) -> Value {
        Value::StringValue(self.clone())
    }
}

impl ToFirestoreValue for &str {
    fn to_firestore_value(&self) -> Value {
        Value::StringValue(self.to_string())
    }
}

impl ToFirestoreValue for i64 {
    fn to_firestore_value(&self) -> Value {
        Value::IntegerValue(self.to_string())
    }
}

impl ToFirestoreValue for u32 {
    fn to_firestore_value(&self) -> Value {
        Value::IntegerValue((*self as i64).to_string())
    }
}

impl ToFirestoreValue for f64 {
    fn to_firestore_value(&self) -> Value {
        Value::DoubleValue(*self)
    }
}

impl ToFirestoreValue for bool {
    fn to_firestore_value(&self) -> Value {
        Value::BooleanValue(*self)
    }
}

impl ToFirestoreValue for DateTime<Utc> {
    fn to_firestore_value(&self) -> Value {
        Value::TimestampValue(self.to_rfc3339())
    }
}

impl<T: ToFirestoreValue> ToFirestoreValue for Option<T> {
    fn to_firestore_value(&self) -> Value {
        match self {
            Some(v) => v.to_firestore_value(),
            None => Value::NullValue(()),
        }
    }
}

impl<T: ToFirestoreValue> ToFirestoreValue for Vec<T> {
    fn to_firestore_value(&self) -> Value {
        Value::array(self.iter().map(|v| v.to_firestore_value()).collect())
    }
}

impl<T: ToFirestoreValue> ToFirestoreValue for BTreeMap<String, T> {
    fn to_firestore_value(&self) -> Value {
        Value::map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_firestore_value()))
                .collect(),
        )
    }
}

/// Convert a Firestore Value back to a Rust type.
pub trait FromFirestoreValue: Sized {
    fn from_firestore_value(value: &Value) -> Option<Self>;
}

impl FromFirestoreValue for String {
    fn from_firestore_value(value: &Value) -> Option<Self> {
        match value {
            Value::StringValue(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromFirestoreValue for i64 {
    fn from_firestore_value(value: &Value) -> Option<Self> {
        match value {
            Value::IntegerValue(s) => s.parse().ok(),
            Value::DoubleValue(f) => Some(*f as i64),
            _ => None,
        }
    }
}

impl FromFirestoreValue for u32 {
    fn from_firestore_value(value: &Value) -> Option<Self> {
        match value {
            Value::IntegerValue(s) => s.parse().ok(),
            Value::DoubleValue(f) => Some(*f as u32),
            _ => None,
        }
    }
}

impl FromFirestoreValue for f64 {
    fn from_firestore_value(value: &Value) -> Option<Self> {
        match value {
            Value::DoubleValue(f) => Some(*f),
            Value::IntegerValue(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromFirestoreValue for bool {
    fn from_firestore_value(value: &Value) -> Option<Self> {
        match value {
            Value::BooleanValue(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromFirestoreValue for DateTime<Utc> {
    fn from_firestore_value(value: &Value) -> Option<Self> {
        match value {
            Value::TimestampValue(s) => DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_round_trip_as_string() {
        let value = 300i64.to_firestore_value();
        assert_eq!(value, Value::IntegerValue("300".to_string()));
        assert_eq!(i64::from_firestore_value(&value), Some(300));
    }

    #[test]
    fn test_double_survives_conversion() {
        let value = 25.6f64.to_firestore_value();
        assert_eq!(f64::from_firestore_value(&value), Some(25.6));
    }

    #[test]
    fn test_timestamp_round_trip() {
        let now: DateTime<Utc> = "2024-06-01T12:00:00Z".parse().unwrap();
        let value = now.to_firestore_value();
        assert_eq!(DateTime::<Utc>::from_firestore_value(&value), Some(now));
    }

    #[test]
    fn test_value_serde_wire_shape() {
        let json = serde_json::to_string(&42i64.to_firestore_value()).unwrap();
        assert_eq!(json, r#"{"integerValue":"42"}"#);

        let json = serde_json::to_string(&true.to_firestore_value()).unwrap();
        assert_eq!(json, r#"{"booleanValue":true}"#);
    }

    #[test]
    fn test_field_names_are_sorted() {
        let mut fields = HashMap::new();
        fields.insert("water".to_string(), false.to_firestore_value());
        fields.insert("motor".to_string(), false.to_firestore_value());
        let doc = Document::new(fields);
        assert_eq!(doc.field_names(), vec!["motor", "water"]);
    }

    #[test]
    fn test_as_map() {
        let mut inner = HashMap::new();
        inner.insert("isOn".to_string(), false.to_firestore_value());
        let value = Value::map(inner);
        assert!(value.as_map().unwrap().contains_key("isOn"));
        assert!(true.to_firestore_value().as_map().is_none());
    }
}
