// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element property records and their panel projection.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Metadata keys the viewer attaches to every record. Never displayed.
pub const RESERVED_KEYS: [&str; 3] = ["psets", "mats", "type"];

/// Text shown for null or missing values.
pub const UNDEFINED_TEXT: &str = "undefined";

/// A single property value as delivered by the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `null` or `undefined`
    Null,
    /// String, number or boolean
    Scalar(Value),
    /// `{ "value": scalar, ... }` wrapper used for typed IFC values
    Wrapped(Value),
    /// Any other object or array
    Other(Value),
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PropertyValue::Null,
            Value::Object(mut map) => match map.remove("value") {
                Some(inner) => PropertyValue::Wrapped(inner),
                None => PropertyValue::Other(Value::Object(map)),
            },
            Value::Array(_) => PropertyValue::Other(value),
            scalar => PropertyValue::Scalar(scalar),
        }
    }
}

impl PropertyValue {
    /// Display text after unwrapping.
    pub fn display_text(&self) -> String {
        match self {
            PropertyValue::Null => UNDEFINED_TEXT.to_string(),
            PropertyValue::Scalar(value)
            | PropertyValue::Wrapped(value)
            | PropertyValue::Other(value) => value_text(value),
        }
    }
}

/// Text form of a JSON value: strings without quotes, `null` as undefined.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => UNDEFINED_TEXT.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Property record of one element, in the viewer's key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRecord {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property, keeping insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'de> Deserialize<'de> for PropertyRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = PropertyRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a property record object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = PropertyRecord::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// One displayed key/value row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub key: String,
    pub value: String,
}

/// Rows shown in the property panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPanel {
    rows: Vec<PropertyRow>,
}

impl PropertyPanel {
    /// Project a record: drop reserved keys, normalize values, keep order.
    pub fn from_record(record: &PropertyRecord) -> Self {
        let rows = record
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(key))
            .map(|(key, value)| PropertyRow {
                key: key.to_string(),
                value: value.display_text(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[PropertyRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn display(value: Value) -> String {
        PropertyValue::from(value).display_text()
    }

    #[test]
    fn test_value_normalization() {
        assert_eq!(display(json!({ "type": 3, "value": 5 })), "5");
        assert_eq!(display(json!(null)), "undefined");
        assert_eq!(display(json!("abc")), "abc");
        assert_eq!(display(json!({ "value": "Wall-01" })), "Wall-01");
        assert_eq!(display(json!({ "value": null })), "undefined");
        assert_eq!(display(json!(2.5)), "2.5");
        assert_eq!(display(json!(true)), "true");
    }

    #[test]
    fn test_reserved_keys_are_dropped() {
        let record: PropertyRecord = serde_json::from_value(json!({
            "expressID": 186,
            "psets": [1, 2],
            "GlobalId": { "type": 1, "value": "2O2Fr$t4X7Zf8NOew3FLOH" },
            "mats": [],
            "Name": { "type": 1, "value": "Basic Wall" },
            "type": "IFCWALLSTANDARDCASE",
            "Tag": null
        }))
        .unwrap();

        let panel = PropertyPanel::from_record(&record);
        let keys: Vec<&str> = panel.rows().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["expressID", "GlobalId", "Name", "Tag"]);
        assert!(keys.iter().all(|k| !RESERVED_KEYS.contains(k)));
    }

    #[test]
    fn test_rows_follow_record_order() {
        let record: PropertyRecord = serde_json::from_str(
            r#"{ "zeta": 1, "alpha": { "value": "a" }, "mid": null }"#,
        )
        .unwrap();
        let panel = PropertyPanel::from_record(&record);
        assert_eq!(
            panel.rows(),
            &[
                PropertyRow { key: "zeta".into(), value: "1".into() },
                PropertyRow { key: "alpha".into(), value: "a".into() },
                PropertyRow { key: "mid".into(), value: "undefined".into() },
            ]
        );
    }

    #[test]
    fn test_only_reserved_keys_gives_empty_panel() {
        let mut record = PropertyRecord::new();
        record.insert("psets", json!([]));
        record.insert("mats", json!([]));
        record.insert("type", json!("IFCDOOR"));
        assert!(PropertyPanel::from_record(&record).is_empty());
    }
}
