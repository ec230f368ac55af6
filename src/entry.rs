use chrono::Utc;
use serde::{
    Deserialize,
    Serialize,
};

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// One record of who (an appliance name) was listening from where, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogEntry {
    pub name: String,
    pub location: String,
    pub timestamp: Timestamp,
}

impl LogEntry {
    pub fn new(name: impl Into<String>, location: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            timestamp,
        }
    }
}

pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_plain_field_names() {
        let entry = LogEntry::new("Oven", "Oslo", 1_700_000_000_000);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "name": "Oven", "location": "Oslo", "timestamp": 1_700_000_000_000i64 })
        );
    }

    #[test]
    fn now_is_in_milliseconds() {
        // Anything after 2001-09-09 has 13 digits in milliseconds
        assert!(now_millis() > 1_000_000_000_000);
    }
}
