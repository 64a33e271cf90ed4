//! Core value types for the airdrop monitoring pipeline

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const SCHEDULE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One scheduled airdrop record for a token, possibly one phase of a
/// multi-phase event. Missing fields in the feed become typed defaults
/// (empty strings, phase 1) rather than absent keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropEvent {
    #[serde(default)]
    pub token: String,
    /// "YYYY-MM-DD" when the source provides one; the raw string is
    /// kept even when it does not parse.
    #[serde(default)]
    pub date: Option<String>,
    /// "HH:MM" or empty.
    #[serde(default)]
    pub time: String,
    #[serde(default = "default_phase")]
    pub phase: u32,
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub points: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub contract_address: String,
}

fn default_phase() -> u32 {
    1
}

impl AirdropEvent {
    /// Calendar date of the event, if the stored string parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
    }

    /// Full schedule, only when both a parsable date and a time exist.
    pub fn parsed_schedule(&self) -> Option<NaiveDateTime> {
        let date = self.date.as_deref()?;
        if self.time.is_empty() {
            return None;
        }
        NaiveDateTime::parse_from_str(&format!("{} {}", date, self.time), SCHEDULE_FORMAT).ok()
    }
}

/// Ordered today/forecast partition of one cycle's events.
pub type Bucket = Vec<AirdropEvent>;

/// The persisted today+forecast state from the last completed cycle.
/// Replaced wholesale at the end of every changed cycle; the shutdown
/// flush path only ever reads a fully built value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub today: Bucket,
    #[serde(default)]
    pub forecast: Bucket,
    #[serde(default)]
    pub last_update: Option<String>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            today: Vec::new(),
            forecast: Vec::new(),
            last_update: None,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: Option<&str>, time: &str) -> AirdropEvent {
        AirdropEvent {
            token: "ABC".to_string(),
            date: date.map(str::to_string),
            time: time.to_string(),
            phase: 1,
            event_type: String::new(),
            points: String::new(),
            amount: String::new(),
            contract_address: String::new(),
        }
    }

    #[test]
    fn test_parsed_date() {
        assert!(event(Some("2025-01-01"), "").parsed_date().is_some());
        assert!(event(Some("not-a-date"), "").parsed_date().is_none());
        assert!(event(None, "").parsed_date().is_none());
    }

    #[test]
    fn test_parsed_schedule_requires_both_parts() {
        assert!(event(Some("2025-01-01"), "10:00").parsed_schedule().is_some());
        assert!(event(Some("2025-01-01"), "").parsed_schedule().is_none());
        assert!(event(None, "10:00").parsed_schedule().is_none());
        assert!(event(Some("2025-13-99"), "10:00").parsed_schedule().is_none());
    }

    #[test]
    fn test_feed_record_defaults() {
        // Any subset of fields may be missing in the raw feed record.
        let raw = r#"{"token": "ZRO"}"#;
        let event: AirdropEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.token, "ZRO");
        assert_eq!(event.date, None);
        assert_eq!(event.time, "");
        assert_eq!(event.phase, 1);
        assert_eq!(event.event_type, "");
    }

    #[test]
    fn test_event_round_trip() {
        let original = AirdropEvent {
            token: "ZRO".to_string(),
            date: Some("2025-06-01".to_string()),
            time: "09:00".to_string(),
            phase: 2,
            event_type: "tge".to_string(),
            points: "120".to_string(),
            amount: "5000".to_string(),
            contract_address: "0xabc".to_string(),
        };
        let json = serde_json::to_string(&original).unwrap();
        let back: AirdropEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
