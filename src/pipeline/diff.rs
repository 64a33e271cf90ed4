//! Change detection between the previous cycle's buckets and the
//! freshly classified ones. Pure and stateless: a function of the two
//! bucket snapshots only.

use std::collections::HashMap;

use crate::core::{AirdropEvent, Bucket, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTag {
    /// Token not present in the previous bucket.
    New,
    /// Token present but some field differs.
    Updated,
    Unchanged,
}

/// Labels each event of the new bucket against the previous one.
/// Comparison is structural over all fields; tokens index the previous
/// bucket (last record wins on duplicate tokens, matching the rendered
/// report).
pub fn tag_events<'a>(previous: &Bucket, next: &'a Bucket) -> Vec<(&'a AirdropEvent, ChangeTag)> {
    let prev_by_token: HashMap<&str, &AirdropEvent> =
        previous.iter().map(|e| (e.token.as_str(), e)).collect();

    next.iter()
        .map(|event| {
            let tag = match prev_by_token.get(event.token.as_str()) {
                None => ChangeTag::New,
                Some(prev) if *prev != event => ChangeTag::Updated,
                Some(_) => ChangeTag::Unchanged,
            };
            (event, tag)
        })
        .collect()
}

/// Whole-bucket equality drives the cycle-level decision: any
/// insertion, removal or field change in either bucket counts.
pub fn cycle_changed(previous: &Snapshot, today: &Bucket, forecast: &Bucket) -> bool {
    previous.today != *today || previous.forecast != *forecast
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(token: &str, time: &str) -> AirdropEvent {
        AirdropEvent {
            token: token.to_string(),
            date: Some("2025-06-15".to_string()),
            time: time.to_string(),
            phase: 1,
            event_type: String::new(),
            points: String::new(),
            amount: String::new(),
            contract_address: String::new(),
        }
    }

    #[test]
    fn test_identical_buckets_all_unchanged() {
        let bucket = vec![event("A", "09:00"), event("B", "10:00")];
        let tags = tag_events(&bucket, &bucket);
        assert!(tags.iter().all(|(_, tag)| *tag == ChangeTag::Unchanged));

        let prev = Snapshot {
            today: bucket.clone(),
            forecast: Vec::new(),
            last_update: None,
        };
        assert!(!cycle_changed(&prev, &bucket, &Vec::new()));
    }

    #[test]
    fn test_added_token_is_new_and_changes_cycle() {
        let previous = vec![event("A", "09:00")];
        let next = vec![event("A", "09:00"), event("B", "10:00")];
        let tags = tag_events(&previous, &next);
        assert_eq!(tags[0].1, ChangeTag::Unchanged);
        assert_eq!(tags[1].1, ChangeTag::New);

        let prev = Snapshot {
            today: previous,
            forecast: Vec::new(),
            last_update: None,
        };
        assert!(cycle_changed(&prev, &next, &Vec::new()));
    }

    #[test]
    fn test_any_field_change_is_updated() {
        let previous = vec![event("A", "09:00")];
        let mut changed = event("A", "09:00");
        changed.amount = "5000".to_string();
        let next = vec![changed];
        assert_eq!(tag_events(&previous, &next)[0].1, ChangeTag::Updated);
    }

    #[test]
    fn test_removal_changes_cycle_without_labels() {
        let prev = Snapshot {
            today: vec![event("A", "09:00"), event("B", "10:00")],
            forecast: Vec::new(),
            last_update: None,
        };
        let next = vec![event("A", "09:00")];
        assert_eq!(tag_events(&prev.today, &next)[0].1, ChangeTag::Unchanged);
        assert!(cycle_changed(&prev, &next, &Vec::new()));
    }

    #[test]
    fn test_forecast_change_alone_triggers_cycle() {
        let prev = Snapshot::empty();
        assert!(cycle_changed(&prev, &Vec::new(), &vec![event("A", "09:00")]));
    }
}
