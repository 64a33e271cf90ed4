//! Partition/sort engine.
//!
//! Orders the full normalized event list once, then splits it into the
//! "today" and "forecast" buckets so both inherit a consistent order.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::{AirdropEvent, Bucket};

/// Events with no parsable schedule sort after everything concrete.
fn sentinel_schedule() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .expect("static date")
        .and_time(NaiveTime::from_hms_opt(23, 59, 0).expect("static time"))
}

fn sort_key(event: &AirdropEvent) -> (NaiveDateTime, String) {
    let schedule = event.parsed_schedule().unwrap_or_else(sentinel_schedule);
    (schedule, event.token.clone())
}

/// Sorts ascending by `(date, time, token)` and partitions against an
/// explicit current date: exact date match goes to `today`, future or
/// unscheduled (absent/unparsable date) to `forecast`, strictly past
/// dates are dropped.
pub fn partition_and_sort(mut events: Vec<AirdropEvent>, today: NaiveDate) -> (Bucket, Bucket) {
    events.sort_by_key(sort_key);

    let mut today_bucket = Vec::new();
    let mut forecast_bucket = Vec::new();
    for event in events {
        match event.parsed_date() {
            Some(date) if date == today => today_bucket.push(event),
            Some(date) if date > today => forecast_bucket.push(event),
            Some(_) => {} // already past, discarded
            None => forecast_bucket.push(event),
        }
    }

    (today_bucket, forecast_bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(token: &str, date: Option<&str>, time: &str) -> AirdropEvent {
        AirdropEvent {
            token: token.to_string(),
            date: date.map(str::to_string),
            time: time.to_string(),
            phase: 1,
            event_type: String::new(),
            points: String::new(),
            amount: String::new(),
            contract_address: String::new(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_partition_membership() {
        let (today, forecast) = partition_and_sort(
            vec![
                event("NOW", Some("2025-06-15"), "09:00"),
                event("SOON", Some("2025-06-16"), "09:00"),
                event("GONE", Some("2025-06-14"), "09:00"),
                event("TBD", None, ""),
                event("BAD", Some("someday"), ""),
            ],
            day("2025-06-15"),
        );
        let names = |b: &Bucket| b.iter().map(|e| e.token.clone()).collect::<Vec<_>>();
        assert_eq!(names(&today), vec!["NOW"]);
        assert_eq!(names(&forecast), vec!["SOON", "BAD", "TBD"]);
    }

    #[test]
    fn test_sort_order_with_sentinels() {
        let (_, forecast) = partition_and_sort(
            vec![
                event("Z", None, ""),
                event("A", None, ""),
                event("LATE", Some("2025-07-01"), "23:00"),
                event("EARLY", Some("2025-07-01"), "01:00"),
                event("NOTIME", Some("2025-07-01"), ""),
            ],
            day("2025-06-15"),
        );
        let names: Vec<_> = forecast.iter().map(|e| e.token.as_str()).collect();
        // Concrete schedules first in time order; missing time or date
        // sorts last, ties broken by token.
        assert_eq!(names, vec!["EARLY", "LATE", "A", "NOTIME", "Z"]);
    }

    #[test]
    fn test_idempotent_on_classified_output() {
        let (today, forecast) = partition_and_sort(
            vec![
                event("B", Some("2025-06-16"), "10:00"),
                event("A", Some("2025-06-15"), "09:00"),
                event("C", None, ""),
            ],
            day("2025-06-15"),
        );
        let mut combined = today.clone();
        combined.extend(forecast.clone());
        let (today2, forecast2) = partition_and_sort(combined, day("2025-06-15"));
        assert_eq!(today, today2);
        assert_eq!(forecast, forecast2);
    }

    #[test]
    fn test_tie_break_is_stable_on_token() {
        let (_, forecast) = partition_and_sort(
            vec![
                event("BBB", Some("2025-07-01"), "12:00"),
                event("AAA", Some("2025-07-01"), "12:00"),
            ],
            day("2025-06-15"),
        );
        let names: Vec<_> = forecast.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(names, vec!["AAA", "BBB"]);
    }
}
