//! Phase schedule normalization.
//!
//! Multi-phase airdrops publish a concrete schedule for phase 1 only;
//! phase 2 follows 18 hours later by convention. This pass rewrites
//! phase-2 records accordingly so downstream sorting and partitioning
//! see a concrete schedule.

use std::collections::HashMap;

use chrono::Duration;
use tracing::debug;

use crate::core::{AirdropEvent, DATE_FORMAT};

const PHASE_OFFSET_HOURS: i64 = 18;

/// Rewrites phase-2 date/time to phase-1 date/time + 18h for every
/// token holding both phases. Tokens missing either phase, or whose
/// phase-1 schedule does not parse, pass through unchanged. Idempotent
/// for unchanged phase-1 values.
pub fn adjust_phase_times(mut events: Vec<AirdropEvent>) -> Vec<AirdropEvent> {
    let mut by_token: HashMap<String, HashMap<u32, usize>> = HashMap::new();
    for (idx, event) in events.iter().enumerate() {
        by_token
            .entry(event.token.clone())
            .or_default()
            .insert(event.phase, idx);
    }

    for (token, phases) in &by_token {
        let (Some(&first), Some(&second)) = (phases.get(&1), phases.get(&2)) else {
            continue;
        };
        let Some(schedule) = events[first].parsed_schedule() else {
            debug!(token = %token, "phase 1 schedule missing or unparsable, leaving phase 2 as-is");
            continue;
        };
        let shifted = schedule + Duration::hours(PHASE_OFFSET_HOURS);
        events[second].date = Some(shifted.format(DATE_FORMAT).to_string());
        events[second].time = shifted.format("%H:%M").to_string();
    }

    events
}
