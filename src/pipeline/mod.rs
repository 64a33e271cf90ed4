//! Pure transformation pipeline: phase normalization, partition/sort,
//! change detection. No clock or I/O access in any of these modules;
//! "today" is always an explicit input.

pub mod classify;
pub mod diff;
pub mod phase;

pub use classify::partition_and_sort;
pub use diff::{cycle_changed, tag_events, ChangeTag};
pub use phase::adjust_phase_times;
