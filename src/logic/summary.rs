//! Scheduling previews computed from counts alone.

use crate::logic::schedule::{slots_duration_minutes, time_slots_needed};
use crate::models::SchedulingConfig;
use serde::{Deserialize, Serialize};

/// Duration estimate for a number of matches on a number of courts. Never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchedulingSummary {
    pub time_slots_needed: u32,
    pub total_duration_minutes: u32,
    /// Every match fits in a single slot.
    pub simultaneous: bool,
}

impl SchedulingSummary {
    /// "all matches at once, 1h" or "6 time slots, 4h 15m".
    pub fn describe(&self) -> String {
        let duration = format_duration(self.total_duration_minutes);
        if self.simultaneous {
            format!("all matches at once, {duration}")
        } else if self.time_slots_needed == 1 {
            format!("1 time slot, {duration}")
        } else {
            format!("{} time slots, {duration}", self.time_slots_needed)
        }
    }
}

/// Preview the group stage: `ceil(matches / courts)` slots, `slots * (duration + buffer) - buffer`
/// minutes. With no courts nothing can be placed: zero slots and not simultaneous.
pub fn get_scheduling_summary(
    total_matches: usize,
    available_courts: usize,
    config: SchedulingConfig,
) -> SchedulingSummary {
    let slots = time_slots_needed(total_matches, available_courts);
    SchedulingSummary {
        time_slots_needed: slots,
        total_duration_minutes: slots_duration_minutes(slots, config),
        simultaneous: available_courts > 0 && available_courts >= total_matches,
    }
}

/// Minutes needed to play one round of `match_count` matches on `court_count` courts.
pub fn calculate_round_duration(
    match_count: usize,
    court_count: usize,
    match_duration_minutes: u32,
    buffer_minutes: u32,
) -> u32 {
    let config = SchedulingConfig::new(match_duration_minutes, buffer_minutes);
    slots_duration_minutes(time_slots_needed(match_count, court_count), config)
}

/// Number of round-robin matches a group of `size` teams plays.
pub fn matches_per_group(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

/// "45m", "2h", "4h 15m".
pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
