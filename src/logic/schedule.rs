//! Court and time allocation: greedy, deterministic, round-robin over courts.

use crate::logic::round_robin::{matches_by_round, GroupOutcome};
use crate::models::{
    add_minutes, Court, ScheduledMatch, SchedulingConfig, SchedulingError, SkippedGroup, Timestamp,
    UnscheduledMatch,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Assign each match a court and a start time, in input order.
///
/// Match `i` gets `courts[i % courts.len()]` in 0-based slot `i / courts.len()`,
/// starting `slot * (duration + buffer)` minutes after `start_time`. Slots are
/// exposed 1-based. Callers order `matches` round-major.
///
/// An empty `matches` yields an empty schedule; an empty `courts` with
/// matches to place is `NoCourtsAvailable`.
pub fn schedule_matches(
    matches: &[UnscheduledMatch],
    courts: &[Court],
    start_time: Timestamp,
    config: SchedulingConfig,
) -> Result<Vec<ScheduledMatch>, SchedulingError> {
    if matches.is_empty() {
        return Ok(Vec::new());
    }
    if courts.is_empty() {
        return Err(SchedulingError::NoCourtsAvailable);
    }

    matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let slot = i / courts.len();
            Ok(ScheduledMatch {
                fixture: m.clone(),
                court: courts[i % courts.len()].clone(),
                start_time: slot_start(start_time, slot as u64, config)?,
                duration_minutes: config.match_duration_minutes,
                time_slot: slot as u32 + 1,
            })
        })
        .collect()
}

/// Start of 0-based `slot`: `start_time + slot * (duration + buffer)` minutes.
fn slot_start(start_time: Timestamp, slot: u64, config: SchedulingConfig) -> Result<Timestamp, SchedulingError> {
    slot.checked_mul(config.slot_minutes())
        .and_then(|offset| add_minutes(start_time, offset))
        .ok_or(SchedulingError::StartTimeOutOfRange)
}

/// Number of time slots `match_count` matches occupy on `court_count` courts.
pub fn time_slots_needed(match_count: usize, court_count: usize) -> u32 {
    if court_count == 0 {
        return 0;
    }
    match_count.div_ceil(court_count) as u32
}

/// Wall-clock minutes for `slots` time slots, `slots * (duration + buffer) - buffer`.
/// No buffer is charged after the last slot. Saturates at `u32::MAX`.
pub fn slots_duration_minutes(slots: u32, config: SchedulingConfig) -> u32 {
    if slots == 0 {
        return 0;
    }
    config
        .match_duration_minutes
        .saturating_mul(slots)
        .saturating_add(config.buffer_minutes.saturating_mul(slots - 1))
}

/// The full group-stage schedule.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSchedule {
    pub matches: Vec<ScheduledMatch>,
    pub skipped: Vec<SkippedGroup>,
    pub total_slots: u32,
    pub total_duration_minutes: u32,
}

/// Schedule every generated group, one `schedule_matches` call per round.
///
/// Round N of all groups is placed before any round N+1 match. Each round
/// starts one slot after the previous round's last slot, and slot numbers
/// keep counting across rounds, so a team never plays twice at once even
/// when a round's match count is not a multiple of the court count.
pub fn schedule_tournament(
    outcomes: &[GroupOutcome],
    courts: &[Court],
    start_time: Timestamp,
    config: SchedulingConfig,
) -> Result<TournamentSchedule, SchedulingError> {
    let skipped: Vec<SkippedGroup> = outcomes
        .iter()
        .filter_map(|o| match o {
            GroupOutcome::Skipped {
                group_id,
                group_name,
                reason,
            } => Some(SkippedGroup {
                group_id: *group_id,
                group_name: group_name.clone(),
                reason: reason.to_string(),
            }),
            GroupOutcome::Scheduled { .. } => None,
        })
        .collect();

    let mut matches = Vec::new();
    let mut slots_used = 0u32;
    for (idx, round) in matches_by_round(outcomes).iter().enumerate() {
        let round_start = slot_start(start_time, u64::from(slots_used), config)?;
        let mut scheduled = schedule_matches(round, courts, round_start, config)?;
        for m in &mut scheduled {
            m.time_slot += slots_used;
        }
        let round_slots = time_slots_needed(round.len(), courts.len());
        log::debug!(
            "Round {}: {} match(es) in {} slot(s) from {}",
            idx + 1,
            round.len(),
            round_slots,
            round_start
        );
        slots_used += round_slots;
        matches.extend(scheduled);
    }

    validate_schedule(&matches)?;

    Ok(TournamentSchedule {
        matches,
        skipped,
        total_slots: slots_used,
        total_duration_minutes: slots_duration_minutes(slots_used, config),
    })
}

/// First conflict in `matches`: two matches on the same court and slot, or a
/// team in two matches whose `[start, end)` windows overlap.
pub fn find_double_booking(matches: &[ScheduledMatch]) -> Option<(usize, usize)> {
    let mut court_slots = HashSet::new();
    for (i, m) in matches.iter().enumerate() {
        if !court_slots.insert((m.court.as_str(), m.time_slot)) {
            let first = matches[..i]
                .iter()
                .position(|o| o.court == m.court && o.time_slot == m.time_slot)
                .unwrap_or(i);
            return Some((first, i));
        }
    }
    for (i, a) in matches.iter().enumerate() {
        for (j, b) in matches.iter().enumerate().skip(i + 1) {
            let shares_team = a.fixture.team_ids().iter().any(|&t| b.fixture.involves(t));
            if shares_team && a.overlaps(b) {
                return Some((i, j));
            }
        }
    }
    None
}

/// `DoubleBooking` if `find_double_booking` reports a conflict.
pub fn validate_schedule(matches: &[ScheduledMatch]) -> Result<(), SchedulingError> {
    match find_double_booking(matches) {
        Some((_, j)) => Err(SchedulingError::DoubleBooking {
            court: matches[j].court.clone(),
            time_slot: matches[j].time_slot,
        }),
        None => Ok(()),
    }
}
