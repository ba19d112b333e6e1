//! Matches before and after court/time assignment.

use crate::models::court::Court;
use crate::models::team::{GroupId, Team, TeamId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wall-clock timestamp used throughout the schedule (local to the venue).
pub type Timestamp = NaiveDateTime;

/// A round-robin fixture that has not been given a court or time yet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UnscheduledMatch {
    pub group_id: GroupId,
    pub group_name: String,
    /// 1-based round within the group's round-robin. Round N of every group
    /// shares the same wall-clock window.
    pub round: u32,
    pub team1: Team,
    pub team2: Team,
}

impl UnscheduledMatch {
    pub fn new(group_id: GroupId, group_name: impl Into<String>, round: u32, team1: Team, team2: Team) -> Self {
        Self {
            group_id,
            group_name: group_name.into(),
            round,
            team1,
            team2,
        }
    }

    /// The team ids on both sides.
    pub fn team_ids(&self) -> [TeamId; 2] {
        [self.team1.id, self.team2.id]
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team1.id == team_id || self.team2.id == team_id
    }
}

/// A match with its court, start time and slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    #[serde(flatten)]
    pub fixture: UnscheduledMatch,
    pub court: Court,
    pub start_time: Timestamp,
    pub duration_minutes: u32,
    /// 1-based batch of simultaneous matches since the schedule start.
    pub time_slot: u32,
}

impl ScheduledMatch {
    /// End of play (the buffer after it is not included). Clamped to the
    /// last representable timestamp.
    pub fn end_time(&self) -> Timestamp {
        add_minutes(self.start_time, u64::from(self.duration_minutes)).unwrap_or(NaiveDateTime::MAX)
    }

    /// `[start, end)` windows of the two matches intersect.
    pub fn overlaps(&self, other: &ScheduledMatch) -> bool {
        self.start_time < other.end_time() && other.start_time < self.end_time()
    }
}

/// `start + minutes`, or `None` if the result leaves the calendar.
pub fn add_minutes(start: Timestamp, minutes: u64) -> Option<Timestamp> {
    let minutes = i64::try_from(minutes).ok()?;
    start.checked_add_signed(chrono::Duration::try_minutes(minutes)?)
}
