//! Data structures for the scheduler: courts, teams, groups, matches, tournament state.

mod court;
mod game;
mod team;
mod tournament;

pub use court::Court;
pub use game::{add_minutes, ScheduledMatch, Timestamp, UnscheduledMatch};
pub use team::{Group, GroupId, PlayerRef, Team, TeamId};
pub use tournament::{
    SchedulingConfig, SchedulingError, SkippedGroup, Tournament, TournamentId, TournamentState,
    DEFAULT_BUFFER_MINUTES, DEFAULT_MATCH_DURATION_MINUTES, MAX_BUFFER_MINUTES, MAX_MATCH_DURATION_MINUTES,
};
