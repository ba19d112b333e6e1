//! Racquet-sport tournament scheduler: models and the scheduling engine.

pub mod logic;
pub mod models;

pub use logic::{
    calculate_round_duration, draw_groups, find_double_booking, format_duration, generate_group_schedules,
    generate_groups, generate_round_robin, get_scheduling_summary, matches_by_round, parse_courts,
    partition_into_groups, preview_summary, read_teams_csv, schedule_matches, schedule_tournament,
    start_tournament, validate_schedule, write_schedule_csv, GroupOutcome, GroupSize, GroupSizing,
    SchedulingSummary, SkipReason, TournamentSchedule,
};
pub use models::{
    Court, Group, GroupId, ScheduledMatch, SchedulingConfig, SchedulingError, SkippedGroup, Team, TeamId,
    Timestamp, Tournament, TournamentId, TournamentState, UnscheduledMatch,
};
