//! Scheduling engine: court parsing, group draw, round-robin, court/time allocation, previews.

mod courts;
mod groups;
mod roster;
mod round_robin;
mod schedule;
mod setup;
mod summary;

pub use courts::{parse_courts, MAX_COURTS};
pub use groups::{
    draw_groups, group_name, partition_into_groups, GroupSize, GroupSizing, FOUR_TEAM_GROUP_THRESHOLD,
    MIN_GROUP_SIZE,
};
pub use roster::{read_teams_csv, write_schedule_csv};
pub use round_robin::{generate_group_schedules, generate_round_robin, matches_by_round, GroupOutcome, SkipReason};
pub use schedule::{
    find_double_booking, schedule_matches, schedule_tournament, slots_duration_minutes, time_slots_needed,
    validate_schedule, TournamentSchedule,
};
pub use setup::{generate_groups, preview_summary, start_tournament};
pub use summary::{
    calculate_round_duration, format_duration, get_scheduling_summary, matches_per_group, SchedulingSummary,
};
