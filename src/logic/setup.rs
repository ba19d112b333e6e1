//! Tournament lifecycle: draw groups (repeatable), then start (schedule once).

use crate::logic::groups::{partition_into_groups, MIN_GROUP_SIZE};
use crate::logic::round_robin::generate_group_schedules;
use crate::logic::schedule::schedule_tournament;
use crate::logic::summary::{get_scheduling_summary, matches_per_group, SchedulingSummary};
use crate::models::{SchedulingError, Tournament, TournamentState};
use rand::Rng;

/// Draw groups from the complete teams (Setup or GroupsDrafted).
///
/// Replaces any previous draft entirely; a failed draw leaves the tournament
/// in Setup with no groups.
pub fn generate_groups<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), SchedulingError> {
    if tournament.state == TournamentState::Started {
        return Err(SchedulingError::InvalidState);
    }
    tournament.discard_groups()?;

    let teams = tournament.complete_teams();
    let skipped = tournament.teams.len() - teams.len();
    if skipped > 0 {
        log::info!("{}: leaving {} incomplete team(s) out of the draw", tournament.name, skipped);
    }

    tournament.groups = partition_into_groups(&teams, tournament.group_sizing, rng)?;
    tournament.state = TournamentState::GroupsDrafted;
    log::info!("{}: drew {} group(s)", tournament.name, tournament.groups.len());
    Ok(())
}

/// Confirm the draft: generate round-robins, schedule them round by round from
/// the tournament start time, and lock the tournament (GroupsDrafted -> Started).
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), SchedulingError> {
    if tournament.state != TournamentState::GroupsDrafted {
        return Err(SchedulingError::InvalidState);
    }
    if tournament.courts.is_empty() {
        return Err(SchedulingError::NoCourtsAvailable);
    }
    tournament.config.validate()?;

    let outcomes = generate_group_schedules(&tournament.groups);
    let schedule = schedule_tournament(
        &outcomes,
        &tournament.courts,
        tournament.start_time,
        tournament.config,
    )?;

    log::info!(
        "{}: started with {} match(es) over {} slot(s), {} group(s) skipped",
        tournament.name,
        schedule.matches.len(),
        schedule.total_slots,
        schedule.skipped.len()
    );
    tournament.matches = schedule.matches;
    tournament.skipped_groups = schedule.skipped;
    tournament.state = TournamentState::Started;
    Ok(())
}

/// Duration preview for the current draft, or for the draw the complete roster
/// would produce when no groups exist yet.
pub fn preview_summary(tournament: &Tournament) -> SchedulingSummary {
    let total_matches: usize = if tournament.groups.is_empty() {
        let teams = tournament.complete_teams().len();
        let size = tournament.group_sizing.group_size(teams).teams();
        let full_groups = teams / size;
        let last = teams % size;
        let last_group = if last >= MIN_GROUP_SIZE { matches_per_group(last) } else { 0 };
        full_groups * matches_per_group(size) + last_group
    } else {
        tournament
            .groups
            .iter()
            .filter(|g| matches!(g.teams.len(), 3 | 4))
            .map(|g| matches_per_group(g.teams.len()))
            .sum()
    };
    get_scheduling_summary(total_matches, tournament.courts.len(), tournament.config)
}
