//! Integration tests for the tournament lifecycle: draw, redraw, start.

use chrono::NaiveDate;
use racquet_tournament::{
    generate_groups, preview_summary, start_tournament, GroupSize, GroupSizing, SchedulingConfig,
    SchedulingError, Team, Tournament, TournamentState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tournament_with_teams(n: usize) -> Tournament {
    let start = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap().and_hms_opt(10, 0, 0).unwrap();
    let mut t = Tournament::new("Club Open", start);
    for i in 0..n {
        t.add_team(format!("A{i}"), format!("B{i}")).unwrap();
    }
    t
}

#[test]
fn add_team_requires_two_different_players() {
    let mut t = tournament_with_teams(0);
    assert_eq!(t.add_team(" ", "Bea"), Err(SchedulingError::IncompleteTeam));
    assert_eq!(t.add_team("Ann", "ann"), Err(SchedulingError::IncompleteTeam));
    assert!(t.add_team("Ann", "Bea").is_ok());
    assert_eq!(t.teams.len(), 1);
}

#[test]
fn generate_then_start_schedules_all_groups() {
    let mut t = tournament_with_teams(8);
    t.set_courts("1-2").unwrap();
    t.set_config(SchedulingConfig::new(30, 15)).unwrap();

    generate_groups(&mut t, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(t.state, TournamentState::GroupsDrafted);
    assert_eq!(t.groups.len(), 2);

    let preview = preview_summary(&t);
    assert_eq!(preview.time_slots_needed, 6);
    assert_eq!(preview.total_duration_minutes, 255);

    start_tournament(&mut t).unwrap();
    assert_eq!(t.state, TournamentState::Started);
    assert_eq!(t.matches.len(), 12);
    assert_eq!(t.matches.last().unwrap().time_slot, 6);
    assert!(t.skipped_groups.is_empty());
}

#[test]
fn incomplete_teams_are_left_out_of_the_draw() {
    let mut t = tournament_with_teams(6);
    t.push_team(Team::from_players(Some("Solo".to_string()), None)).unwrap();
    generate_groups(&mut t, &mut StdRng::seed_from_u64(12)).unwrap();
    let drawn: usize = t.groups.iter().map(|g| g.teams.len()).sum();
    assert_eq!(drawn, 6);
    assert!(t.groups.iter().flat_map(|g| &g.teams).all(Team::is_complete));
}

#[test]
fn redraw_replaces_previous_draft() {
    let mut t = tournament_with_teams(12);
    generate_groups(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    let first = t.groups.clone();
    generate_groups(&mut t, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_eq!(t.groups.len(), 3);
    assert!(t.groups.iter().all(|g| !first.iter().any(|f| f.id == g.id)));
}

#[test]
fn failed_draw_leaves_no_partial_state() {
    let mut t = tournament_with_teams(8);
    generate_groups(&mut t, &mut StdRng::seed_from_u64(3)).unwrap();
    t.set_group_sizing(GroupSizing::Fixed(GroupSize::Three)).unwrap();
    // 8 teams in threes: 3 + 3 + 2
    assert!(matches!(
        generate_groups(&mut t, &mut StdRng::seed_from_u64(4)),
        Err(SchedulingError::InvalidTeamCount { .. })
    ));
    assert_eq!(t.state, TournamentState::Setup);
    assert!(t.groups.is_empty());
}

#[test]
fn roster_change_discards_draft() {
    let mut t = tournament_with_teams(6);
    generate_groups(&mut t, &mut StdRng::seed_from_u64(5)).unwrap();
    let id = t.teams[0].id;
    t.remove_team(id).unwrap();
    assert_eq!(t.state, TournamentState::Setup);
    assert!(t.groups.is_empty());
    assert_eq!(t.remove_team(id), Err(SchedulingError::TeamNotFound(id)));
}

#[test]
fn start_requires_a_draft_and_courts() {
    let mut t = tournament_with_teams(6);
    assert_eq!(start_tournament(&mut t), Err(SchedulingError::InvalidState));
    generate_groups(&mut t, &mut StdRng::seed_from_u64(6)).unwrap();
    assert_eq!(start_tournament(&mut t), Err(SchedulingError::NoCourtsAvailable));
    assert_eq!(t.state, TournamentState::GroupsDrafted);
    assert!(t.matches.is_empty());
}

#[test]
fn started_tournament_is_locked() {
    let mut t = tournament_with_teams(6);
    t.set_courts("Stadium A, 2").unwrap();
    generate_groups(&mut t, &mut StdRng::seed_from_u64(7)).unwrap();
    start_tournament(&mut t).unwrap();
    let matches = t.matches.clone();

    assert_eq!(t.add_team("New", "Pair"), Err(SchedulingError::InvalidState));
    assert_eq!(t.set_courts("1-8"), Err(SchedulingError::InvalidState));
    assert_eq!(t.discard_groups(), Err(SchedulingError::InvalidState));
    assert_eq!(
        generate_groups(&mut t, &mut StdRng::seed_from_u64(8)),
        Err(SchedulingError::InvalidState)
    );
    assert_eq!(start_tournament(&mut t), Err(SchedulingError::InvalidState));
    assert_eq!(t.matches, matches);
    assert_eq!(t.matches[0].court.as_str(), "Stadium A");
}

#[test]
fn preview_without_draft_uses_roster_size() {
    let mut t = tournament_with_teams(12);
    t.set_courts("1-3").unwrap();
    // 3 groups of 4 -> 18 matches on 3 courts -> 6 slots
    let preview = preview_summary(&t);
    assert_eq!(preview.time_slots_needed, 6);
    assert_eq!(preview.total_duration_minutes, 6 * 75 - 15);
}

#[test]
fn out_of_range_config_is_rejected() {
    let mut t = tournament_with_teams(6);
    for bad in [SchedulingConfig::new(u32::MAX, 15), SchedulingConfig::new(0, 15), SchedulingConfig::new(60, 100_000)] {
        assert!(matches!(t.set_config(bad), Err(SchedulingError::InvalidConfig { .. })));
    }
    assert_eq!(t.config, SchedulingConfig::default());
}

#[test]
fn start_rejects_config_set_around_validation() {
    let mut t = tournament_with_teams(6);
    t.set_courts("1-2").unwrap();
    generate_groups(&mut t, &mut StdRng::seed_from_u64(9)).unwrap();
    t.config = SchedulingConfig::new(u32::MAX, u32::MAX);
    assert!(matches!(start_tournament(&mut t), Err(SchedulingError::InvalidConfig { .. })));
    assert_eq!(t.state, TournamentState::GroupsDrafted);
    assert!(t.matches.is_empty());
}
