//! Integration tests for court and time allocation.

use chrono::NaiveDate;
use racquet_tournament::{
    find_double_booking, generate_group_schedules, parse_courts, schedule_matches, schedule_tournament,
    validate_schedule, Court, Group, ScheduledMatch, SchedulingConfig, SchedulingError, Team, Timestamp,
    UnscheduledMatch,
};
use uuid::Uuid;

fn start() -> Timestamp {
    NaiveDate::from_ymd_opt(2025, 12, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn at(h: u32, m: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2025, 12, 15)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn fixtures(n: usize) -> Vec<UnscheduledMatch> {
    let group_id = Uuid::new_v4();
    (0..n)
        .map(|i| {
            UnscheduledMatch::new(
                group_id,
                "Group A",
                1,
                Team::new(format!("p{i}"), format!("q{i}")),
                Team::new(format!("r{i}"), format!("s{i}")),
            )
        })
        .collect()
}

fn group(name: &str, size: usize) -> Group {
    let teams = (0..size).map(|i| Team::new(format!("{name}{i}a"), format!("{name}{i}b"))).collect();
    Group::new(Uuid::new_v4(), format!("Group {name}"), teams)
}

#[test]
fn courts_cycle_and_slots_advance() {
    let matches = fixtures(6);
    let courts = parse_courts("1-3");
    let scheduled = schedule_matches(&matches, &courts, start(), SchedulingConfig::default()).unwrap();
    assert_eq!(scheduled.len(), 6);

    let expected = [
        ("Court 1", 1, at(10, 0)),
        ("Court 2", 1, at(10, 0)),
        ("Court 3", 1, at(10, 0)),
        ("Court 1", 2, at(11, 15)),
        ("Court 2", 2, at(11, 15)),
        ("Court 3", 2, at(11, 15)),
    ];
    for (m, (court, slot, time)) in scheduled.iter().zip(expected) {
        assert_eq!(m.court.as_str(), court);
        assert_eq!(m.time_slot, slot);
        assert_eq!(m.start_time, time);
        assert_eq!(m.duration_minutes, 60);
    }
}

#[test]
fn fixture_fields_are_preserved() {
    let matches = fixtures(2);
    let scheduled = schedule_matches(&matches, &[Court::new("Stadium A")], start(), SchedulingConfig::default()).unwrap();
    for (s, m) in scheduled.iter().zip(&matches) {
        assert_eq!(&s.fixture, m);
    }
}

#[test]
fn empty_matches_yield_empty_schedule_even_without_courts() {
    let scheduled = schedule_matches(&[], &[], start(), SchedulingConfig::default()).unwrap();
    assert!(scheduled.is_empty());
}

#[test]
fn no_courts_is_an_error() {
    assert_eq!(
        schedule_matches(&fixtures(1), &[], start(), SchedulingConfig::default()),
        Err(SchedulingError::NoCourtsAvailable)
    );
}

#[test]
fn scheduling_is_deterministic() {
    let matches = fixtures(5);
    let courts = parse_courts("1, 2");
    let config = SchedulingConfig::new(30, 10);
    assert_eq!(
        schedule_matches(&matches, &courts, start(), config),
        schedule_matches(&matches, &courts, start(), config)
    );
}

#[test]
fn double_booked_court_is_detected() {
    let matches = fixtures(2);
    let mut scheduled: Vec<ScheduledMatch> =
        schedule_matches(&matches, &parse_courts("1-2"), start(), SchedulingConfig::default()).unwrap();
    assert_eq!(find_double_booking(&scheduled), None);
    scheduled[1].court = Court::numbered(1);
    assert_eq!(find_double_booking(&scheduled), Some((0, 1)));
    assert!(matches!(
        validate_schedule(&scheduled),
        Err(SchedulingError::DoubleBooking { time_slot: 1, .. })
    ));
}

#[test]
fn team_in_overlapping_matches_is_detected() {
    let g = group("A", 4);
    // round 1 and round 2 of one group on three courts at once
    let mut fixtures = racquet_tournament::generate_round_robin(&g).unwrap();
    fixtures.truncate(3);
    let scheduled = schedule_matches(&fixtures, &parse_courts("1-3"), start(), SchedulingConfig::default()).unwrap();
    assert!(find_double_booking(&scheduled).is_some());
}

#[test]
fn tournament_schedule_keeps_rounds_apart() {
    // one group of 4 on 3 courts: a flat schedule would put round 2 next to round 1
    let outcomes = generate_group_schedules(&[group("A", 4)]);
    let schedule = schedule_tournament(&outcomes, &parse_courts("1-3"), start(), SchedulingConfig::default()).unwrap();
    assert_eq!(schedule.matches.len(), 6);
    assert_eq!(schedule.total_slots, 3);
    for m in &schedule.matches {
        assert_eq!(m.time_slot, m.fixture.round);
    }
    assert_eq!(find_double_booking(&schedule.matches), None);
    assert_eq!(schedule.total_duration_minutes, 3 * 75 - 15);
}

#[test]
fn eight_team_scenario_fills_six_slots() {
    let groups = vec![group("A", 4), group("B", 4)];
    let outcomes = generate_group_schedules(&groups);
    let config = SchedulingConfig::new(30, 15);
    let schedule = schedule_tournament(&outcomes, &parse_courts("1-2"), start(), config).unwrap();

    assert_eq!(schedule.matches.len(), 12);
    assert_eq!(schedule.total_slots, 6);
    assert_eq!(schedule.total_duration_minutes, 255);
    assert!(schedule.skipped.is_empty());

    // all round-1 matches come before any round-2 match
    let rounds: Vec<_> = schedule.matches.iter().map(|m| m.fixture.round).collect();
    assert_eq!(rounds, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);

    let last = schedule.matches.last().unwrap();
    assert_eq!(last.time_slot, 6);
    assert_eq!(last.start_time, at(13, 45));
    assert_eq!(last.end_time(), at(14, 15));
    assert_eq!(find_double_booking(&schedule.matches), None);
}

#[test]
fn skipped_groups_are_reported_and_others_scheduled() {
    let groups = vec![group("A", 3), group("B", 5)];
    let outcomes = generate_group_schedules(&groups);
    let schedule = schedule_tournament(&outcomes, &parse_courts("1"), start(), SchedulingConfig::default()).unwrap();
    assert_eq!(schedule.matches.len(), 3);
    assert_eq!(schedule.skipped.len(), 1);
    assert_eq!(schedule.skipped[0].group_id, groups[1].id);
    assert_eq!(schedule.skipped[0].group_name, "Group B");
}

#[test]
fn start_near_calendar_end_is_an_error_not_a_panic() {
    let late = chrono::NaiveDateTime::MAX - chrono::Duration::minutes(30);
    let courts = parse_courts("1");

    // first slot starts at `late`; its end clamps to the last timestamp
    let one = schedule_matches(&fixtures(1), &courts, late, SchedulingConfig::default()).unwrap();
    assert_eq!(one[0].start_time, late);
    assert_eq!(one[0].end_time(), chrono::NaiveDateTime::MAX);

    assert_eq!(
        schedule_matches(&fixtures(2), &courts, late, SchedulingConfig::default()),
        Err(SchedulingError::StartTimeOutOfRange)
    );

    let outcomes = generate_group_schedules(&[group("A", 3)]);
    assert_eq!(
        schedule_tournament(&outcomes, &courts, late, SchedulingConfig::default()),
        Err(SchedulingError::StartTimeOutOfRange)
    );
}

#[test]
fn long_matches_schedule_without_overflow() {
    let config = SchedulingConfig::new(u32::MAX, 15);
    let scheduled = schedule_matches(&fixtures(2), &parse_courts("1"), start(), config).unwrap();
    let offset = (scheduled[1].start_time - start()).num_minutes();
    assert_eq!(offset, i64::from(u32::MAX) + 15);
}
