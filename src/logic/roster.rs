//! CSV interchange: team roster import and schedule export.

use crate::models::{ScheduledMatch, SchedulingError, Team};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Deserialize)]
struct TeamRow {
    #[serde(default)]
    player1: Option<String>,
    #[serde(default)]
    player2: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Read teams from CSV with a `player1,player2` header.
///
/// Blank cells become missing players; such teams are returned incomplete and
/// left for the caller to filter. Rows with both cells blank are ignored.
pub fn read_teams_csv<R: Read>(reader: R) -> Result<Vec<Team>, SchedulingError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut teams = Vec::new();
    for row in rdr.deserialize::<TeamRow>() {
        let row = row?;
        let (player1, player2) = (non_blank(row.player1), non_blank(row.player2));
        if player1.is_none() && player2.is_none() {
            continue;
        }
        teams.push(Team::from_players(player1, player2));
    }
    Ok(teams)
}

#[derive(Serialize)]
struct ScheduleRow<'a> {
    time_slot: u32,
    start_time: String,
    court: &'a str,
    group: &'a str,
    round: u32,
    team1: String,
    team2: String,
    duration_minutes: u32,
}

/// Write one row per scheduled match, in the given order.
pub fn write_schedule_csv<W: Write>(matches: &[ScheduledMatch], writer: W) -> Result<(), SchedulingError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for m in matches {
        wtr.serialize(ScheduleRow {
            time_slot: m.time_slot,
            start_time: m.start_time.format("%Y-%m-%d %H:%M").to_string(),
            court: m.court.as_str(),
            group: &m.fixture.group_name,
            round: m.fixture.round,
            team1: m.fixture.team1.name(),
            team2: m.fixture.team2.name(),
            duration_minutes: m.duration_minutes,
        })?;
    }
    wtr.flush()
        .map_err(|e| SchedulingError::InvalidRoster(e.to_string()))
}
