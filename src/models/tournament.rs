//! Tournament, TournamentState, SchedulingConfig and SchedulingError.

use crate::logic::GroupSizing;
use crate::models::court::Court;
use crate::models::game::{ScheduledMatch, Timestamp};
use crate::models::team::{Group, GroupId, PlayerRef, Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur while drafting or scheduling a tournament.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SchedulingError {
    /// Matches were handed to the scheduler but no courts were configured.
    NoCourtsAvailable,
    /// The roster cannot be split into groups of at least 3 teams.
    InvalidTeamCount { teams: usize, group_size: usize },
    /// A group has neither 3 nor 4 teams; its round-robin is undefined.
    UnsupportedGroupSize { group_id: GroupId, size: usize },
    /// A fixture references a team that is missing a player.
    IncompleteMatchData { group_id: GroupId, team_id: TeamId },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Team not found in the roster.
    TeamNotFound(TeamId),
    /// A team needs two distinct, non-empty players.
    IncompleteTeam,
    /// Roster CSV could not be read or schedule CSV could not be written.
    InvalidRoster(String),
    /// Two matches share a court and time slot, or a team is booked twice at once.
    DoubleBooking { court: Court, time_slot: u32 },
    /// Match length or buffer outside the accepted range.
    InvalidConfig { match_duration_minutes: u32, buffer_minutes: u32 },
    /// A computed start time does not fit in the calendar.
    StartTimeOutOfRange,
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::NoCourtsAvailable => write!(f, "At least one court is required to schedule matches"),
            SchedulingError::InvalidTeamCount { teams, group_size } => write!(
                f,
                "{} teams cannot be split into groups of {} (every group needs at least 3 teams)",
                teams, group_size
            ),
            SchedulingError::UnsupportedGroupSize { size, .. } => {
                write!(f, "Groups must have 3 or 4 teams (found {})", size)
            }
            SchedulingError::IncompleteMatchData { .. } => write!(f, "A match references a team without two players"),
            SchedulingError::InvalidState => write!(f, "Invalid state for this action"),
            SchedulingError::TeamNotFound(_) => write!(f, "Team not found"),
            SchedulingError::IncompleteTeam => write!(f, "A team needs two different players"),
            SchedulingError::InvalidRoster(msg) => write!(f, "Invalid roster: {}", msg),
            SchedulingError::DoubleBooking { court, time_slot } => {
                write!(f, "{} is double-booked in time slot {}", court, time_slot)
            }
            SchedulingError::InvalidConfig {
                match_duration_minutes,
                buffer_minutes,
            } => write!(
                f,
                "Match duration must be 1-{} minutes and buffer 0-{} minutes (got {} and {})",
                MAX_MATCH_DURATION_MINUTES, MAX_BUFFER_MINUTES, match_duration_minutes, buffer_minutes
            ),
            SchedulingError::StartTimeOutOfRange => write!(f, "Schedule runs past the supported date range"),
        }
    }
}

impl std::error::Error for SchedulingError {}

impl From<csv::Error> for SchedulingError {
    fn from(err: csv::Error) -> Self {
        SchedulingError::InvalidRoster(err.to_string())
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Match length and changeover time used by the scheduler and the previews.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    #[serde(default = "default_match_duration")]
    pub match_duration_minutes: u32,
    #[serde(default = "default_buffer")]
    pub buffer_minutes: u32,
}

pub const DEFAULT_MATCH_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_BUFFER_MINUTES: u32 = 15;
pub const MAX_MATCH_DURATION_MINUTES: u32 = 24 * 60;
pub const MAX_BUFFER_MINUTES: u32 = 24 * 60;

fn default_match_duration() -> u32 {
    DEFAULT_MATCH_DURATION_MINUTES
}

fn default_buffer() -> u32 {
    DEFAULT_BUFFER_MINUTES
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            match_duration_minutes: DEFAULT_MATCH_DURATION_MINUTES,
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
        }
    }
}

impl SchedulingConfig {
    pub fn new(match_duration_minutes: u32, buffer_minutes: u32) -> Self {
        Self {
            match_duration_minutes,
            buffer_minutes,
        }
    }

    /// Minutes between the starts of two consecutive time slots.
    pub fn slot_minutes(&self) -> u64 {
        u64::from(self.match_duration_minutes) + u64::from(self.buffer_minutes)
    }

    /// `InvalidConfig` unless the match length is 1..=24h and the buffer at most 24h.
    pub fn validate(&self) -> Result<(), SchedulingError> {
        let duration_ok = (1..=MAX_MATCH_DURATION_MINUTES).contains(&self.match_duration_minutes);
        if !duration_ok || self.buffer_minutes > MAX_BUFFER_MINUTES {
            return Err(SchedulingError::InvalidConfig {
                match_duration_minutes: self.match_duration_minutes,
                buffer_minutes: self.buffer_minutes,
            });
        }
        Ok(())
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering teams and configuring courts; no groups yet.
    #[default]
    Setup,
    /// Groups drawn but not confirmed; may be regenerated or discarded.
    GroupsDrafted,
    /// Confirmed: groups and scheduled matches are fixed.
    Started,
}

/// A group whose round-robin could not be generated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SkippedGroup {
    pub group_id: GroupId,
    pub group_name: String,
    pub reason: String,
}

/// Full tournament state: roster, configuration, draft groups and the schedule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Registered teams, complete or not.
    pub teams: Vec<Team>,
    /// Court specification as typed by the organizer.
    pub courts_input: String,
    /// Parsed courts, in assignment order.
    pub courts: Vec<Court>,
    pub start_time: Timestamp,
    pub config: SchedulingConfig,
    /// How the draw picks the group size.
    #[serde(default)]
    pub group_sizing: GroupSizing,
    pub state: TournamentState,
    /// Draft (GroupsDrafted) or confirmed (Started) groups.
    pub groups: Vec<Group>,
    /// Filled once when the tournament is started.
    pub matches: Vec<ScheduledMatch>,
    /// Groups left out of the schedule, with the reason.
    pub skipped_groups: Vec<SkippedGroup>,
}

impl Tournament {
    /// Create a new tournament in Setup state with no teams or courts.
    pub fn new(name: impl Into<String>, start_time: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            teams: Vec::new(),
            courts_input: String::new(),
            courts: Vec::new(),
            start_time,
            config: SchedulingConfig::default(),
            group_sizing: GroupSizing::default(),
            state: TournamentState::Setup,
            groups: Vec::new(),
            matches: Vec::new(),
            skipped_groups: Vec::new(),
        }
    }

    /// Teams with both players set; only these are drawn into groups.
    pub fn complete_teams(&self) -> Vec<Team> {
        self.teams.iter().filter(|t| t.is_complete()).cloned().collect()
    }

    /// Register a team. Both players must be non-empty and different.
    /// Any existing group draft is discarded.
    pub fn add_team(
        &mut self,
        player1: impl Into<PlayerRef>,
        player2: impl Into<PlayerRef>,
    ) -> Result<TeamId, SchedulingError> {
        let player1 = player1.into().trim().to_string();
        let player2 = player2.into().trim().to_string();
        if player1.is_empty() || player2.is_empty() || player1.eq_ignore_ascii_case(&player2) {
            return Err(SchedulingError::IncompleteTeam);
        }
        self.push_team(Team::new(player1, player2))
    }

    /// Register a team as-is (it may be incomplete). Any existing group draft is discarded.
    pub fn push_team(&mut self, team: Team) -> Result<TeamId, SchedulingError> {
        self.ensure_editable()?;
        let id = team.id;
        self.teams.push(team);
        self.reset_draft();
        Ok(id)
    }

    /// Remove a team by id. Any existing group draft is discarded.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), SchedulingError> {
        self.ensure_editable()?;
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(SchedulingError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        self.reset_draft();
        Ok(())
    }

    /// Store the raw court specification and its parsed form.
    pub fn set_courts(&mut self, input: impl Into<String>) -> Result<(), SchedulingError> {
        self.ensure_editable()?;
        let input = input.into();
        self.courts = crate::logic::parse_courts(&input);
        self.courts_input = input;
        Ok(())
    }

    pub fn set_config(&mut self, config: SchedulingConfig) -> Result<(), SchedulingError> {
        self.ensure_editable()?;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Change the group-size strategy. Any existing group draft is discarded.
    pub fn set_group_sizing(&mut self, sizing: GroupSizing) -> Result<(), SchedulingError> {
        self.ensure_editable()?;
        self.group_sizing = sizing;
        self.reset_draft();
        Ok(())
    }

    pub fn set_start_time(&mut self, start_time: Timestamp) -> Result<(), SchedulingError> {
        self.ensure_editable()?;
        self.start_time = start_time;
        Ok(())
    }

    /// Drop any draft groups and go back to Setup.
    pub fn discard_groups(&mut self) -> Result<(), SchedulingError> {
        self.ensure_editable()?;
        self.reset_draft();
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), SchedulingError> {
        if self.state == TournamentState::Started {
            return Err(SchedulingError::InvalidState);
        }
        Ok(())
    }

    fn reset_draft(&mut self) {
        self.groups.clear();
        self.matches.clear();
        self.skipped_groups.clear();
        self.state = TournamentState::Setup;
    }
}
