//! Round-robin fixtures for groups of 3 or 4 teams.

use crate::models::{Group, GroupId, SchedulingError, UnscheduledMatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pairings (team indices) per round for a group of 3: one match per round.
const THREE_TEAM_ROUNDS: [&[(usize, usize)]; 3] = [&[(0, 1)], &[(0, 2)], &[(1, 2)]];

/// Pairings per round for a group of 4: two matches per round, nobody twice.
const FOUR_TEAM_ROUNDS: [&[(usize, usize)]; 3] = [
    &[(0, 1), (2, 3)],
    &[(0, 2), (1, 3)],
    &[(0, 3), (1, 2)],
];

/// Generate every fixture of `group`, tagged with its 1-based round.
///
/// Only groups of exactly 3 or 4 teams are supported; anything else is
/// `UnsupportedGroupSize`. A fixture involving an incomplete team is dropped
/// with a warning instead of being emitted.
pub fn generate_round_robin(group: &Group) -> Result<Vec<UnscheduledMatch>, SchedulingError> {
    let rounds: &[&[(usize, usize)]] = match group.teams.len() {
        3 => &THREE_TEAM_ROUNDS,
        4 => &FOUR_TEAM_ROUNDS,
        size => {
            return Err(SchedulingError::UnsupportedGroupSize {
                group_id: group.id,
                size,
            })
        }
    };

    let mut matches = Vec::new();
    for (round_idx, pairings) in rounds.iter().enumerate() {
        let round = round_idx as u32 + 1;
        for &(a, b) in pairings.iter() {
            let (team1, team2) = (&group.teams[a], &group.teams[b]);
            if let Some(incomplete) = [team1, team2].into_iter().find(|t| !t.is_complete()) {
                let err = SchedulingError::IncompleteMatchData {
                    group_id: group.id,
                    team_id: incomplete.id,
                };
                log::warn!(
                    "{}: dropping round {} match {} vs {}: {}",
                    group.name,
                    round,
                    team1.name(),
                    team2.name(),
                    err
                );
                continue;
            }
            matches.push(UnscheduledMatch::new(
                group.id,
                group.name.clone(),
                round,
                team1.clone(),
                team2.clone(),
            ));
        }
    }
    Ok(matches)
}

/// Result of generating one group's fixtures.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum GroupOutcome {
    Scheduled {
        group_id: GroupId,
        matches: Vec<UnscheduledMatch>,
    },
    Skipped {
        group_id: GroupId,
        group_name: String,
        reason: SkipReason,
    },
}

/// Why a group was left out.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnsupportedGroupSize { size: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnsupportedGroupSize { size } => {
                write!(f, "Groups must have 3 or 4 teams (found {})", size)
            }
        }
    }
}

impl GroupOutcome {
    pub fn group_id(&self) -> GroupId {
        match self {
            GroupOutcome::Scheduled { group_id, .. } | GroupOutcome::Skipped { group_id, .. } => *group_id,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, GroupOutcome::Skipped { .. })
    }
}

/// Generate fixtures for every group. Groups of unsupported size are reported
/// as `Skipped` (and logged) so the remaining groups still get a schedule.
pub fn generate_group_schedules(groups: &[Group]) -> Vec<GroupOutcome> {
    groups
        .iter()
        .map(|group| match generate_round_robin(group) {
            Ok(matches) => GroupOutcome::Scheduled {
                group_id: group.id,
                matches,
            },
            Err(err) => {
                log::warn!("Skipping {}: {}", group.name, err);
                GroupOutcome::Skipped {
                    group_id: group.id,
                    group_name: group.name.clone(),
                    reason: SkipReason::UnsupportedGroupSize {
                        size: group.teams.len(),
                    },
                }
            }
        })
        .collect()
}

/// Bucket fixtures by round, in round-major order: every group's round 1,
/// then every group's round 2, ... Group order is kept inside a round.
pub fn matches_by_round(outcomes: &[GroupOutcome]) -> Vec<Vec<UnscheduledMatch>> {
    let mut rounds: BTreeMap<u32, Vec<UnscheduledMatch>> = BTreeMap::new();
    for outcome in outcomes {
        if let GroupOutcome::Scheduled { matches, .. } = outcome {
            for m in matches {
                rounds.entry(m.round).or_default().push(m.clone());
            }
        }
    }
    rounds.into_values().collect()
}
