//! Group draw: shuffle the roster and slice it into groups of 3 or 4.

use crate::models::{Group, SchedulingError, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest group a round-robin is defined for.
pub const MIN_GROUP_SIZE: usize = 3;

/// Team count from which the threshold strategy switches to groups of 4.
pub const FOUR_TEAM_GROUP_THRESHOLD: usize = 8;

/// Target number of teams per group.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSize {
    Three,
    Four,
}

impl GroupSize {
    pub fn teams(self) -> usize {
        match self {
            GroupSize::Three => 3,
            GroupSize::Four => 4,
        }
    }
}

/// How the group size is chosen for a roster.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "strategy", content = "size")]
pub enum GroupSizing {
    /// Groups of 4 from 8 teams upward, otherwise groups of 3.
    #[default]
    Threshold,
    /// Always the given size.
    Fixed(GroupSize),
}

impl GroupSizing {
    pub fn group_size(self, team_count: usize) -> GroupSize {
        match self {
            GroupSizing::Threshold if team_count >= FOUR_TEAM_GROUP_THRESHOLD => GroupSize::Four,
            GroupSizing::Threshold => GroupSize::Three,
            GroupSizing::Fixed(size) => size,
        }
    }
}

/// Split `teams` into groups named "Group A", "Group B", ...
///
/// 1. Pick the group size from `sizing`.
/// 2. Shuffle a copy of the roster with `rng`.
/// 3. Slice into consecutive chunks; the last chunk may be short.
///
/// Fails with `InvalidTeamCount` if any chunk would have fewer than 3 teams.
/// Callers pass only complete teams. Group ids are drawn from `rng`, so a
/// seeded generator reproduces the whole draw.
pub fn partition_into_groups<R: Rng + ?Sized>(
    teams: &[Team],
    sizing: GroupSizing,
    rng: &mut R,
) -> Result<Vec<Group>, SchedulingError> {
    let group_size = sizing.group_size(teams.len()).teams();
    let invalid = || SchedulingError::InvalidTeamCount {
        teams: teams.len(),
        group_size,
    };

    if teams.len() < MIN_GROUP_SIZE {
        return Err(invalid());
    }
    let remainder = teams.len() % group_size;
    if remainder != 0 && remainder < MIN_GROUP_SIZE {
        return Err(invalid());
    }

    let mut shuffled = teams.to_vec();
    shuffled.shuffle(rng);

    let groups: Vec<Group> = shuffled
        .chunks(group_size)
        .enumerate()
        .map(|(i, chunk)| {
            let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
            Group::new(id, group_name(i), chunk.to_vec())
        })
        .collect();

    log::debug!(
        "Partitioned {} teams into {} group(s) of up to {}",
        teams.len(),
        groups.len(),
        group_size
    );
    Ok(groups)
}

/// Draw with a fresh thread-local random source.
pub fn draw_groups(teams: &[Team], sizing: GroupSizing) -> Result<Vec<Group>, SchedulingError> {
    partition_into_groups(teams, sizing, &mut rand::thread_rng())
}

/// "Group A" for index 0, ..., "Group Z", "Group AA", ...
pub fn group_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    let label: String = letters.into_iter().rev().collect();
    format!("Group {label}")
}
