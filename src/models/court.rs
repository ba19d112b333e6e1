//! Court: an opaque display name for a physical playing surface.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A court, e.g. "Court 1" or "Stadium A".
///
/// Courts compare by their display string. The order a list of courts comes in
/// is the order matches are handed out to them.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Court(String);

impl Court {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// A numbered court: `Court::numbered("3")` is "Court 3".
    pub fn numbered(number: impl fmt::Display) -> Self {
        Self(format!("Court {number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Court {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
