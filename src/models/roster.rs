//! Roster kinds.
//!
//! Every employee belongs to exactly one of two disjoint rosters. The kind is
//! parsed case-insensitively at the ingestion boundary so the rest of the
//! engine only ever sees the two canonical values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// Identifies one of the two employee rosters.
///
/// # Example
///
/// ```
/// use payroll_engine::models::RosterKind;
///
/// let kind: RosterKind = "Non-Teaching".parse().unwrap();
/// assert_eq!(kind, RosterKind::NonTeaching);
/// assert_eq!(kind.as_str(), "non-teaching");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RosterKind {
    /// Teaching staff (faculty).
    Teaching,
    /// Non-teaching staff (administrative and support).
    NonTeaching,
}

impl RosterKind {
    /// Both roster kinds, teaching first.
    pub const ALL: [RosterKind; 2] = [RosterKind::Teaching, RosterKind::NonTeaching];

    /// Returns the canonical lowercase name of the roster kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RosterKind::Teaching => "teaching",
            RosterKind::NonTeaching => "non-teaching",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RosterKind::Teaching => "Teaching",
            RosterKind::NonTeaching => "Non-Teaching",
        }
    }
}

impl fmt::Display for RosterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterKind {
    type Err = EngineError;

    /// Accepts `teaching`, `non-teaching`, `nonteaching` and `non_teaching`
    /// in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match compact.as_str() {
            "teaching" => Ok(RosterKind::Teaching),
            "nonteaching" => Ok(RosterKind::NonTeaching),
            _ => Err(EngineError::InvalidEmployee {
                field: "type".to_string(),
                message: format!("unknown roster type '{}'", s.trim()),
            }),
        }
    }
}

impl Serialize for RosterKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RosterKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
