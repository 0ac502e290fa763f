//! Primary lunar phases and tabulated phase events.
//!
//! A [`PhaseEvent`] pairs one of the four [`PrimaryPhase`] kinds with the UTC
//! instant at which it occurs. The phase table is a chronological sequence of
//! these events cycling through the kinds in [`PrimaryPhase::ALL`] order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PhaseError;

/// One of the four canonical lunar phase instants.
///
/// The declaration order is the lunation rotation and also the kind index
/// used by legacy identifiers, so it must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryPhase {
    NewMoon,
    FirstQuarter,
    FullMoon,
    ThirdQuarter,
}

impl PrimaryPhase {
    /// All kinds in rotation order.
    pub const ALL: [PrimaryPhase; 4] = [
        PrimaryPhase::NewMoon,
        PrimaryPhase::FirstQuarter,
        PrimaryPhase::FullMoon,
        PrimaryPhase::ThirdQuarter,
    ];

    /// Position of this kind in [`PrimaryPhase::ALL`].
    pub fn index(self) -> usize {
        match self {
            PrimaryPhase::NewMoon => 0,
            PrimaryPhase::FirstQuarter => 1,
            PrimaryPhase::FullMoon => 2,
            PrimaryPhase::ThirdQuarter => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The kind that follows this one in the lunation.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Human readable name, e.g. `"First Quarter"`.
    pub fn name(self) -> &'static str {
        match self {
            PrimaryPhase::NewMoon => "New Moon",
            PrimaryPhase::FirstQuarter => "First Quarter",
            PrimaryPhase::FullMoon => "Full Moon",
            PrimaryPhase::ThirdQuarter => "Third Quarter",
        }
    }

    /// Machine token used in the dataset and in detailed collection tokens.
    pub fn key(self) -> &'static str {
        match self {
            PrimaryPhase::NewMoon => "new_moon",
            PrimaryPhase::FirstQuarter => "first_quarter",
            PrimaryPhase::FullMoon => "full_moon",
            PrimaryPhase::ThirdQuarter => "third_quarter",
        }
    }

    /// New moon to full moon half of the cycle.
    pub fn is_waxing(self) -> bool {
        matches!(self, PrimaryPhase::NewMoon | PrimaryPhase::FirstQuarter)
    }

    /// Full moon to new moon half of the cycle.
    pub fn is_waning(self) -> bool {
        !self.is_waxing()
    }
}

impl fmt::Display for PrimaryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimaryPhase {
    type Err = PhaseError;

    /// Accepts the snake_case key or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(|c: char| c == ' ' || c == '-', "_");
        match normalized.as_str() {
            "new_moon" => Ok(PrimaryPhase::NewMoon),
            "first_quarter" => Ok(PrimaryPhase::FirstQuarter),
            "full_moon" => Ok(PrimaryPhase::FullMoon),
            "third_quarter" | "last_quarter" => Ok(PrimaryPhase::ThirdQuarter),
            _ => Err(PhaseError::data(format!("unknown phase kind '{}'", s))),
        }
    }
}

/// A tabulated primary phase at a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEvent {
    pub kind: PrimaryPhase,
    pub instant: DateTime<Utc>,
}

impl PhaseEvent {
    pub fn new(kind: PrimaryPhase, instant: DateTime<Utc>) -> Self {
        Self { kind, instant }
    }

    /// Absolute distance from `instant` in whole seconds.
    pub fn distance_secs(&self, instant: DateTime<Utc>) -> i64 {
        (self.instant - instant).num_seconds().abs()
    }
}
