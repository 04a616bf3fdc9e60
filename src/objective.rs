//! Objective (medal) times and the validation policies applied to them.

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Race time in milliseconds, as stored in map objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeInt32(pub i32);

impl TimeInt32 {
    /// Largest representable time. Marks a map as "validated" without a real run.
    pub const MAX: TimeInt32 = TimeInt32(i32::MAX);

    /// Time that still has to be driven. The game asks for a validation run.
    pub const UNSET: TimeInt32 = TimeInt32(-1);

    pub fn millis(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TimeInt32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            return write!(f, "-:--.---");
        }
        let total = self.0 as i64;
        let minutes = total / 60_000;
        let seconds = (total / 1000) % 60;
        let millis = total % 1000;
        write!(f, "{}:{:02}.{:03}", minutes, seconds, millis)
    }
}

/// The four medal times of a map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveTimes {
    #[serde(default)]
    pub author: Option<TimeInt32>,
    #[serde(default)]
    pub gold: Option<TimeInt32>,
    #[serde(default)]
    pub silver: Option<TimeInt32>,
    #[serde(default)]
    pub bronze: Option<TimeInt32>,
}

impl ObjectiveTimes {
    /// All four medals set to the same time
    pub fn uniform(time: TimeInt32) -> Self {
        Self {
            author: Some(time),
            gold: Some(time),
            silver: Some(time),
            bronze: Some(time),
        }
    }
}

/// What happens to objective times on a generated variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValidationMode {
    /// Keep the source map's times
    #[default]
    None,
    /// Pretend the variant is validated
    Fake,
    /// Require a real validation run of the variant
    Real,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMode::None => "none",
            ValidationMode::Fake => "fake",
            ValidationMode::Real => "real",
        }
    }

    /// Apply this policy to `times`. `None` leaves them untouched.
    pub fn apply(self, times: &mut ObjectiveTimes) {
        match self {
            ValidationMode::None => {}
            ValidationMode::Fake => *times = ObjectiveTimes::uniform(TimeInt32::MAX),
            ValidationMode::Real => *times = ObjectiveTimes::uniform(TimeInt32::UNSET),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ValidationMode::None),
            "fake" => Ok(ValidationMode::Fake),
            "real" => Ok(ValidationMode::Real),
            _ => Err(GenerationError::UnreachablePolicy(s.to_string())),
        }
    }
}

impl TryFrom<String> for ValidationMode {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValidationMode> for String {
    fn from(mode: ValidationMode) -> Self {
        mode.as_str().to_string()
    }
}
