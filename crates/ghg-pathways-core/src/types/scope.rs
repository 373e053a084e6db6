//! Scope and TargetType enums with their exact wire spellings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// GHG Protocol emission scope of a target or measurement.
///
/// `S1` is direct emissions, `S2` purchased energy, `S3` value chain;
/// `S1+S2` and `S1+S2+S3` are aggregates. Wire spellings use the `+`
/// notation exactly as the source tables do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "S1")]
    S1,
    #[serde(rename = "S2")]
    S2,
    #[serde(rename = "S3")]
    S3,
    #[serde(rename = "S1+S2")]
    S1S2,
    #[serde(rename = "S1+S2+S3")]
    S1S2S3,
}

impl Scope {
    /// True for the separately-declared sub-scopes the combiner merges.
    #[inline]
    pub fn is_sub_scope(&self) -> bool {
        matches!(self, Self::S1 | Self::S2)
    }

    /// True for the aggregated scopes that survive into the trajectory.
    #[inline]
    pub fn is_combined(&self) -> bool {
        matches!(self, Self::S1S2 | Self::S1S2S3)
    }

    /// All scope variants in canonical order.
    pub fn all() -> [Scope; 5] {
        [Self::S1, Self::S2, Self::S3, Self::S1S2, Self::S1S2S3]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
            Self::S1S2 => "S1+S2",
            Self::S1S2S3 => "S1+S2+S3",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Scope {
    type Err = ParseError;

    /// Parses a wire scope string. Surrounding whitespace is tolerated
    /// because the source workbooks carry stray spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S1" => Ok(Self::S1),
            "S2" => Ok(Self::S2),
            "S3" => Ok(Self::S3),
            "S1+S2" => Ok(Self::S1S2),
            "S1+S2+S3" => Ok(Self::S1S2S3),
            other => Err(ParseError::InvalidScope(other.to_string())),
        }
    }
}

/// How a target's reduction ambition is expressed.
///
/// Absolute targets commit to reducing total emissions; intensity targets
/// commit per unit of output. Only absolute targets enter the trajectory,
/// except where a named overlay rule admits an intensity target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    Absolute,
    Intensity,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "Absolute"),
            Self::Intensity => write!(f, "Intensity"),
        }
    }
}

impl FromStr for TargetType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Absolute" => Ok(Self::Absolute),
            "Intensity" => Ok(Self::Intensity),
            other => Err(ParseError::InvalidTargetType(other.to_string())),
        }
    }
}
