//! Shared newtypes and utilities used across all modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the market-data API uses, so they can be used directly in wire
//! types without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Milliseconds since Unix epoch.
pub type Timestamp = i64;

pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Newtype for market-data coin identifiers (e.g. `"bitcoin"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CoinId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CoinId(s.to_string()))
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(CoinId(String::deserialize(deserializer)?))
    }
}

// ─── ChartRange ──────────────────────────────────────────────────────────────

/// Lookback window offered by the chart screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "1D")]
    Day1,
    #[serde(rename = "3D")]
    Day3,
    #[default]
    #[serde(rename = "7D")]
    Day7,
    #[serde(rename = "1M")]
    Month1,
    #[serde(rename = "90D")]
    Day90,
}

impl ChartRange {
    pub const ALL: [ChartRange; 5] = [
        ChartRange::Day1,
        ChartRange::Day3,
        ChartRange::Day7,
        ChartRange::Month1,
        ChartRange::Day90,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "1D",
            Self::Day3 => "3D",
            Self::Day7 => "7D",
            Self::Month1 => "1M",
            Self::Day90 => "90D",
        }
    }

    /// Number of days requested from the market-data API.
    pub fn days(&self) -> u32 {
        match self {
            Self::Day1 => 1,
            Self::Day3 => 3,
            Self::Day7 => 7,
            Self::Month1 => 30,
            Self::Day90 => 90,
        }
    }

    /// Explicit sampling interval. Short windows leave it unset so the API
    /// returns its denser automatic granularity.
    pub fn interval(&self) -> Option<&'static str> {
        if self.days() >= 30 {
            Some("daily")
        } else {
            None
        }
    }
}

impl std::fmt::Display for ChartRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
