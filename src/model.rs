/// Station, StationStatus, Trend, TrendPoint, CommunityActivity
/// core data structures shared by every view
///
/// The status threshold rule lives here too, since it is what makes a
/// station record internally consistent.
/// Core data types for the DWLR groundwater dashboard.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O: only types, the threshold rule, and small formatting
/// helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Water level thresholds
// ---------------------------------------------------------------------------

/// Levels strictly above this (meters) are classified as good.
pub const GOOD_LEVEL_M: f64 = 15.0;

/// Levels strictly above this (meters) and not good are moderate.
pub const MODERATE_LEVEL_M: f64 = 10.0;

/// Upper bound of the synthetic water level range, and the full-scale value
/// of the well gauge.
pub const MAX_LEVEL_M: f64 = 25.0;

// ---------------------------------------------------------------------------
// Status and trend
// ---------------------------------------------------------------------------

/// Derived classification of a station's water level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    Good,
    Moderate,
    Critical,
}

impl StationStatus {
    /// Classifies a water level:
    ///   level > 15  →  good
    ///   level > 10  →  moderate
    ///   otherwise   →  critical
    pub fn from_level(level_m: f64) -> Self {
        if level_m > GOOD_LEVEL_M {
            StationStatus::Good
        } else if level_m > MODERATE_LEVEL_M {
            StationStatus::Moderate
        } else {
            StationStatus::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Good => "good",
            StationStatus::Moderate => "moderate",
            StationStatus::Critical => "critical",
        }
    }

    /// Legend label used by the map and the policy view.
    pub fn legend(&self) -> &'static str {
        match self {
            StationStatus::Good => "Good (>15m)",
            StationStatus::Moderate => "Moderate (10-15m)",
            StationStatus::Critical => "Critical (<10m)",
        }
    }

    pub const ALL: [StationStatus; 3] = [
        StationStatus::Good,
        StationStatus::Moderate,
        StationStatus::Critical,
    ];
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directional indicator of recent water-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub const ALL: [Trend; 3] = [Trend::Up, Trend::Down, Trend::Stable];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }

    /// Arrow glyph shown next to the trend in map popups and lists.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Stable => "→",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Station record
// ---------------------------------------------------------------------------

/// A single DWLR monitoring station observation.
///
/// Field names on the wire match the dashboard's JSON shape
/// (`lat`, `lng`, `waterLevel`, ...), which is also what JSON export emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    /// Display name, e.g. "Delhi Central".
    pub location: String,
    /// Water level in meters.
    pub water_level: f64,
    pub status: StationStatus,
    pub trend: Trend,
    pub district: String,
    pub state: String,
    pub timestamp: DateTime<Utc>,
}

impl Station {
    /// True when `status` agrees with the threshold rule for `water_level`.
    pub fn status_is_consistent(&self) -> bool {
        StationStatus::from_level(self.water_level) == self.status
    }
}

// ---------------------------------------------------------------------------
// Chart and community data
// ---------------------------------------------------------------------------

/// One point of a monthly water level series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: &'static str,
    pub level: f64,
    pub station: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// A groundwater recharge project a community leader can take on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityActivity {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub credits: u32,
    pub difficulty: Difficulty,
    pub impact: Impact,
    pub icon: &'static str,
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Rounds to one decimal place, the precision used for every displayed level.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places (standard deviation display).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the dashboard views.
#[derive(Debug, PartialEq)]
pub enum DashboardError {
    /// No community activity with the given id exists.
    UnknownActivity(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::UnknownActivity(id) => write!(f, "Unknown activity: {}", id),
        }
    }
}

impl std::error::Error for DashboardError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
