//! Role-specific dashboard views.
//!
//! Each view is a plain data structure built from the station set, plus a
//! `render` method producing the text report the CLI prints. Views only
//! read the dataset.
//!
//! Submodules:
//! - `policy`: network metrics, status mix, state comparison, map markers.
//! - `researcher`: station search, selection statistics, export.
//! - `community`: nearby stations, recharge projects, leader profile.

pub mod community;
pub mod policy;
pub mod researcher;

use std::fmt;
use std::str::FromStr;

use crate::model::{StationStatus, Trend};

pub const DASHBOARD_TITLE: &str = "Groundwater Guardians";
pub const DASHBOARD_SUBTITLE: &str = "India DWLR Network Monitoring";

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    PolicyMaker,
    Researcher,
    CommunityLeader,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::PolicyMaker => "Policy Maker",
            Role::Researcher => "Researcher",
            Role::CommunityLeader => "Community Leader",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "policy" | "policy-maker" => Ok(Role::PolicyMaker),
            "researcher" => Ok(Role::Researcher),
            "community" | "community-leader" => Ok(Role::CommunityLeader),
            other => Err(format!(
                "unknown role '{}' (expected policy, researcher or community)",
                other
            )),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Header line shared by every view.
pub fn render_header(online_stations: usize, role: Role) -> String {
    format!(
        "{}: {}\n{} Stations Online | {} view\n",
        DASHBOARD_TITLE,
        DASHBOARD_SUBTITLE,
        group_thousands(online_stations),
        role
    )
}

/// A headline metric tile.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: &'static str,
    pub trend: Trend,
    /// Colour variant; `None` is the neutral card.
    pub variant: Option<StationStatus>,
}

impl MetricCard {
    pub fn render(&self) -> String {
        let tag = self
            .variant
            .map(|status| format!(" [{}]", status))
            .unwrap_or_default();
        format!(
            "{:<22} {:>10} {}  ({}){}",
            self.title,
            self.value,
            self.trend.arrow(),
            self.subtitle,
            tag
        )
    }
}

/// Formats a count with comma thousands separators: 5260 → "5,260".
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
