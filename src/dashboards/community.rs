//! Community leader view: nearby stations, the recharge project catalogue,
//! and the leader's credits and standing.

use std::fmt::Write;

use crate::dashboards::{group_thousands, render_header, Role};
use crate::generator::StationSet;
use crate::model::{CommunityActivity, DashboardError, Station};
use crate::stations::{find_activity, COMMUNITY_ACTIVITIES};

/// A community leader's standing in their district.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderProfile {
    pub credits: u32,
    pub district_rank: u32,
    pub leaders_in_district: u32,
    pub projects_completed: u32,
    pub water_recharged_litres: u32,
    /// District recharge this month and the monthly goal, in litres.
    pub district_recharged_litres: u32,
    pub district_goal_litres: u32,
    pub active_members: u32,
    pub projects_active: u32,
}

impl LeaderProfile {
    /// Share of the district's monthly goal reached, whole percent.
    pub fn district_goal_percent(&self) -> u32 {
        whole_percent(self.district_recharged_litres, self.district_goal_litres)
    }

    /// The leader's share of the district's recharge this month, whole percent.
    pub fn contribution_percent(&self) -> u32 {
        whole_percent(self.water_recharged_litres, self.district_recharged_litres)
    }
}

fn whole_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

impl Default for LeaderProfile {
    fn default() -> Self {
        Self {
            credits: 1850,
            district_rank: 12,
            leaders_in_district: 156,
            projects_completed: 7,
            water_recharged_litres: 2400,
            district_recharged_litres: 15_600,
            district_goal_litres: 20_000,
            active_members: 43,
            projects_active: 28,
        }
    }
}

pub struct CommunityView<'a> {
    pub profile: LeaderProfile,
    /// Stations near the leader. Without geolocation these are the first
    /// stations of the dataset.
    pub nearby: &'a [Station],
    pub activities: &'static [CommunityActivity],
    online_stations: usize,
}

impl<'a> CommunityView<'a> {
    pub fn build(set: &'a StationSet, nearby_limit: usize, profile: LeaderProfile) -> Self {
        Self {
            profile,
            nearby: set.first(nearby_limit),
            activities: COMMUNITY_ACTIVITIES,
            online_stations: set.len(),
        }
    }

    /// Confirmation shown when a leader starts a project.
    pub fn start_project(&self, activity_id: &str) -> Result<String, DashboardError> {
        let activity = find_activity(activity_id)
            .ok_or_else(|| DashboardError::UnknownActivity(activity_id.to_string()))?;
        Ok(format!(
            "Started project: {}. You'll earn {} credits upon completion.",
            activity.title, activity.credits
        ))
    }

    pub fn render(&self) -> String {
        let mut out = render_header(self.online_stations, Role::CommunityLeader);

        let p = &self.profile;
        let _ = writeln!(
            out,
            "\nCurrent Credits     {}\nDistrict Rank       #{} (out of {} leaders)\nProjects Completed  {}\nWater Recharged     {} L",
            group_thousands(p.credits as usize),
            p.district_rank,
            p.leaders_in_district,
            p.projects_completed,
            group_thousands(p.water_recharged_litres as usize)
        );

        let _ = writeln!(
            out,
            "\nCommunity Progress\n  District Goal Progress  {}%  ({} / {} L recharged this month)\n  Your Contribution       {}%  ({} L contributed)\n  Active Members {}  Projects Active {}",
            p.district_goal_percent(),
            group_thousands(p.district_recharged_litres as usize),
            group_thousands(p.district_goal_litres as usize),
            p.contribution_percent(),
            group_thousands(p.water_recharged_litres as usize),
            p.active_members,
            p.projects_active
        );

        out.push_str("\nNearby DWLR Stations\n");
        for station in self.nearby {
            let _ = writeln!(
                out,
                "  {:<22} {:<16} {:>5}m {} {}",
                station.location,
                station.district,
                station.water_level,
                station.trend.arrow(),
                station.status
            );
        }

        out.push_str("\nRecharge Activities\n");
        for activity in self.activities {
            let _ = writeln!(
                out,
                "  {} {:<36} {:>5} credits  difficulty {:?}, impact {:?}\n      {}",
                activity.id,
                activity.title,
                activity.credits,
                activity.difficulty,
                activity.impact,
                activity.description
            );
        }

        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
