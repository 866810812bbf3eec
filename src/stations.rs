/// Seed station registry, reference trend series, and community activity catalogue.
///
/// The 16 seed stations are real DWLR locations across eight Indian metro
/// regions. They are the first records of every generated dataset and the
/// templates every synthetic station is derived from. This is the single
/// source of truth for seed data: other modules should reference stations
/// from here rather than hardcoding ids.

use chrono::{DateTime, Utc};

use crate::model::{
    CommunityActivity, Difficulty, Impact, Station, StationStatus, Trend, TrendPoint,
};

// ---------------------------------------------------------------------------
// Seed station metadata
// ---------------------------------------------------------------------------

/// Observation time shared by all seed records: 2024-01-15T10:30:00Z.
pub const SEED_OBSERVED_AT_EPOCH: i64 = 1_705_314_600;

/// Metadata for a single seed station.
///
/// Status is hardcoded alongside the level rather than derived from it.
pub struct SeedStation {
    pub id: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    pub location: &'static str,
    pub water_level: f64,
    pub status: StationStatus,
    pub trend: Trend,
    pub district: &'static str,
    pub state: &'static str,
}

impl SeedStation {
    /// Materializes the seed as a full station record, verbatim.
    pub fn to_station(&self) -> Station {
        Station {
            id: self.id.to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            location: self.location.to_string(),
            water_level: self.water_level,
            status: self.status,
            trend: self.trend,
            district: self.district.to_string(),
            state: self.state.to_string(),
            timestamp: seed_observed_at(),
        }
    }
}

pub fn seed_observed_at() -> DateTime<Utc> {
    DateTime::from_timestamp(SEED_OBSERVED_AT_EPOCH, 0).unwrap_or_default()
}

/// All seed stations, grouped by metro region (two per region).
pub static SEED_STATIONS: &[SeedStation] = &[
    // Delhi
    SeedStation {
        id: "DWLR001",
        latitude: 28.6139,
        longitude: 77.2090,
        location: "Delhi Central",
        water_level: 15.2,
        status: StationStatus::Good,
        trend: Trend::Up,
        district: "New Delhi",
        state: "Delhi",
    },
    SeedStation {
        id: "DWLR002",
        latitude: 28.7041,
        longitude: 77.1025,
        location: "Delhi North",
        water_level: 8.3,
        status: StationStatus::Critical,
        trend: Trend::Down,
        district: "North Delhi",
        state: "Delhi",
    },
    // Mumbai
    SeedStation {
        id: "DWLR003",
        latitude: 19.0760,
        longitude: 72.8777,
        location: "Mumbai Central",
        water_level: 12.1,
        status: StationStatus::Moderate,
        trend: Trend::Stable,
        district: "Mumbai",
        state: "Maharashtra",
    },
    SeedStation {
        id: "DWLR004",
        latitude: 19.1176,
        longitude: 72.9060,
        location: "Mumbai Suburban",
        water_level: 18.7,
        status: StationStatus::Good,
        trend: Trend::Up,
        district: "Mumbai Suburban",
        state: "Maharashtra",
    },
    // Bangalore
    SeedStation {
        id: "DWLR005",
        latitude: 12.9716,
        longitude: 77.5946,
        location: "Bangalore Central",
        water_level: 6.8,
        status: StationStatus::Critical,
        trend: Trend::Down,
        district: "Bangalore Urban",
        state: "Karnataka",
    },
    SeedStation {
        id: "DWLR006",
        latitude: 12.9698,
        longitude: 77.7500,
        location: "Bangalore East",
        water_level: 11.2,
        status: StationStatus::Moderate,
        trend: Trend::Stable,
        district: "Bangalore Urban",
        state: "Karnataka",
    },
    // Chennai
    SeedStation {
        id: "DWLR007",
        latitude: 13.0827,
        longitude: 80.2707,
        location: "Chennai Central",
        water_level: 14.5,
        status: StationStatus::Moderate,
        trend: Trend::Up,
        district: "Chennai",
        state: "Tamil Nadu",
    },
    SeedStation {
        id: "DWLR008",
        latitude: 13.0674,
        longitude: 80.2376,
        location: "Chennai South",
        water_level: 16.8,
        status: StationStatus::Good,
        trend: Trend::Up,
        district: "Chennai",
        state: "Tamil Nadu",
    },
    // Kolkata
    SeedStation {
        id: "DWLR009",
        latitude: 22.5726,
        longitude: 88.3639,
        location: "Kolkata Central",
        water_level: 9.2,
        status: StationStatus::Critical,
        trend: Trend::Down,
        district: "Kolkata",
        state: "West Bengal",
    },
    SeedStation {
        id: "DWLR010",
        latitude: 22.5675,
        longitude: 88.3918,
        location: "Kolkata East",
        water_level: 13.4,
        status: StationStatus::Moderate,
        trend: Trend::Stable,
        district: "Kolkata",
        state: "West Bengal",
    },
    // Hyderabad
    SeedStation {
        id: "DWLR011",
        latitude: 17.3850,
        longitude: 78.4867,
        location: "Hyderabad Central",
        water_level: 10.7,
        status: StationStatus::Moderate,
        trend: Trend::Down,
        district: "Hyderabad",
        state: "Telangana",
    },
    SeedStation {
        id: "DWLR012",
        latitude: 17.4435,
        longitude: 78.3772,
        location: "Hyderabad North",
        water_level: 17.2,
        status: StationStatus::Good,
        trend: Trend::Up,
        district: "Hyderabad",
        state: "Telangana",
    },
    // Pune
    SeedStation {
        id: "DWLR013",
        latitude: 18.5204,
        longitude: 73.8567,
        location: "Pune Central",
        water_level: 11.8,
        status: StationStatus::Moderate,
        trend: Trend::Stable,
        district: "Pune",
        state: "Maharashtra",
    },
    SeedStation {
        id: "DWLR014",
        latitude: 18.5679,
        longitude: 73.9143,
        location: "Pune East",
        water_level: 19.3,
        status: StationStatus::Good,
        trend: Trend::Up,
        district: "Pune",
        state: "Maharashtra",
    },
    // Ahmedabad
    SeedStation {
        id: "DWLR015",
        latitude: 23.0225,
        longitude: 72.5714,
        location: "Ahmedabad Central",
        water_level: 7.4,
        status: StationStatus::Critical,
        trend: Trend::Down,
        district: "Ahmedabad",
        state: "Gujarat",
    },
    SeedStation {
        id: "DWLR016",
        latitude: 23.0395,
        longitude: 72.6066,
        location: "Ahmedabad North",
        water_level: 14.1,
        status: StationStatus::Moderate,
        trend: Trend::Up,
        district: "Ahmedabad",
        state: "Gujarat",
    },
];

// ---------------------------------------------------------------------------
// Reference trend series
// ---------------------------------------------------------------------------

/// Six months of readings at Delhi Central, used by the trend charts.
pub static REFERENCE_TREND: &[TrendPoint] = &[
    TrendPoint { month: "Jul", level: 12.5, station: "DWLR001" },
    TrendPoint { month: "Aug", level: 11.8, station: "DWLR001" },
    TrendPoint { month: "Sep", level: 13.2, station: "DWLR001" },
    TrendPoint { month: "Oct", level: 14.1, station: "DWLR001" },
    TrendPoint { month: "Nov", level: 14.8, station: "DWLR001" },
    TrendPoint { month: "Dec", level: 15.2, station: "DWLR001" },
];

// ---------------------------------------------------------------------------
// Community activities
// ---------------------------------------------------------------------------

pub static COMMUNITY_ACTIVITIES: &[CommunityActivity] = &[
    CommunityActivity {
        id: "ACT001",
        title: "Rainwater Harvesting Installation",
        description: "Install rooftop rainwater harvesting system in residential areas",
        credits: 500,
        difficulty: Difficulty::Medium,
        impact: Impact::High,
        icon: "droplets",
    },
    CommunityActivity {
        id: "ACT002",
        title: "Community Well Recharge",
        description: "Implement groundwater recharge through existing community wells",
        credits: 1000,
        difficulty: Difficulty::High,
        impact: Impact::High,
        icon: "waves",
    },
    CommunityActivity {
        id: "ACT003",
        title: "Percolation Tank Construction",
        description: "Build percolation tanks to enhance groundwater recharge",
        credits: 750,
        difficulty: Difficulty::High,
        impact: Impact::High,
        icon: "container",
    },
    CommunityActivity {
        id: "ACT004",
        title: "Tree Plantation Drive",
        description: "Organize tree plantation to improve groundwater retention",
        credits: 300,
        difficulty: Difficulty::Low,
        impact: Impact::Medium,
        icon: "tree-pine",
    },
];

pub fn find_activity(id: &str) -> Option<&'static CommunityActivity> {
    COMMUNITY_ACTIVITIES.iter().find(|a| a.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
