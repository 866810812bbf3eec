//! Policy maker view: network headline metrics, status mix, the national
//! average gauge, the reference trend, state comparison, and map markers.

use std::fmt::Write;

use crate::dashboards::{render_header, MetricCard, Role};
use crate::generator::StationSet;
use crate::model::{Station, StationStatus, Trend, TrendPoint, MAX_LEVEL_M};
use crate::statistics::{self, StateSummary, StatisticsSnapshot, StatusDistribution};
use crate::stations::REFERENCE_TREND;

/// Map centre (geographic centre of India) and initial zoom.
pub const MAP_CENTER: (f64, f64) = (20.5937, 78.9629);
pub const MAP_ZOOM: u8 = 5;
pub const MAP_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const MAP_ATTRIBUTION: &str = "© OpenStreetMap contributors";

// ---------------------------------------------------------------------------
// Water level gauge
// ---------------------------------------------------------------------------

/// Fill level of the well gauge graphic.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterGauge {
    pub label: String,
    pub level: f64,
    pub max_level: f64,
    pub status: StationStatus,
}

impl WaterGauge {
    pub fn new(label: impl Into<String>, level: f64) -> Self {
        Self {
            label: label.into(),
            level,
            max_level: MAX_LEVEL_M,
            status: StationStatus::from_level(level),
        }
    }

    /// Percentage of the well that is full, clamped to 0..=100.
    pub fn fill_percent(&self) -> f64 {
        if self.max_level <= 0.0 {
            return 0.0;
        }
        (self.level / self.max_level * 100.0).clamp(0.0, 100.0)
    }

    pub fn render(&self) -> String {
        let filled = (self.fill_percent() / 5.0).round() as usize;
        format!(
            "{} [{}{}] {}m / {}m ({})",
            self.label,
            "#".repeat(filled),
            ".".repeat(20 - filled.min(20)),
            self.level,
            self.max_level,
            self.status
        )
    }
}

// ---------------------------------------------------------------------------
// Map markers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: StationStatus,
    pub popup: String,
}

impl MapMarker {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            status: station.status,
            popup: popup_text(station),
        }
    }

    /// Marker fill colour.
    pub fn colour(&self) -> &'static str {
        match self.status {
            StationStatus::Good => "hsl(142, 76%, 36%)",
            StationStatus::Moderate => "hsl(48, 96%, 53%)",
            StationStatus::Critical => "hsl(0, 84%, 60%)",
        }
    }
}

fn popup_text(station: &Station) -> String {
    format!(
        "{} - {}\nDistrict: {}, {}\nWater Level: {}m\nStatus: {}\nTrend: {} {}\nLast updated: {}",
        station.id,
        station.location,
        station.district,
        station.state,
        station.water_level,
        station.status,
        station.trend,
        station.trend.arrow(),
        station.timestamp.format("%Y-%m-%d")
    )
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

pub struct PolicyView {
    pub snapshot: StatisticsSnapshot,
    pub distribution: StatusDistribution,
    pub gauge: WaterGauge,
    pub trend: &'static [TrendPoint],
    pub states: Vec<StateSummary>,
    pub markers: Vec<MapMarker>,
}

impl PolicyView {
    /// Builds the view. Only the first `marker_limit` stations are plotted.
    pub fn build(set: &StationSet, marker_limit: usize) -> Self {
        let stations = set.all();
        let snapshot = statistics::snapshot(stations);
        let gauge = WaterGauge::new("National Average", snapshot.average_water_level);

        Self {
            distribution: statistics::status_distribution(stations),
            states: statistics::state_summaries(stations),
            markers: set.first(marker_limit).iter().map(MapMarker::from_station).collect(),
            trend: REFERENCE_TREND,
            gauge,
            snapshot,
        }
    }

    pub fn metric_cards(&self) -> [MetricCard; 4] {
        [
            MetricCard {
                title: "Stations Online",
                value: self.snapshot.online_stations.to_string(),
                subtitle: "DWLR Network",
                trend: Trend::Up,
                variant: Some(StationStatus::Good),
            },
            MetricCard {
                title: "Critical Zones",
                value: self.snapshot.critical_zones.to_string(),
                subtitle: "Below Threshold",
                trend: Trend::Down,
                variant: Some(StationStatus::Critical),
            },
            MetricCard {
                title: "Average Water Level",
                value: format!("{}m", self.snapshot.average_water_level),
                subtitle: "National Average",
                trend: Trend::Stable,
                variant: Some(StationStatus::Moderate),
            },
            MetricCard {
                title: "States Monitored",
                value: self.snapshot.states_monitored.to_string(),
                subtitle: "Across India",
                trend: Trend::Stable,
                variant: Some(StationStatus::Good),
            },
        ]
    }

    /// Share of stations in `status`, as a whole percentage.
    pub fn status_percent(&self, status: StationStatus) -> f64 {
        let total = self.distribution.total();
        if total == 0 {
            return 0.0;
        }
        (self.distribution.count(status) as f64 / total as f64 * 100.0).round()
    }

    pub fn render(&self) -> String {
        let mut out = render_header(self.snapshot.online_stations, Role::PolicyMaker);

        out.push_str("\nKey Metrics\n");
        for card in self.metric_cards() {
            let _ = writeln!(out, "  {}", card.render());
        }

        out.push_str("\nStation Status Distribution\n");
        for status in StationStatus::ALL {
            let _ = writeln!(
                out,
                "  {:<20} {:>6}  {:>3}%",
                status.legend(),
                self.distribution.count(status),
                self.status_percent(status)
            );
        }

        let _ = writeln!(out, "\n3D Water Level\n  {}", self.gauge.render());

        out.push_str("\nWater Level Trends (6 Months)\n");
        for point in self.trend {
            let _ = writeln!(out, "  {:<4} {:>5.1}m", point.month, point.level);
        }

        out.push_str("\nState-wise Water Level Comparison\n");
        for summary in &self.states {
            let _ = writeln!(
                out,
                "  {:<16} {:>6} stations  {:>5.1}m",
                summary.state, summary.stations, summary.level
            );
        }

        let _ = writeln!(
            out,
            "\nInteractive DWLR Station Map (centre {:.4}, {:.4}, zoom {}, {} markers)",
            MAP_CENTER.0,
            MAP_CENTER.1,
            MAP_ZOOM,
            self.markers.len()
        );
        for marker in &self.markers {
            let _ = writeln!(
                out,
                "  {:<9} {:>8.4} {:>8.4}  {:<9} {}",
                marker.id,
                marker.latitude,
                marker.longitude,
                marker.status,
                marker.colour()
            );
        }
        let _ = writeln!(out, "  Tiles: {} ({})", MAP_TILE_URL, MAP_ATTRIBUTION);

        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn set() -> StationSet {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        StationSet::generate_seeded(5260, 2024, now)
    }

    #[test]
    fn test_view_uses_exact_status_counts() {
        let set = set();
        let view = PolicyView::build(&set, 100);
        assert_eq!(view.distribution.total(), 5260);
        assert_eq!(view.distribution.critical, view.snapshot.critical_zones);
    }

    #[test]
    fn test_markers_capped_at_limit() {
        let set = set();
        let view = PolicyView::build(&set, 100);
        assert_eq!(view.markers.len(), 100);
        assert_eq!(view.markers[0].id, "DWLR001");

        let small = PolicyView::build(&StationSet::new(set.first(10).to_vec()), 100);
        assert_eq!(small.markers.len(), 10);
    }

    #[test]
    fn test_marker_popup_describes_station() {
        let set = set();
        let marker = MapMarker::from_station(&set.all()[1]);
        assert!(marker.popup.starts_with("DWLR002 - Delhi North"));
        assert!(marker.popup.contains("Water Level: 8.3m"));
        assert!(marker.popup.contains("Status: critical"));
        assert!(marker.popup.contains("Last updated: 2024-01-15"));
        assert_eq!(marker.colour(), "hsl(0, 84%, 60%)");
    }

    #[test]
    fn test_gauge_fill_percent_is_clamped() {
        assert_eq!(WaterGauge::new("x", 12.5).fill_percent(), 50.0);
        assert_eq!(WaterGauge::new("x", 30.0).fill_percent(), 100.0);
        assert_eq!(WaterGauge::new("x", -1.0).fill_percent(), 0.0);
        assert_eq!(WaterGauge::new("x", 16.0).status, StationStatus::Good);
    }

    #[test]
    fn test_render_contains_all_sections() {
        let set = set();
        let text = PolicyView::build(&set, 5).render();
        for section in [
            "Key Metrics",
            "Station Status Distribution",
            "3D Water Level",
            "Water Level Trends (6 Months)",
            "State-wise Water Level Comparison",
            "Interactive DWLR Station Map",
        ] {
            assert!(text.contains(section), "missing section '{}'", section);
        }
        assert!(text.contains("5,260 Stations Online"));
        assert!(text.contains("DWLR002") && text.contains("hsl(0, 84%, 60%)"));
        assert!(text.contains("Critical Zones") && text.contains("[critical]"));
    }

    #[test]
    fn test_status_percentages_of_empty_view_are_zero() {
        let view = PolicyView::build(&StationSet::new(Vec::new()), 100);
        assert_eq!(view.status_percent(StationStatus::Good), 0.0);
        assert!(view.markers.is_empty());
    }
}
