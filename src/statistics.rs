/// Derived statistics over the station dataset.
///
/// Everything here is a pure function of a station slice. The dataset never
/// changes after generation, so nothing is cached; each call is O(n).
///
/// Functions:
/// - `snapshot`: network-wide headline metrics.
/// - `selection_stats`: mean, spread, and improving count for a subset.
/// - `status_distribution`: exact station count per status.
/// - `state_summaries`: per-state station count and mean level.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::model::{round1, round2, Station, StationStatus, Trend};

// ---------------------------------------------------------------------------
// Network snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub online_stations: usize,
    pub critical_zones: usize,
    /// Mean water level in meters, rounded to one decimal.
    pub average_water_level: f64,
    pub states_monitored: usize,
}

/// Computes the headline metrics shown on every dashboard.
///
/// An empty slice yields an average of 0.0 rather than NaN.
pub fn snapshot(stations: &[Station]) -> StatisticsSnapshot {
    let critical_zones = stations
        .iter()
        .filter(|s| s.status == StationStatus::Critical)
        .count();
    let states: HashSet<&str> = stations.iter().map(|s| s.state.as_str()).collect();

    StatisticsSnapshot {
        online_stations: stations.len(),
        critical_zones,
        average_water_level: round1(mean_level(stations.iter()).unwrap_or(0.0)),
        states_monitored: states.len(),
    }
}

fn mean_level<'a>(stations: impl Iterator<Item = &'a Station>) -> Option<f64> {
    let (sum, count) = stations.fold((0.0, 0usize), |(sum, n), s| (sum + s.water_level, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

// ---------------------------------------------------------------------------
// Selection statistics
// ---------------------------------------------------------------------------

/// Statistics for a researcher's selected stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionStats {
    pub count: usize,
    /// Mean level, one decimal.
    pub mean_level: f64,
    /// Population standard deviation of the level, two decimals.
    pub std_dev: f64,
    /// Stations whose trend is up.
    pub improving: usize,
}

/// Computes selection statistics. All fields are zero for an empty selection.
pub fn selection_stats(selected: &[&Station]) -> SelectionStats {
    let Some(mean) = mean_level(selected.iter().copied()) else {
        return SelectionStats {
            count: 0,
            mean_level: 0.0,
            std_dev: 0.0,
            improving: 0,
        };
    };

    // Spread is measured from the displayed (rounded) mean.
    let mean_level = round1(mean);
    let variance = selected
        .iter()
        .map(|s| (s.water_level - mean_level).powi(2))
        .sum::<f64>()
        / selected.len() as f64;

    SelectionStats {
        count: selected.len(),
        mean_level,
        std_dev: round2(variance.sqrt()),
        improving: selected.iter().filter(|s| s.trend == Trend::Up).count(),
    }
}

// ---------------------------------------------------------------------------
// Breakdowns
// ---------------------------------------------------------------------------

/// Station count per status, in good/moderate/critical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub good: usize,
    pub moderate: usize,
    pub critical: usize,
}

impl StatusDistribution {
    pub fn count(&self, status: StationStatus) -> usize {
        match status {
            StationStatus::Good => self.good,
            StationStatus::Moderate => self.moderate,
            StationStatus::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.moderate + self.critical
    }
}

pub fn status_distribution(stations: &[Station]) -> StatusDistribution {
    let mut dist = StatusDistribution {
        good: 0,
        moderate: 0,
        critical: 0,
    };
    for station in stations {
        match station.status {
            StationStatus::Good => dist.good += 1,
            StationStatus::Moderate => dist.moderate += 1,
            StationStatus::Critical => dist.critical += 1,
        }
    }
    dist
}

/// Station count and mean level for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub state: String,
    pub stations: usize,
    /// Mean level, one decimal.
    pub level: f64,
}

/// Groups stations by state, ordered by station count descending, ties
/// broken by state name.
pub fn state_summaries(stations: &[Station]) -> Vec<StateSummary> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for station in stations {
        let entry = groups.entry(station.state.as_str()).or_insert((0.0, 0));
        entry.0 += station.water_level;
        entry.1 += 1;
    }

    let mut summaries: Vec<StateSummary> = groups
        .into_iter()
        .map(|(state, (sum, count))| StateSummary {
            state: state.to_string(),
            stations: count,
            level: round1(sum / count as f64),
        })
        .collect();

    // BTreeMap already yields name order; a stable sort keeps it for ties.
    summaries.sort_by(|a, b| b.stations.cmp(&a.stations));
    summaries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::StationSet;
    use chrono::{TimeZone, Utc};

    fn station(id: &str, level: f64, trend: Trend, state: &str) -> Station {
        Station {
            id: id.to_string(),
            latitude: 20.0,
            longitude: 78.0,
            location: format!("{} site", id),
            water_level: level,
            status: StationStatus::from_level(level),
            trend,
            district: "Test District".to_string(),
            state: state.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    // --- Snapshot -----------------------------------------------------------

    #[test]
    fn test_snapshot_counts_and_average() {
        let stations = vec![
            station("A", 20.0, Trend::Up, "Delhi"),
            station("B", 8.0, Trend::Down, "Delhi"),
            station("C", 12.5, Trend::Stable, "Gujarat"),
        ];
        let snap = snapshot(&stations);
        assert_eq!(snap.online_stations, 3);
        assert_eq!(snap.critical_zones, 1);
        assert_eq!(snap.average_water_level, 13.5);
        assert_eq!(snap.states_monitored, 2);
    }

    #[test]
    fn test_snapshot_of_empty_set_is_zeroed() {
        let snap = snapshot(&[]);
        assert_eq!(snap.online_stations, 0);
        assert_eq!(snap.average_water_level, 0.0);
        assert_eq!(snap.states_monitored, 0);
    }

    #[test]
    fn test_snapshot_critical_count_matches_generated_dataset() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        let set = StationSet::generate_seeded(5260, 99, now);
        let expected = set
            .all()
            .iter()
            .filter(|s| s.status == StationStatus::Critical)
            .count();

        let snap = snapshot(set.all());
        assert_eq!(snap.critical_zones, expected);
        assert_eq!(snap.online_stations, 5260);
        assert_eq!(snap.states_monitored, 7, "synthetic stations reuse seed states");
    }

    // --- Selection ----------------------------------------------------------

    #[test]
    fn test_selection_stats_mean_std_dev_and_improving() {
        let a = station("A", 10.0, Trend::Up, "Delhi");
        let b = station("B", 20.0, Trend::Down, "Delhi");
        let c = station("C", 15.0, Trend::Up, "Delhi");
        let stats = selection_stats(&[&a, &b, &c]);

        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean_level, 15.0);
        // sqrt(50 / 3) = 4.0824...
        assert_eq!(stats.std_dev, 4.08);
        assert_eq!(stats.improving, 2);
    }

    #[test]
    fn test_selection_std_dev_is_taken_from_displayed_mean() {
        let a = station("A", 10.0, Trend::Down, "Delhi");
        let b = station("B", 10.1, Trend::Down, "Delhi");
        let c = station("C", 10.1, Trend::Down, "Delhi");
        let stats = selection_stats(&[&a, &b, &c]);

        // Exact mean 10.0667 would give 0.05; the displayed mean 10.1 gives sqrt(0.01 / 3).
        assert_eq!(stats.mean_level, 10.1);
        assert_eq!(stats.std_dev, 0.06);

        let low = station("L", 0.0, Trend::Up, "Delhi");
        let high = station("H", 0.1, Trend::Up, "Delhi");
        let stats = selection_stats(&[&low, &high]);
        assert_eq!(stats.mean_level, 0.1);
        assert_eq!(stats.std_dev, 0.07);
    }

    #[test]
    fn test_selection_stats_empty_is_zeroed() {
        let stats = selection_stats(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean_level, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.improving, 0);
    }

    // --- Breakdowns ---------------------------------------------------------

    #[test]
    fn test_status_distribution_sums_to_total() {
        let stations = vec![
            station("A", 20.0, Trend::Up, "Delhi"),
            station("B", 8.0, Trend::Down, "Delhi"),
            station("C", 12.5, Trend::Stable, "Gujarat"),
            station("D", 2.0, Trend::Stable, "Gujarat"),
        ];
        let dist = status_distribution(&stations);
        assert_eq!(dist.good, 1);
        assert_eq!(dist.moderate, 1);
        assert_eq!(dist.critical, 2);
        assert_eq!(dist.total(), stations.len());
        assert_eq!(dist.count(StationStatus::Critical), 2);
    }

    #[test]
    fn test_state_summaries_ordered_by_count_then_name() {
        let stations = vec![
            station("A", 10.0, Trend::Up, "Gujarat"),
            station("B", 20.0, Trend::Up, "Maharashtra"),
            station("C", 11.0, Trend::Up, "Maharashtra"),
            station("D", 14.0, Trend::Up, "Delhi"),
        ];
        let summaries = state_summaries(&stations);
        let order: Vec<_> = summaries.iter().map(|s| s.state.as_str()).collect();
        assert_eq!(order, ["Maharashtra", "Delhi", "Gujarat"]);
        assert_eq!(summaries[0].stations, 2);
        assert_eq!(summaries[0].level, 15.5);
    }
}
