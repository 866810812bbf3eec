//! Researcher station search, status filtering, and selection.
//!
//! The filtered view and the selection are independent: a
//! selection may hold ids that the current filter hides, and exporting
//! always resolves the selection against the full dataset.

use std::fmt;
use std::str::FromStr;

use crate::model::{Station, StationStatus};

/// Rows shown per filtered page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(StationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: StationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "good" => Ok(StatusFilter::Only(StationStatus::Good)),
            "moderate" => Ok(StatusFilter::Only(StationStatus::Moderate)),
            "critical" => Ok(StatusFilter::Only(StationStatus::Critical)),
            other => Err(format!(
                "unknown status filter '{}' (expected all, good, moderate or critical)",
                other
            )),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A search term plus status filter.
#[derive(Debug, Clone, Default)]
pub struct StationQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl StationQuery {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    /// True when the station's location, id, or district contains the
    /// search term (case-insensitive) and its status passes the filter.
    /// An empty term matches everything.
    pub fn matches(&self, station: &Station) -> bool {
        if !self.status.matches(station.status) {
            return false;
        }
        let term = self.search.to_lowercase();
        station.location.to_lowercase().contains(&term)
            || station.id.to_lowercase().contains(&term)
            || station.district.to_lowercase().contains(&term)
    }
}

/// Returns matching stations in dataset order, capped at `limit`.
pub fn filter_stations<'a>(
    stations: &'a [Station],
    query: &StationQuery,
    limit: usize,
) -> Vec<&'a Station> {
    stations
        .iter()
        .filter(|s| query.matches(s))
        .take(limit)
        .collect()
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Ordered set of selected station ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the given ids, ignoring duplicates.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for id in ids {
            let id = id.into();
            if !selection.contains(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Adds the id if absent, removes it if present. Returns whether the id
    /// is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Replaces the selection with every station in the filtered page.
    pub fn select_all(&mut self, filtered: &[&Station]) {
        self.ids = filtered.iter().map(|s| s.id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected stations in dataset order. Ids with no matching station are
    /// skipped.
    pub fn resolve<'a>(&self, stations: &'a [Station]) -> Vec<&'a Station> {
        stations.iter().filter(|s| self.contains(&s.id)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::StationSet;
    use chrono::{TimeZone, Utc};

    fn dataset() -> StationSet {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        StationSet::generate_seeded(2000, 17, now)
    }

    // --- Status filter ------------------------------------------------------

    #[test]
    fn test_status_filter_parses_case_insensitively() {
        assert_eq!("ALL".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "Critical".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(StationStatus::Critical))
        );
        assert!("flooded".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_critical_filter_returns_only_critical() {
        let set = dataset();
        let query = StationQuery::new("", StatusFilter::Only(StationStatus::Critical));
        let result = filter_stations(set.all(), &query, usize::MAX);
        assert!(!result.is_empty());
        assert!(result.iter().all(|s| s.status == StationStatus::Critical));
    }

    // --- Search -------------------------------------------------------------

    #[test]
    fn test_search_matches_case_insensitively() {
        let set = dataset();
        let query = StationQuery::new("mUmBaI", StatusFilter::All);
        let result = filter_stations(set.all(), &query, usize::MAX);
        assert!(!result.is_empty());
        for station in &result {
            let hit = station.location.to_lowercase().contains("mumbai")
                || station.id.to_lowercase().contains("mumbai")
                || station.district.to_lowercase().contains("mumbai");
            assert!(hit, "{} should not match 'mumbai'", station.id);
        }
    }

    #[test]
    fn test_search_matches_id_and_district() {
        let set = dataset();
        let by_id = filter_stations(set.all(), &StationQuery::new("dwlr005", StatusFilter::All), 50);
        assert_eq!(by_id[0].id, "DWLR005");

        let by_district =
            filter_stations(set.all(), &StationQuery::new("bangalore urban", StatusFilter::All), 50);
        assert!(by_district.iter().all(|s| s.district == "Bangalore Urban"));
    }

    #[test]
    fn test_search_and_status_combine() {
        let set = dataset();
        let query = StationQuery::new("delhi", StatusFilter::Only(StationStatus::Good));
        let result = filter_stations(set.all(), &query, usize::MAX);
        assert!(result.iter().all(|s| s.status == StationStatus::Good));
        assert!(result.iter().all(|s| s.state == "Delhi"));
    }

    #[test]
    fn test_results_capped_at_page_size_in_dataset_order() {
        let set = dataset();
        let result = filter_stations(set.all(), &StationQuery::default(), DEFAULT_PAGE_SIZE);
        assert_eq!(result.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(result[0].id, "DWLR001");
        assert_eq!(result[49].id, "DWLR050");
    }

    #[test]
    fn test_unmatched_search_is_empty() {
        let set = dataset();
        let result = filter_stations(set.all(), &StationQuery::new("atlantis", StatusFilter::All), 50);
        assert!(result.is_empty());
    }

    // --- Selection ----------------------------------------------------------

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle("DWLR001"));
        assert!(selection.contains("DWLR001"));
        assert!(!selection.toggle("DWLR001"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_replaces_selection_with_filtered_page() {
        let set = dataset();
        let mut selection = Selection::from_ids(["DWLR1999"]);
        let page = filter_stations(set.all(), &StationQuery::new("pune", StatusFilter::All), 10);
        selection.select_all(&page);
        assert_eq!(selection.len(), page.len());
        assert!(!selection.contains("DWLR1999"));
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_survives_filter_changes() {
        let set = dataset();
        let selection = Selection::from_ids(["DWLR002", "DWLR004"]);
        // DWLR002 is critical and DWLR004 is good; a critical-only view
        // hides DWLR004 but the selection still resolves both.
        let critical = filter_stations(
            set.all(),
            &StationQuery::new("", StatusFilter::Only(StationStatus::Critical)),
            50,
        );
        assert!(!critical.iter().any(|s| s.id == "DWLR004"));
        assert_eq!(selection.resolve(set.all()).len(), 2);
    }

    #[test]
    fn test_resolve_uses_dataset_order_and_skips_unknown_ids() {
        let set = dataset();
        let selection = Selection::from_ids(["DWLR010", "DWLR003", "NOPE", "DWLR003"]);
        assert_eq!(selection.len(), 3);
        let ids: Vec<_> = selection.resolve(set.all()).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["DWLR003", "DWLR010"]);
    }
}
