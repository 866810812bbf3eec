//! Researcher view: station search and selection, selection statistics, and
//! data export.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::dashboards::{render_header, Role};
use crate::export::{self, DateRange, ExportError, ExportFile, ExportFormat};
use crate::filter::{filter_stations, Selection, StationQuery, DEFAULT_PAGE_SIZE};
use crate::logging::{self, Component};
use crate::model::Station;
use crate::statistics::{self, SelectionStats};
use crate::stations::REFERENCE_TREND;

/// The researcher's working state: current query, selection, and export
/// settings. The dataset itself is passed in to each call.
#[derive(Debug, Clone)]
pub struct ResearcherWorkspace {
    pub query: StationQuery,
    pub selection: Selection,
    pub format: ExportFormat,
    pub range: DateRange,
    pub page_size: usize,
}

impl Default for ResearcherWorkspace {
    fn default() -> Self {
        Self {
            query: StationQuery::default(),
            selection: Selection::new(),
            format: ExportFormat::default(),
            range: DateRange::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ResearcherWorkspace {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// The current filtered page.
    pub fn filtered<'a>(&self, stations: &'a [Station]) -> Vec<&'a Station> {
        filter_stations(stations, &self.query, self.page_size)
    }

    /// Toggles one station in or out of the selection.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Selects exactly the current filtered page.
    pub fn select_all(&mut self, stations: &[Station]) {
        let page = self.filtered(stations);
        self.selection.select_all(&page);
    }

    /// Replaces the selection with the given ids. Ids not in the dataset are
    /// logged and left out. Returns how many ids were kept.
    pub fn select_ids<I, S>(&mut self, stations: &[Station], ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let requested = Selection::from_ids(ids);
        let mut known = Vec::with_capacity(requested.len());
        for id in requested.ids() {
            if stations.iter().any(|s| &s.id == id) {
                known.push(id.clone());
            } else {
                logging::warn(Component::Export, Some(id.as_str()), "unknown station id, skipped");
            }
        }
        self.selection = Selection::from_ids(known);
        self.selection.len()
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn selected<'a>(&self, stations: &'a [Station]) -> Vec<&'a Station> {
        self.selection.resolve(stations)
    }

    pub fn stats(&self, stations: &[Station]) -> SelectionStats {
        statistics::selection_stats(&self.selected(stations))
    }

    /// Exports the selection in the workspace's format and date range.
    pub fn export(&self, stations: &[Station]) -> Result<ExportFile, ExportError> {
        export::export_stations(&self.selected(stations), self.format, &self.range)
    }

    /// Exports the selection and writes it into `dir`. Nothing is written
    /// when the export fails.
    pub fn export_to_dir(&self, stations: &[Station], dir: &Path) -> Result<PathBuf, ExportError> {
        let file = self.export(stations)?;
        export::write_export(&file, dir)
    }

    /// "N of M stations selected", M being the filtered page size.
    pub fn selection_summary(&self, stations: &[Station]) -> String {
        format!(
            "{} of {} stations selected",
            self.selection.len(),
            self.filtered(stations).len()
        )
    }

    pub fn render(&self, stations: &[Station]) -> String {
        let mut out = render_header(stations.len(), Role::Researcher);

        let _ = writeln!(
            out,
            "\nData Export Controls\n  Start {}  End {}  Format {}",
            self.range.start, self.range.end, self.format
        );

        let _ = writeln!(
            out,
            "\nStation Selection (search '{}', status {})",
            self.query.search, self.query.status
        );
        for station in self.filtered(stations) {
            let mark = if self.selection.contains(&station.id) { "[x]" } else { "[ ]" };
            let _ = writeln!(
                out,
                "  {} {:<9} {:<9} {}, {}  {}m",
                mark,
                station.id,
                station.status,
                station.location,
                station.district,
                station.water_level
            );
        }
        let _ = writeln!(out, "  {}", self.selection_summary(stations));

        let stats = self.stats(stations);
        let _ = writeln!(
            out,
            "\nStatistical Analysis\n  Mean Level     {}m\n  Std Deviation  {}\n  Stations       {}\n  Improving      {}",
            stats.mean_level, stats.std_dev, stats.count, stats.improving
        );

        out.push_str("\nQuick Analysis - Trend Data\n");
        for point in REFERENCE_TREND {
            let _ = writeln!(out, "  {:<4} {:>5.1}m", point.month, point.level);
        }

        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
