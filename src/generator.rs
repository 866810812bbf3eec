/// Synthetic station generation.
///
/// Extends the seed registry to a full network-sized dataset by cycling
/// through the seeds and perturbing each copy.
///
/// # RNG and clock injection
/// `generate_stations` takes the random source and the current time as
/// parameters rather than reaching for `thread_rng()` / `Utc::now()`, so a
/// fixed seed and a fixed clock always produce the same dataset.

use chrono::{DateTime, SubsecRound, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DashboardConfig;
use crate::logging::{self, Component};
use crate::model::{round1, Station, StationStatus, Trend, MAX_LEVEL_M};
use crate::stations::SEED_STATIONS;

/// Size of the DWLR network the dashboard simulates.
pub const DEFAULT_STATION_COUNT: usize = 5260;

/// Maximum coordinate offset (degrees) applied to a synthetic station.
const COORDINATE_JITTER_DEG: f64 = 1.0;
const JITTER: std::ops::Range<f64> = -COORDINATE_JITTER_DEG..COORDINATE_JITTER_DEG;

/// Produces `count` station records.
///
/// The first `min(count, seeds)` records are the seeds verbatim. Each
/// following record `i` copies seed `i % seeds` with a new sequential id
/// (`DWLR` + `i + 1`), jittered coordinates, a numbered location name, a
/// uniform water level in [0, 25) rounded to one decimal, the status derived
/// from that rounded level, a uniform trend, and `now` as its timestamp.
///
/// When `count` is at most the seed count the result is truncated to the
/// first `count` seeds.
pub fn generate_stations<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Station> {
    let mut stations: Vec<Station> = SEED_STATIONS
        .iter()
        .take(count)
        .map(|seed| seed.to_station())
        .collect();

    for i in SEED_STATIONS.len()..count {
        let base = &SEED_STATIONS[i % SEED_STATIONS.len()];

        let water_level = round1(rng.gen_range(0.0..MAX_LEVEL_M));
        let trend = Trend::ALL[rng.gen_range(0..Trend::ALL.len())];

        stations.push(Station {
            id: format!("DWLR{:03}", i + 1),
            latitude: base.latitude + rng.gen_range(JITTER),
            longitude: base.longitude + rng.gen_range(JITTER),
            location: format!("{} {}", base.location, rng.gen_range(0..100)),
            water_level,
            status: StationStatus::from_level(water_level),
            trend,
            district: base.district.to_string(),
            state: base.state.to_string(),
            timestamp: now,
        });
    }

    stations
}

// ---------------------------------------------------------------------------
// Station set
// ---------------------------------------------------------------------------

/// The dataset for one process run. Generated once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct StationSet {
    stations: Vec<Station>,
}

impl StationSet {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Generates a dataset with an explicit seed and clock.
    pub fn generate_seeded(count: usize, seed: u64, now: DateTime<Utc>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::new(generate_stations(count, &mut rng, now))
    }

    /// Generates the dataset described by the configuration. Without a
    /// configured seed the dataset differs between runs. Timestamps are kept
    /// to millisecond precision.
    pub fn from_config(config: &DashboardConfig, now: DateTime<Utc>) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        let set = Self::generate_seeded(config.station_count, seed, now.trunc_subsecs(3));

        logging::log_generation_summary(set.len(), SEED_STATIONS.len().min(set.len()), seed);
        if config.seed.is_none() {
            logging::debug(
                Component::Generator,
                None,
                "no seed configured; dataset is not reproducible",
            );
        }

        set
    }

    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Looks up a station by id. Returns `None` if not found.
    pub fn find(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// The first `n` stations in dataset order.
    pub fn first(&self, n: usize) -> &[Station] {
        &self.stations[..n.min(self.stations.len())]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    /// A fixed "now" used across all tests: 2024-05-01 13:00:00 UTC.
    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap()
    }

    fn generate(count: usize, seed: u64) -> Vec<Station> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_stations(count, &mut rng, fixed_now())
    }

    // --- Counts and ids -----------------------------------------------------

    #[test]
    fn test_default_count_yields_exact_count_with_unique_ids() {
        let stations = generate(DEFAULT_STATION_COUNT, 7);
        assert_eq!(stations.len(), DEFAULT_STATION_COUNT);

        let ids: HashSet<_> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), DEFAULT_STATION_COUNT, "station ids must be unique");
    }

    #[test]
    fn test_ids_continue_seed_sequence() {
        let stations = generate(1200, 1);
        assert_eq!(stations[16].id, "DWLR017");
        assert_eq!(stations[999].id, "DWLR1000");
        assert_eq!(stations[1199].id, "DWLR1200");
    }

    #[test]
    fn test_count_below_seed_count_truncates() {
        let stations = generate(5, 1);
        assert_eq!(stations.len(), 5);
        let ids: Vec<_> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["DWLR001", "DWLR002", "DWLR003", "DWLR004", "DWLR005"]);
    }

    #[test]
    fn test_count_equal_to_seed_count_returns_seeds_only() {
        let stations = generate(SEED_STATIONS.len(), 1);
        assert_eq!(stations.len(), SEED_STATIONS.len());
        assert!(stations.iter().all(|s| s.timestamp != fixed_now()));
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate(0, 1).is_empty());
    }

    // --- Seeds --------------------------------------------------------------

    #[test]
    fn test_seed_records_come_first_verbatim() {
        let stations = generate(100, 3);
        for (seed, station) in SEED_STATIONS.iter().zip(&stations) {
            assert_eq!(*station, seed.to_station());
        }
    }

    // --- Synthetic records --------------------------------------------------

    #[test]
    fn test_generated_status_matches_threshold_rule() {
        let stations = generate(3000, 11);
        for station in &stations[SEED_STATIONS.len()..] {
            assert!(
                station.status_is_consistent(),
                "{} has level {} but status {}",
                station.id,
                station.water_level,
                station.status
            );
        }
    }

    #[test]
    fn test_generated_levels_within_range_and_one_decimal() {
        let stations = generate(2000, 5);
        for station in &stations[SEED_STATIONS.len()..] {
            assert!(station.water_level >= 0.0 && station.water_level <= MAX_LEVEL_M);
            assert_eq!(round1(station.water_level), station.water_level);
        }
    }

    #[test]
    fn test_generated_record_inherits_base_seed_region() {
        let stations = generate(200, 9);
        for (i, station) in stations.iter().enumerate().skip(SEED_STATIONS.len()) {
            let base = &SEED_STATIONS[i % SEED_STATIONS.len()];
            assert_eq!(station.district, base.district);
            assert_eq!(station.state, base.state);
            assert!(station.location.starts_with(base.location));
            assert!((station.latitude - base.latitude).abs() <= COORDINATE_JITTER_DEG + 1e-9);
            assert!((station.longitude - base.longitude).abs() <= COORDINATE_JITTER_DEG + 1e-9);
            assert_eq!(station.timestamp, fixed_now());
        }
    }

    #[test]
    fn test_every_trend_appears_in_a_large_sample() {
        let stations = generate(1000, 21);
        for trend in Trend::ALL {
            assert!(stations.iter().any(|s| s.trend == trend), "missing trend {}", trend);
        }
    }

    // --- Reproducibility ----------------------------------------------------

    #[test]
    fn test_same_seed_and_clock_reproduce_dataset() {
        assert_eq!(generate(500, 42), generate(500, 42));
    }

    #[test]
    fn test_different_seeds_produce_different_datasets() {
        assert_ne!(generate(500, 42), generate(500, 43));
    }

    // --- StationSet ---------------------------------------------------------

    #[test]
    fn test_from_config_truncates_clock_to_milliseconds() {
        let config = DashboardConfig {
            station_count: 20,
            seed: Some(5),
            ..DashboardConfig::default()
        };
        let now = Utc.timestamp_opt(1_714_568_400, 437_291_822).unwrap();
        let set = StationSet::from_config(&config, now);

        let last = &set.all()[19];
        assert_eq!(last.timestamp.timestamp_subsec_nanos(), 437_000_000);
        assert_eq!(
            last.timestamp.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
            "2024-05-01T13:00:00.437Z"
        );
    }

    #[test]
    fn test_station_set_lookup_and_prefix() {
        let set = StationSet::generate_seeded(300, 2, fixed_now());
        assert_eq!(set.len(), 300);
        assert!(!set.is_empty());
        assert_eq!(set.find("DWLR250").map(|s| s.id.as_str()), Some("DWLR250"));
        assert!(set.find("DWLR301").is_none());
        assert_eq!(set.first(5).len(), 5);
        assert_eq!(set.first(1000).len(), 300);
    }
}
