#![allow(dead_code)]

use std::path::{Path, PathBuf};

use bill_split::{
    domain::{PeriodRecord, PeriodSeries, Readings},
    storage::{ReadingStore, YamlReadingStore},
};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The March 2024 household fixture.
pub fn march_series() -> PeriodSeries {
    YamlReadingStore::new(fixture("bills.yaml"))
        .load()
        .expect("fixture loads")
}

pub fn readings(pairs: &[(&str, f64)]) -> Readings {
    pairs.iter().map(|(name, value)| (*name, *value)).collect()
}

/// Builds a two-period series where `consumption` is the current reading and
/// the previous period is empty.
pub fn series_from_consumption(consumption: &[(&str, f64)], electric: f64, water: f64, internet: f64) -> PeriodSeries {
    let current = PeriodRecord::new("March 2024", readings(consumption)).with_amounts(electric, water, internet);
    let previous = PeriodRecord::new("February 2024", Readings::new());
    PeriodSeries::new(vec![current, previous]).expect("two periods")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
