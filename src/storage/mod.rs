pub mod yaml_backend;

use crate::{domain::PeriodSeries, errors::DataError};

pub type Result<T> = std::result::Result<T, DataError>;

/// Source of billing periods. Implementations only load; they never allocate.
pub trait ReadingStore {
    fn load(&self) -> Result<PeriodSeries>;
}

pub use yaml_backend::{parse_period_label, YamlReadingStore};
