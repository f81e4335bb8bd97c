use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use chrono::{Months, NaiveDate};
use serde::Deserialize;
use serde_yaml::Value;

use crate::{
    domain::{PeriodRecord, PeriodSeries, Readings},
    errors::DataError,
};

use super::{ReadingStore, Result};

/// Loads a period series from a YAML document.
///
/// Two layouts are accepted: a map keyed by period label (`March 2024: {...}`),
/// sorted newest-first by the label's date, or a list of periods that carry a
/// `month` label and are already newest-first.
#[derive(Debug, Clone)]
pub struct YamlReadingStore {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawPeriod {
    #[serde(default)]
    month: Option<String>,
    readings: Readings,
    #[serde(default, alias = "amount")]
    electric: f64,
    #[serde(default)]
    water: f64,
    #[serde(default)]
    internet: f64,
}

impl RawPeriod {
    fn into_record(self, label: String) -> PeriodRecord {
        let month = self.month.unwrap_or_else(|| label.clone());
        let mut record =
            PeriodRecord::new(label, self.readings).with_amounts(self.electric, self.water, self.internet);
        record.month = month;
        record
    }
}

impl YamlReadingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses an in-memory document; `load` reads the file and calls this.
    pub fn parse(&self, contents: &str) -> Result<PeriodSeries> {
        let document: Value = if contents.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(contents).map_err(|err| self.parse_error(err))?
        };
        let periods = match document {
            Value::Mapping(mapping) => self.keyed_periods(mapping)?,
            Value::Sequence(items) => self.listed_periods(items)?,
            Value::Null => Vec::new(),
            _ => {
                return Err(DataError::Parse {
                    path: self.path.clone(),
                    message: "expected a map of periods or a list of periods".into(),
                })
            }
        };
        tracing::info!(path = %self.path.display(), periods = periods.len(), "loaded period series");
        PeriodSeries::new(periods)
    }

    fn keyed_periods(&self, mapping: serde_yaml::Mapping) -> Result<Vec<PeriodRecord>> {
        let mut dated = Vec::with_capacity(mapping.len());
        let mut seen = HashSet::new();
        for (key, value) in mapping {
            let label = match key {
                Value::String(label) => label,
                other => {
                    return Err(DataError::Parse {
                        path: self.path.clone(),
                        message: format!("period key {other:?} is not a label"),
                    })
                }
            };
            if !seen.insert(label.clone()) {
                return Err(DataError::DuplicateLabel(label));
            }
            let date = parse_period_label(&label)?;
            let raw: RawPeriod = serde_yaml::from_value(value).map_err(|err| self.parse_error(err))?;
            dated.push((date, raw.into_record(label)));
        }
        dated.sort_by(|a, b| b.0.cmp(&a.0));

        if let [(current, current_record), (previous, previous_record), ..] = dated.as_slice() {
            if current.checked_sub_months(Months::new(1)) != Some(*previous) {
                tracing::warn!(
                    current = %current_record.label,
                    previous = %previous_record.label,
                    "previous period is not the preceding calendar month"
                );
            }
        }

        Ok(dated.into_iter().map(|(_, record)| record).collect())
    }

    fn listed_periods(&self, items: Vec<Value>) -> Result<Vec<PeriodRecord>> {
        let mut periods = Vec::with_capacity(items.len());
        let mut seen = HashSet::new();
        for (idx, item) in items.into_iter().enumerate() {
            let raw: RawPeriod = serde_yaml::from_value(item).map_err(|err| self.parse_error(err))?;
            let label = raw.month.clone().ok_or_else(|| DataError::Parse {
                path: self.path.clone(),
                message: format!("period #{} has no `month` label", idx + 1),
            })?;
            if !seen.insert(label.clone()) {
                return Err(DataError::DuplicateLabel(label));
            }
            periods.push(raw.into_record(label));
        }
        Ok(periods)
    }

    fn parse_error(&self, err: serde_yaml::Error) -> DataError {
        DataError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

impl ReadingStore for YamlReadingStore {
    fn load(&self) -> Result<PeriodSeries> {
        let contents = fs::read_to_string(&self.path).map_err(|source| DataError::Read {
            path: self.path.clone(),
            source,
        })?;
        self.parse(&contents)
    }
}

/// Parses labels such as `March 2024` into the first day of that month.
pub fn parse_period_label(label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01 {}", label.trim()), "%d %B %Y")
        .map_err(|_| DataError::InvalidLabel(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYED: &str = r#"
February 2024:
  readings: { Jack: 1000, Ian: 800 }
  electric: 1800
March 2024:
  readings: { Jack: 1500, Ian: 1200 }
  electric: 2000
  water: 600
  internet: 1500
January 2024:
  readings: { Jack: 400, Ian: 300 }
  amount: 1700
"#;

    fn store() -> YamlReadingStore {
        YamlReadingStore::new("bills.yaml")
    }

    #[test]
    fn keyed_series_is_sorted_newest_first() {
        let series = store().parse(KEYED).expect("valid document");
        let labels: Vec<&str> = series.periods().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["March 2024", "February 2024", "January 2024"]);
        assert_eq!(series.current().month, "March 2024");
        assert_eq!(series.current().internet, 1500.0);
        assert_eq!(series.periods()[2].electric, 1700.0);
    }

    #[test]
    fn listed_series_keeps_document_order() {
        let doc = r#"
- month: April
  readings: { Jack: 20 }
  electric: 10
- month: March
  readings: { Jack: 10 }
"#;
        let series = store().parse(doc).expect("valid document");
        assert_eq!(series.current().month, "April");
        assert_eq!(series.previous().readings.get("Jack"), Some(10.0));
        assert_eq!(series.previous().water, 0.0);
    }

    #[test]
    fn single_period_is_a_data_error() {
        let doc = "March 2024:\n  readings: { Jack: 1 }\n";
        let err = store().parse(doc).expect_err("one period");
        assert!(matches!(err, DataError::InsufficientPeriods { found: 1 }));
    }

    #[test]
    fn empty_document_is_a_data_error() {
        let err = store().parse("").expect_err("empty");
        assert!(matches!(err, DataError::InsufficientPeriods { found: 0 }));
    }

    #[test]
    fn unparseable_label_is_reported() {
        let doc = "Spring:\n  readings: { Jack: 1 }\nMarch 2024:\n  readings: { Jack: 2 }\n";
        let err = store().parse(doc).expect_err("bad label");
        assert!(matches!(err, DataError::InvalidLabel(ref label) if label == "Spring"));
    }

    #[test]
    fn listed_period_without_month_is_rejected() {
        let doc = "- readings: { Jack: 1 }\n- month: March\n  readings: { Jack: 0 }\n";
        let err = store().parse(doc).expect_err("no month");
        assert!(err.to_string().contains("period #1"));
    }

    #[test]
    fn duplicate_listed_labels_are_rejected() {
        let doc = "- month: March\n  readings: { Jack: 1 }\n- month: March\n  readings: { Jack: 0 }\n";
        let err = store().parse(doc).expect_err("duplicate");
        assert!(matches!(err, DataError::DuplicateLabel(ref label) if label == "March"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = YamlReadingStore::new("/definitely/not/here.yaml")
            .load()
            .expect_err("missing file");
        assert!(matches!(err, DataError::Read { .. }));
    }

    #[test]
    fn malformed_readings_are_a_parse_error() {
        let doc = "March 2024:\n  readings: [1, 2]\nFebruary 2024:\n  readings: { Jack: 0 }\n";
        let err = store().parse(doc).expect_err("readings must be a map");
        assert!(matches!(err, DataError::Parse { .. }));
    }
}
