use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::errors::DataError;

use super::Category;

/// Meter readings for one period, keeping the order they were written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readings(Vec<(String, f64)>);

impl Readings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the reading for `person`.
    pub fn insert(&mut self, person: impl Into<String>, value: f64) {
        let person = person.into();
        match self.0.iter_mut().find(|(name, _)| *name == person) {
            Some(slot) => slot.1 = value,
            None => self.0.push((person, value)),
        }
    }

    pub fn get(&self, person: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == person)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Readings {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut readings = Readings::new();
        for (person, value) in iter {
            readings.insert(person, value);
        }
        readings
    }
}

impl Serialize for Readings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Readings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReadingsVisitor;

        impl<'de> Visitor<'de> for ReadingsVisitor {
            type Value = Readings;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of person names to meter readings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Readings, A::Error> {
                let mut readings = Readings::new();
                while let Some((person, value)) = access.next_entry::<String, f64>()? {
                    readings.insert(person, value);
                }
                Ok(readings)
            }
        }

        deserializer.deserialize_map(ReadingsVisitor)
    }
}

/// One billing period's input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRecord {
    pub label: String,
    /// Label used to name the CSV output.
    pub month: String,
    pub readings: Readings,
    pub electric: f64,
    pub water: f64,
    pub internet: f64,
}

impl PeriodRecord {
    pub fn new(label: impl Into<String>, readings: Readings) -> Self {
        let label = label.into();
        Self {
            month: label.clone(),
            label,
            readings,
            electric: 0.0,
            water: 0.0,
            internet: 0.0,
        }
    }

    pub fn with_amounts(mut self, electric: f64, water: f64, internet: f64) -> Self {
        self.electric = electric;
        self.water = water;
        self.internet = internet;
        self
    }

    /// Fixed charge for `category`. `Total` has no charge of its own.
    pub fn amount(&self, category: Category) -> Option<f64> {
        match category {
            Category::Electric => Some(self.electric),
            Category::Water => Some(self.water),
            Category::Internet => Some(self.internet),
            Category::Total => None,
        }
    }

    pub(crate) fn check_finite(&self) -> Result<(), DataError> {
        let amounts = [
            ("electric", self.electric),
            ("water", self.water),
            ("internet", self.internet),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(DataError::NonFinite {
                    period: self.label.clone(),
                    field: field.into(),
                });
            }
        }
        for (person, value) in self.readings.iter() {
            if !value.is_finite() {
                return Err(DataError::NonFinite {
                    period: self.label.clone(),
                    field: format!("readings.{person}"),
                });
            }
        }
        Ok(())
    }
}

/// Billing periods ordered newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSeries {
    periods: Vec<PeriodRecord>,
}

impl PeriodSeries {
    /// Builds a series from newest-first records.
    pub fn new(periods: Vec<PeriodRecord>) -> Result<Self, DataError> {
        if periods.len() < 2 {
            return Err(DataError::InsufficientPeriods {
                found: periods.len(),
            });
        }
        for period in &periods {
            period.check_finite()?;
        }
        Ok(Self { periods })
    }

    pub fn current(&self) -> &PeriodRecord {
        &self.periods[0]
    }

    pub fn previous(&self) -> &PeriodRecord {
        &self.periods[1]
    }

    pub fn periods(&self) -> &[PeriodRecord] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
