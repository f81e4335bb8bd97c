use serde::Serialize;

use crate::errors::ComputationError;

use super::{Category, Column};

/// Charges for one person across every category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub consumption: f64,
    pub electric_raw: f64,
    pub electric_adjusted: f64,
    pub water: f64,
    pub internet: f64,
    pub total: f64,
}

impl LedgerEntry {
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Consumption => self.consumption,
            Column::ElectricRaw => self.electric_raw,
            Column::ElectricAdjusted => self.electric_adjusted,
            Column::Water => self.water,
            Column::Internet => self.internet,
            Column::Total => self.total,
        }
    }

    /// Values in [`Column::ALL`] order.
    pub fn values(&self) -> [f64; 6] {
        Column::ALL.map(|column| self.value(column))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    pub name: String,
    #[serde(flatten)]
    pub entry: LedgerEntry,
}

/// Finished allocation: one row per participant, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn get(&self, person: &str) -> Option<&LedgerEntry> {
        self.rows
            .iter()
            .find(|row| row.name == person)
            .map(|row| &row.entry)
    }

    pub fn persons(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.name.as_str())
    }

    /// Sum of `column` over every participant.
    pub fn column_sum(&self, column: Column) -> f64 {
        self.rows.iter().map(|row| row.entry.value(column)).sum()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Values produced by one rule for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerDelta {
    pub column: Column,
    pub values: Vec<(String, f64)>,
}

impl LedgerDelta {
    pub fn new(column: Column) -> Self {
        Self {
            column,
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, person: impl Into<String>, value: f64) {
        self.values.push((person.into(), value));
    }

    pub fn get(&self, person: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == person)
            .map(|(_, value)| *value)
    }
}

#[derive(Debug, Clone)]
struct Draft {
    name: String,
    cells: [Option<f64>; 6],
}

/// Accumulates rule output and only yields a [`Ledger`] once every
/// participant has every column.
#[derive(Debug, Clone, Default)]
pub struct LedgerBuilder {
    drafts: Vec<Draft>,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers participants. Already known names are left untouched.
    pub fn seed<'a>(&mut self, persons: impl IntoIterator<Item = &'a str>) {
        for person in persons {
            if !self.contains(person) {
                self.drafts.push(Draft {
                    name: person.to_string(),
                    cells: [None; 6],
                });
            }
        }
    }

    pub fn contains(&self, person: &str) -> bool {
        self.drafts.iter().any(|draft| draft.name == person)
    }

    pub fn persons(&self) -> impl Iterator<Item = &str> {
        self.drafts.iter().map(|draft| draft.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Reads a column that an earlier rule must already have filled.
    /// `category` names the rule doing the reading.
    pub fn value(&self, person: &str, column: Column, category: Category) -> Result<f64, ComputationError> {
        let draft = self
            .drafts
            .iter()
            .find(|draft| draft.name == person)
            .ok_or_else(|| ComputationError::UnknownParticipant {
                person: person.to_string(),
                category,
            })?;
        draft.cells[column.index()].ok_or_else(|| ComputationError::MissingColumn {
            person: person.to_string(),
            column,
        })
    }

    /// Writes a rule's output. The whole delta is checked before anything is
    /// written, so a rejected delta leaves the builder unchanged.
    pub fn apply(&mut self, delta: LedgerDelta, category: Category) -> Result<(), ComputationError> {
        let mut targets = Vec::with_capacity(delta.values.len());
        for (person, value) in &delta.values {
            if !value.is_finite() {
                return Err(ComputationError::NonFinite { category });
            }
            let idx = self
                .drafts
                .iter()
                .position(|draft| &draft.name == person)
                .ok_or_else(|| ComputationError::UnknownParticipant {
                    person: person.clone(),
                    category,
                })?;
            if self.drafts[idx].cells[delta.column.index()].is_some() || targets.contains(&idx) {
                return Err(ComputationError::ColumnAlreadySet {
                    person: person.clone(),
                    column: delta.column,
                });
            }
            targets.push(idx);
        }
        for (idx, (_, value)) in targets.into_iter().zip(delta.values) {
            self.drafts[idx].cells[delta.column.index()] = Some(value);
        }
        Ok(())
    }

    pub fn finish(self) -> Result<Ledger, ComputationError> {
        let mut rows = Vec::with_capacity(self.drafts.len());
        for draft in self.drafts {
            let mut values = [0.0; 6];
            for column in Column::ALL {
                values[column.index()] =
                    draft.cells[column.index()].ok_or_else(|| ComputationError::MissingColumn {
                        person: draft.name.clone(),
                        column,
                    })?;
            }
            let [consumption, electric_raw, electric_adjusted, water, internet, total] = values;
            rows.push(LedgerRow {
                name: draft.name,
                entry: LedgerEntry {
                    consumption,
                    electric_raw,
                    electric_adjusted,
                    water,
                    internet,
                    total,
                },
            });
        }
        Ok(Ledger { rows })
    }
}
