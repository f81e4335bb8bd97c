use std::io::{self, Write};

use serde::Serialize;

use crate::{
    domain::{Column, Ledger, LedgerEntry, LedgerRow},
    errors::{BillError, Result},
};

use super::{total_row, OutputStrategy, TOTAL_LABEL};

#[derive(Serialize)]
struct JsonDocument<'a> {
    period: &'a str,
    rows: &'a [LedgerRow],
    total: LedgerRow,
}

/// Prints the ledger and its `Total` row as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonOutput {
    period: String,
}

impl JsonOutput {
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
        }
    }

    pub fn render(&self, ledger: &Ledger) -> Result<String> {
        let sums = total_row(ledger);
        let sum = |column: Column| sums[column.index()];
        let document = JsonDocument {
            period: &self.period,
            rows: ledger.rows(),
            total: LedgerRow {
                name: TOTAL_LABEL.to_string(),
                entry: LedgerEntry {
                    consumption: sum(Column::Consumption),
                    electric_raw: sum(Column::ElectricRaw),
                    electric_adjusted: sum(Column::ElectricAdjusted),
                    water: sum(Column::Water),
                    internet: sum(Column::Internet),
                    total: sum(Column::Total),
                },
            },
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl OutputStrategy for JsonOutput {
    fn output(&self, ledger: &Ledger) -> Result<()> {
        let rendered = self.render(ledger)?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{rendered}").map_err(|err| BillError::output("stdout", err))
    }
}
