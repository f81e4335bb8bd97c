//! Presentation adapters. They only read a finished [`Ledger`].

pub mod delimited;
pub mod json;
pub mod table;

use crate::{
    domain::{Column, Ledger},
    errors::Result,
    utils::{format_amount, round3},
};

pub use delimited::CsvOutput;
pub use json::JsonOutput;
pub use table::TableOutput;

pub const HEADERS: [&str; 7] = [
    "Name",
    "Veco",
    "Electric Amount",
    "Electric Adjusted",
    "Water",
    "Internet",
    "Total",
];

pub const TOTAL_LABEL: &str = "Total";

/// A destination for a finished ledger.
pub trait OutputStrategy {
    fn output(&self, ledger: &Ledger) -> Result<()>;
}

/// Per-column sums over every person, in [`Column::ALL`] order.
///
/// Summed here from the rows rather than taken from the engine, so the
/// rendered totals double as a cross-check of the ledger.
pub fn total_row(ledger: &Ledger) -> [f64; 6] {
    let mut sums = [0.0; 6];
    for row in ledger.rows() {
        for (sum, value) in sums.iter_mut().zip(row.entry.values()) {
            *sum += value;
        }
    }
    sums.map(round3)
}

pub(crate) fn total_row_cells(ledger: &Ledger) -> Vec<String> {
    std::iter::once(TOTAL_LABEL.to_string())
        .chain(total_row(ledger).into_iter().map(format_amount))
        .collect()
}

/// One row of display cells per person.
pub(crate) fn ledger_rows(ledger: &Ledger) -> Vec<Vec<String>> {
    ledger
        .rows()
        .iter()
        .map(|row| {
            std::iter::once(row.name.clone())
                .chain(Column::ALL.iter().map(|column| format_amount(row.entry.value(*column))))
                .collect()
        })
        .collect()
}
