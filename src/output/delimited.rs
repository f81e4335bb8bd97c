use std::path::{Path, PathBuf};

use crate::{
    domain::Ledger,
    errors::{BillError, Result},
    utils::persistence::write_atomic,
};

use super::{ledger_rows, total_row_cells, OutputStrategy, HEADERS};

/// Writes the ledger as CSV, header first and the `Total` row last.
#[derive(Debug, Clone)]
pub struct CsvOutput {
    path: PathBuf,
}

impl CsvOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/<month>.csv`
    pub fn for_month(dir: &Path, month: &str) -> Self {
        Self::new(dir.join(format!("{month}.csv")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders the CSV document in memory.
    pub fn to_bytes(&self, ledger: &Ledger) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        let records = std::iter::once(header)
            .chain(ledger_rows(ledger))
            .chain(std::iter::once(total_row_cells(ledger)));
        for record in records {
            writer.write_record(&record).map_err(|err| self.csv_error(err))?;
        }
        writer
            .into_inner()
            .map_err(|err| self.csv_error(err.into_error().into()))
    }

    fn csv_error(&self, err: csv::Error) -> BillError {
        BillError::Csv {
            target: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl OutputStrategy for CsvOutput {
    fn output(&self, ledger: &Ledger) -> Result<()> {
        let bytes = self.to_bytes(ledger)?;
        write_atomic(&self.path, &bytes)
            .map_err(|err| BillError::output(self.path.display().to_string(), err))?;
        tracing::info!(path = %self.path.display(), rows = ledger.len(), "wrote csv ledger");
        Ok(())
    }
}
