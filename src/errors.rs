use std::{io, path::PathBuf};

use thiserror::Error;

use crate::domain::{Category, Column};

/// Failures raised while loading the period series or configuration.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed document `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("at least 2 periods are required, found {found}")]
    InsufficientPeriods { found: usize },
    #[error("period label `{0}` is not of the form `<Month> <year>`")]
    InvalidLabel(String),
    #[error("period `{0}` appears more than once")]
    DuplicateLabel(String),
    #[error("period `{period}` has a non-finite value for `{field}`")]
    NonFinite { period: String, field: String },
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Failures raised by the allocation engine. Any of these aborts the pass.
#[derive(Debug, Error, PartialEq)]
pub enum ComputationError {
    #[error("total {category} consumption is zero; shares cannot be computed")]
    ZeroConsumption { category: Category },
    #[error("{person} has negative consumption ({consumption})")]
    NegativeConsumption { person: String, consumption: f64 },
    #[error("{person} is not a participant in the ledger (required by {category})")]
    UnknownParticipant { person: String, category: Category },
    #[error("{person} is missing the `{column}` column")]
    MissingColumn { person: String, column: Column },
    #[error("{person} already has a value for `{column}`")]
    ColumnAlreadySet { person: String, column: Column },
    #[error("{category} produced a non-finite amount")]
    NonFinite { category: Category },
    #[error("{category} share count must be greater than zero")]
    InvalidShareCount { category: Category },
    #[error("{person} cannot receive the excess of their own electric share")]
    SelfBeneficiary { person: String },
    #[error("{category} has no fixed amount to split")]
    NoAmount { category: Category },
    #[error("no participants were discovered before {category} ran")]
    EmptyLedger { category: Category },
}

/// Top-level error for a calculation run.
#[derive(Debug, Error)]
pub enum BillError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
    #[error("failed writing {target}: {source}")]
    Output {
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("failed writing {target}: {message}")]
    Csv { target: String, message: String },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl BillError {
    pub fn output(target: impl Into<String>, source: io::Error) -> Self {
        BillError::Output {
            target: target.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BillError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BillError),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<DataError> for CliError {
    fn from(err: DataError) -> Self {
        CliError::from(BillError::from(err))
    }
}
