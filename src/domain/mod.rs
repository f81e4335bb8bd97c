//! Period inputs, allocation rules and the ledger they produce.

pub mod category;
pub mod ledger;
pub mod period;
pub mod rule;

pub use category::{Category, Column};
pub use ledger::{Ledger, LedgerBuilder, LedgerDelta, LedgerEntry, LedgerRow};
pub use period::{PeriodRecord, PeriodSeries, Readings};
pub use rule::{Adjustment, AdjustmentPolicy, AllocationRule, Threshold};
