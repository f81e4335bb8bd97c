//! Allocation engine: turns a period series and an ordered rule list into a
//! [`Ledger`].
//!
//! Every rule is a pure function from the series and the ledger built so far
//! to a set of [`LedgerDelta`]s. The deltas are applied to a [`LedgerBuilder`]
//! which only yields a ledger once every participant has every column, so a
//! failing rule never leaks a partial result.

pub mod consumption;
pub mod fixed_split;
pub mod report;
pub mod total;

use crate::{
    domain::{AllocationRule, Category, Ledger, LedgerBuilder, LedgerDelta, PeriodSeries},
    errors::{ComputationError, Result},
};

pub use consumption::{adjust_electric, electric_deltas, ElectricShares};
pub use fixed_split::fixed_split_delta;
pub use report::{consumption_report, ConsumptionLine, ConsumptionReport};
pub use total::total_delta;

/// Runs `rules` in order against `series`.
pub fn allocate(series: &PeriodSeries, rules: &[AllocationRule]) -> Result<Ledger> {
    let mut builder = LedgerBuilder::new();

    for rule in rules {
        let category = rule.category();
        tracing::debug!(%category, period = %series.current().label, "applying rule");
        let deltas = rule_deltas(rule, series, &mut builder)?;
        for delta in deltas {
            builder.apply(delta, category)?;
        }
    }

    let ledger = builder.finish()?;
    tracing::info!(
        period = %series.current().label,
        participants = ledger.len(),
        "allocation complete"
    );
    Ok(ledger)
}

fn rule_deltas(
    rule: &AllocationRule,
    series: &PeriodSeries,
    builder: &mut LedgerBuilder,
) -> std::result::Result<Vec<LedgerDelta>, ComputationError> {
    match rule {
        AllocationRule::ConsumptionBased {
            share_count,
            adjustment,
        } => {
            let current = &series.current().readings;
            builder.seed(current.names());
            electric_deltas(series, *share_count, adjustment.as_ref())
        }
        AllocationRule::FixedSplit {
            category,
            share_count,
            eligible,
        } => {
            let amount = series
                .current()
                .amount(*category)
                .ok_or(ComputationError::NoAmount {
                    category: *category,
                })?;
            let delta = fixed_split_delta(builder, *category, amount, *share_count, eligible)?;
            Ok(vec![delta])
        }
        AllocationRule::Total => Ok(vec![total_delta(builder)?]),
    }
}

pub(crate) fn require_share_count(
    share_count: u32,
    category: Category,
) -> std::result::Result<f64, ComputationError> {
    if share_count == 0 {
        Err(ComputationError::InvalidShareCount { category })
    } else {
        Ok(f64::from(share_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Adjustment, Column, PeriodRecord, Readings},
        errors::BillError,
    };

    fn readings(pairs: &[(&str, f64)]) -> Readings {
        pairs.iter().map(|(name, value)| (*name, *value)).collect()
    }

    fn series() -> PeriodSeries {
        let current = PeriodRecord::new(
            "March 2024",
            readings(&[("Jack", 1500.0), ("Ian", 1200.0), ("Ajin", 450.0), ("Papa", 50.0)]),
        )
        .with_amounts(2000.0, 600.0, 1500.0);
        let previous = PeriodRecord::new(
            "February 2024",
            readings(&[("Jack", 1000.0), ("Ian", 800.0), ("Ajin", 350.0), ("Papa", 30.0)]),
        );
        PeriodSeries::new(vec![current, previous]).unwrap()
    }

    fn rules() -> Vec<AllocationRule> {
        vec![
            AllocationRule::ConsumptionBased {
                share_count: 3,
                adjustment: Some(Adjustment::threshold("Papa", 500.0, "Ian")),
            },
            AllocationRule::FixedSplit {
                category: Category::Water,
                share_count: 3,
                eligible: vec!["Jack".into(), "Ian".into(), "Ajin".into()],
            },
            AllocationRule::FixedSplit {
                category: Category::Internet,
                share_count: 2,
                eligible: vec!["Jack".into(), "Ian".into()],
            },
            AllocationRule::Total,
        ]
    }

    #[test]
    fn allocate_fills_every_column() {
        let ledger = allocate(&series(), &rules()).expect("allocation succeeds");
        let jack = ledger.get("Jack").unwrap();
        assert_eq!(jack.consumption, 500.0);
        assert_eq!(jack.electric_raw, 980.392);
        assert_eq!(jack.electric_adjusted, 993.464);
        assert_eq!(jack.water, 200.0);
        assert_eq!(jack.internet, 750.0);
        assert_eq!(jack.total, 1943.464);
        let papa = ledger.get("Papa").unwrap();
        assert_eq!(papa.electric_adjusted, 0.0);
        assert_eq!(papa.total, 0.0);
    }

    #[test]
    fn fixed_split_before_electric_has_no_participants() {
        let mut rules = rules();
        rules.swap(0, 1);
        let err = allocate(&series(), &rules).expect_err("water cannot run first");
        assert!(matches!(
            err,
            BillError::Computation(ComputationError::EmptyLedger {
                category: Category::Water
            })
        ));
    }

    #[test]
    fn missing_total_rule_leaves_ledger_incomplete() {
        let mut rules = rules();
        rules.pop();
        let err = allocate(&series(), &rules).expect_err("total column missing");
        assert!(matches!(
            err,
            BillError::Computation(ComputationError::MissingColumn { column: Column::Total, .. })
        ));
    }

    #[test]
    fn total_before_fixed_splits_is_rejected() {
        let rules = vec![rules().remove(0), AllocationRule::Total];
        let err = allocate(&series(), &rules).expect_err("water column missing");
        assert!(matches!(
            err,
            BillError::Computation(ComputationError::MissingColumn { column: Column::Water, .. })
        ));
    }

    #[test]
    fn allocate_is_repeatable() {
        let first = allocate(&series(), &rules()).unwrap();
        let second = allocate(&series(), &rules()).unwrap();
        assert_eq!(first, second);
    }
}
