use crate::{
    domain::{Adjustment, AdjustmentPolicy, Category, Column, LedgerDelta, PeriodSeries},
    errors::ComputationError,
    utils::round3,
};

use super::require_share_count;

type Result<T> = std::result::Result<T, ComputationError>;

/// Consumption and raw electric share per person, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricShares {
    pub consumption: LedgerDelta,
    pub raw: LedgerDelta,
}

impl ElectricShares {
    /// Splits `amount` by each person's share of the period's consumption.
    pub fn compute(series: &PeriodSeries) -> Result<Self> {
        let current = series.current();
        let previous = &series.previous().readings;

        let mut consumption = LedgerDelta::new(Column::Consumption);
        for (person, reading) in current.readings.iter() {
            let used = reading - previous.get(person).unwrap_or(0.0);
            if used < 0.0 {
                return Err(ComputationError::NegativeConsumption {
                    person: person.to_string(),
                    consumption: used,
                });
            }
            if previous.get(person).is_none() {
                tracing::info!(%person, "no previous reading, counting the full meter value");
            }
            consumption.push(person, used);
        }

        let total: f64 = consumption.values.iter().map(|(_, used)| used).sum();
        if total == 0.0 {
            return Err(ComputationError::ZeroConsumption {
                category: Category::Electric,
            });
        }

        let mut raw = LedgerDelta::new(Column::ElectricRaw);
        for (person, used) in &consumption.values {
            let due = current.electric * (used / total);
            if !due.is_finite() {
                return Err(ComputationError::NonFinite {
                    category: Category::Electric,
                });
            }
            raw.push(person.clone(), round3(due));
        }

        Ok(Self { consumption, raw })
    }
}

/// Hands the adjustment person's raw share to everyone else.
///
/// The person's own share is removed in full. Up to the threshold amount is
/// divided by `share_count` and added to every other participant; anything
/// above the threshold goes to the beneficiary. Without an adjustment the raw
/// shares are carried over unchanged.
pub fn adjust_electric(
    raw: &LedgerDelta,
    share_count: u32,
    adjustment: Option<&Adjustment>,
) -> Result<LedgerDelta> {
    let mut adjusted = LedgerDelta::new(Column::ElectricAdjusted);
    let Some(adjustment) = adjustment else {
        for (person, share) in &raw.values {
            adjusted.push(person.clone(), *share);
        }
        return Ok(adjusted);
    };

    let divisor = require_share_count(share_count, Category::Electric)?;
    let unknown = |person: &str| ComputationError::UnknownParticipant {
        person: person.to_string(),
        category: Category::Electric,
    };

    let adjustment_amount = raw
        .get(&adjustment.person)
        .ok_or_else(|| unknown(&adjustment.person))?;
    let (distributable, excess, beneficiary) = match &adjustment.policy {
        AdjustmentPolicy::Threshold(threshold) => {
            if threshold.beneficiary == adjustment.person {
                return Err(ComputationError::SelfBeneficiary {
                    person: adjustment.person.clone(),
                });
            }
            if raw.get(&threshold.beneficiary).is_none() {
                return Err(unknown(&threshold.beneficiary));
            }
            (
                adjustment_amount.min(threshold.amount),
                (adjustment_amount - threshold.amount).max(0.0),
                Some(threshold.beneficiary.as_str()),
            )
        }
        AdjustmentPolicy::EvenSplit => (adjustment_amount, 0.0, None),
    };

    let amount_to_share = round3(distributable / divisor);
    tracing::debug!(
        person = %adjustment.person,
        adjustment_amount,
        amount_to_share,
        excess,
        "redistributing electric share"
    );

    for (person, share) in &raw.values {
        let mut delta = if *person == adjustment.person {
            -adjustment_amount
        } else {
            amount_to_share
        };
        if beneficiary == Some(person.as_str()) {
            delta += excess;
        }
        adjusted.push(person.clone(), round3(delta + share));
    }
    Ok(adjusted)
}

/// Consumption, raw share and adjusted share columns for the electric bill.
pub fn electric_deltas(
    series: &PeriodSeries,
    share_count: u32,
    adjustment: Option<&Adjustment>,
) -> Result<Vec<LedgerDelta>> {
    require_share_count(share_count, Category::Electric)?;
    let shares = ElectricShares::compute(series)?;
    let adjusted = adjust_electric(&shares.raw, share_count, adjustment)?;
    Ok(vec![shares.consumption, shares.raw, adjusted])
}
