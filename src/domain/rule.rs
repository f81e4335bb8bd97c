use serde::{Deserialize, Serialize};

use super::Category;

/// Cap on the privileged person's redistributed share; the remainder goes to
/// `beneficiary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub amount: f64,
    #[serde(rename = "key")]
    pub beneficiary: String,
}

/// How the privileged person's electric share is handed to everyone else.
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentPolicy {
    /// Up to `amount` is split by the share count, the excess goes to the
    /// beneficiary.
    Threshold(Threshold),
    /// Older behaviour: the whole share is split by the share count.
    EvenSplit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub person: String,
    pub policy: AdjustmentPolicy,
}

impl Adjustment {
    pub fn threshold(person: impl Into<String>, amount: f64, beneficiary: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            policy: AdjustmentPolicy::Threshold(Threshold {
                amount,
                beneficiary: beneficiary.into(),
            }),
        }
    }

    pub fn even_split(person: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            policy: AdjustmentPolicy::EvenSplit,
        }
    }
}

/// One allocation step. Rules run in the order given to
/// [`allocate`](crate::engine::allocate).
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationRule {
    /// Electric: split by metered consumption, then adjust. Seeds the ledger.
    ConsumptionBased {
        share_count: u32,
        adjustment: Option<Adjustment>,
    },
    /// Equal split of a fixed charge among eligible persons.
    FixedSplit {
        category: Category,
        share_count: u32,
        eligible: Vec<String>,
    },
    /// Sum of the adjusted electric, water and internet columns.
    Total,
}

impl AllocationRule {
    pub fn category(&self) -> Category {
        match self {
            AllocationRule::ConsumptionBased { .. } => Category::Electric,
            AllocationRule::FixedSplit { category, .. } => *category,
            AllocationRule::Total => Category::Total,
        }
    }
}
