use crate::{
    domain::{Category, Column, LedgerBuilder, LedgerDelta},
    errors::ComputationError,
    utils::round3,
};

use super::require_share_count;

fn column_for(category: Category) -> Result<Column, ComputationError> {
    match category {
        Category::Water => Ok(Column::Water),
        Category::Internet => Ok(Column::Internet),
        Category::Electric | Category::Total => Err(ComputationError::NoAmount { category }),
    }
}

/// Equal split of a fixed charge: eligible participants pay
/// `round3(amount / share_count)`, everyone else pays nothing.
///
/// Every eligible person must already be a participant.
pub fn fixed_split_delta(
    builder: &LedgerBuilder,
    category: Category,
    amount: f64,
    share_count: u32,
    eligible: &[String],
) -> Result<LedgerDelta, ComputationError> {
    let column = column_for(category)?;
    let divisor = require_share_count(share_count, category)?;
    if builder.is_empty() {
        return Err(ComputationError::EmptyLedger { category });
    }
    if let Some(stranger) = eligible.iter().find(|person| !builder.contains(person)) {
        return Err(ComputationError::UnknownParticipant {
            person: stranger.clone(),
            category,
        });
    }

    let share = round3(amount / divisor);
    let mut delta = LedgerDelta::new(column);
    for person in builder.persons() {
        let due = if eligible.iter().any(|name| name == person) {
            share
        } else {
            0.0
        };
        delta.push(person, due);
    }
    Ok(delta)
}
