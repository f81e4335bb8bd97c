use crate::{
    domain::{Category, Column, LedgerBuilder, LedgerDelta},
    errors::ComputationError,
    utils::round3,
};

/// Columns that make up a person's total.
pub const TOTAL_INPUTS: [Column; 3] = [Column::ElectricAdjusted, Column::Water, Column::Internet];

/// Sums the adjusted electric, water and internet columns per person.
pub fn total_delta(builder: &LedgerBuilder) -> Result<LedgerDelta, ComputationError> {
    if builder.is_empty() {
        return Err(ComputationError::EmptyLedger {
            category: Category::Total,
        });
    }
    let mut delta = LedgerDelta::new(Column::Total);
    for person in builder.persons() {
        let mut sum = 0.0;
        for column in TOTAL_INPUTS {
            sum += builder.value(person, column, Category::Total)?;
        }
        delta.push(person, round3(sum));
    }
    Ok(delta)
}
