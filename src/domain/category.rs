use std::fmt;

use serde::{Deserialize, Serialize};

/// Bill categories that can be allocated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electric,
    Water,
    Internet,
    Total,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electric => "electric",
            Category::Water => "water",
            Category::Internet => "internet",
            Category::Total => "total",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger fields, listed in rendering order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Consumption,
    ElectricRaw,
    ElectricAdjusted,
    Water,
    Internet,
    Total,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Consumption,
        Column::ElectricRaw,
        Column::ElectricAdjusted,
        Column::Water,
        Column::Internet,
        Column::Total,
    ];

    /// Header shown by the presentation adapters.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Consumption => "Veco",
            Column::ElectricRaw => "Electric Amount",
            Column::ElectricAdjusted => "Electric Adjusted",
            Column::Water => "Water",
            Column::Internet => "Internet",
            Column::Total => "Total",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::Consumption => "consumption",
            Column::ElectricRaw => "electric_raw",
            Column::ElectricAdjusted => "electric_adjusted",
            Column::Water => "water",
            Column::Internet => "internet",
            Column::Total => "total",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_rendering_order() {
        let headers: Vec<&str> = Column::ALL.iter().map(Column::header).collect();
        assert_eq!(
            headers,
            vec![
                "Veco",
                "Electric Amount",
                "Electric Adjusted",
                "Water",
                "Internet",
                "Total"
            ]
        );
        assert_eq!(Column::Water.index(), 3);
    }
}
