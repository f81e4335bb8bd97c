use serde::Serialize;

use crate::domain::PeriodSeries;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionLine {
    pub person: String,
    pub previous: f64,
    pub current: f64,
    pub consumption: f64,
    /// Share of the period's total consumption, 0–100.
    pub percentage: f64,
}

/// Meter detail behind the electric split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionReport {
    pub period: String,
    pub previous_period: String,
    pub total_consumption: f64,
    pub lines: Vec<ConsumptionLine>,
}

/// Builds the per-person meter breakdown for the current period. When nothing
/// was consumed every percentage is zero.
pub fn consumption_report(series: &PeriodSeries) -> ConsumptionReport {
    let current = series.current();
    let previous = series.previous();

    let mut lines: Vec<ConsumptionLine> = current
        .readings
        .iter()
        .map(|(person, reading)| {
            let before = previous.readings.get(person).unwrap_or(0.0);
            ConsumptionLine {
                person: person.to_string(),
                previous: before,
                current: reading,
                consumption: reading - before,
                percentage: 0.0,
            }
        })
        .collect();

    let total_consumption: f64 = lines.iter().map(|line| line.consumption).sum();
    if total_consumption != 0.0 {
        for line in &mut lines {
            line.percentage = line.consumption / total_consumption * 100.0;
        }
    }

    ConsumptionReport {
        period: current.label.clone(),
        previous_period: previous.label.clone(),
        total_consumption,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PeriodRecord, Readings};

    fn readings(pairs: &[(&str, f64)]) -> Readings {
        pairs.iter().map(|(name, value)| (*name, *value)).collect()
    }

    #[test]
    fn percentages_cover_total_consumption() {
        let current = PeriodRecord::new("March 2024", readings(&[("Jack", 150.0), ("Ian", 60.0), ("Nia", 40.0)]));
        let previous = PeriodRecord::new("February 2024", readings(&[("Jack", 100.0), ("Ian", 50.0)]));
        let series = PeriodSeries::new(vec![current, previous]).unwrap();

        let report = consumption_report(&series);
        assert_eq!(report.total_consumption, 100.0);
        assert_eq!(report.previous_period, "February 2024");
        let nia = &report.lines[2];
        assert_eq!((nia.previous, nia.current, nia.consumption), (0.0, 40.0, 40.0));
        assert_eq!(nia.percentage, 40.0);
        let sum: f64 = report.lines.iter().map(|line| line.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_consumption_reports_zero_percentages() {
        let current = PeriodRecord::new("March 2024", readings(&[("Jack", 10.0)]));
        let previous = PeriodRecord::new("February 2024", readings(&[("Jack", 10.0)]));
        let series = PeriodSeries::new(vec![current, previous]).unwrap();
        let report = consumption_report(&series);
        assert_eq!(report.lines[0].percentage, 0.0);
    }
}
