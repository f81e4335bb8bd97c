//! Command-line entry point: load, allocate, render.

use std::{
    io::{self, IsTerminal, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};

use crate::{
    config::ConfigManager,
    engine::{allocate, consumption_report},
    errors::{BillError, CliError},
    output::{CsvOutput, JsonOutput, OutputStrategy, TableOutput},
    storage::{ReadingStore, YamlReadingStore},
};

/// Split shared household utility bills for the latest billing period.
#[derive(Debug, Parser)]
#[command(name = "bill_split", version, about, long_about = None)]
pub struct Cli {
    /// Period series (YAML) with meter readings and bill amounts
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Roster and allocation rules (YAML); built-in defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for `<month>.csv`; overrides `output_dir` from the config
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Format printed on stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also print the meter readings behind the electric split
    #[arg(long)]
    pub details: bool,

    /// Skip writing the CSV file
    #[arg(long)]
    pub no_csv: bool,

    /// ASCII table without styling (implied when stdout is not a terminal)
    #[arg(long)]
    pub plain: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Parses arguments, initializes logging and runs one calculation.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    crate::init(cli.verbose);
    run(&cli)
}

pub fn run(cli: &Cli) -> Result<(), CliError> {
    let config = ConfigManager::new(cli.config.clone()).load()?;
    let series = YamlReadingStore::new(&cli.input).load()?;
    config.check_readings(&series);

    let ledger = allocate(&series, &config.rules())?;
    let current = series.current();

    match cli.format {
        OutputFormat::Table => {
            let table = TableOutput::new(cli.plain || !io::stdout().is_terminal());
            if cli.details {
                let report = table.render_report(&consumption_report(&series));
                writeln!(io::stdout().lock(), "{report}\n")
                    .map_err(|err| BillError::output("stdout", err))?;
            }
            table.output(&ledger)?;
        }
        OutputFormat::Json => JsonOutput::new(current.label.clone()).output(&ledger)?,
    }

    if !cli.no_csv {
        let dir = cli
            .output_dir
            .clone()
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let csv = CsvOutput::for_month(&dir, checked_file_stem(&current.month)?);
        csv.output(&ledger)?;
    }
    Ok(())
}

fn checked_file_stem(month: &str) -> Result<&str, CliError> {
    let trimmed = month.trim();
    let single_component = Path::new(trimmed).components().count() == 1;
    if trimmed.is_empty() || !single_component || trimmed.contains(['/', '\\']) || trimmed == ".." {
        return Err(CliError::Input(format!(
            "month label `{month}` cannot be used as a file name"
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels_must_be_plain_file_names() {
        assert_eq!(checked_file_stem("March 2024").unwrap(), "March 2024");
        assert!(checked_file_stem("../March").is_err());
        assert!(checked_file_stem("2024/03").is_err());
        assert!(checked_file_stem("  ").is_err());
    }

    #[test]
    fn input_flag_is_required() {
        assert!(Cli::try_parse_from(["bill_split"]).is_err());
        let cli = Cli::try_parse_from(["bill_split", "-i", "bills.yaml", "-vv", "--format", "json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("bills.yaml"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.no_csv);
    }
}
