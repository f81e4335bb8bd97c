use std::io::{self, Write};

use colored::Colorize;

use crate::{
    domain::Ledger,
    engine::ConsumptionReport,
    errors::{BillError, Result},
    utils::format_amount,
};

use super::{ledger_rows, total_row_cells, OutputStrategy, HEADERS};

const PADDING: usize = 1;

/// Names sit on the left, amounts on the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            header: header.into(),
            alignment,
        }
    }
}

/// Plain-text cells laid out under a header, with an optional footer row
/// set off by a rule. Styling is applied to whole lines after layout.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub footer: Option<Vec<String>>,
    /// ASCII rules and no styling.
    pub plain: bool,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>, rows: Vec<Vec<String>>) -> Self {
        Self {
            columns,
            rows,
            footer: None,
            plain: true,
        }
    }

    /// Widest cell per column, header and footer included.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .chain(self.footer.iter())
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(column.header.chars().count(), usize::max)
            })
            .collect()
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment)
            })
            .collect();
        cells.join(" ").trim_end().to_string()
    }

    fn emphasise(&self, line: String) -> String {
        if self.plain {
            line
        } else {
            line.bold().to_string()
        }
    }

    /// Header, rule, rows, then the footer under a second rule.
    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let rule = horizontal_rule(&widths, self.plain);
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(self.emphasise(self.render_row(&header, &widths)));
        lines.push(rule.clone());
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        if let Some(footer) = &self.footer {
            lines.push(rule);
            lines.push(self.emphasise(self.render_row(footer, &widths)));
        }
        lines.join("\n")
    }
}

/// Pads `text` to `width` on the side opposite its alignment.
pub fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let pad = " ".repeat(PADDING);
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    match alignment {
        Alignment::Left => format!("{pad}{text}{fill}{pad}"),
        Alignment::Right => format!("{pad}{fill}{text}{pad}"),
    }
}

pub fn horizontal_rule(widths: &[usize], plain: bool) -> String {
    if widths.is_empty() {
        return String::new();
    }
    let total: usize = widths.iter().map(|w| w + PADDING * 2).sum::<usize>() + widths.len() - 1;
    let ch = if plain { '-' } else { '─' };
    ch.to_string().repeat(total)
}

fn ledger_columns() -> Vec<TableColumn> {
    HEADERS
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let alignment = if idx == 0 { Alignment::Left } else { Alignment::Right };
            TableColumn::new(*header, alignment)
        })
        .collect()
}

/// Prints the ledger as an aligned table with a trailing `Total` row.
#[derive(Debug, Clone, Default)]
pub struct TableOutput {
    pub plain: bool,
}

impl TableOutput {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    pub fn render(&self, ledger: &Ledger) -> String {
        let mut table = Table::new(ledger_columns(), ledger_rows(ledger));
        table.footer = Some(total_row_cells(ledger));
        table.plain = self.plain;
        table.render()
    }

    pub fn write_to(&self, ledger: &Ledger, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", self.render(ledger))
    }

    /// Renders the meter breakdown behind the electric split.
    pub fn render_report(&self, report: &ConsumptionReport) -> String {
        let columns = vec![
            TableColumn::new("Person", Alignment::Left),
            TableColumn::new("Previous Reading", Alignment::Right),
            TableColumn::new("Current Reading", Alignment::Right),
            TableColumn::new("Consumption", Alignment::Right),
            TableColumn::new("Percentage", Alignment::Right),
        ];
        let rows = report
            .lines
            .iter()
            .map(|line| {
                vec![
                    line.person.clone(),
                    format_amount(line.previous),
                    format_amount(line.current),
                    format_amount(line.consumption),
                    format!("{:.2}%", line.percentage),
                ]
            })
            .collect();
        let mut table = Table::new(columns, rows);
        table.plain = self.plain;
        format!(
            "Electricity consumption, {} to {}\n{}",
            report.previous_period,
            report.period,
            table.render()
        )
    }
}

impl OutputStrategy for TableOutput {
    fn output(&self, ledger: &Ledger) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(ledger, &mut handle)
            .map_err(|err| BillError::output("stdout", err))
    }
}
