//! Plain-text table rendering for the teller.

use std::io::{self, Write};

use qpbank_common::format_local;
use qpbank_ledger::TransactionRecord;

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A titled, boxed table.
#[derive(Debug, Clone)]
pub struct Table {
    title: String,
    headers: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with a title line.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Add a column.
    pub fn add_column(&mut self, header: impl Into<String>, align: Align) -> &mut Self {
        self.headers.push((header.into(), align));
        self
    }

    /// Add a row. Missing cells render empty; extra cells are ignored.
    pub fn add_row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, (header, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Write the table.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let widths = self.widths();
        let border = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );
        let inner = border.chars().count();

        writeln!(out, "{}", pad(&self.title, inner, Align::Center).trim_end())?;
        writeln!(out, "{}", border)?;

        let header: Vec<String> = self.headers.iter().map(|(h, _)| h.clone()).collect();
        self.render_row(out, &header, &widths, true)?;
        writeln!(out, "{}", border)?;

        for row in &self.rows {
            self.render_row(out, row, &widths, false)?;
        }
        writeln!(out, "{}", border)
    }

    fn render_row(
        &self,
        out: &mut impl Write,
        cells: &[String],
        widths: &[usize],
        header: bool,
    ) -> io::Result<()> {
        let rendered: Vec<String> = self
            .headers
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, ((_, align), width))| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                let align = if header { Align::Center } else { *align };
                format!(" {} ", pad(cell, *width, align))
            })
            .collect();

        writeln!(out, "|{}|", rendered.join("|"))
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let gap = width - len;
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
    }
}

/// Menu entries in display order.
pub const MENU_ITEMS: [(&str, &str); 7] = [
    ("[1]", "Create an account."),
    ("[2]", "Access your account information."),
    ("[3]", "Make a deposit."),
    ("[4]", "Make a withdrawal."),
    ("[5]", "Transfer money."),
    ("[6]", "View transaction history."),
    ("[7]", "Quit system."),
];

/// Write the main menu.
pub fn menu(out: &mut impl Write, bank_name: &str) -> io::Result<()> {
    let mut table = Table::new(format!(
        "Welcome to {}. Select an option number.",
        bank_name
    ));
    table
        .add_column("Number", Align::Center)
        .add_column("Option", Align::Left);
    for (number, option) in MENU_ITEMS {
        table.add_row([number, option]);
    }
    table.render(out)
}

/// Write a holder's history as a table.
pub fn history_table(
    out: &mut impl Write,
    display_name: &str,
    records: &[TransactionRecord],
) -> io::Result<()> {
    let mut table = Table::new(format!("{}'s Transaction History", display_name));
    table
        .add_column("Timestamp", Align::Center)
        .add_column("Details", Align::Left);
    for record in records {
        table.add_row([format_local(record.timestamp), record.detail()]);
    }
    table.render(out)
}

/// Write a holder's history as pretty JSON.
pub fn history_json(out: &mut impl Write, records: &[TransactionRecord]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    writeln!(out, "{}", json)
}
