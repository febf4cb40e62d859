//! Ledger rows and CSV serialization.

use std::{fs::File, io::Write, path::Path};

use chrono::NaiveDate;

use crate::{budget::ItemKind, errors::CashflowError};

/// Ledger column set, in output order.
pub const LEDGER_COLUMNS: [&str; 10] = [
    "date",
    "name",
    "amount",
    "remaining",
    "total_paid",
    "total_interest",
    "account_balance",
    "interval",
    "type",
    "note",
];

/// One emitted record representing a single transaction's effect on
/// balances and totals.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub name: String,
    pub amount: f64,
    pub remaining: Option<f64>,
    pub total_paid: f64,
    pub total_interest: f64,
    pub account_balance: f64,
    pub interval: &'static str,
    pub kind: ItemKind,
    pub note: String,
}

impl LedgerRow {
    fn record(&self) -> [String; 10] {
        [
            self.date.to_string(),
            self.name.clone(),
            format_money(self.amount),
            self.remaining.map(format_money).unwrap_or_default(),
            format_money(self.total_paid),
            format_money(self.total_interest),
            format_money(self.account_balance),
            self.interval.to_string(),
            self.kind.as_str().to_string(),
            self.note.clone(),
        ]
    }
}

/// Two decimal places; zero renders as the empty string.
pub fn format_money(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{value:.2}")
    }
}

/// Writes the ledger rows, header first, to any writer.
pub fn write_ledger<W: Write>(writer: W, rows: &[LedgerRow]) -> Result<(), CashflowError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(LEDGER_COLUMNS)?;
    for row in rows {
        csv.write_record(row.record())?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the ledger to a file path, flushed before returning.
pub fn write_ledger_file(path: &Path, rows: &[LedgerRow]) -> Result<(), CashflowError> {
    let file = File::create(path)?;
    write_ledger(file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_money_two_decimals() {
        assert_eq!(format_money(810.0), "810.00");
        assert_eq!(format_money(-500.0), "-500.00");
        assert_eq!(format_money(10.005), "10.01");
    }

    #[test]
    fn format_money_zero_is_empty() {
        assert_eq!(format_money(0.0), "");
    }

    #[test]
    fn write_ledger_emits_header_and_rows() {
        let row = LedgerRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            name: "Rent".into(),
            amount: 500.0,
            remaining: None,
            total_paid: 500.0,
            total_interest: 0.0,
            account_balance: 500.0,
            interval: "Monthly",
            kind: ItemKind::Expense,
            note: String::new(),
        };
        let mut out = Vec::new();
        write_ledger(&mut out, &[row]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,name,amount,remaining,total_paid,total_interest,account_balance,interval,type,note"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-01-01,Rent,500.00,,500.00,,500.00,Monthly,EXPENSE,"
        );
    }
}
