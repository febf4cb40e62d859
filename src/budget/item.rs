use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// Whether an item adds to or draws from the account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemKind {
    Income,
    Expense,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Income => "INCOME",
            ItemKind::Expense => "EXPENSE",
        }
    }
}

/// A named recurring or one-time entry being simulated.
///
/// `remaining_balance` of `None` marks an indefinitely recurring item;
/// `Some` marks a finite, amortizing obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetItem {
    pub name: String,
    pub kind: ItemKind,
    pub schedule: Schedule,
    pub amount: f64,
    #[serde(default)]
    pub total_paid: f64,
    #[serde(default)]
    pub interest: f64,
    #[serde(default)]
    pub interest_paid: f64,
    #[serde(default)]
    pub remaining_balance: Option<f64>,
    /// Once this item is paid off, its amount is folded into the named item.
    #[serde(default)]
    pub move_payment_to: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl BudgetItem {
    pub fn new(name: impl Into<String>, kind: ItemKind, schedule: Schedule, amount: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            schedule,
            amount,
            total_paid: 0.0,
            interest: 0.0,
            interest_paid: 0.0,
            remaining_balance: None,
            move_payment_to: None,
            done: false,
        }
    }

    /// Human-readable form of the key: underscores to spaces, title-cased.
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.chars() {
        if ch == '_' || ch.is_whitespace() {
            out.push(' ');
            at_word_start = true;
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Interval;

    #[test]
    fn display_name_replaces_underscores_and_title_cases() {
        let item = BudgetItem::new(
            "car_loan_payment",
            ItemKind::Expense,
            Schedule::new(Interval::Daily),
            10.0,
        );
        assert_eq!(item.display_name(), "Car Loan Payment");
    }

    #[test]
    fn display_name_lowercases_interior_capitals() {
        let item = BudgetItem::new(
            "SIDE_gig",
            ItemKind::Income,
            Schedule::new(Interval::Daily),
            10.0,
        );
        assert_eq!(item.display_name(), "Side Gig");
    }
}
