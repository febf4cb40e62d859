//! Day-by-day forecast simulation.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    budget::{BudgetItem, ItemKind},
    errors::CashflowError,
    report::LedgerRow,
    schedule::DateWindow,
};

/// Walks every day of a [`DateWindow`] and applies each firing item to the
/// running account balance, producing one ledger row per transaction.
///
/// Items are processed in a fixed order per day: income entries first, in
/// configuration order, then expenses, in configuration order. Cross-item
/// mutations (`target`, `move_payment_to`) are visible to items processed
/// later the same day, never retroactively to earlier ones.
pub struct ForecastEngine {
    balance: f64,
    window: DateWindow,
    items: Vec<BudgetItem>,
    index: HashMap<String, usize>,
}

impl ForecastEngine {
    pub fn new(opening_balance: f64, window: DateWindow, items: Vec<BudgetItem>) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.name.clone(), idx))
            .collect();
        Self {
            balance: opening_balance,
            window,
            items,
            index,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn items(&self) -> &[BudgetItem] {
        &self.items
    }

    pub fn item(&self, name: &str) -> Option<&BudgetItem> {
        self.index.get(name).map(|&idx| &self.items[idx])
    }

    /// Runs the simulation to completion and returns the emitted rows.
    pub fn run(&mut self) -> Result<Vec<LedgerRow>, CashflowError> {
        debug!(
            start = %self.window.start,
            end = %self.window.end,
            items = self.items.len(),
            "starting forecast"
        );
        let mut rows = Vec::new();
        for day in self.window.days() {
            for idx in 0..self.items.len() {
                if self.items[idx].done {
                    continue;
                }
                if let Some(end) = self.items[idx].schedule.end_date {
                    if day > end {
                        self.items[idx].done = true;
                        continue;
                    }
                }
                if !self.items[idx].schedule.in_bounds(day) {
                    continue;
                }
                let mut row = None;
                if self.items[idx].schedule.fires(day) {
                    row = if self.items[idx].schedule.is_onetime() {
                        let row = self.apply_onetime(idx, day)?;
                        self.items[idx].done = true;
                        row
                    } else {
                        self.apply_recurring(idx, day)
                    };
                }
                self.settle_payoff(idx, &mut row)?;
                if let Some(row) = row {
                    rows.push(row);
                }
            }
        }
        Ok(rows)
    }

    /// Applies a self-targeted firing of any recurring variant.
    fn apply_recurring(&mut self, idx: usize, day: NaiveDate) -> Option<LedgerRow> {
        let item = &mut self.items[idx];
        let (amount, final_payment) = match item.remaining_balance {
            Some(remaining) => {
                let amount = item.amount.min(remaining);
                (amount, amount < item.amount)
            }
            None => (item.amount, false),
        };
        if amount <= 0.0 {
            return None;
        }
        let interest = if item.interest > 0.0 {
            amount * item.interest
        } else {
            0.0
        };
        match item.kind {
            ItemKind::Expense => {
                self.balance -= amount;
                item.total_paid += amount;
                if let Some(remaining) = item.remaining_balance.as_mut() {
                    // The interest share of a payment does not amortize the
                    // principal; the final payment pins it to exactly zero.
                    *remaining -= amount - interest;
                    if final_payment {
                        *remaining = 0.0;
                    }
                }
                item.interest_paid += interest;
            }
            ItemKind::Income => {
                self.balance += amount;
                item.total_paid += amount;
            }
        }
        Some(LedgerRow {
            date: day,
            name: item.display_name(),
            amount,
            remaining: item.remaining_balance,
            total_paid: item.total_paid,
            total_interest: item.interest_paid,
            account_balance: self.balance,
            interval: item.schedule.label(),
            kind: item.kind,
            note: String::new(),
        })
    }

    /// Applies a one-time item, either to itself or to its named target.
    fn apply_onetime(
        &mut self,
        idx: usize,
        day: NaiveDate,
    ) -> Result<Option<LedgerRow>, CashflowError> {
        let source = &self.items[idx];
        let amount = source.amount;
        let source_name = source.name.clone();
        let target_name = source.schedule.onetime_target().map(str::to_owned);

        let Some(target_name) = target_name else {
            let item = &mut self.items[idx];
            match item.kind {
                ItemKind::Expense => {
                    self.balance -= item.amount;
                    item.total_paid += item.amount;
                    item.remaining_balance = Some(0.0);
                }
                ItemKind::Income => {
                    self.balance += item.amount;
                    item.total_paid += item.amount;
                }
            }
            return Ok(Some(LedgerRow {
                date: day,
                name: item.display_name(),
                amount: item.amount,
                remaining: item.remaining_balance,
                total_paid: item.total_paid,
                total_interest: item.interest_paid,
                account_balance: self.balance,
                interval: item.schedule.label(),
                kind: item.kind,
                note: "onetime payment".into(),
            }));
        };

        let target_idx = self.resolve(&target_name, &source_name)?;
        let target = &mut self.items[target_idx];
        match target.kind {
            ItemKind::Expense => {
                self.balance -= amount;
                target.total_paid += amount;
                // Applied in full: no capping against the target's balance
                // and no interest split.
                if let Some(remaining) = target.remaining_balance.as_mut() {
                    *remaining -= amount;
                }
            }
            ItemKind::Income => {
                self.balance += amount;
                target.total_paid += amount;
            }
        }
        if let Some(remaining) = target.remaining_balance.as_mut() {
            if *remaining <= 0.0 {
                *remaining = 0.0;
                target.done = true;
            }
        }
        Ok(Some(LedgerRow {
            date: day,
            name: target.display_name(),
            amount: target.amount,
            remaining: target.remaining_balance,
            total_paid: target.total_paid,
            total_interest: target.interest_paid,
            account_balance: self.balance,
            interval: target.schedule.label(),
            kind: target.kind,
            note: format!("onetime payment: {source_name}"),
        }))
    }

    /// Marks an item done once its balance closes and redirects its freed
    /// budget when `move_payment_to` is set.
    fn settle_payoff(
        &mut self,
        idx: usize,
        row: &mut Option<LedgerRow>,
    ) -> Result<(), CashflowError> {
        if self.items[idx].done {
            return Ok(());
        }
        let closed = matches!(self.items[idx].remaining_balance, Some(remaining) if remaining <= 0.0);
        if !closed {
            return Ok(());
        }

        {
            let item = &mut self.items[idx];
            item.remaining_balance = Some(0.0);
            item.done = true;
        }
        if let Some(row) = row.as_mut() {
            if row.note.is_empty() {
                row.note = "balance closed.".to_string();
            } else {
                row.note.push_str(" balance closed.");
            }
        }

        let item = &self.items[idx];
        if item.kind != ItemKind::Expense {
            return Ok(());
        }
        let Some(dest_name) = item.move_payment_to.clone() else {
            return Ok(());
        };
        let amount = item.amount;
        let source_name = item.name.clone();

        let dest_idx = self.resolve(&dest_name, &source_name)?;
        let dest = &mut self.items[dest_idx];
        if matches!(dest.remaining_balance, Some(remaining) if remaining > 0.0) {
            dest.amount += amount;
            info!(from = %source_name, to = %dest_name, amount, "redirecting paid off amount");
            if let Some(row) = row.as_mut() {
                row.note = format!("balance closed. moved payment to: {dest_name}");
            }
        }
        Ok(())
    }

    fn resolve(&self, name: &str, referenced_by: &str) -> Result<usize, CashflowError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CashflowError::InvalidRef {
                name: name.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }
}
