//! YAML budget plan loading.
//!
//! A plan document has a `global` section (opening balance, date range,
//! output path) and `income`/`expenses` sections mapping item names to
//! their definitions. Document order of the mappings is preserved; it is
//! the order the engine processes items in.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_yaml::Mapping;
use tracing::{error, warn};

use crate::{
    budget::{BudgetItem, ItemKind},
    errors::CashflowError,
    schedule::{biweekly_dates, DateWindow, Interval, Schedule},
};

const DEFAULT_OPENING_BALANCE: f64 = 100.0;
const DEFAULT_OUTFILE: &str = "budget_output.csv";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything the engine needs for one run, in processing order.
#[derive(Debug, Clone)]
pub struct ForecastPlan {
    pub opening_balance: f64,
    pub window: DateWindow,
    pub outfile: PathBuf,
    pub items: Vec<BudgetItem>,
}

#[derive(Debug, Deserialize)]
struct BudgetFile {
    global: GlobalSection,
    #[serde(default)]
    income: Mapping,
    #[serde(default)]
    expenses: Mapping,
}

#[derive(Debug, Deserialize)]
struct GlobalSection {
    #[serde(default = "default_balance")]
    balance: f64,
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default = "default_outfile")]
    outfile: String,
}

fn default_balance() -> f64 {
    DEFAULT_OPENING_BALANCE
}

fn default_outfile() -> String {
    DEFAULT_OUTFILE.to_string()
}

/// One item definition as written in the document. Interval-specific
/// fields default to zero the way absent keys do.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemSpec {
    amount: f64,
    interval: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    day: u32,
    day_of_week: u32,
    month: u32,
    year: i32,
    interest: f64,
    interest_paid: f64,
    total_paid: f64,
    remaining_balance: Option<f64>,
    move_payment_to: Option<String>,
    target: Option<String>,
}

/// Loads a plan from a YAML file. Returns `Ok(None)` when the document has
/// no `expenses` section with items defined; individual malformed items are
/// logged and dropped.
pub fn load_plan(path: &Path) -> Result<Option<ForecastPlan>, CashflowError> {
    let raw = fs::read_to_string(path)?;
    plan_from_str(&raw)
}

/// See [`load_plan`].
pub fn plan_from_str(raw: &str) -> Result<Option<ForecastPlan>, CashflowError> {
    let file: BudgetFile = serde_yaml::from_str(raw)?;
    if file.expenses.is_empty() {
        error!("configuration has no `expenses` section with items defined");
        return Ok(None);
    }
    let end_date = file
        .global
        .end_date
        .unwrap_or_else(|| Local::now().date_naive());
    let window = DateWindow::new(file.global.start_date, end_date)?;

    let mut items = Vec::new();
    collect_items(&file.income, ItemKind::Income, window, &mut items);
    collect_items(&file.expenses, ItemKind::Expense, window, &mut items);

    Ok(Some(ForecastPlan {
        opening_balance: file.global.balance,
        window,
        outfile: PathBuf::from(file.global.outfile),
        items,
    }))
}

fn collect_items(section: &Mapping, kind: ItemKind, window: DateWindow, out: &mut Vec<BudgetItem>) {
    for (key, value) in section {
        let Some(name) = key.as_str() else {
            warn!("dropping item with non-string name: {key:?}");
            continue;
        };
        let spec: ItemSpec = match serde_yaml::from_value(value.clone()) {
            Ok(spec) => spec,
            Err(err) => {
                warn!(item = name, %err, "dropping item with malformed definition");
                continue;
            }
        };
        match build_item(name, kind, spec, window) {
            Ok(item) => {
                if let Some(existing) = out.iter_mut().find(|existing| existing.name == name) {
                    warn!(item = name, "duplicate item name, later definition wins");
                    *existing = item;
                } else {
                    out.push(item);
                }
            }
            Err(err) => warn!(item = name, %err, "dropping item"),
        }
    }
}

fn build_item(
    name: &str,
    kind: ItemKind,
    spec: ItemSpec,
    window: DateWindow,
) -> Result<BudgetItem, CashflowError> {
    let mut start_date = match spec.start_date {
        Some(raw) => parse_item_date(name, "start_date", &raw)?,
        None => window.start,
    };
    let mut end_date = match spec.end_date {
        Some(raw) => parse_item_date(name, "end_date", &raw)?,
        None => window.end,
    };

    let interval = match spec.interval.as_deref() {
        Some("yearly") => Interval::Yearly {
            month: spec.month,
            day: spec.day,
        },
        Some("monthly") => Interval::Monthly { day: spec.day },
        Some("biweekly") => Interval::BiWeekly {
            dates: biweekly_dates(start_date, end_date),
        },
        Some("weekly") => Interval::Weekly {
            day_of_week: spec.day_of_week,
        },
        Some("daily") => Interval::Daily,
        Some("once") => {
            let trigger = NaiveDate::from_ymd_opt(spec.year, spec.month, spec.day).ok_or_else(
                || {
                    CashflowError::InvalidItem(format!(
                        "`{name}` has no valid year/month/day for a `once` interval"
                    ))
                },
            )?;
            start_date = trigger;
            end_date = trigger;
            Interval::Onetime {
                date: trigger,
                target: non_empty(spec.target),
            }
        }
        Some(other) => {
            return Err(CashflowError::InvalidItem(format!(
                "unknown interval `{other}` for item `{name}`"
            )))
        }
        None => {
            return Err(CashflowError::InvalidItem(format!(
                "interval is required for item `{name}`"
            )))
        }
    };

    let mut item = BudgetItem::new(
        name,
        kind,
        Schedule::bounded(interval, start_date, end_date),
        spec.amount,
    );
    item.total_paid = spec.total_paid;
    item.interest = spec.interest;
    item.interest_paid = spec.interest_paid;
    item.remaining_balance = spec.remaining_balance;
    item.move_payment_to = non_empty(spec.move_payment_to);
    Ok(item)
}

fn parse_item_date(name: &str, field: &str, raw: &str) -> Result<NaiveDate, CashflowError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|err| {
        CashflowError::InvalidItem(format!(
            "failed to parse {field} (YYYY-MM-DD) for `{name}`: {raw} -> {err}"
        ))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
