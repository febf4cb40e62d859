use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Recurrence rule deciding which calendar days an item fires on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Interval {
    /// Fires exactly once, on `date`. When `target` is set, the payment
    /// applies to the named item instead of the item carrying this interval.
    Onetime {
        date: NaiveDate,
        target: Option<String>,
    },
    Daily,
    /// `day_of_week` counts from Monday = 0.
    Weekly { day_of_week: u32 },
    /// Membership list precomputed with [`biweekly_dates`].
    BiWeekly { dates: Vec<NaiveDate> },
    Monthly { day: u32 },
    Yearly { month: u32, day: u32 },
}

/// An interval together with the optional bounding dates every variant
/// carries. Outside the bounds an item never fires regardless of the
/// recurrence match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub interval: Interval,
}

impl Schedule {
    pub fn new(interval: Interval) -> Self {
        Self {
            start_date: None,
            end_date: None,
            interval,
        }
    }

    pub fn bounded(interval: Interval, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            interval,
        }
    }

    /// Both bounds are inclusive; a missing bound never excludes a date.
    pub fn in_bounds(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    /// Pure firing predicate: bounds check first, then the recurrence match.
    pub fn fires(&self, date: NaiveDate) -> bool {
        if !self.in_bounds(date) {
            return false;
        }
        match &self.interval {
            Interval::Onetime { date: trigger, .. } => date == *trigger,
            Interval::Daily => true,
            Interval::Weekly { day_of_week } => {
                date.weekday().num_days_from_monday() == *day_of_week
            }
            Interval::BiWeekly { dates } => dates.contains(&date),
            Interval::Monthly { day } => date.day() == *day,
            Interval::Yearly { month, day } => date.month() == *month && date.day() == *day,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.interval {
            Interval::Onetime { .. } => "Onetime",
            Interval::Daily => "Daily",
            Interval::Weekly { .. } => "Weekly",
            Interval::BiWeekly { .. } => "Biweekly",
            Interval::Monthly { .. } => "Monthly",
            Interval::Yearly { .. } => "Yearly",
        }
    }

    pub fn is_onetime(&self) -> bool {
        matches!(self.interval, Interval::Onetime { .. })
    }

    pub fn onetime_target(&self) -> Option<&str> {
        match &self.interval {
            Interval::Onetime { target, .. } => target.as_deref(),
            _ => None,
        }
    }
}

/// Steps 14 days at a time from `start`, exclusive of `end`.
pub fn biweekly_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current < end {
        dates.push(current);
        current += Duration::days(14);
    }
    dates
}
