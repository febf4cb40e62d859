use cashflow_core::schedule::{biweekly_dates, DateWindow, Interval, Schedule};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn daily_fires_every_day_in_bounds() {
    let schedule = Schedule::bounded(Interval::Daily, date(2024, 1, 10), date(2024, 1, 12));
    assert!(!schedule.fires(date(2024, 1, 9)));
    assert!(schedule.fires(date(2024, 1, 10)));
    assert!(schedule.fires(date(2024, 1, 11)));
    assert!(schedule.fires(date(2024, 1, 12)));
    assert!(!schedule.fires(date(2024, 1, 13)));
}

#[test]
fn unbounded_schedule_never_excludes_by_date() {
    let schedule = Schedule::new(Interval::Daily);
    assert!(schedule.fires(date(1999, 12, 31)));
    assert!(schedule.fires(date(2199, 6, 1)));
}

#[test]
fn weekly_matches_day_of_week_from_monday() {
    // 2024-01-01 was a Monday.
    let schedule = Schedule::new(Interval::Weekly { day_of_week: 0 });
    assert!(schedule.fires(date(2024, 1, 1)));
    assert!(!schedule.fires(date(2024, 1, 2)));
    assert!(schedule.fires(date(2024, 1, 8)));

    let sunday = Schedule::new(Interval::Weekly { day_of_week: 6 });
    assert!(sunday.fires(date(2024, 1, 7)));
    assert!(!sunday.fires(date(2024, 1, 1)));
}

#[test]
fn monthly_matches_configured_day() {
    let schedule = Schedule::new(Interval::Monthly { day: 31 });
    assert!(schedule.fires(date(2024, 1, 31)));
    assert!(schedule.fires(date(2024, 3, 31)));
    // February has no 31st, so the item skips the month entirely.
    for day in 1..=29 {
        assert!(!schedule.fires(date(2024, 2, day)));
    }
}

#[test]
fn yearly_matches_month_and_day() {
    let schedule = Schedule::new(Interval::Yearly { month: 6, day: 15 });
    assert!(schedule.fires(date(2024, 6, 15)));
    assert!(schedule.fires(date(2025, 6, 15)));
    assert!(!schedule.fires(date(2024, 6, 14)));
    assert!(!schedule.fires(date(2024, 7, 15)));
}

#[test]
fn biweekly_dates_step_fourteen_days_exclusive_of_end() {
    let dates = biweekly_dates(date(2024, 1, 1), date(2024, 1, 29));
    assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 15)]);

    let schedule = Schedule::new(Interval::BiWeekly { dates });
    assert!(schedule.fires(date(2024, 1, 1)));
    assert!(!schedule.fires(date(2024, 1, 8)));
    assert!(schedule.fires(date(2024, 1, 15)));
    assert!(!schedule.fires(date(2024, 1, 29)));
}

#[test]
fn biweekly_dates_empty_for_inverted_range() {
    assert!(biweekly_dates(date(2024, 2, 1), date(2024, 1, 1)).is_empty());
}

#[test]
fn onetime_fires_only_on_trigger_date() {
    let schedule = Schedule::bounded(
        Interval::Onetime {
            date: date(2024, 2, 15),
            target: None,
        },
        date(2024, 2, 15),
        date(2024, 2, 15),
    );
    assert!(schedule.fires(date(2024, 2, 15)));
    assert!(!schedule.fires(date(2024, 2, 14)));
    assert!(!schedule.fires(date(2024, 2, 16)));
}

#[test]
fn labels_name_each_variant() {
    assert_eq!(Schedule::new(Interval::Daily).label(), "Daily");
    assert_eq!(
        Schedule::new(Interval::Monthly { day: 1 }).label(),
        "Monthly"
    );
    assert_eq!(
        Schedule::new(Interval::BiWeekly { dates: Vec::new() }).label(),
        "Biweekly"
    );
}

#[test]
fn window_contains_is_half_open() {
    let window = DateWindow::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
    assert!(window.contains(date(2024, 1, 1)));
    assert!(window.contains(date(2024, 1, 9)));
    assert!(!window.contains(date(2024, 1, 10)));
    assert_eq!(window.days().count(), 9);
}

#[test]
fn window_rejects_inverted_range() {
    assert!(DateWindow::new(date(2024, 1, 10), date(2024, 1, 10)).is_err());
    assert!(DateWindow::new(date(2024, 1, 10), date(2024, 1, 1)).is_err());
}
