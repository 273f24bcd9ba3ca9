//! Daily order volume model for synthetic sales

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::forecast::MONTH_FACTORS;

/// Orders on an unremarkable day before any factor applies
pub const BASE_DAILY_ORDERS: f64 = 20.0;

fn weekend_factor(day: NaiveDate) -> f64 {
    match day.weekday() {
        Weekday::Sat | Weekday::Sun => 1.5,
        _ => 1.0,
    }
}

/// Paycheck cycle: busy start of month, quiet end
fn day_of_month_factor(day: NaiveDate) -> f64 {
    match day.day() {
        1..=5 => 1.3,
        25..=31 => 0.8,
        _ => 1.0,
    }
}

fn season_factor(day: NaiveDate) -> f64 {
    match day.month() {
        3..=5 => 1.1,
        6..=8 => 1.2,
        9..=11 => 1.0,
        _ => 1.3,
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn holiday_factor(day: NaiveDate) -> f64 {
    let year = day.year();
    let is = |date: Option<NaiveDate>| date == Some(day);

    let black_friday = nth_weekday(year, 11, Weekday::Fri, 4);
    let cyber_monday =
        nth_weekday(year, 11, Weekday::Thu, 4).and_then(|t| t.checked_add_days(Days::new(4)));

    if is(black_friday) {
        2.5
    } else if is(cyber_monday) {
        2.0
    } else if day.month() == 12 && (15..=24).contains(&day.day()) {
        1.8
    } else if day.month() == 2 && day.day() == 14 {
        1.5
    } else if is(nth_weekday(year, 5, Weekday::Sun, 2)) {
        1.6
    } else if is(nth_weekday(year, 6, Weekday::Sun, 3)) {
        1.4
    } else if day.month() == 8 && day.day() >= 15 {
        // Back to school
        1.5
    } else {
        1.0
    }
}

/// Deterministic part of the daily volume; the generator applies its
/// random jitter on top
pub fn demand_factor(day: NaiveDate) -> f64 {
    weekend_factor(day)
        * MONTH_FACTORS[day.month0() as usize]
        * day_of_month_factor(day)
        * season_factor(day)
        * holiday_factor(day)
}

/// Number of orders on `day` given a jitter in 0.8..1.2
pub fn daily_order_count(day: NaiveDate, jitter: f64) -> u32 {
    (BASE_DAILY_ORDERS * demand_factor(day) * jitter).floor() as u32
}

/// First Sunday on or after `date`
pub fn first_sunday_from(date: NaiveDate) -> NaiveDate {
    let offset = (7 - date.weekday().num_days_from_sunday()) % 7;
    date + Days::new(u64::from(offset))
}
