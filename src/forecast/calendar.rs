//! Seasonality calendar
//!
//! Fixed demand multipliers for weekdays, months and named shopping holidays.
//! The projection loop multiplies them together for each forecast day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// A fixed-date shopping holiday
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Holiday {
    pub month: u32,
    pub day: u32,
    pub name: &'static str,
    pub factor: f64,
}

/// Holidays matched on exact month and day. Floating holidays use a
/// representative fixed date.
pub const HOLIDAYS: [Holiday; 8] = [
    Holiday { month: 1, day: 1, name: "New Year's Day", factor: 0.7 },
    Holiday { month: 2, day: 14, name: "Valentine's Day", factor: 1.4 },
    Holiday { month: 5, day: 10, name: "Mother's Day", factor: 1.5 },
    Holiday { month: 6, day: 20, name: "Father's Day", factor: 1.3 },
    Holiday { month: 11, day: 25, name: "Black Friday", factor: 2.5 },
    Holiday { month: 11, day: 28, name: "Cyber Monday", factor: 2.0 },
    Holiday { month: 12, day: 24, name: "Christmas Eve", factor: 2.0 },
    Holiday { month: 12, day: 26, name: "After Christmas", factor: 1.8 },
];

/// Monthly seasonality, January first
pub const MONTH_FACTORS: [f64; 12] = [
    0.8,  // January
    0.7,  // February
    0.9,  // March
    1.0,  // April
    1.1,  // May
    1.2,  // June
    1.3,  // July
    1.25, // August
    1.0,  // September
    1.1,  // October
    1.4,  // November
    1.6,  // December
];

pub fn weekday_factor(weekday: Weekday) -> f64 {
    match weekday {
        Weekday::Fri => 1.4,
        Weekday::Sat => 1.3,
        Weekday::Sun => 0.8,
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => 1.0,
    }
}

pub fn month_factor(date: NaiveDate) -> f64 {
    MONTH_FACTORS[date.month0() as usize]
}

pub fn holiday_on(date: NaiveDate) -> Option<&'static Holiday> {
    HOLIDAYS
        .iter()
        .find(|h| h.month == date.month() && h.day == date.day())
}

/// Weekday × month × holiday multiplier for one calendar day
pub fn seasonal_factor(date: NaiveDate) -> f64 {
    let holiday = holiday_on(date).map_or(1.0, |h| h.factor);
    weekday_factor(date.weekday()) * month_factor(date) * holiday
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_weekday() {
        // Wednesday in March
        assert_eq!(seasonal_factor(day(2024, 3, 6)), 1.0 * 0.9);
    }

    #[test]
    fn test_weekend_factors() {
        assert_eq!(weekday_factor(day(2024, 3, 8).weekday()), 1.4);
        assert_eq!(weekday_factor(day(2024, 3, 9).weekday()), 1.3);
        assert_eq!(weekday_factor(day(2024, 3, 10).weekday()), 0.8);
    }

    #[test]
    fn test_holiday_exact_match() {
        let black_friday = holiday_on(day(2024, 11, 25)).unwrap();
        assert_eq!(black_friday.name, "Black Friday");
        assert!(holiday_on(day(2024, 11, 26)).is_none());

        // Monday 2024-11-25: weekday 1.0, November 1.4, Black Friday 2.5
        assert!((seasonal_factor(day(2024, 11, 25)) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_december_peaks() {
        let max = MONTH_FACTORS.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(month_factor(day(2024, 12, 2)), max);
    }
}
