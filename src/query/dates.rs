//! Date handling for range queries
//!
//! Callers hand the query layer dates in whatever shape they have (calendar
//! dates, timestamps, epoch milliseconds, ISO strings). They are normalized
//! here into a closed UTC interval.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{CategoryId, DomainError, ProductId};

/// A date-like value accepted at the query boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDateInput")]
pub enum DateInput {
    /// A calendar day, interpreted as starting at 00:00:00 UTC
    Date(NaiveDate),
    /// An exact instant
    Instant(DateTime<Utc>),
}

impl DateInput {
    /// Interpret a value as milliseconds since the Unix epoch
    pub fn from_epoch_millis(millis: i64) -> Result<Self, DomainError> {
        DateTime::from_timestamp_millis(millis)
            .map(DateInput::Instant)
            .ok_or_else(|| {
                DomainError::invalid_parameter("date", format!("epoch {} is out of range", millis))
            })
    }

    /// Calendar day (UTC) of this input
    pub fn day(&self) -> NaiveDate {
        match self {
            DateInput::Date(date) => *date,
            DateInput::Instant(instant) => instant.date_naive(),
        }
    }

    /// Instant used when this input opens a range
    pub fn start_instant(&self) -> DateTime<Utc> {
        match self {
            DateInput::Date(date) => start_of_day(*date),
            DateInput::Instant(instant) => *instant,
        }
    }

    /// 23:59:59.999 of this input's calendar day
    pub fn end_of_day(&self) -> DateTime<Utc> {
        end_of_day(self.day())
    }
}

pub(crate) fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

pub(crate) fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    start_of_day(day)
        .checked_add_signed(Duration::days(1) - Duration::milliseconds(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(instant: DateTime<Utc>) -> Self {
        DateInput::Instant(instant)
    }
}

impl FromStr for DateInput {
    type Err = DomainError;

    /// Accepts `YYYY-MM-DD`, RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC) or epoch milliseconds
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if !s.is_empty() && s.trim_start_matches('-').chars().all(|c| c.is_ascii_digit()) {
            let millis = s
                .parse::<i64>()
                .map_err(|e| DomainError::invalid_parameter("date", e.to_string()))?;
            return Self::from_epoch_millis(millis);
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(DateInput::Date(date));
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(DateInput::Instant(instant.with_timezone(&Utc)));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(DateInput::Instant(naive.and_utc()));
        }

        Err(DomainError::invalid_parameter(
            "date",
            format!("unrecognized date '{}'", s),
        ))
    }
}

/// Wire form of a date: epoch milliseconds as a JSON number, or any string
/// `FromStr` accepts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDateInput {
    Millis(i64),
    Text(String),
}

impl TryFrom<RawDateInput> for DateInput {
    type Error = DomainError;

    fn try_from(value: RawDateInput) -> Result<Self, Self::Error> {
        match value {
            RawDateInput::Millis(millis) => Self::from_epoch_millis(millis),
            RawDateInput::Text(text) => text.parse(),
        }
    }
}

/// Closed UTC interval `[start, end]`.
///
/// An inverted range (start after end) is simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Range from `start` through the end of `end`'s calendar day
    pub fn new(start: impl Into<DateInput>, end: impl Into<DateInput>) -> Self {
        Self {
            start: start.into().start_instant(),
            end: end.into().end_of_day(),
        }
    }

    /// Range with exact bounds (no end-of-day extension)
    pub fn exact(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The `days` calendar days ending with `last_day` (inclusive).
    /// The window stops at the earliest representable date.
    pub fn trailing_days(last_day: NaiveDate, days: u32) -> Self {
        let first_day = last_day
            .checked_sub_days(Days::new(u64::from(days.max(1)) - 1))
            .unwrap_or(NaiveDate::MIN);
        let range = Self::new(first_day, last_day);
        if days == 0 {
            // Zero days is an empty window
            return Self::exact(range.end, range.start);
        }
        range
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Reject inverted ranges. The query layer itself never calls this.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Window of equal length ending just before this one starts.
    ///
    /// Near the lower limit of `DateTime<Utc>` the window is cut short, and
    /// a range starting at that limit has an empty predecessor.
    pub fn preceding(&self) -> Self {
        let length = self.end - self.start;
        let Some(end) = self.start.checked_sub_signed(Duration::milliseconds(1)) else {
            return Self::exact(DateTime::<Utc>::MAX_UTC, DateTime::<Utc>::MIN_UTC);
        };
        let start = end
            .checked_sub_signed(length)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self::exact(start, end)
    }
}

/// Time granularity for period buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    /// Bucket key of the period containing `day`
    pub fn key_for(&self, day: NaiveDate) -> BucketKey {
        match self {
            Interval::Daily => BucketKey::Day(day),
            Interval::Weekly => BucketKey::Week(week_start(day)),
            Interval::Monthly => BucketKey::Month {
                year: day.year(),
                month: day.month(),
            },
        }
    }
}

/// Sunday on or before `day`
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_sunday())))
        .unwrap_or(NaiveDate::MIN)
}

impl FromStr for Interval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Interval::Daily),
            "weekly" => Ok(Interval::Weekly),
            "monthly" => Ok(Interval::Monthly),
            other => Err(DomainError::invalid_parameter(
                "interval",
                format!("expected daily, weekly or monthly, got '{}'", other),
            )),
        }
    }
}

/// Key of one aggregation row.
///
/// Displays (and serializes) as `YYYY-MM-DD` for days and weeks (the week's
/// Sunday), `YYYY-MM` for months, and the bare id for categories/products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey {
    Day(NaiveDate),
    Week(NaiveDate),
    Month { year: i32, month: u32 },
    Category(CategoryId),
    Product(ProductId),
}

impl BucketKey {
    /// First calendar day of a time bucket
    pub fn first_day(&self) -> Option<NaiveDate> {
        match self {
            BucketKey::Day(day) | BucketKey::Week(day) => Some(*day),
            BucketKey::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            BucketKey::Category(_) | BucketKey::Product(_) => None,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Day(day) | BucketKey::Week(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            BucketKey::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            BucketKey::Category(id) | BucketKey::Product(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for BucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_end_is_inclusive_through_end_of_day() {
        let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 5));

        assert!(range.contains(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap()));
        assert_eq!(range.end().nanosecond(), 999_000_000);
    }

    #[test]
    fn test_inverted_range_is_empty_and_invalid() {
        let range = DateRange::new(day(2024, 3, 5), day(2024, 3, 1));
        assert!(range.is_empty());
        assert!(matches!(range.validate(), Err(DomainError::InvalidRange { .. })));
    }

    #[test]
    fn test_same_day_range_is_valid() {
        let range = DateRange::new(day(2024, 3, 5), day(2024, 3, 5));
        assert!(!range.is_empty());
        assert!(range.validate().is_ok());
    }

    #[test]
    fn test_parse_date_inputs() {
        assert_eq!(
            "2024-03-05".parse::<DateInput>().unwrap(),
            DateInput::Date(day(2024, 3, 5))
        );
        assert_eq!(
            "2024-03-05T10:30:00Z".parse::<DateInput>().unwrap(),
            DateInput::Instant(Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap())
        );
        assert_eq!(
            "2024-03-05T10:30:00".parse::<DateInput>().unwrap().day(),
            day(2024, 3, 5)
        );
        assert_eq!(
            "1709634600000".parse::<DateInput>().unwrap(),
            DateInput::Instant(Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap())
        );
        assert!("next tuesday".parse::<DateInput>().is_err());
    }

    #[test]
    fn test_instant_end_extends_to_end_of_its_day() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let range = DateRange::new(instant, instant);

        assert_eq!(range.start(), instant);
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 3, 5, 22, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 3, 5, 7, 0, 0).unwrap()));
    }

    #[test]
    fn test_trailing_days_covers_exact_day_count() {
        let range = DateRange::trailing_days(day(2024, 3, 31), 90);
        assert_eq!(range.start().date_naive(), day(2024, 1, 2));
        assert_eq!(range.end().date_naive(), day(2024, 3, 31));

        assert!(DateRange::trailing_days(day(2024, 3, 31), 0).is_empty());
    }

    #[test]
    fn test_preceding_window_does_not_overlap() {
        let range = DateRange::new(day(2024, 3, 11), day(2024, 3, 20));
        let previous = range.preceding();

        assert!(previous.end() < range.start());
        assert_eq!(previous.end() - previous.start(), range.end() - range.start());
        assert_eq!(previous.start().date_naive(), day(2024, 3, 1));
    }

    #[test]
    fn test_extreme_epoch_range_has_bounded_predecessor() {
        let range = DateRange::new(
            "-8000000000000000".parse::<DateInput>().unwrap(),
            "8000000000000000".parse::<DateInput>().unwrap(),
        );
        assert!(range.validate().is_ok());

        let previous = range.preceding();
        assert_eq!(previous.start(), DateTime::<Utc>::MIN_UTC);
        assert!(previous.end() < range.start());

        let floor = DateRange::exact(DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC);
        assert!(floor.preceding().is_empty());
    }

    #[test]
    fn test_calendar_limits_do_not_overflow() {
        assert_eq!(end_of_day(NaiveDate::MAX).date_naive(), NaiveDate::MAX);
        assert_eq!(
            DateRange::trailing_days(NaiveDate::MIN, 30).start().date_naive(),
            NaiveDate::MIN
        );
        assert_eq!(week_start(NaiveDate::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_date_input_from_json_number_or_string() {
        let from_number: DateInput = serde_json::from_str("1709634600000").unwrap();
        let from_string: DateInput = serde_json::from_str(r#""2024-03-05T10:30:00Z""#).unwrap();
        assert_eq!(from_number, from_string);

        assert!(serde_json::from_str::<DateInput>(r#""someday""#).is_err());
    }

    #[test]
    fn test_week_key_is_sunday() {
        // 2024-03-06 is a Wednesday
        assert_eq!(
            Interval::Weekly.key_for(day(2024, 3, 6)).to_string(),
            "2024-03-03"
        );
        // Sundays map to themselves
        assert_eq!(week_start(day(2024, 3, 3)), day(2024, 3, 3));
    }

    #[test]
    fn test_month_key_format() {
        let key = Interval::Monthly.key_for(day(2024, 3, 6));
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(key.first_day(), Some(day(2024, 3, 1)));
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""2024-03""#);
    }

    #[test]
    fn test_interval_from_str() {
        assert_eq!("weekly".parse::<Interval>().unwrap(), Interval::Weekly);
        assert!("hourly".parse::<Interval>().is_err());
    }
}
