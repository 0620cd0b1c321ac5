//! Calendar month keys
//!
//! `YearMonth` is the typed form of the `"YYYY-MM"` key every transaction
//! record carries. Month arithmetic goes through a linear month index
//! (`year * 12 + month - 1`) so stepping backwards from January lands on
//! December of the previous year.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::period::PeriodParseError;

/// Earliest supported year
pub const MIN_YEAR: i32 = 1;
/// Latest supported year
pub const MAX_YEAR: i32 = 9999;

const SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month of a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a month key, clamping out-of-range input
    ///
    /// `month` is clamped to 1..=12 and `year` to the four-digit range.
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::YearMonth;
    /// assert_eq!(YearMonth::clamped(2025, 0).to_string(), "2025-01");
    /// assert_eq!(YearMonth::clamped(2025, 13).to_string(), "2025-12");
    /// ```
    pub fn clamped(year: i32, month: u32) -> Self {
        Self {
            year: year.clamp(MIN_YEAR, MAX_YEAR),
            month: month.clamp(1, 12),
        }
    }

    /// Build a month key, rejecting out-of-range input
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PeriodParseError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self::clamped(date.year(), date.month())
    }

    /// Parse a canonical `"YYYY-MM"` key
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() > 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Quarter number, 1-4
    pub fn quarter(&self) -> u32 {
        (self.month - 1) / 3 + 1
    }

    /// Three-letter English month name, used as a chart label
    pub fn short_name(&self) -> &'static str {
        SHORT_NAMES[(self.month - 1) as usize]
    }

    fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// Month for a linear index, saturating at January of `MIN_YEAR` and
    /// December of `MAX_YEAR` so stepping never reorders keys
    fn from_index(index: i64) -> Self {
        let first = MIN_YEAR as i64 * 12;
        let last = MAX_YEAR as i64 * 12 + 11;
        let index = index.clamp(first, last);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// The month `n` months earlier
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::YearMonth;
    /// let jan = YearMonth::clamped(2025, 1);
    /// assert_eq!(jan.months_before(1).to_string(), "2024-12");
    /// assert_eq!(jan.months_before(14).to_string(), "2023-11");
    /// ```
    pub fn months_before(&self, n: u32) -> Self {
        Self::from_index(self.index() - n as i64)
    }

    /// The month `n` months later
    pub fn months_after(&self, n: u32) -> Self {
        Self::from_index(self.index() + n as i64)
    }

    pub fn next(&self) -> Self {
        self.months_after(1)
    }

    pub fn prev(&self) -> Self {
        self.months_before(1)
    }

    /// Whether this month's year is a leap year
    pub fn is_leap_year(&self) -> bool {
        let y = self.year;
        (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
    }

    /// Number of days in this month
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year() => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        // year and month are range-checked on construction, so this is always Some
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Last calendar day of the month
    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days_in_month()).unwrap_or_default()
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Whether `s` is made only of ASCII digits (no sign, no whitespace)
pub(crate) fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_key_is_zero_padded() {
        assert_eq!(YearMonth::clamped(2025, 8).to_string(), "2025-08");
        assert_eq!(YearMonth::clamped(2025, 11).to_string(), "2025-11");
    }

    #[test]
    fn test_clamping() {
        assert_eq!(YearMonth::clamped(2025, 0).month(), 1);
        assert_eq!(YearMonth::clamped(2025, 99).month(), 12);
        assert_eq!(YearMonth::clamped(0, 5).year(), MIN_YEAR);
        assert_eq!(YearMonth::clamped(20000, 5).year(), MAX_YEAR);
    }

    #[test]
    fn test_strict_new() {
        assert!(YearMonth::new(2025, 12).is_ok());
        assert_eq!(
            YearMonth::new(2025, 13),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert_eq!(
            YearMonth::new(-4, 1),
            Err(PeriodParseError::InvalidYear(-4))
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(YearMonth::parse("2025-08").unwrap(), YearMonth::clamped(2025, 8));
        assert_eq!(YearMonth::parse("2025-8").unwrap(), YearMonth::clamped(2025, 8));
        assert!(YearMonth::parse("2025-13").is_err());
        assert!(YearMonth::parse("2025").is_err());
        assert!(YearMonth::parse("25-08").is_err());
        assert!(YearMonth::parse("2025-08-01").is_err());
    }

    #[test]
    fn test_parse_rejects_signs() {
        assert!(YearMonth::parse("+202-08").is_err());
        assert!(YearMonth::parse("2025-+8").is_err());
        assert!(YearMonth::parse("-025-08").is_err());
        assert!(YearMonth::parse("2025- 8").is_err());
    }

    #[test]
    fn test_stepping_saturates_at_calendar_edges() {
        let first = YearMonth::clamped(MIN_YEAR, 1);
        assert_eq!(first.months_before(1), first);
        assert_eq!(YearMonth::clamped(MIN_YEAR, 2).months_before(5), first);

        let last = YearMonth::clamped(MAX_YEAR, 12);
        assert_eq!(last.next(), last);
        assert_eq!(YearMonth::clamped(MAX_YEAR, 11).months_after(3), last);

        let window: Vec<YearMonth> = (0..3).rev().map(|n| first.months_before(n)).collect();
        assert!(window.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_months_before_wraps_year() {
        let jan = YearMonth::clamped(2025, 1);
        assert_eq!(jan.months_before(0), jan);
        assert_eq!(jan.months_before(1), YearMonth::clamped(2024, 12));
        assert_eq!(jan.months_before(2), YearMonth::clamped(2024, 11));
        assert_eq!(jan.months_before(12), YearMonth::clamped(2024, 1));
        assert_eq!(jan.months_before(13), YearMonth::clamped(2023, 12));
    }

    #[test]
    fn test_months_before_and_after_are_inverse() {
        let start = YearMonth::clamped(2024, 3);
        for n in 0..40 {
            assert_eq!(start.months_before(n).months_after(n), start);
        }
    }

    #[test]
    fn test_next_prev() {
        assert_eq!(YearMonth::clamped(2024, 12).next(), YearMonth::clamped(2025, 1));
        assert_eq!(YearMonth::clamped(2025, 1).prev(), YearMonth::clamped(2024, 12));
    }

    #[test]
    fn test_month_bounds() {
        let feb_leap = YearMonth::clamped(2024, 2);
        assert_eq!(feb_leap.first_day(), date(2024, 2, 1));
        assert_eq!(feb_leap.last_day(), date(2024, 2, 29));

        let feb = YearMonth::clamped(2025, 2);
        assert_eq!(feb.last_day(), date(2025, 2, 28));

        assert_eq!(YearMonth::clamped(1900, 2).days_in_month(), 28);
        assert_eq!(YearMonth::clamped(2000, 2).days_in_month(), 29);
        assert_eq!(YearMonth::clamped(2025, 4).last_day(), date(2025, 4, 30));
        assert_eq!(YearMonth::clamped(2025, 12).last_day(), date(2025, 12, 31));
    }

    #[test]
    fn test_quarter_and_label() {
        assert_eq!(YearMonth::clamped(2025, 1).quarter(), 1);
        assert_eq!(YearMonth::clamped(2025, 6).quarter(), 2);
        assert_eq!(YearMonth::clamped(2025, 7).quarter(), 3);
        assert_eq!(YearMonth::clamped(2025, 12).quarter(), 4);
        assert_eq!(YearMonth::clamped(2025, 9).short_name(), "Sep");
    }

    #[test]
    fn test_serde_as_key_string() {
        let ym = YearMonth::clamped(2025, 8);
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2025-08\"");
        let back: YearMonth = serde_json::from_str("\"2025-08\"").unwrap();
        assert_eq!(back, ym);
        assert!(serde_json::from_str::<YearMonth>("\"2025-00\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_stepping_crosses_years_exactly(
            year in 1000i32..3000,
            month in 1u32..=12,
            n in 0u32..600,
        ) {
            let start = YearMonth::clamped(year, month);
            let back = start.months_before(n);

            prop_assert!(back <= start);
            prop_assert_eq!(back.months_after(n), start);
            prop_assert_eq!(
                (start.year() - back.year()) * 12 + start.month() as i32 - back.month() as i32,
                n as i32
            );
            prop_assert!((1..=12).contains(&back.month()));
        }
    }
}
