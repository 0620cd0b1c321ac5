//! Period selection and date ranges
//!
//! A `PeriodSelection` is what a period picker hands to the aggregation
//! layer: a mode (monthly, quarterly, yearly, custom) plus an anchor month and
//! year. It is passed explicitly to every call rather than read from shared
//! state. Resolving a selection to concrete dates lives in
//! [`crate::services::period`].

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::month::{all_digits, YearMonth, MAX_YEAR, MIN_YEAR};

/// An inclusive range of calendar dates with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodParseError> {
        if start > end {
            return Err(PeriodParseError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The whole of a calendar month
    pub fn month(ym: YearMonth) -> Self {
        Self {
            start: ym.first_day(),
            end: ym.last_day(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls within this range (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// The kind of period a picker defaults to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for PeriodKind {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "quarterly" | "quarter" => Ok(Self::Quarterly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(PeriodParseError::InvalidFormat(other.to_string())),
        }
    }
}

/// How a selection is turned into dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodMode {
    Monthly,
    Quarterly,
    Yearly,
    /// Explicit range supplied by the caller
    Custom(DateRange),
}

/// A user's period choice: mode plus anchor month and year
///
/// `month` is not validated here; the resolver clamps it to 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodSelection {
    pub mode: PeriodMode,
    pub month: u32,
    pub year: i32,
}

impl PeriodSelection {
    pub fn monthly(year: i32, month: u32) -> Self {
        Self {
            mode: PeriodMode::Monthly,
            month,
            year,
        }
    }

    /// The quarter containing `month`
    pub fn quarterly(year: i32, month: u32) -> Self {
        Self {
            mode: PeriodMode::Quarterly,
            month,
            year,
        }
    }

    pub fn yearly(year: i32) -> Self {
        Self {
            mode: PeriodMode::Yearly,
            month: 1,
            year,
        }
    }

    /// A custom range; month and year anchor to the range start
    pub fn custom(range: DateRange) -> Self {
        Self {
            mode: PeriodMode::Custom(range),
            month: range.start().month(),
            year: range.start().year(),
        }
    }

    /// The selection of the given kind that contains `today`
    pub fn current(kind: PeriodKind, today: NaiveDate) -> Self {
        match kind {
            PeriodKind::Monthly => Self::monthly(today.year(), today.month()),
            PeriodKind::Quarterly => Self::quarterly(today.year(), today.month()),
            PeriodKind::Yearly => Self::yearly(today.year()),
        }
    }

    /// The anchor month, clamped to a valid month key
    pub fn anchor(&self) -> YearMonth {
        YearMonth::clamped(self.year, self.month)
    }

    /// Step forward by one period of the same kind
    pub fn next(&self) -> Self {
        self.step(true)
    }

    /// Step back by one period of the same kind
    pub fn prev(&self) -> Self {
        self.step(false)
    }

    fn step(&self, forward: bool) -> Self {
        let shift = |ym: YearMonth, n: u32| {
            if forward {
                ym.months_after(n)
            } else {
                ym.months_before(n)
            }
        };

        match self.mode {
            PeriodMode::Monthly => {
                let ym = shift(self.anchor(), 1);
                Self::monthly(ym.year(), ym.month())
            }
            PeriodMode::Quarterly => {
                let ym = shift(self.anchor(), 3);
                Self::quarterly(ym.year(), ym.month())
            }
            PeriodMode::Yearly => {
                let year = if forward { self.year + 1 } else { self.year - 1 };
                Self::yearly(year.clamp(MIN_YEAR, MAX_YEAR))
            }
            PeriodMode::Custom(range) => {
                // Step by the range's own length; stay put at the calendar edges
                let span = Duration::days(range.num_days());
                let moved = if forward {
                    range
                        .start()
                        .checked_add_signed(span)
                        .zip(range.end().checked_add_signed(span))
                } else {
                    range
                        .start()
                        .checked_sub_signed(span)
                        .zip(range.end().checked_sub_signed(span))
                };
                match moved {
                    Some((start, end)) => Self::custom(DateRange { start, end }),
                    None => *self,
                }
            }
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2025-08"
    /// - Quarterly: "2025-Q3"
    /// - Yearly: "2025"
    /// - Custom: "2025-01-01..2025-03-31"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            return Ok(Self::custom(DateRange::new(start, end)?));
        }

        let upper = s.to_uppercase();
        if let Some((year, quarter)) = upper.split_once("-Q") {
            let year = parse_year(year).ok_or_else(invalid)?;
            if quarter.len() != 1 || !all_digits(quarter) {
                return Err(invalid());
            }
            let quarter: u32 = quarter.parse().map_err(|_| invalid())?;
            if !(1..=4).contains(&quarter) {
                return Err(PeriodParseError::InvalidQuarter(quarter));
            }
            return Ok(Self::quarterly(year, (quarter - 1) * 3 + 1));
        }

        if s.len() == 4 && all_digits(s) {
            let year = parse_year(s).ok_or_else(invalid)?;
            return Ok(Self::yearly(year));
        }

        let ym = YearMonth::parse(s)?;
        Ok(Self::monthly(ym.year(), ym.month()))
    }
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !all_digits(s) {
        return None;
    }
    let year: i32 = s.parse().ok()?;
    (MIN_YEAR..=MAX_YEAR).contains(&year).then_some(year)
}

impl fmt::Display for PeriodSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let anchor = self.anchor();
        match self.mode {
            PeriodMode::Monthly => write!(f, "{}", anchor),
            PeriodMode::Quarterly => write!(f, "{:04}-Q{}", anchor.year(), anchor.quarter()),
            PeriodMode::Yearly => write!(f, "{:04}", anchor.year()),
            PeriodMode::Custom(range) => write!(f, "{}", range),
        }
    }
}

impl FromStr for PeriodSelection {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
    InvalidQuarter(u32),
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidYear(y) => write!(f, "Invalid year: {}", y),
            PeriodParseError::InvalidQuarter(q) => write!(f, "Invalid quarter: Q{}", q),
            PeriodParseError::InvalidRange { start, end } => {
                write!(f, "Range start {} is after end {}", start, end)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

impl From<PeriodParseError> for crate::error::FinanceError {
    fn from(err: PeriodParseError) -> Self {
        Self::Validation(err.to_string())
    }
}
