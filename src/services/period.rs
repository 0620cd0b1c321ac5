//! Period resolution
//!
//! Turns a [`PeriodSelection`] into the concrete, inclusive date range it
//! covers. Out-of-range anchor months are clamped rather than rejected.

use chrono::NaiveDate;

use crate::models::{DateRange, PeriodKind, PeriodMode, PeriodSelection, YearMonth};

/// Resolve a selection to its `[start, end]` dates
///
/// - monthly: first to last day of the anchor month
/// - quarterly: first day of the quarter containing the anchor month to the
///   last day of that quarter
/// - yearly: January 1 to December 31
/// - custom: the caller's range, unchanged
///
/// # Examples
/// ```
/// use fintrack::models::PeriodSelection;
/// use fintrack::services::resolve_period;
///
/// let range = resolve_period(&PeriodSelection::quarterly(2025, 8));
/// assert_eq!(range.to_string(), "2025-07-01..2025-09-30");
/// ```
pub fn resolve_period(selection: &PeriodSelection) -> DateRange {
    let anchor = selection.anchor();

    let range = match selection.mode {
        PeriodMode::Monthly => DateRange::month(anchor),
        PeriodMode::Quarterly => {
            let first = YearMonth::clamped(anchor.year(), (anchor.quarter() - 1) * 3 + 1);
            let last = first.months_after(2);
            span(first, last)
        }
        PeriodMode::Yearly => span(
            YearMonth::clamped(anchor.year(), 1),
            YearMonth::clamped(anchor.year(), 12),
        ),
        PeriodMode::Custom(range) => range,
    };

    tracing::debug!(selection = %selection, range = %range, "resolved period");
    range
}

/// Resolve the period of the given kind that contains `today`
pub fn resolve_current(kind: PeriodKind, today: NaiveDate) -> DateRange {
    resolve_period(&PeriodSelection::current(kind, today))
}

fn span(first: YearMonth, last: YearMonth) -> DateRange {
    // first <= last for every caller, so the range is ordered
    DateRange::new(first.first_day(), last.last_day()).unwrap_or_else(|_| DateRange::month(first))
}
