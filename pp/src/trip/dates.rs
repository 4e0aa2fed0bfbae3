//! Travel window resolution

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

/// Shortest trip the duration slider allows
pub const MIN_DURATION_DAYS: u32 = 1;

/// Longest trip the duration slider allows
pub const MAX_DURATION_DAYS: u32 = 14;

/// Descriptor used when the date range picker is left half-filled
pub const INCOMPLETE_DATES: &str = "Specific dates not fully selected.";

/// Days assumed when the date range is incomplete
const INCOMPLETE_DEFAULT_DAYS: u32 = 3;

/// Errors parsing user-entered dates
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),
}

/// How the traveler described when they want to go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Both endpoints of an explicit range were chosen
    Range { start: NaiveDate, end: NaiveDate },
    /// Dates mode is on but fewer than two endpoints were chosen
    Incomplete,
    /// Duration slider value
    Duration(u32),
}

/// Trip length plus the phrase used in the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub days: u32,
    pub descriptor: String,
}

impl DateWindow {
    /// Build a window from optional endpoints, as a range picker reports them
    ///
    /// Endpoints are ordered, so a reversed pair is the same range.
    pub fn from_endpoints(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        debug!(?start, ?end, "DateWindow::from_endpoints: called");
        match (start, end) {
            (Some(a), Some(b)) => Self::Range {
                start: a.min(b),
                end: a.max(b),
            },
            _ => Self::Incomplete,
        }
    }

    /// Duration slider value clamped to its bounds
    pub fn duration(days: u32) -> Self {
        Self::Duration(days.clamp(MIN_DURATION_DAYS, MAX_DURATION_DAYS))
    }

    /// Resolve to a day count and prompt descriptor
    pub fn resolve(&self) -> ResolvedWindow {
        debug!(?self, "DateWindow::resolve: called");
        match *self {
            Self::Range { start, end } => {
                let days = (end - start).num_days() + 1;
                let days = u32::try_from(days).unwrap_or(1).max(1);
                ResolvedWindow {
                    days,
                    descriptor: format!("from {} to {} ({} days)", start, end, days),
                }
            }
            Self::Incomplete => ResolvedWindow {
                days: INCOMPLETE_DEFAULT_DAYS,
                descriptor: INCOMPLETE_DATES.to_string(),
            },
            Self::Duration(days) => {
                let days = days.clamp(MIN_DURATION_DAYS, MAX_DURATION_DAYS);
                ResolvedWindow {
                    days,
                    descriptor: format!("for a {}-day trip", days),
                }
            }
        }
    }
}

/// Parse an optional `YYYY-MM-DD` field; blank means "not selected"
pub fn parse_date_field(input: &str) -> Result<Option<NaiveDate>, DateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DateError::Invalid(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let window = DateWindow::from_endpoints(Some(date("2026-01-10")), Some(date("2026-01-12")));
        let resolved = window.resolve();
        assert_eq!(resolved.days, 3);
        assert_eq!(resolved.descriptor, "from 2026-01-10 to 2026-01-12 (3 days)");
    }

    #[test]
    fn test_single_day_range() {
        let window = DateWindow::from_endpoints(Some(date("2026-03-01")), Some(date("2026-03-01")));
        assert_eq!(window.resolve().days, 1);
    }

    #[test]
    fn test_range_beyond_slider_limit() {
        let window = DateWindow::from_endpoints(Some(date("2026-05-01")), Some(date("2026-05-30")));
        assert_eq!(window.resolve().days, 30);
    }

    #[test]
    fn test_reversed_endpoints_are_ordered() {
        let window = DateWindow::from_endpoints(Some(date("2026-01-12")), Some(date("2026-01-10")));
        assert_eq!(
            window,
            DateWindow::Range {
                start: date("2026-01-10"),
                end: date("2026-01-12")
            }
        );
    }

    #[test]
    fn test_incomplete_range_defaults() {
        for window in [
            DateWindow::from_endpoints(Some(date("2026-01-10")), None),
            DateWindow::from_endpoints(None, Some(date("2026-01-10"))),
            DateWindow::from_endpoints(None, None),
        ] {
            let resolved = window.resolve();
            assert_eq!(resolved.days, 3);
            assert_eq!(resolved.descriptor, INCOMPLETE_DATES);
        }
    }

    #[test]
    fn test_duration_descriptor() {
        let resolved = DateWindow::Duration(4).resolve();
        assert_eq!(resolved.days, 4);
        assert_eq!(resolved.descriptor, "for a 4-day trip");
    }

    #[test]
    fn test_duration_clamped() {
        assert_eq!(DateWindow::duration(0), DateWindow::Duration(1));
        assert_eq!(DateWindow::duration(40), DateWindow::Duration(14));
        assert_eq!(DateWindow::Duration(99).resolve().days, 14);
    }

    #[test]
    fn test_parse_date_field() {
        assert_eq!(parse_date_field(""), Ok(None));
        assert_eq!(parse_date_field(" 2026-01-10 "), Ok(Some(date("2026-01-10"))));
        assert_eq!(
            parse_date_field("10/01/2026"),
            Err(DateError::Invalid("10/01/2026".to_string()))
        );
    }

    proptest! {
        #[test]
        fn prop_slider_days_pass_through(days in 1u32..=14) {
            let resolved = DateWindow::Duration(days).resolve();
            prop_assert_eq!(resolved.days, days);
            prop_assert_eq!(resolved.descriptor, format!("for a {}-day trip", days));
        }

        #[test]
        fn prop_range_length(offset in 0i64..365) {
            let start = date("2026-01-01");
            let end = start + chrono::Duration::days(offset);
            let resolved = DateWindow::from_endpoints(Some(start), Some(end)).resolve();
            prop_assert_eq!(i64::from(resolved.days), offset + 1);
        }
    }
}
