//! Date range requested from the feed.

use chrono::{Days, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::WindowError;

/// Spans the feed is queried with, counted in days after the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSpan {
    #[default]
    One,
    Three,
    Seven,
}

impl DateSpan {
    pub fn days(self) -> u32 {
        match self {
            DateSpan::One => 1,
            DateSpan::Three => 3,
            DateSpan::Seven => 7,
        }
    }
}

impl TryFrom<u32> for DateSpan {
    type Error = WindowError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(DateSpan::One),
            3 => Ok(DateSpan::Three),
            7 => Ok(DateSpan::Seven),
            other => Err(WindowError::UnsupportedSpan(other)),
        }
    }
}

impl FromStr for DateSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a number of days"))?;
        DateSpan::try_from(days).map_err(|e| e.to_string())
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// Inclusive `start_date..=end_date` pair sent as query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FeedWindow {
    pub fn starting(start: NaiveDate, span: DateSpan) -> Result<Self, WindowError> {
        let end = start
            .checked_add_days(Days::new(u64::from(span.days())))
            .ok_or(WindowError::OutOfRange)?;
        Ok(FeedWindow { start, end })
    }

    /// Window beginning on the local calendar date.
    pub fn from_today(span: DateSpan) -> Result<Self, WindowError> {
        Self::starting(Local::now().date_naive(), span)
    }

    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_spans() {
        assert_eq!(DateSpan::try_from(1u32), Ok(DateSpan::One));
        assert_eq!(DateSpan::try_from(3u32), Ok(DateSpan::Three));
        assert_eq!(DateSpan::try_from(7u32), Ok(DateSpan::Seven));
    }

    #[test]
    fn test_unsupported_span_is_rejected() {
        assert_eq!(DateSpan::try_from(2u32), Err(WindowError::UnsupportedSpan(2)));
        assert!("14".parse::<DateSpan>().is_err());
        assert!("week".parse::<DateSpan>().is_err());
    }

    #[test]
    fn test_parse_span() {
        assert_eq!("3".parse::<DateSpan>(), Ok(DateSpan::Three));
        assert_eq!(DateSpan::Seven.to_string(), "7");
    }

    #[test]
    fn test_window_params() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let window = FeedWindow::starting(start, DateSpan::Three).unwrap();

        assert_eq!(window.start_param(), "2024-12-30");
        assert_eq!(window.end_param(), "2025-01-02");
        assert!(window.end >= window.start);
    }

    #[test]
    fn test_window_overflow() {
        let result = FeedWindow::starting(NaiveDate::MAX, DateSpan::One);
        assert_eq!(result, Err(WindowError::OutOfRange));
    }
}
