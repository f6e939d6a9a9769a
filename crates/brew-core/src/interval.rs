//! Calendar-relative intervals used to bucket entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// A calendar bucket relative to a reference "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Same calendar date as now.
    #[default]
    Day,
    /// Same calendar week as now.
    Week,
    /// Same year and month as now.
    Month,
    /// Same year as now.
    Year,
    /// Every entry.
    All,
}

impl Interval {
    /// Every interval in cycling order.
    pub const ALL: [Self; 5] = [Self::Day, Self::Week, Self::Month, Self::Year, Self::All];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    /// The interval after this one, wrapping from `All` back to `Day`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Day => Self::Week,
            Self::Week => Self::Month,
            Self::Month => Self::Year,
            Self::Year => Self::All,
            Self::All => Self::Day,
        }
    }

    /// Returns true if `instant` falls in this interval around `now`.
    ///
    /// Calendar dates are taken in `now`'s time zone, so the same instant can
    /// land on different days for callers in different zones.
    pub fn contains<Tz: TimeZone>(
        self,
        instant: DateTime<Utc>,
        now: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> bool {
        if self == Self::All {
            return true;
        }
        let Some(date) = local_date(instant, &now.timezone()) else {
            return false;
        };
        let today = now.date_naive();
        match self {
            Self::Day => date == today,
            Self::Week => week_start.first_day(date) == week_start.first_day(today),
            Self::Month => date.year() == today.year() && date.month() == today.month(),
            Self::Year => date.year() == today.year(),
            Self::All => true,
        }
    }

    /// Phrase used at the end of a summary sentence, e.g. "this week".
    pub fn phrase<Tz: TimeZone>(self, now: &DateTime<Tz>) -> String {
        let today = now.date_naive();
        match self {
            Self::Day => "today".to_string(),
            Self::Week => "this week".to_string(),
            Self::Month => format!("in {}", today.format("%B")),
            Self::Year => format!("in {}", today.year()),
            Self::All => "in total".to_string(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            _ => Err(QueryError::UnknownInterval(s.to_string())),
        }
    }
}

/// Calendar date of `instant` in `tz`, or `None` past the representable range.
fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> Option<NaiveDate> {
    let offset = tz.offset_from_utc_datetime(&instant.naive_utc()).fix();
    instant
        .naive_utc()
        .checked_add_signed(Duration::seconds(offset.local_minus_utc().into()))
        .map(|local| local.date())
}

/// The day a calendar week begins on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// The first day of the week containing `date`.
    #[must_use]
    pub fn first_day(self, date: NaiveDate) -> NaiveDate {
        let offset = match self {
            Self::Sunday => date.weekday().num_days_from_sunday(),
            Self::Monday => date.weekday().num_days_from_monday(),
        };
        date.checked_sub_signed(Duration::days(i64::from(offset)))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl FromStr for WeekStart {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" => Ok(Self::Sunday),
            "monday" => Ok(Self::Monday),
            _ => Err(QueryError::UnknownWeekStart(s.to_string())),
        }
    }
}
