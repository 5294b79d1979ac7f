//! Named date ranges used by the transaction filter.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, util};

/// A named or custom date range that a transaction date must fall in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
    Custom,
}

impl Period {
    /// Every period in the order they are offered to the user.
    pub const ALL: [Period; 6] = [
        Period::All,
        Period::Today,
        Period::ThisWeek,
        Period::ThisMonth,
        Period::ThisYear,
        Period::Custom,
    ];

    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::ThisWeek => "this-week",
            Self::ThisMonth => "this-month",
            Self::ThisYear => "this-year",
            Self::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::Today => "Today",
            Self::ThisWeek => "This week",
            Self::ThisMonth => "This month",
            Self::ThisYear => "This year",
            Self::Custom => "Custom range",
        }
    }

    /// The closed date range covered by a named period relative to `today`.
    ///
    /// Returns `None` for [Period::All] and [Period::Custom], which are not
    /// anchored to `today`.
    pub fn range(self, today: Date, week_start: WeekStart) -> Option<DateRange> {
        match self {
            Self::All | Self::Custom => None,
            Self::Today => Some(DateRange {
                start: today,
                end: today,
            }),
            Self::ThisWeek => Some(week_bounds(today, week_start)),
            Self::ThisMonth => Some(month_bounds(today)),
            Self::ThisYear => Some(year_bounds(today)),
        }
    }
}

/// The first day of a week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weeks run Sunday to Saturday.
    #[default]
    Sunday,
    /// Weeks run Monday to Sunday.
    Monday,
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

fn week_bounds(anchor_date: Date, week_start: WeekStart) -> DateRange {
    let weekday = anchor_date.weekday();
    let days_since_start = match week_start {
        WeekStart::Sunday => weekday.number_days_from_sunday(),
        WeekStart::Monday => weekday.number_days_from_monday(),
    };
    let start = anchor_date - Duration::days(days_since_start as i64);
    let end = start + Duration::days(6);

    DateRange { start, end }
}

fn month_bounds(anchor_date: Date) -> DateRange {
    let start = anchor_date - Duration::days(anchor_date.day() as i64 - 1);
    let days_in_month = anchor_date.month().length(anchor_date.year());
    let end = start + Duration::days(days_in_month as i64 - 1);

    DateRange { start, end }
}

fn year_bounds(anchor_date: Date) -> DateRange {
    let start = anchor_date - Duration::days(anchor_date.ordinal() as i64 - 1);
    let days_in_year = util::days_in_year(anchor_date.year());
    let end = start + Duration::days(days_in_year as i64 - 1);

    DateRange { start, end }
}
