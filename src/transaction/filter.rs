//! The transaction filter: decides which transactions are visible for a
//! period, category and keyword.
//!
//! Filtering is a pure function of its arguments. The current date is passed
//! in by the caller so that results are reproducible.

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{IntoDeserializer, value::StrDeserializer},
};
use time::Date;

use crate::transaction::{
    core::Transaction,
    period::{Period, WeekStart},
};

/// The query string value that selects every category.
pub const ALL_CATEGORIES: &str = "all";

/// Which category a transaction must have to be visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category name.
    Named(String),
}

impl CategoryFilter {
    /// Interpret a raw query value, where an empty value or `all` means every category.
    pub fn from_query_value(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ALL_CATEGORIES) => Self::All,
            Some(name) => Self::Named(name.to_owned()),
        }
    }

    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

/// The combination of period, category, keyword and custom date range that
/// determines which transactions are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub period: Period,
    pub category: CategoryFilter,
    /// Case-insensitive text to look for in the description or category.
    pub keyword: String,
    /// Only used when `period` is [Period::Custom].
    pub start_date: Option<Date>,
    /// Only used when `period` is [Period::Custom].
    pub end_date: Option<Date>,
}

impl FilterSpec {
    /// Whether `transaction` passes the period, category and keyword checks.
    pub fn matches(&self, transaction: &Transaction, today: Date, week_start: WeekStart) -> bool {
        self.matches_period(transaction.date, today, week_start)
            && self.category.matches(&transaction.category)
            && self.matches_keyword(transaction)
    }

    fn matches_period(&self, date: Date, today: Date, week_start: WeekStart) -> bool {
        match self.period {
            Period::All => true,
            Period::Custom => {
                self.start_date.is_none_or(|start| date >= start)
                    && self.end_date.is_none_or(|end| date <= end)
            }
            period => period
                .range(today, week_start)
                .is_some_and(|range| range.contains(date)),
        }
    }

    fn matches_keyword(&self, transaction: &Transaction) -> bool {
        if self.keyword.is_empty() {
            return true;
        }

        let keyword = self.keyword.to_lowercase();

        transaction.description.to_lowercase().contains(&keyword)
            || transaction.category.to_lowercase().contains(&keyword)
    }
}

/// The filter as it appears in a URL query string.
///
/// Empty values are treated as missing, so that forms with blank inputs
/// produce the default filter.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub period: Option<Period>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Date>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Date>,
}

/// Deserialize an optional value where a blank string, as sent by an empty
/// form input, counts as missing.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let value_deserializer: StrDeserializer<'_, D::Error> = text.into_deserializer();
    T::deserialize(value_deserializer).map(Some)
}

impl From<FilterQuery> for FilterSpec {
    fn from(query: FilterQuery) -> Self {
        Self {
            period: query.period.unwrap_or_default(),
            category: CategoryFilter::from_query_value(query.category.as_deref()),
            keyword: query.keyword.unwrap_or_default(),
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}

impl From<&FilterSpec> for FilterQuery {
    fn from(spec: &FilterSpec) -> Self {
        let is_custom = spec.period == Period::Custom;

        Self {
            period: (spec.period != Period::All).then_some(spec.period),
            category: match &spec.category {
                CategoryFilter::All => None,
                CategoryFilter::Named(name) => Some(name.clone()),
            },
            keyword: (!spec.keyword.is_empty()).then(|| spec.keyword.clone()),
            start_date: spec.start_date.filter(|_| is_custom),
            end_date: spec.end_date.filter(|_| is_custom),
        }
    }
}

impl FilterSpec {
    /// Encode the filter as a URL query string, without the leading '?'.
    ///
    /// Default values are left out, so the default filter encodes as an empty string.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(FilterQuery::from(self))
            .inspect_err(|error| tracing::error!("Could not encode filter {self:?}: {error}"))
            .unwrap_or_default()
    }
}

/// Select the transactions that match `spec`.
///
/// The input is not modified and the matches keep their relative order.
/// `today` anchors the named periods, and `week_start` decides which day
/// "this week" starts on.
pub fn filter_transactions(
    transactions: &[Transaction],
    spec: &FilterSpec,
    today: Date,
    week_start: WeekStart,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| spec.matches(transaction, today, week_start))
        .cloned()
        .collect()
}

/// Sort `transactions` for display: newest first, ties keep their order.
pub fn sort_for_display(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}
