//! Listing filters: type and inclusive calendar-day range.
//!
//! Raw query values are parsed once at the boundary into an [`ItemFilter`].
//! Day bounds are interpreted in UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemType};
use super::messages::Message;

const DATE_FORMAT: &str = "%Y-%m-%d";
const ALL_TYPES: &str = "all";

/// Query string values for the listing view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInput {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Why listing filters were rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterValidationError {
    #[error("type filter must be all, Income, or Expense (got '{0}')")]
    InvalidType(String),
    #[error("date '{0}' must use the YYYY-MM-DD format")]
    InvalidDate(String),
}

impl FilterValidationError {
    /// User-facing message for this failure.
    pub fn message(&self) -> Message {
        match self {
            Self::InvalidType(_) => Message::InvalidTypeFilter,
            Self::InvalidDate(_) => Message::InvalidDateFilter,
        }
    }
}

/// Validated listing filter.
///
/// `kind == None` selects both income and expense entries. A start date later
/// than the end date is accepted and matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub kind: Option<ItemType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, FilterValidationError> {
    present(raw)
        .map(|value| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map_err(|_| FilterValidationError::InvalidDate(value.to_owned()))
        })
        .transpose()
}

impl ItemFilter {
    /// Parse raw query values. Empty strings count as absent.
    ///
    /// # Examples
    /// ```
    /// use ledger::domain::{FilterInput, ItemFilter, ItemType};
    ///
    /// let input = FilterInput {
    ///     kind: Some("Income".into()),
    ///     start_date: Some("2024-05-01".into()),
    ///     end_date: Some(String::new()),
    /// };
    /// let filter = ItemFilter::parse(&input).unwrap();
    /// assert_eq!(filter.kind, Some(ItemType::Income));
    /// assert!(filter.end_date.is_none());
    /// ```
    pub fn parse(input: &FilterInput) -> Result<Self, FilterValidationError> {
        let kind = match present(input.kind.as_deref()) {
            None | Some(ALL_TYPES) => None,
            Some(other) => Some(
                other
                    .parse::<ItemType>()
                    .map_err(|_| FilterValidationError::InvalidType(other.to_owned()))?,
            ),
        };

        Ok(Self {
            kind,
            start_date: parse_date(input.start_date.as_deref())?,
            end_date: parse_date(input.end_date.as_deref())?,
        })
    }

    /// Inclusive lower bound: midnight UTC of the start date.
    pub fn created_from(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Inclusive upper bound: 23:59:59.999 UTC of the end date.
    pub fn created_until(&self) -> Option<DateTime<Utc>> {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
        self.end_date
            .map(|date| date.and_time(end_of_day).and_utc())
    }

    /// Whether `item` satisfies the type and date constraints. Ownership is
    /// checked separately by the repository.
    pub fn matches(&self, item: &Item) -> bool {
        let created_at = item.created_at();
        self.kind.is_none_or(|kind| item.kind() == kind)
            && self.created_from().is_none_or(|from| created_at >= from)
            && self.created_until().is_none_or(|until| created_at <= until)
    }

    /// Filter values echoed back for redisplay of the filter form.
    pub fn echo(&self) -> FilterEcho {
        FilterEcho {
            type_filter: self
                .kind
                .map_or(ALL_TYPES, ItemType::as_str)
                .to_owned(),
            start_date: self
                .start_date
                .map(|date| date.format(DATE_FORMAT).to_string()),
            end_date: self
                .end_date
                .map(|date| date.format(DATE_FORMAT).to_string()),
        }
    }
}

/// Normalised filter values as shown in the listing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEcho {
    pub type_filter: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
