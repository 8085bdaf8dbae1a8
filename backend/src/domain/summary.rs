//! Income, expense, and balance totals over a listing.

use serde::Serialize;

use super::item::{Item, ItemType};

/// Aggregates derived from exactly the items of one listing.
///
/// Totals are computed in `i64` and saturate at its bounds rather than
/// wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_income: i64,
    pub total_expense: i64,
    pub balance: i64,
}

impl LedgerSummary {
    /// Sum `items` by type.
    ///
    /// # Examples
    /// ```
    /// use ledger::domain::LedgerSummary;
    ///
    /// let summary = LedgerSummary::from_items(std::iter::empty());
    /// assert_eq!(summary, LedgerSummary::default());
    /// ```
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let (total_income, total_expense) =
            items
                .into_iter()
                .fold((0_i64, 0_i64), |(income, expense), item| match item.kind() {
                    ItemType::Income => (income.saturating_add(item.amount().get()), expense),
                    ItemType::Expense => (income, expense.saturating_add(item.amount().get())),
                });
        Self {
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
        }
    }
}
