//! Filtered views over the expense collection.

use chrono::NaiveDate;

use crate::{Category, Expense};

/// Search criteria of the dashboard. `None` means "no constraint".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Returns true if the criteria match everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.date.is_none()
    }

    /// Both constraints must hold.
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        let category_ok = self.category.is_none_or(|c| c == expense.category);
        let date_ok = self.date.is_none_or(|d| d == expense.date);
        category_ok && date_ok
    }
}

/// Returns the records matching `criteria`, in input order.
pub fn apply_filters(records: &[Expense], criteria: &FilterCriteria) -> Vec<Expense> {
    records
        .iter()
        .filter(|expense| criteria.matches(expense))
        .cloned()
        .collect()
}
