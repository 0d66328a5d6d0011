//! Totals and chart series derived from a (filtered) sequence of expenses.
//!
//! Every function here is pure and cheap; callers recompute instead of caching
//! because amounts change on edit and delete.

use serde::Serialize;

use crate::{
    Amount, Category, Expense,
    filter::{FilterCriteria, apply_filters},
};

/// Summed amount of one category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Amount,
}

/// One bar/slice of the category chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChartSlice {
    pub category: Category,
    pub amount: Amount,
    /// Fraction of the series total in `0.0..=1.0`; `0.0` when the total is 0.
    pub share: f64,
}

/// Everything the dashboard shows, derived from one store snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub criteria_active: bool,
    pub filtered: Vec<Expense>,
    /// Total of the whole collection.
    pub total_expense: Amount,
    /// Total of `filtered`.
    pub filtered_total: Amount,
    pub by_category: Vec<CategoryTotal>,
    pub chart: Vec<ChartSlice>,
}

/// Sum of the amounts; zero for an empty sequence.
pub fn total_amount(records: &[Expense]) -> Amount {
    records.iter().map(|expense| expense.amount).sum()
}

/// Per-category totals in first-occurrence order. Categories absent from
/// `records` are omitted.
pub fn by_category(records: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::with_capacity(Category::ALL.len());
    for expense in records {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(total) => total.amount += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category,
                amount: expense.amount,
            }),
        }
    }
    totals
}

/// [`by_category`] with each entry's share of the total.
pub fn chart_series(records: &[Expense]) -> Vec<ChartSlice> {
    let totals = by_category(records);
    let sum: Amount = totals.iter().map(|t| t.amount).sum();

    totals
        .into_iter()
        .map(|t| ChartSlice {
            category: t.category,
            amount: t.amount,
            share: if sum.is_zero() {
                0.0
            } else {
                t.amount.value() / sum.value()
            },
        })
        .collect()
}

/// Derives the dashboard view of `all` under `criteria`.
pub fn summarize(all: &[Expense], criteria: &FilterCriteria) -> DashboardView {
    let filtered = apply_filters(all, criteria);
    DashboardView {
        criteria_active: !criteria.is_empty(),
        total_expense: total_amount(all),
        filtered_total: total_amount(&filtered),
        by_category: by_category(&filtered),
        chart: chart_series(&filtered),
        filtered,
    }
}
