//! Domain core of the expense tracker.
//!
//! The engine owns the expense record types, the in-memory [`ExpenseStore`],
//! and the pure filter/aggregation functions that derive the dashboard view.
//! It does no I/O: the client crate feeds it canonical records confirmed by
//! the remote store.

pub use aggregate::{
    CategoryTotal, ChartSlice, DashboardView, by_category, chart_series, summarize, total_amount,
};
pub use amount::Amount;
pub use category::Category;
pub use date::{format_date, normalize_date, parse_date, today_in};
pub use error::EngineError;
pub use expense::{Expense, ExpenseDraft, ExpenseId, ValidDraft};
pub use filter::{FilterCriteria, apply_filters};
pub use store::ExpenseStore;

mod aggregate;
mod amount;
mod category;
mod date;
mod error;
mod expense;
mod filter;
mod store;

pub use chrono_tz::Tz;
