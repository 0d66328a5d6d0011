use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Amount, Category, EngineError, date::parse_date};

/// Server-assigned identifier of an expense. Opaque and immutable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A canonical expense record, as confirmed by the remote store.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Amount,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
}

/// User-submitted values for a create or an update.
///
/// Fields may be missing or out of range; [`ExpenseDraft::validate`] is the
/// gate every draft passes before it is sent anywhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: Option<Category>,
    pub description: String,
    pub date: Option<NaiveDate>,
}

/// A draft that satisfied every record invariant.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidDraft {
    pub amount: Amount,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    /// Builds a draft from form text.
    ///
    /// An empty category or date means "not selected" and is reported by
    /// [`validate`](Self::validate), not here.
    pub fn parse(
        amount: &str,
        category: &str,
        description: &str,
        date: &str,
    ) -> Result<Self, EngineError> {
        let amount = amount.parse::<Amount>()?.value();
        let category = match category.trim() {
            "" => None,
            name => Some(name.parse::<Category>()?),
        };
        let date = match date.trim() {
            "" => None,
            raw => Some(parse_date(raw)?),
        };

        Ok(Self {
            amount,
            category,
            description: description.to_string(),
            date,
        })
    }

    /// Checks that every field is present and in range.
    pub fn validate(&self) -> Result<ValidDraft, EngineError> {
        let amount = Amount::new(self.amount)?;
        let category = self
            .category
            .ok_or_else(|| EngineError::invalid("category is required"))?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(EngineError::invalid("description is required"));
        }
        let date = self
            .date
            .ok_or_else(|| EngineError::invalid("date is required"))?;

        Ok(ValidDraft {
            amount,
            category,
            description: description.to_string(),
            date,
        })
    }
}

impl From<&Expense> for ExpenseDraft {
    /// Pre-fills an edit form with the current values of a record.
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.value(),
            category: Some(expense.category),
            description: expense.description.clone(),
            date: Some(expense.date),
        }
    }
}
