//! In-memory collection of the current user's expenses.

use crate::{Expense, ExpenseId};

/// Ordered collection of canonical expense records.
///
/// Records only enter through [`replace_all`](Self::replace_all) (after a
/// list) or [`upsert`](Self::upsert) (after a confirmed create/update), so the
/// store never holds anything the server did not return.
#[derive(Debug, Default, Clone)]
pub struct ExpenseStore {
    items: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps the whole collection.
    pub fn replace_all(&mut self, records: Vec<Expense>) {
        self.items = records;
    }

    /// Inserts `record` at the end if its id is unseen, otherwise replaces the
    /// existing record in place.
    pub fn upsert(&mut self, record: Expense) {
        match self.items.iter_mut().find(|item| item.id == record.id) {
            Some(slot) => *slot = record,
            None => self.items.push(record),
        }
    }

    /// Removes the record with `id`. Returns whether a record was removed;
    /// removing an absent id is not an error.
    pub fn remove(&mut self, id: &ExpenseId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    pub fn all(&self) -> &[Expense] {
        &self.items
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
