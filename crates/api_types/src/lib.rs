//! Wire types of the remote expense store.
//!
//! These mirror the JSON documents exchanged over `/api/expenses`. Values are
//! kept as the server sends them (category and date as plain strings); the
//! client converts them into validated domain records.

use serde::{Deserialize, Serialize};

/// Error body some servers attach to non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "message")]
    pub error: String,
}

pub mod expense {
    use super::*;

    /// An expense as stored server-side.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        /// Server-assigned identifier (opaque).
        #[serde(rename = "_id")]
        pub id: String,
        pub amount: f64,
        pub category: String,
        pub description: String,
        /// Either `YYYY-MM-DD` or a timestamp; normalized by the client.
        pub date: String,
    }

    /// Request body for `POST /api/expenses` and `PUT /api/expenses/{id}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseBody {
        pub description: String,
        pub amount: f64,
        pub category: String,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: String,
    }
}
