//! Client side of the expense tracker: session handling, the HTTP client of
//! the remote expense store and the controller that keeps the local view in
//! sync with it.

pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod sync;

pub use client::{ClientError, ExpenseClient};
pub use config::{AppConfig, MutationSync};
pub use error::{AppError, Result};
pub use session::Session;
pub use sync::{SyncController, SyncError, SyncState};
