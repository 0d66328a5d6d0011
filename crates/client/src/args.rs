use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "expense", about = "Track personal expenses against a remote store")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override base URL of the expense store (e.g. http://127.0.0.1:5000).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override the session file path.
    #[arg(long, global = true)]
    pub session_path: Option<String>,
    /// Override the timezone that decides "today" for new expenses (IANA name).
    #[arg(long, global = true)]
    pub timezone: Option<String>,
    /// Override log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a bearer token issued by the login service.
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored token.
    Logout,
    /// List expenses with totals, optionally filtered.
    List {
        /// Only this category (e.g. "Non-Essential").
        #[arg(long)]
        category: Option<String>,
        /// Only this calendar date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
        /// Print the dashboard view as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Add a new expense.
    Add(ExpenseFields),
    /// Edit an existing expense; omitted fields keep their current value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete an expense.
    Delete { id: String },
}

#[derive(Debug, clap::Args)]
pub struct ExpenseFields {
    #[arg(long)]
    pub amount: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub description: String,
    /// Defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct EditFields {
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
}
