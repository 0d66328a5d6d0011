use std::time::Duration;

use engine::Tz;
use serde::Deserialize;

use crate::{
    args::Args,
    error::{AppError, Result},
    session::default_session_path,
};

const DEFAULT_CONFIG_PATH: &str = "config/expense.toml";

/// How the store catches up after a confirmed create/update/delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationSync {
    /// Apply the server's canonical record locally.
    #[default]
    Splice,
    /// Re-list the whole collection.
    Refetch,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub session_path: String,
    pub timezone: String,
    pub mutation_sync: MutationSync,
    pub request_timeout_secs: u64,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            session_path: default_session_path().to_string(),
            timezone: "UTC".to_string(),
            mutation_sync: MutationSync::default(),
            request_timeout_secs: 30,
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parsed IANA timezone. Only decides the default date of a new expense;
    /// stored dates are calendar dates and are never shifted.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::InvalidConfig(format!("timezone: {err}")))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.base_url.trim().is_empty() {
            return Err(AppError::InvalidConfig("base_url is empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Layers defaults, the TOML file, `EXPENSE_TRACKER_*` variables and CLI
/// overrides, in that order.
pub fn load(args: &Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings = load_file(config_path)?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(session_path) = &args.session_path {
        settings.session_path = session_path.clone();
    }
    if let Some(timezone) = &args.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    settings.validate()?;
    Ok(settings)
}

fn load_file(config_path: &str) -> Result<AppConfig> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("EXPENSE_TRACKER"));
    Ok(builder.build()?.try_deserialize()?)
}
