//! Closed set of expense categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Category of an expense.
///
/// The remote store only knows these four values; anything else is rejected
/// before a request is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Basic,
    Essential,
    #[serde(rename = "Conditionally Essential")]
    ConditionallyEssential,
    #[serde(rename = "Non-Essential")]
    NonEssential,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::Basic,
        Self::Essential,
        Self::ConditionallyEssential,
        Self::NonEssential,
    ];

    /// Returns the canonical name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Essential => "Essential",
            Self::ConditionallyEssential => "Conditionally Essential",
            Self::NonEssential => "Non-Essential",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    /// Exact match against the canonical names (surrounding whitespace is
    /// ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .ok_or_else(|| EngineError::invalid(format!("unknown category \"{name}\"")))
    }
}
