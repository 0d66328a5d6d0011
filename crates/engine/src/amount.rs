use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use serde::Serialize;

use crate::EngineError;

/// Relative tolerance used when comparing sums of amounts.
const EPSILON: f64 = 1e-9;

/// Non-negative money amount of an expense.
///
/// The remote store exchanges amounts as JSON numbers, so the value is kept as
/// a finite `f64`. Construction always goes through [`Amount::new`] (or
/// parsing), which rejects negative, `NaN` and infinite values.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount = Amount::new(12.5).unwrap();
/// assert_eq!(amount.to_string(), "12.50");
/// assert!(Amount::new(-5.0).is_err());
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().value(), 10.0);
/// assert_eq!("10,5".parse::<Amount>().unwrap().value(), 10.5);
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Creates a new amount, rejecting negative or non-finite values.
    pub fn new(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::invalid("amount must be a finite number"));
        }
        if value < 0.0 {
            return Err(EngineError::invalid("amount must be >= 0"));
        }
        // Normalizes -0.0.
        Ok(Self(value.abs()))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Compares two amounts within floating-point tolerance.
    #[must_use]
    pub fn approx_eq(self, other: Amount) -> bool {
        let scale = self.0.abs().max(other.0.abs()).max(1.0);
        (self.0 - other.0).abs() <= EPSILON * scale
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Amount {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string typed by the user.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid/negative strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::invalid(format!("invalid amount \"{}\"", s.trim()));

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::invalid("empty amount"));
        }
        if trimmed.starts_with('-') {
            return Err(EngineError::invalid("amount must be >= 0"));
        }

        let rest = trimmed.strip_prefix('+').unwrap_or(trimmed).trim();
        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units = parts.next().ok_or_else(invalid)?;
        let fraction = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }
        if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if let Some(frac) = fraction {
            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            if frac.len() > 2 {
                return Err(EngineError::invalid("too many decimals"));
            }
        }

        let value: f64 = rest.trim_end_matches('.').parse().map_err(|_| invalid())?;
        Self::new(value)
    }
}
