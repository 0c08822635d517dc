use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A positive, finite amount of money in whole currency units.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(try_from = "f64", into = "f64")]
pub struct MonetaryValue(f64);

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ValidationError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("Amount must be a positive finite number, got {0}")]
    NotPositive(f64),
}

impl MonetaryValue {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::NotPositive(value));
        }
        Ok(Self(value))
    }

    pub fn parse(raw_input: &str) -> Result<Self, ValidationError> {
        let trimmed = raw_input.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for MonetaryValue {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        MonetaryValue::new(value)
    }
}

impl From<MonetaryValue> for f64 {
    fn from(value: MonetaryValue) -> f64 {
        value.0
    }
}

impl Display for MonetaryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
