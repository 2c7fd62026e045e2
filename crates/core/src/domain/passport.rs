// Passport identifier: "<series> <number>"

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Two-part passport identifier, both parts integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passport {
    pub series: i64,
    pub number: i64,
}

impl Passport {
    pub fn new(series: i64, number: i64) -> Self {
        Self { series, number }
    }

    /// Parse a passport string.
    ///
    /// The input is split on single spaces, so `"1234  567890"` yields an
    /// empty second token and is rejected as a non-numeric number. Tokens
    /// after the second are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split(' ');
        let (Some(series), Some(number)) = (parts.next(), parts.next()) else {
            return Err(DomainError::InvalidPassport(
                "invalid passport number, must have at least 2 parts".to_string(),
            ));
        };

        let series = series.parse::<i64>().map_err(|_| {
            DomainError::InvalidPassport(format!(
                "invalid passport series, must be a number, got: {}",
                series
            ))
        })?;

        let number = number.parse::<i64>().map_err(|_| {
            DomainError::InvalidPassport(format!(
                "invalid passport number, must be a number, got: {}",
                number
            ))
        })?;

        Ok(Self { series, number })
    }
}

impl FromStr for Passport {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Passport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.series, self.number)
    }
}
