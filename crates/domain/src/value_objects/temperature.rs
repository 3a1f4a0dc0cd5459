//! Sampling temperature value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Sampling temperature, always within the closed range `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Temperature(f32);

impl Temperature {
    /// Lowest accepted value
    pub const MIN: f32 = 0.0;
    /// Highest accepted value
    pub const MAX: f32 = 1.0;
    /// Value used when nothing else is configured
    pub const DEFAULT: f32 = 0.7;

    /// Create a temperature with validation
    ///
    /// Both bounds are inclusive. NaN is rejected.
    pub fn new(value: f32) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidTemperature(value))
        }
    }

    /// Get the raw value
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f32> for Temperature {
    type Error = DomainError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f32 {
    fn from(temperature: Temperature) -> Self {
        temperature.0
    }
}

impl std::str::FromStr for Temperature {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::ValidationError(format!("not a number: {s}")))?;
        Self::new(value)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
