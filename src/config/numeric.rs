//! Lenient integer coercion for scheduling fields
//!
//! Step and epoch counts are accepted as integers, floats (truncated toward
//! zero) or numeric strings, so `steps_per_epoch: "5"` in a config file and
//! `.steps_per_epoch("5")` in code both yield 5.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loosely typed number awaiting coercion to an integer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// Integer value
    Int(i64),
    /// Floating point value, truncated toward zero
    Float(f64),
    /// Text holding an integer, surrounding whitespace allowed
    Text(String),
}

impl Numeric {
    /// Coerce to an integer, naming `field` in the error.
    pub fn to_int(&self, field: &'static str) -> Result<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Float(v) if v.is_finite() && v.abs() < i64::MAX as f64 => Ok(v.trunc() as i64),
            Self::Float(v) => Err(ConfigError::invalid(
                field,
                format!("{v} cannot be converted to an integer"),
                "Use a finite whole number",
            )),
            Self::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                ConfigError::invalid(
                    field,
                    format!("'{s}' is not an integer"),
                    "Use a whole number such as 100",
                )
            }),
        }
    }

    /// Coerce to an integer no smaller than `min`.
    pub(crate) fn to_count(&self, field: &'static str, min: i64, rule: &str) -> Result<usize> {
        let value = self.to_int(field)?;
        if value < min {
            return Err(ConfigError::invalid(
                field,
                format!("{value} ({rule})"),
                format!("Set `{field}` to at least {min}"),
            ));
        }
        usize::try_from(value).map_err(|_| {
            ConfigError::invalid(field, format!("{value} is too large"), "Use a smaller value")
        })
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

macro_rules! numeric_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Numeric {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

numeric_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Numeric {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Self::Float(v as f64), Self::Int)
    }
}

impl From<u64> for Numeric {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::Float(v as f64), Self::Int)
    }
}

impl From<f32> for Numeric {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Numeric {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Numeric {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
