//! Untyped input values
//!
//! [`Value`] is what callers hand to the factory before a type has been
//! settled on. The first six arms are the kinds the factory knows how to
//! build; everything else travels as [`Value::Other`] so a custom creator can
//! still have a go at it.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;
use std::fmt;
use url::Url;

/// A loosely typed value, as decoded from YAML, JSON or supplied by code
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    TextList(Vec<String>),
    Flag(bool),
    Cardinal(i64),
    DateTime(DateTime<FixedOffset>),
    Url(Url),
    /// Anything the factory does not recognise on its own
    Other(serde_yaml::Value),
}

impl Value {
    /// Convert a decoded YAML value
    ///
    /// Strings, booleans, integers that fit in an `i64` and sequences made
    /// only of strings map onto their typed arms; the rest is kept as-is.
    pub fn from_yaml(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::String(s) => Self::Text(s),
            serde_yaml::Value::Bool(b) => Self::Flag(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Cardinal(i),
                None => Self::Other(serde_yaml::Value::Number(n)),
            },
            serde_yaml::Value::Sequence(seq) => {
                if seq.iter().all(|v| v.is_string()) {
                    let items = seq
                        .into_iter()
                        .filter_map(|v| match v {
                            serde_yaml::Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect();
                    Self::TextList(items)
                } else {
                    Self::Other(serde_yaml::Value::Sequence(seq))
                }
            }
            other => Self::Other(other),
        }
    }

    /// Human readable name of the run-time type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::TextList(_) => "text list",
            Self::Flag(_) => "flag",
            Self::Cardinal(_) => "cardinal",
            Self::DateTime(_) => "date-time",
            Self::Url(_) => "url",
            Self::Other(other) => match other {
                serde_yaml::Value::Null => "null",
                serde_yaml::Value::Bool(_) => "bool",
                serde_yaml::Value::Number(n) if n.is_f64() => "float",
                serde_yaml::Value::Number(_) => "integer",
                serde_yaml::Value::String(_) => "string",
                serde_yaml::Value::Sequence(_) => "sequence",
                serde_yaml::Value::Mapping(_) => "mapping",
                serde_yaml::Value::Tagged(_) => "tagged value",
            },
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_cardinal(&self) -> Option<i64> {
        match self {
            Self::Cardinal(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::DateTime(t) => Some(t),
            _ => None,
        }
    }

    /// Convert to string with fallback representations
    pub fn to_string_representation(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::TextList(items) => format!("[{}]", items.join(", ")),
            Self::Flag(b) => b.to_string(),
            Self::Cardinal(n) => n.to_string(),
            Self::DateTime(t) => t.to_rfc3339(),
            Self::Url(u) => u.to_string(),
            Self::Other(serde_yaml::Value::Null) => "null".to_string(),
            Self::Other(other) => serde_yaml::to_string(other)
                .unwrap_or_else(|_| "<invalid>".to_string())
                .trim()
                .to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_representation())
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        Self::from_yaml(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::TextList(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Self::TextList(value.into_iter().map(str::to_string).collect())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Url> for Value {
    fn from(value: Url) -> Self {
        Self::Url(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.fixed_offset())
    }
}

macro_rules! cardinal_from_lossless {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::Cardinal(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! cardinal_from_checked {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    match i64::try_from(value) {
                        Ok(n) => Self::Cardinal(n),
                        Err(_) => Self::Other(serde_yaml::Value::String(value.to_string())),
                    }
                }
            }
        )*
    };
}

cardinal_from_lossless!(i8, i16, i32, i64, u8, u16, u32);
cardinal_from_checked!(isize, usize, u64, i128, u128);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Other(serde_yaml::Value::Number(serde_yaml::Number::from(value)))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}
