//! Node values and their coercions.
//!
//! A node's value is fixed at construction as one tagged variant. Typed reads
//! go through [`FromParameter`], which is the only place raw values are parsed.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Scalar held by a parameter node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParameterValue {
    Text(String),
    Boolean(bool),
    Enumerated(String),
    Numeric(i64),
}

impl ParameterValue {
    pub fn text(value: impl Into<String>) -> Self {
        ParameterValue::Text(value.into())
    }

    pub fn enumerated(value: impl Into<String>) -> Self {
        ParameterValue::Enumerated(value.into())
    }

    /// Textual form of the value, as exposed by `relatedValueOf`-style reads.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ParameterValue::Text(s) | ParameterValue::Enumerated(s) => Cow::Borrowed(s),
            ParameterValue::Boolean(b) => Cow::Owned(b.to_string()),
            ParameterValue::Numeric(n) => Cow::Owned(n.to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            ParameterValue::Text(s) | ParameterValue::Enumerated(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Boolean(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Numeric(value)
    }
}

/// Typed coercion applied at the query boundary
pub trait FromParameter: Sized {
    /// Human-readable target name used in conversion errors
    const TARGET: &'static str;

    fn from_parameter(value: &ParameterValue) -> Result<Self, String>;
}

impl FromParameter for String {
    const TARGET: &'static str = "text";

    fn from_parameter(value: &ParameterValue) -> Result<Self, String> {
        Ok(value.as_text().into_owned())
    }
}

impl FromParameter for bool {
    const TARGET: &'static str = "boolean";

    fn from_parameter(value: &ParameterValue) -> Result<Self, String> {
        match value {
            ParameterValue::Boolean(b) => Ok(*b),
            ParameterValue::Text(s) | ParameterValue::Enumerated(s) => {
                match s.trim().to_ascii_lowercase().as_str() {
                    "true" => Ok(true),
                    "false" => Ok(false),
                    other => Err(format!("'{}' is not a boolean", other)),
                }
            }
            ParameterValue::Numeric(n) => Err(format!("numeric {} is not a boolean", n)),
        }
    }
}

impl FromParameter for i64 {
    const TARGET: &'static str = "number";

    fn from_parameter(value: &ParameterValue) -> Result<Self, String> {
        match value {
            ParameterValue::Numeric(n) => Ok(*n),
            ParameterValue::Text(s) | ParameterValue::Enumerated(s) => {
                s.trim().parse::<i64>().map_err(|e| e.to_string())
            }
            ParameterValue::Boolean(b) => Err(format!("boolean {} is not a number", b)),
        }
    }
}

/// Shared coercion for enumerations that implement `FromStr`.
pub fn parse_enumerated<T>(value: &ParameterValue) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value {
        ParameterValue::Text(s) | ParameterValue::Enumerated(s) => {
            T::from_str(s.trim()).map_err(|e| e.to_string())
        }
        other => Err(format!("{} is not an enumerated value", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_of_each_variant() {
        assert_eq!(ParameterValue::text("Author").as_text(), "Author");
        assert_eq!(ParameterValue::enumerated("JOURNAL").as_text(), "JOURNAL");
        assert_eq!(ParameterValue::Boolean(true).as_text(), "true");
        assert_eq!(ParameterValue::Numeric(42).as_text(), "42");
    }

    #[test]
    fn boolean_coercion_accepts_text() {
        assert!(bool::from_parameter(&ParameterValue::text("TRUE")).unwrap());
        assert!(!bool::from_parameter(&ParameterValue::text("false")).unwrap());
        assert!(bool::from_parameter(&ParameterValue::text("yes")).is_err());
        assert!(bool::from_parameter(&ParameterValue::Numeric(1)).is_err());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(i64::from_parameter(&ParameterValue::text(" 19090 ")).unwrap(), 19090);
        assert!(i64::from_parameter(&ParameterValue::text("port")).is_err());
    }

    #[test]
    fn blank_detection() {
        assert!(ParameterValue::text("  ").is_blank());
        assert!(!ParameterValue::Boolean(false).is_blank());
    }
}
