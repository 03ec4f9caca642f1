//! Answer values produced by prompts and used as literal rules.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A typed answer or literal.
///
/// Ints and floats compare numerically with each other; strings only compare
/// with strings.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Str(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }

    /// Whether `candidate` counts as this literal.
    ///
    /// A string candidate matches a numeric literal when it parses to the same
    /// number, and a numeric candidate matches a string literal when their
    /// texts are equal.
    #[must_use]
    pub fn matches(&self, candidate: &Value) -> bool {
        match (self, candidate) {
            (Value::Str(literal), Value::Str(answer)) => literal == answer,
            (Value::Str(literal), answer) => *literal == answer.to_string(),
            (Value::Int(literal), Value::Str(answer)) => answer
                .trim()
                .parse::<i64>()
                .is_ok_and(|parsed| parsed == *literal),
            (Value::Float(literal), Value::Str(answer)) => answer
                .trim()
                .parse::<f64>()
                .is_ok_and(|parsed| parsed == *literal),
            (literal, answer) => literal == answer,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(_), _) | (_, Value::Str(_)) => false,
            (a, b) => a.as_float() == b.as_float(),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(_), _) | (_, Value::Str(_)) => None,
            (a, b) => a.as_float()?.partial_cmp(&b.as_float()?),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            // Debug keeps the decimal point on whole floats, e.g. `2.0`
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_numeric_equality_across_kinds() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_ne!(Value::Int(2), Value::from("2"));
        assert_ne!(Value::from("a"), Value::from("b"));
    }

    #[test]
    fn test_ordering() {
        assert_eq!(
            Value::Int(1).partial_cmp(&Value::Float(1.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("b").partial_cmp(&Value::from("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::from("1").partial_cmp(&Value::Int(1)), None);
    }

    #[test]
    fn test_matches_string_against_numeric_literal() {
        assert!(Value::Int(2).matches(&Value::from("2")));
        assert!(Value::Int(2).matches(&Value::from(" 2 ")));
        assert!(!Value::Int(2).matches(&Value::from("5")));
        assert!(!Value::Int(2).matches(&Value::from("two")));
        assert!(Value::Float(0.5).matches(&Value::from("0.5")));
    }

    #[test]
    fn test_matches_numeric_against_string_literal() {
        assert!(Value::from("3").matches(&Value::Int(3)));
        assert!(!Value::from("03").matches(&Value::Int(3)));
    }

    #[test]
    fn test_is_blank() {
        assert!(Value::from("").is_blank());
        assert!(!Value::from(" ").is_blank());
        assert!(!Value::Int(0).is_blank());
    }
}
