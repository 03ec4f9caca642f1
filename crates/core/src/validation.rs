//! Answer formatting and acceptance rules.
//!
//! A raw line typed by the user is first run through an optional
//! [`Formatter`] and then checked against a [`RuleSet`]. Rules are tried in
//! order and the first one that matches decides the final value:
//!
//! - [`Rule::Type`] accepts anything coercible to the tagged type and
//!   replaces the answer with the coerced value
//! - [`Rule::Predicate`] accepts when the predicate returns `Ok(true)`; a
//!   predicate error is treated as a non-match
//! - [`Rule::Literal`] accepts an answer equal to the literal
//!
//! # Examples
//!
//! ```
//! use quick_prompt_core::validation::{Rule, RuleSet, TypeTag};
//! use quick_prompt_core::value::Value;
//!
//! let rules = RuleSet::new(vec![Rule::from(1), Rule::from(2), Rule::from(3)], None);
//! assert_eq!(rules.accept(Value::from("2")).unwrap(), Value::Int(2));
//! assert!(rules.accept(Value::from("5")).is_err());
//!
//! let numbers = RuleSet::new(vec![Rule::Type(TypeTag::Float)], None);
//! assert_eq!(numbers.accept(Value::from("0.5")).unwrap(), Value::Float(0.5));
//! ```

use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter as FmtFormatter};
use std::rc::Rc;

use itertools::Itertools;
use log::debug;

use crate::error::Result;
use crate::value::Value;

/// Why a candidate answer was turned down. Rejections are never surfaced to
/// the user beyond a re-prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    Format { input: String, reason: String },
    NoMatch { input: String },
    Blank,
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Format { input, reason } => {
                write!(f, "could not format `{input}`: {reason}")
            }
            RejectReason::NoMatch { input } => write!(f, "`{input}` matches no rule"),
            RejectReason::Blank => f.write_str("blank input is not allowed"),
        }
    }
}

/// Type a [`Rule::Type`] coerces answers into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Float,
    Str,
}

impl TypeTag {
    /// Coerces `value` into this type, or `None` if it does not fit.
    #[must_use]
    pub fn coerce(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (TypeTag::Int, Value::Int(i)) => Some(Value::Int(*i)),
            #[allow(clippy::cast_possible_truncation)]
            (TypeTag::Int, Value::Float(f)) if f.is_finite() => Some(Value::Int(f.trunc() as i64)),
            (TypeTag::Int, Value::Str(s)) => s.trim().parse::<i64>().ok().map(Value::Int),
            (TypeTag::Float, Value::Str(s)) => s.trim().parse::<f64>().ok().map(Value::Float),
            (TypeTag::Float, other) => other.as_float().map(Value::Float),
            (TypeTag::Str, other) => Some(Value::Str(other.to_string())),
            _ => None,
        }
    }

    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            TypeTag::Int => "<int>",
            TypeTag::Float => "<float>",
            TypeTag::Str => "<str>",
        }
    }
}

type PredicateFn = dyn Fn(&Value) -> Result<bool>;

/// A named check over a formatted answer.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    check: Rc<PredicateFn>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, check: impl Fn(&Value) -> Result<bool> + 'static) -> Self {
        Self {
            name: name.into(),
            check: Rc::new(check),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the check; an error counts as "no match".
    #[must_use]
    pub fn evaluate(&self, candidate: &Value) -> bool {
        match (self.check)(candidate) {
            Ok(accepted) => accepted,
            Err(e) => {
                debug!("Predicate `{}` failed on `{candidate}`: {e}", self.name);
                false
            }
        }
    }
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}

/// One acceptance criterion.
#[derive(Debug, Clone)]
pub enum Rule {
    Literal(Value),
    Type(TypeTag),
    Predicate(Predicate),
}

impl Rule {
    pub fn predicate(
        name: impl Into<String>,
        check: impl Fn(&Value) -> Result<bool> + 'static,
    ) -> Self {
        Rule::Predicate(Predicate::new(name, check))
    }

    /// Text shown for this rule in the help listing.
    #[must_use]
    pub fn hint(&self) -> String {
        match self {
            Rule::Literal(value) => value.to_string(),
            Rule::Type(tag) => tag.hint().to_string(),
            Rule::Predicate(predicate) => format!("({})", predicate.name()),
        }
    }

    /// Tries this rule, returning the accepted value on a match.
    fn try_accept(&self, candidate: &Value) -> Option<Value> {
        match self {
            Rule::Type(tag) => tag.coerce(candidate),
            Rule::Predicate(predicate) => predicate
                .evaluate(candidate)
                .then(|| candidate.clone()),
            Rule::Literal(literal) => literal.matches(candidate).then(|| match candidate {
                Value::Str(_) => literal.clone(),
                _ => candidate.clone(),
            }),
        }
    }
}

impl From<Value> for Rule {
    fn from(value: Value) -> Self {
        Rule::Literal(value)
    }
}

impl From<TypeTag> for Rule {
    fn from(tag: TypeTag) -> Self {
        Rule::Type(tag)
    }
}

impl From<i64> for Rule {
    fn from(value: i64) -> Self {
        Rule::Literal(Value::Int(value))
    }
}

impl From<i32> for Rule {
    fn from(value: i32) -> Self {
        Rule::Literal(Value::from(value))
    }
}

impl From<f64> for Rule {
    fn from(value: f64) -> Self {
        Rule::Literal(Value::Float(value))
    }
}

impl From<&str> for Rule {
    fn from(value: &str) -> Self {
        Rule::Literal(Value::from(value))
    }
}

impl From<String> for Rule {
    fn from(value: String) -> Self {
        Rule::Literal(Value::Str(value))
    }
}

type FormatFn = dyn Fn(&str) -> Result<Value>;

/// Turns raw typed text into a candidate answer.
#[derive(Clone)]
pub struct Formatter(Rc<FormatFn>);

impl Formatter {
    pub fn new(format: impl Fn(&str) -> Result<Value> + 'static) -> Self {
        Self(Rc::new(format))
    }

    /// A formatter that cannot fail, such as case folding.
    pub fn text(format: impl Fn(&str) -> String + 'static) -> Self {
        Self::new(move |raw| Ok(Value::Str(format(raw))))
    }

    /// Parses the input as an integer.
    #[must_use]
    pub fn int() -> Self {
        Self::new(|raw| {
            TypeTag::Int
                .coerce(&Value::from(raw))
                .ok_or_else(|| crate::error::Error::unexpected_answer("integer", raw))
        })
    }

    /// Parses the input as a float.
    #[must_use]
    pub fn float() -> Self {
        Self::new(|raw| {
            TypeTag::Float
                .coerce(&Value::from(raw))
                .ok_or_else(|| crate::error::Error::unexpected_answer("float", raw))
        })
    }

    /// Formats `raw`; any failure becomes a [`RejectReason::Format`].
    pub fn apply(&self, raw: &str) -> std::result::Result<Value, RejectReason> {
        (self.0)(raw).map_err(|e| RejectReason::Format {
            input: raw.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Debug for Formatter {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> std::fmt::Result {
        f.write_str("Formatter(..)")
    }
}

/// Formats `raw` with `formatter`, or passes it through as a string.
pub fn format_input(
    formatter: Option<&Formatter>,
    raw: &str,
) -> std::result::Result<Value, RejectReason> {
    match formatter {
        Some(formatter) => formatter.apply(raw),
        None => Ok(Value::from(raw)),
    }
}

/// Runs a literal through the formatter, keeping the literal when that fails.
fn normalize_literal(formatter: Option<&Formatter>, literal: Value) -> Value {
    match formatter {
        Some(formatter) => formatter.apply(&literal.to_string()).unwrap_or(literal),
        None => literal,
    }
}

/// An ordered, deduplicated set of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Builds a rule set, normalizing literals through `formatter` and
    /// dropping duplicate literals.
    #[must_use]
    pub fn new(rules: Vec<Rule>, formatter: Option<&Formatter>) -> Self {
        let mut set = Self::default();
        for rule in rules {
            set.push(rule, formatter);
        }
        set
    }

    /// Appends a rule unless it is a literal already present.
    pub fn push(&mut self, rule: Rule, formatter: Option<&Formatter>) {
        let rule = match rule {
            Rule::Literal(literal) => Rule::Literal(normalize_literal(formatter, literal)),
            other => other,
        };

        if let Rule::Literal(literal) = &rule {
            if self.literals().any(|existing| existing == literal) {
                return;
            }
        }
        self.rules.push(rule);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn literals(&self) -> impl Iterator<Item = &Value> {
        self.rules.iter().filter_map(|rule| match rule {
            Rule::Literal(value) => Some(value),
            _ => None,
        })
    }

    /// Whether a blank line passes as a literal answer.
    #[must_use]
    pub fn contains_blank(&self) -> bool {
        self.literals().any(Value::is_blank)
    }

    /// Literals sorted for display, or in insertion order when some of them
    /// cannot be compared with each other.
    #[must_use]
    pub fn sorted_literals(&self) -> Vec<&Value> {
        let literals: Vec<&Value> = self.literals().collect();
        let comparable = literals
            .iter()
            .tuple_combinations()
            .all(|(a, b)| a.partial_cmp(b).is_some());

        if comparable {
            literals
                .into_iter()
                .sorted_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
                .collect()
        } else {
            literals
        }
    }

    /// Help hints: sorted literals first, then type tags and predicates.
    #[must_use]
    pub fn hints(&self, skip_blank: bool) -> Vec<String> {
        let literal_hints = self
            .sorted_literals()
            .into_iter()
            .filter(|value| !(skip_blank && value.is_blank()))
            .map(ToString::to_string);

        let other_hints = self
            .rules
            .iter()
            .filter(|rule| !matches!(rule, Rule::Literal(_)))
            .map(Rule::hint);

        literal_hints.chain(other_hints).collect()
    }

    /// Decides whether `candidate` is acceptable and returns the final value.
    pub fn accept(&self, candidate: Value) -> std::result::Result<Value, RejectReason> {
        if self.rules.is_empty() {
            return Ok(candidate);
        }

        self.rules
            .iter()
            .find_map(|rule| rule.try_accept(&candidate))
            .ok_or_else(|| RejectReason::NoMatch {
                input: candidate.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_type_tag_coercion() {
        assert_eq!(TypeTag::Int.coerce(&Value::from("42")), Some(Value::Int(42)));
        assert_eq!(TypeTag::Int.coerce(&Value::from(" 7 ")), Some(Value::Int(7)));
        assert_eq!(TypeTag::Int.coerce(&Value::from("4.2")), None);
        assert_eq!(TypeTag::Int.coerce(&Value::Float(4.9)), Some(Value::Int(4)));
        assert_eq!(TypeTag::Float.coerce(&Value::from("4.5")), Some(Value::Float(4.5)));
        assert_eq!(TypeTag::Float.coerce(&Value::Int(3)), Some(Value::Float(3.0)));
        assert_eq!(TypeTag::Float.coerce(&Value::from("abc")), None);
        assert_eq!(TypeTag::Str.coerce(&Value::Int(3)), Some(Value::from("3")));
    }

    #[test]
    fn test_type_rule_returns_coerced_value() {
        let rules = RuleSet::new(vec![Rule::Type(TypeTag::Int)], None);
        let accepted = rules.accept(Value::from("12")).unwrap();
        assert_eq!(accepted.as_int(), Some(12));
        assert!(accepted.as_str().is_none());
    }

    #[test]
    fn test_literal_rules() {
        let rules = RuleSet::new(vec!["a".into(), "b".into()], None);
        assert_eq!(rules.accept(Value::from("a")).unwrap(), Value::from("a"));
        assert_eq!(
            rules.accept(Value::from("c")),
            Err(RejectReason::NoMatch {
                input: "c".to_string()
            })
        );
    }

    #[test]
    fn test_empty_rules_accept_anything() {
        let rules = RuleSet::new(vec![], None);
        assert_eq!(
            rules.accept(Value::from("whatever")).unwrap(),
            Value::from("whatever")
        );
    }

    #[test]
    fn test_predicate_rule() {
        let rules = RuleSet::new(
            vec![Rule::predicate("even", |v| {
                Ok(v.as_str().and_then(|s| s.parse::<i64>().ok()).is_some_and(|n| n % 2 == 0))
            })],
            None,
        );
        assert!(rules.accept(Value::from("4")).is_ok());
        assert!(rules.accept(Value::from("5")).is_err());
    }

    #[test]
    fn test_predicate_error_is_a_non_match() {
        let rules = RuleSet::new(
            vec![
                Rule::predicate("explodes", |_| Err(Error::Misc("boom".to_string()))),
                "ok".into(),
            ],
            None,
        );
        assert!(rules.accept(Value::from("anything")).is_err());
        assert_eq!(rules.accept(Value::from("ok")).unwrap(), Value::from("ok"));
    }

    #[test]
    fn test_rules_tried_in_order() {
        let rules = RuleSet::new(vec![Rule::Type(TypeTag::Float), 2.into()], None);
        assert_eq!(rules.accept(Value::from("2")).unwrap(), Value::Float(2.0));

        let rules = RuleSet::new(vec![2.into(), Rule::Type(TypeTag::Float)], None);
        assert_eq!(rules.accept(Value::from("2")).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_literals_deduplicated() {
        let rules = RuleSet::new(vec!["b".into(), "a".into(), "b".into()], None);
        assert_eq!(rules.rules().len(), 2);
    }

    #[test]
    fn test_literals_normalized_through_formatter() {
        let upper = Formatter::text(|s| s.to_uppercase());
        let rules = RuleSet::new(vec!["yes".into(), "YES".into()], Some(&upper));
        assert_eq!(rules.rules().len(), 1);
        assert_eq!(rules.hints(false), vec!["YES".to_string()]);
    }

    #[test]
    fn test_failed_literal_normalization_keeps_literal() {
        let rules = RuleSet::new(vec!["abc".into()], Some(&Formatter::int()));
        assert_eq!(rules.hints(false), vec!["abc".to_string()]);
    }

    #[test]
    fn test_hints_sorted_when_comparable() {
        let rules = RuleSet::new(
            vec![
                3.into(),
                1.into(),
                Rule::Type(TypeTag::Int),
                2.5.into(),
                Rule::predicate("positive", |_| Ok(true)),
            ],
            None,
        );
        assert_eq!(rules.hints(false), vec!["1", "2.5", "3", "<int>", "(positive)"]);
    }

    #[test]
    fn test_hints_keep_insertion_order_when_mixed() {
        let rules = RuleSet::new(vec!["z".into(), 1.into(), "a".into()], None);
        assert_eq!(rules.hints(false), vec!["z", "1", "a"]);
    }

    #[test]
    fn test_hints_skip_blank() {
        let rules = RuleSet::new(vec!["".into(), "x".into()], None);
        assert!(rules.contains_blank());
        assert_eq!(rules.hints(true), vec!["x"]);
        assert_eq!(rules.hints(false), vec!["", "x"]);
    }

    #[test]
    fn test_formatters() {
        assert_eq!(Formatter::int().apply("8").unwrap(), Value::Int(8));
        assert!(matches!(
            Formatter::int().apply("eight"),
            Err(RejectReason::Format { .. })
        ));
        assert_eq!(Formatter::float().apply("1.25").unwrap(), Value::Float(1.25));
        assert_eq!(format_input(None, "raw").unwrap(), Value::from("raw"));
    }

    #[test]
    fn test_acceptance_is_idempotent() {
        let rules = RuleSet::new(vec![1.into(), 2.into(), Rule::Type(TypeTag::Float)], None);
        for input in ["1", "2", "2.5", "x", ""] {
            let first = format_input(None, input).and_then(|v| rules.accept(v));
            let second = format_input(None, input).and_then(|v| rules.accept(v));
            assert_eq!(first, second, "input `{input}`");
        }
    }
}
