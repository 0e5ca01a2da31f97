//! Field validators and the rule evaluator.
//!
//! A [`ValidationRule`] compiles into a [`RuleSet`]: an ordered chain of
//! [`Validator`]s for text values plus an optional checkbox validator. The
//! chain stops at the first failure.

use regex::Regex;

use crate::schema::ValidationRule;
use crate::value::FieldValueRef;

/// Default message for blank required text.
pub const REQUIRED_MESSAGE: &str = "value required";
/// Default message for an unchecked required checkbox.
pub const REQUIRED_CHECKED_MESSAGE: &str = "must be checked";
/// Message for a value that does not match its pattern.
pub const FORMAT_MESSAGE: &str = "does not match required format";

/// Trait for field validators.
pub trait Validator<V: ?Sized>: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when the value is rejected.
    fn validate(&self, value: &V) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;
}

/// Validator that requires non-blank text.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new `RequiredValidator` with default message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_message(REQUIRED_MESSAGE)
    }

    /// Creates a new `RequiredValidator` with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator`.
    #[must_use]
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("maximum {max_length} characters"),
        }
    }
}

impl Validator<str> for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() > self.max_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator`.
    #[must_use]
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("minimum {min_length} characters"),
        }
    }
}

impl Validator<str> for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator requiring the whole value to match a pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new `RegexValidator`. The pattern is anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns the compile error if `pattern` is not a valid regex.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{pattern})$"))?,
            message: message.into(),
        })
    }
}

impl Validator<str> for RegexValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that requires a checkbox to be checked.
#[derive(Debug, Clone)]
pub struct RequiredCheckedValidator {
    message: String,
}

impl RequiredCheckedValidator {
    /// Creates a new `RequiredCheckedValidator` with default message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_message(REQUIRED_CHECKED_MESSAGE)
    }

    /// Creates a new `RequiredCheckedValidator` with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredCheckedValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<bool> for RequiredCheckedValidator {
    fn validate(&self, value: &bool) -> Result<(), String> {
        if *value {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// A compiled [`ValidationRule`].
#[derive(Default)]
pub struct RuleSet {
    text: Vec<Box<dyn Validator<str>>>,
    flag: Option<RequiredCheckedValidator>,
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field(
                "text",
                &self.text.iter().map(|v| v.message()).collect::<Vec<_>>(),
            )
            .field("flag", &self.flag)
            .finish()
    }
}

impl RuleSet {
    /// Compiles a rule. `None` yields an empty set that accepts everything.
    ///
    /// Text checks run in a fixed order: required, minimum length, maximum
    /// length, pattern. The `message` override applies to the required
    /// checks only.
    ///
    /// # Errors
    ///
    /// Returns the compile error of an invalid `regex`.
    pub fn compile(rule: Option<&ValidationRule>) -> Result<Self, regex::Error> {
        let Some(rule) = rule else {
            return Ok(Self::default());
        };

        let mut text: Vec<Box<dyn Validator<str>>> = Vec::new();
        if rule.required {
            text.push(Box::new(match &rule.message {
                Some(message) => RequiredValidator::with_message(message.as_str()),
                None => RequiredValidator::new(),
            }));
        }
        if let Some(min) = rule.min_length {
            text.push(Box::new(MinLengthValidator::new(min)));
        }
        if let Some(max) = rule.max_length {
            text.push(Box::new(MaxLengthValidator::new(max)));
        }
        if let Some(pattern) = &rule.regex {
            text.push(Box::new(RegexValidator::new(pattern, FORMAT_MESSAGE)?));
        }

        let flag = rule.required_checked.then(|| match &rule.message {
            Some(message) => RequiredCheckedValidator::with_message(message.as_str()),
            None => RequiredCheckedValidator::new(),
        });

        Ok(Self { text, flag })
    }

    /// Returns whether this set accepts every value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.flag.is_none()
    }

    /// Checks a value, returning the first violation's message.
    #[must_use]
    pub fn check(&self, value: FieldValueRef<'_>) -> Option<String> {
        match value {
            FieldValueRef::Text(text) => self.text.iter().find_map(|v| v.validate(text).err()),
            FieldValueRef::Flag(flag) => self.flag.as_ref().and_then(|v| v.validate(&flag).err()),
        }
    }
}

/// Evaluates `value` against an optional rule.
///
/// Returns `None` when the value is valid. A rule whose pattern does not
/// compile rejects every text value that passes the other checks with the
/// format message; [`FormSchema::from_json`](crate::FormSchema::from_json)
/// rejects such schemas up front.
#[must_use]
pub fn evaluate(value: FieldValueRef<'_>, rule: Option<&ValidationRule>) -> Option<String> {
    match RuleSet::compile(rule) {
        Ok(rules) => rules.check(value),
        Err(err) => {
            tracing::warn!(error = %err, "validation pattern does not compile");
            let without_pattern = rule.map(|r| ValidationRule {
                regex: None,
                ..r.clone()
            });
            let rules = RuleSet::compile(without_pattern.as_ref()).unwrap_or_default();
            match value {
                FieldValueRef::Text(_) => {
                    Some(rules.check(value).unwrap_or_else(|| FORMAT_MESSAGE.to_string()))
                }
                FieldValueRef::Flag(_) => rules.check(value),
            }
        }
    }
}
