//! Error types for schema forms.

use indexmap::IndexMap;
use thiserror::Error;

/// Form-specific errors.
///
/// Field validation failures are not errors: they live on the field
/// controllers as plain messages. This type covers malformed schemas and
/// misuse of the binding API.
#[derive(Debug, Error)]
pub enum FormError {
    /// The schema document could not be decoded.
    #[error("malformed form schema: {0}")]
    Schema(#[from] serde_json::Error),

    /// The schema could not be encoded back to JSON.
    #[error("failed to encode form schema: {0}")]
    Encode(#[source] serde_json::Error),

    /// A field's validation pattern does not compile.
    #[error("invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A name was rebound with a different value kind.
    #[error("field {name} holds {found} values, requested {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The field kind holds no value and cannot be bound.
    #[error("field {0} cannot be bound to a controller")]
    NotBindable(String),

    /// No field with this name exists.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Collection of validation errors by field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty `ValidationErrors`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether there are any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Returns the name of the first field with an error.
    #[must_use]
    pub fn first_field(&self) -> Option<&str> {
        self.errors.keys().next().map(String::as_str)
    }

    /// Returns all errors as a flat list.
    #[must_use]
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
