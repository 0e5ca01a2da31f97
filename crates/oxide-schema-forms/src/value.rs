//! Live field values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of value a field materializes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Text-like fields: text, textarea, number, select and date.
    Text,
    /// Checkbox fields.
    Flag,
}

impl ValueKind {
    /// Returns a short name for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Flag => "flag",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owned field value, as found in a submitted snapshot.
///
/// Serializes untagged, so a snapshot encodes as a plain JSON object of
/// strings and booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A text value.
    Text(String),
    /// A checkbox value.
    Flag(bool),
}

impl FieldValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Flag(_) => ValueKind::Flag,
        }
    }

    /// Borrows this value.
    #[must_use]
    pub fn borrowed(&self) -> FieldValueRef<'_> {
        match self {
            Self::Text(s) => FieldValueRef::Text(s),
            Self::Flag(b) => FieldValueRef::Flag(*b),
        }
    }

    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    /// Returns the flag, if this is a checkbox value.
    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Text(_) => None,
            Self::Flag(b) => Some(*b),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// A borrowed field value handed to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValueRef<'a> {
    /// A text value.
    Text(&'a str),
    /// A checkbox value.
    Flag(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_stringifies_flags() {
        assert_eq!(FieldValue::Flag(true).to_string(), "true");
        assert_eq!(FieldValue::Flag(false).to_string(), "false");
        assert_eq!(FieldValue::from("Alice").to_string(), "Alice");
    }

    #[test]
    fn test_snapshot_values_evaluate_like_live_ones() {
        let rule = crate::ValidationRule::new().required();
        let value = FieldValue::from("  ");
        assert_eq!(value.kind(), ValueKind::Text);
        assert_eq!(
            crate::validation::evaluate(value.borrowed(), Some(&rule)).as_deref(),
            Some("value required")
        );
        assert_eq!(FieldValue::Flag(true).borrowed(), FieldValueRef::Flag(true));
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&vec![FieldValue::from("x"), FieldValue::Flag(true)])
            .unwrap();
        assert_eq!(json, r#"["x",true]"#);
    }
}
