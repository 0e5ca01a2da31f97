//! Declarative form and field schemas.
//!
//! A [`FormSchema`] is plain data: it can be decoded from JSON, where every
//! field object is discriminated by its `type` string, or assembled with
//! [`FormSchemaBuilder`](crate::FormSchemaBuilder).

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::validation::RegexValidator;
use crate::value::ValueKind;

/// Number of visible lines a textarea shows when the schema does not say.
pub const DEFAULT_MAX_LINES: NonZeroU32 = match NonZeroU32::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// The top-level document tag. Only `"form"` is recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    #[default]
    #[serde(rename = "form")]
    Form,
}

/// Description of a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Document tag, always `"form"`.
    #[serde(rename = "type")]
    pub kind: FormKind,
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional cover image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Fields in rendering and validation order.
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Decodes a schema from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Schema`] for malformed JSON, unknown field types
    /// or missing attributes, and [`FormError::InvalidPattern`] when a
    /// validation regex does not compile.
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(json)?;
        schema.check_patterns()?;
        Ok(schema)
    }

    /// Decodes a schema from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`FormSchema::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let schema: Self = serde_json::from_value(value)?;
        schema.check_patterns()?;
        Ok(schema)
    }

    /// Encodes the schema as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(FormError::Encode)
    }

    /// Verifies that every validation pattern compiles.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPattern`] for the first bad pattern.
    pub fn check_patterns(&self) -> Result<()> {
        for field in &self.fields {
            if let Some(pattern) = field.validation().and_then(|r| r.regex.as_deref()) {
                RegexValidator::new(pattern, "").map_err(|source| FormError::InvalidPattern {
                    field: field.name().to_string(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Returns the first field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the button fields, in order.
    pub fn buttons(&self) -> impl Iterator<Item = &ButtonField> {
        self.fields.iter().filter_map(FieldSchema::as_button)
    }

    /// Returns the fields that hold a value, in order.
    pub fn input_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| f.value_kind().is_some())
    }
}

/// A single field, discriminated by its `type` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldSchema {
    #[serde(rename = "text")]
    Text(TextField),
    #[serde(rename = "textarea")]
    TextArea(TextAreaField),
    #[serde(rename = "number")]
    Number(NumberField),
    #[serde(rename = "select")]
    Select(SelectField),
    #[serde(rename = "checkbox")]
    Checkbox(CheckboxField),
    #[serde(rename = "date")]
    Date(DatePickerField),
    #[serde(rename = "button")]
    Button(ButtonField),
}

impl FieldSchema {
    /// Returns the field's stable key.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text(f) => &f.name,
            Self::TextArea(f) => &f.name,
            Self::Number(f) => &f.name,
            Self::Select(f) => &f.name,
            Self::Checkbox(f) => &f.name,
            Self::Date(f) => &f.name,
            Self::Button(f) => &f.name,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Text(f) => &f.label,
            Self::TextArea(f) => &f.label,
            Self::Number(f) => &f.label,
            Self::Select(f) => &f.label,
            Self::Checkbox(f) => &f.label,
            Self::Date(f) => &f.label,
            Self::Button(f) => &f.label,
        }
    }

    /// Returns the validation rule, if any. Buttons never have one.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationRule> {
        match self {
            Self::Text(f) => f.validation.as_ref(),
            Self::TextArea(f) => f.validation.as_ref(),
            Self::Number(f) => f.validation.as_ref(),
            Self::Select(f) => f.validation.as_ref(),
            Self::Checkbox(f) => f.validation.as_ref(),
            Self::Date(f) => f.validation.as_ref(),
            Self::Button(_) => None,
        }
    }

    /// Returns the `type` discriminator.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::TextArea(_) => "textarea",
            Self::Number(_) => "number",
            Self::Select(_) => "select",
            Self::Checkbox(_) => "checkbox",
            Self::Date(_) => "date",
            Self::Button(_) => "button",
        }
    }

    /// Returns the kind of value this field materializes as, or `None` for
    /// buttons.
    #[must_use]
    pub const fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Text(_)
            | Self::TextArea(_)
            | Self::Number(_)
            | Self::Select(_)
            | Self::Date(_) => Some(ValueKind::Text),
            Self::Checkbox(_) => Some(ValueKind::Flag),
            Self::Button(_) => None,
        }
    }

    /// Returns the button, if this field is one.
    #[must_use]
    pub const fn as_button(&self) -> Option<&ButtonField> {
        match self {
            Self::Button(b) => Some(b),
            Self::Text(_)
            | Self::TextArea(_)
            | Self::Number(_)
            | Self::Select(_)
            | Self::Checkbox(_)
            | Self::Date(_) => None,
        }
    }
}

/// Single-line text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextField {
    /// Text shown next to the input.
    pub label: String,
    /// Key of the value in submitted snapshots.
    pub name: String,
    /// Constraints checked on validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

/// Multi-line text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAreaField {
    /// Text shown next to the input.
    pub label: String,
    /// Key of the value in submitted snapshots.
    pub name: String,
    /// Constraints checked on validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    /// Visible line cap. Does not truncate the stored value.
    #[serde(default = "default_max_lines")]
    pub max_lines: NonZeroU32,
}

impl TextAreaField {
    /// Height of the input for a given line height: `max_lines * line_height`.
    #[must_use]
    pub const fn visible_height(&self, line_height: u32) -> u32 {
        self.max_lines.get().saturating_mul(line_height)
    }
}

const fn default_max_lines() -> NonZeroU32 {
    DEFAULT_MAX_LINES
}

/// Digit-only input. The stored value is the filtered digit string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberField {
    /// Text shown next to the input.
    pub label: String,
    /// Key of the value in submitted snapshots.
    pub name: String,
    /// Constraints checked on validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

/// Choice among a fixed list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectField {
    /// Text shown next to the input.
    pub label: String,
    /// Key of the value in submitted snapshots.
    pub name: String,
    /// Choices, in display order.
    pub options: Vec<String>,
    /// Constraints checked on validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

impl SelectField {
    /// Returns whether `value` may be stored: one of the options, or empty.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        value.is_empty() || self.options.iter().any(|o| o == value)
    }
}

/// Boolean checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxField {
    /// Text shown next to the input.
    pub label: String,
    /// Key of the value in submitted snapshots.
    pub name: String,
    /// Default state.
    #[serde(default)]
    pub checked: bool,
    /// Constraints checked on validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

/// Date input, stored as `MM/dd/yyyy` or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePickerField {
    /// Text shown next to the input.
    pub label: String,
    /// Key of the value in submitted snapshots.
    pub name: String,
    /// Constraints checked on validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

/// Action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonField {
    /// Text shown next to the input.
    pub label: String,
    /// Key of the value in submitted snapshots.
    pub name: String,
    /// `"submit"`, `"reset"`, or a custom command.
    pub action: String,
}

/// Declarative constraints for one field.
///
/// Also serves as the options block for the builder:
///
/// ```rust
/// use oxide_schema_forms::ValidationRule;
///
/// let rule = ValidationRule::new().required().min_length(10);
/// assert!(rule.required);
/// assert_eq!(rule.min_length, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub required_checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Replaces the required and required-checked messages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    /// Creates an empty rule that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects blank text.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Rejects an unchecked checkbox.
    #[must_use]
    pub const fn required_checked(mut self) -> Self {
        self.required_checked = true;
        self
    }

    /// Sets the minimum character count.
    #[must_use]
    pub const fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum character count.
    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Sets a pattern the whole value must match.
    #[must_use]
    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    /// Overrides the required message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
