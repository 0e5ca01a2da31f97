//! Programmatic schema construction.

use std::num::NonZeroU32;

use crate::schema::{
    ButtonField, CheckboxField, DatePickerField, FieldSchema, FormKind, FormSchema, NumberField,
    SelectField, TextAreaField, TextField, ValidationRule, DEFAULT_MAX_LINES,
};

/// Options for [`FormSchemaBuilder::textarea`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaOptions {
    /// Visible line cap.
    pub max_lines: NonZeroU32,
    /// Validation rule.
    pub validation: Option<ValidationRule>,
}

impl Default for TextAreaOptions {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            validation: None,
        }
    }
}

impl TextAreaOptions {
    /// Creates options with five visible lines and no rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the visible line cap.
    #[must_use]
    pub const fn max_lines(mut self, max_lines: NonZeroU32) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Sets the validation rule.
    #[must_use]
    pub fn validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }
}

/// Ordered-append builder for [`FormSchema`].
///
/// ```rust
/// use oxide_schema_forms::{FormSchemaBuilder, TextAreaOptions, ValidationRule};
///
/// let schema = FormSchemaBuilder::new("Registration")
///     .description("Tell us about yourself")
///     .text("Name", "name", Some(ValidationRule::new().required()))
///     .number("Age", "age", None)
///     .select("Region", "region", ["north", "south"], None)
///     .textarea("Bio", "bio", TextAreaOptions::new())
///     .checkbox("Accept terms", "terms", false, Some(ValidationRule::new().required_checked()))
///     .date("Birthday", "dob", None)
///     .button("Submit", "btn_submit", "submit")
///     .build();
///
/// assert_eq!(schema.fields.len(), 7);
/// assert_eq!(schema.fields[0].name(), "name");
/// ```
#[derive(Debug, Clone)]
pub struct FormSchemaBuilder {
    title: String,
    description: Option<String>,
    cover: Option<String>,
    fields: Vec<FieldSchema>,
}

impl FormSchemaBuilder {
    /// Creates a builder for a form with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            cover: None,
            fields: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the cover image reference.
    #[must_use]
    pub fn cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Appends an already constructed field.
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(
        self,
        label: impl Into<String>,
        name: impl Into<String>,
        validation: Option<ValidationRule>,
    ) -> Self {
        self.field(FieldSchema::Text(TextField {
            label: label.into(),
            name: name.into(),
            validation,
        }))
    }

    /// Appends a multi-line text field.
    #[must_use]
    pub fn textarea(
        self,
        label: impl Into<String>,
        name: impl Into<String>,
        options: TextAreaOptions,
    ) -> Self {
        self.field(FieldSchema::TextArea(TextAreaField {
            label: label.into(),
            name: name.into(),
            validation: options.validation,
            max_lines: options.max_lines,
        }))
    }

    /// Appends a digits-only field.
    #[must_use]
    pub fn number(
        self,
        label: impl Into<String>,
        name: impl Into<String>,
        validation: Option<ValidationRule>,
    ) -> Self {
        self.field(FieldSchema::Number(NumberField {
            label: label.into(),
            name: name.into(),
            validation,
        }))
    }

    /// Appends a select field.
    #[must_use]
    pub fn select<I, S>(
        self,
        label: impl Into<String>,
        name: impl Into<String>,
        options: I,
        validation: Option<ValidationRule>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field(FieldSchema::Select(SelectField {
            label: label.into(),
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
            validation,
        }))
    }

    /// Appends a checkbox with its default state.
    #[must_use]
    pub fn checkbox(
        self,
        label: impl Into<String>,
        name: impl Into<String>,
        checked: bool,
        validation: Option<ValidationRule>,
    ) -> Self {
        self.field(FieldSchema::Checkbox(CheckboxField {
            label: label.into(),
            name: name.into(),
            checked,
            validation,
        }))
    }

    /// Appends a date field.
    #[must_use]
    pub fn date(
        self,
        label: impl Into<String>,
        name: impl Into<String>,
        validation: Option<ValidationRule>,
    ) -> Self {
        self.field(FieldSchema::Date(DatePickerField {
            label: label.into(),
            name: name.into(),
            validation,
        }))
    }

    /// Appends a button. `action` is `"submit"`, `"reset"` or a custom
    /// command.
    #[must_use]
    pub fn button(
        self,
        label: impl Into<String>,
        name: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.field(FieldSchema::Button(ButtonField {
            label: label.into(),
            name: name.into(),
            action: action.into(),
        }))
    }

    /// Returns the finished schema.
    #[must_use]
    pub fn build(self) -> FormSchema {
        FormSchema {
            kind: FormKind::Form,
            title: self.title,
            description: self.description,
            cover: self.cover,
            fields: self.fields,
        }
    }
}
