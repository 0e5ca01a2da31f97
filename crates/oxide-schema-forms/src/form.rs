//! A schema bound to live state.

use std::rc::Rc;

use tracing::debug;

use crate::action::{ActionDispatcher, ActionHandler, ActionOutcome, SubmitStatus};
use crate::controller::FieldController;
use crate::error::{FormError, Result, ValidationErrors};
use crate::schema::FormSchema;
use crate::state::{FormState, FormValues};

/// One rendered instance of a form: its schema, the controllers of every
/// input field, and the submission status.
///
/// ```rust
/// use oxide_schema_forms::{FormSchemaBuilder, SchemaForm, ActionOutcome, ValidationRule};
///
/// let schema = FormSchemaBuilder::new("Login")
///     .text("User", "user", Some(ValidationRule::new().required()))
///     .button("Sign in", "go", "submit")
///     .build();
/// let form = SchemaForm::new(schema).unwrap();
///
/// assert_eq!(form.press("go", &mut ()).unwrap(), ActionOutcome::Invalid);
/// form.text("user").unwrap().set_field("ada".to_string());
/// assert_eq!(form.press("go", &mut ()).unwrap(), ActionOutcome::Submitted);
/// ```
#[derive(Debug)]
pub struct SchemaForm {
    schema: FormSchema,
    state: FormState,
    dispatcher: ActionDispatcher,
}

impl SchemaForm {
    /// Binds every input field of `schema` with its zero default.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be bound, see
    /// [`FormState::bind`].
    pub fn new(schema: FormSchema) -> Result<Self> {
        let mut state = FormState::new();
        state.bind_schema(&schema)?;
        debug!(title = schema.title.as_str(), fields = state.len(), "form bound");
        Ok(Self {
            schema,
            state,
            dispatcher: ActionDispatcher::new(),
        })
    }

    /// Decodes and binds a schema.
    ///
    /// # Errors
    ///
    /// Returns schema decoding or binding errors.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(FormSchema::from_json(json)?)
    }

    /// Returns the schema.
    #[must_use]
    pub const fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns the live state.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Returns the submission status.
    #[must_use]
    pub fn status(&self) -> SubmitStatus {
        self.dispatcher.status()
    }

    /// Returns the text controller of a field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if no text field has this name.
    pub fn text(&self, name: &str) -> Result<Rc<FieldController<String>>> {
        self.state
            .text(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Returns the checkbox controller of a field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if no checkbox has this name.
    pub fn flag(&self, name: &str) -> Result<Rc<FieldController<bool>>> {
        self.state
            .flag(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Activates the field named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if the schema has no such field.
    /// Pressing a non-button field is not an error: it yields
    /// [`ActionOutcome::Ignored`].
    pub fn press<H>(&self, name: &str, handler: &mut H) -> Result<ActionOutcome>
    where
        H: ActionHandler + ?Sized,
    {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        Ok(self.dispatcher.perform(field, &self.state, handler))
    }

    /// Validates every field and updates the status.
    pub fn validate(&self) -> bool {
        self.dispatcher.validate(&self.state)
    }

    /// Resets every field and returns to `Idle`.
    pub fn reset(&self) {
        self.dispatcher.reset(&self.state);
    }

    /// Returns the current typed values.
    #[must_use]
    pub fn values(&self) -> FormValues {
        self.state.typed_values()
    }

    /// Returns the current field errors.
    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        self.state.errors()
    }
}
