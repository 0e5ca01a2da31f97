//! Per-field live state.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{FormError, Result};
use crate::input;
use crate::observable::StateCell;
use crate::schema::FieldSchema;
use crate::validation::RuleSet;
use crate::value::{FieldValue, FieldValueRef, ValueKind};

mod sealed {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for bool {}
}

/// A Rust type a field controller can hold: `String` or `bool`.
pub trait FieldKind: sealed::Sealed + Clone + fmt::Debug + 'static {
    /// The value kind this type materializes.
    const KIND: ValueKind;

    /// Borrows the value for evaluation.
    fn as_value_ref(&self) -> FieldValueRef<'_>;

    /// Converts into an owned snapshot value.
    fn to_value(&self) -> FieldValue;

    /// Erases a typed controller.
    fn wrap(controller: Rc<FieldController<Self>>) -> AnyController;

    /// Recovers a typed controller, if the kinds match.
    fn unwrap(controller: &AnyController) -> Option<Rc<FieldController<Self>>>;
}

impl FieldKind for String {
    const KIND: ValueKind = ValueKind::Text;

    fn as_value_ref(&self) -> FieldValueRef<'_> {
        FieldValueRef::Text(self)
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn wrap(controller: Rc<FieldController<Self>>) -> AnyController {
        AnyController::Text(controller)
    }

    fn unwrap(controller: &AnyController) -> Option<Rc<FieldController<Self>>> {
        match controller {
            AnyController::Text(c) => Some(Rc::clone(c)),
            AnyController::Flag(_) => None,
        }
    }
}

impl FieldKind for bool {
    const KIND: ValueKind = ValueKind::Flag;

    fn as_value_ref(&self) -> FieldValueRef<'_> {
        FieldValueRef::Flag(*self)
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Flag(*self)
    }

    fn wrap(controller: Rc<FieldController<Self>>) -> AnyController {
        AnyController::Flag(controller)
    }

    fn unwrap(controller: &AnyController) -> Option<Rc<FieldController<Self>>> {
        match controller {
            AnyController::Flag(c) => Some(Rc::clone(c)),
            AnyController::Text(_) => None,
        }
    }
}

/// When a text edit triggers validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditPolicy {
    /// Store the value only; the host validates later (on blur, on submit).
    #[default]
    Deferred,
    /// Validate right after storing the value.
    ValidateOnChange,
}

/// Live value and error of one bound field.
///
/// `field` and `error` are independent observable cells: writing the value
/// never validates by itself.
pub struct FieldController<T: FieldKind> {
    schema: FieldSchema,
    rules: RuleSet,
    default: T,
    field: StateCell<T>,
    error: StateCell<Option<String>>,
}

impl<T: FieldKind> fmt::Debug for FieldController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldController")
            .field("name", &self.name())
            .field("default", &self.default)
            .field("field", &self.field)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T: FieldKind> FieldController<T> {
    /// Creates a controller for `schema` starting at `default`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPattern`] if the field's rule does not
    /// compile.
    pub fn new(schema: FieldSchema, default: T) -> Result<Self> {
        let rules =
            RuleSet::compile(schema.validation()).map_err(|source| FormError::InvalidPattern {
                field: schema.name().to_string(),
                source,
            })?;
        Ok(Self {
            schema,
            rules,
            field: StateCell::new(default.clone()),
            error: StateCell::new(None),
            default,
        })
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Returns the schema this controller was bound with.
    #[must_use]
    pub const fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Returns the value `reset` restores.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }

    /// Returns the current value.
    #[must_use]
    pub fn field(&self) -> T {
        self.field.get()
    }

    /// Writes the current value without validating.
    pub fn set_field(&self, value: T) {
        trace!(field = self.name(), ?value, "field written");
        self.field.set(value);
    }

    /// Returns the current error message.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    /// Writes the error message directly.
    pub fn set_error(&self, error: Option<String>) {
        self.error.set(error);
    }

    /// Returns whether no error is currently shown.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error.with(Option::is_none)
    }

    /// Returns the current value as a snapshot value.
    #[must_use]
    pub fn value(&self) -> FieldValue {
        self.field.with(T::to_value)
    }

    /// The value cell, for hosts that bind to it directly.
    #[must_use]
    pub const fn field_cell(&self) -> &StateCell<T> {
        &self.field
    }

    /// The error cell, for hosts that bind to it directly.
    #[must_use]
    pub const fn error_cell(&self) -> &StateCell<Option<String>> {
        &self.error
    }

    /// Calls `observer` on every value write.
    pub fn on_field_change(&self, observer: impl Fn(&T) + 'static) {
        self.field.subscribe(observer);
    }

    /// Calls `observer` on every error write.
    pub fn on_error_change(&self, observer: impl Fn(&Option<String>) + 'static) {
        self.error.subscribe(observer);
    }

    /// Checks the current value against the field's rule and stores the
    /// outcome in `error`. Returns whether the value passed.
    pub fn validate(&self) -> bool {
        let message = self.field.with(|v| self.rules.check(v.as_value_ref()));
        let valid = message.is_none();
        debug!(field = self.name(), valid, "field validated");
        self.error.set(message);
        valid
    }

    /// Restores the default value and clears the error.
    pub fn reset(&self) {
        self.field.set(self.default.clone());
        self.error.set(None);
    }
}

impl FieldController<String> {
    /// Applies a user edit through the field's input policy.
    ///
    /// Number fields keep digits only, select fields ignore values outside
    /// their options, date fields ignore text not in `MM/dd/yyyy` form.
    /// Returns whether the edit was stored.
    pub fn edit(&self, input: &str, policy: EditPolicy) -> bool {
        let Some(value) = input::sanitize(&self.schema, input) else {
            debug!(field = self.name(), input, "edit rejected by input policy");
            return false;
        };
        self.set_field(value);
        if policy == EditPolicy::ValidateOnChange {
            self.validate();
        }
        true
    }
}

/// A controller of either value kind.
#[derive(Debug, Clone)]
pub enum AnyController {
    /// A text-like field.
    Text(Rc<FieldController<String>>),
    /// A checkbox field.
    Flag(Rc<FieldController<bool>>),
}

impl AnyController {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text(c) => c.name(),
            Self::Flag(c) => c.name(),
        }
    }

    /// Returns the value kind.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Flag(_) => ValueKind::Flag,
        }
    }

    /// See [`FieldController::validate`].
    pub fn validate(&self) -> bool {
        match self {
            Self::Text(c) => c.validate(),
            Self::Flag(c) => c.validate(),
        }
    }

    /// See [`FieldController::reset`].
    pub fn reset(&self) {
        match self {
            Self::Text(c) => c.reset(),
            Self::Flag(c) => c.reset(),
        }
    }

    /// See [`FieldController::value`].
    #[must_use]
    pub fn value(&self) -> FieldValue {
        match self {
            Self::Text(c) => c.value(),
            Self::Flag(c) => c.value(),
        }
    }

    /// See [`FieldController::error`].
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match self {
            Self::Text(c) => c.error(),
            Self::Flag(c) => c.error(),
        }
    }
}
