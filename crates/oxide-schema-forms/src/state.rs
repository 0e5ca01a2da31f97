//! The registry of bound field controllers.

use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::controller::{AnyController, FieldController, FieldKind};
use crate::error::{FormError, Result, ValidationErrors};
use crate::schema::{FieldSchema, FormSchema};
use crate::value::FieldValue;

/// Snapshot of every bound field's value, in bind order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(IndexMap<String, FieldValue>);

impl FormValues {
    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Returns whether a field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in bind order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns every value stringified.
    #[must_use]
    pub fn to_strings(&self) -> IndexMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, FieldValue> {
        self.0
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Live state of one form instance: one controller per field name.
///
/// Controllers are kept in bind order, which is the order
/// [`validate`](Self::validate) visits them in.
#[derive(Debug, Default)]
pub struct FormState {
    controllers: IndexMap<String, AnyController>,
}

impl FormState {
    /// Creates an empty form state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a controller for `schema`, or returns the one already bound
    /// under the same name. The first bind wins: a later `default` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`FormError::NotBindable`] for buttons.
    /// - [`FormError::KindMismatch`] if `T` does not match the field kind,
    ///   or the name is already bound with another kind.
    /// - [`FormError::InvalidPattern`] if the field's rule does not compile.
    pub fn bind<T: FieldKind>(
        &mut self,
        schema: &FieldSchema,
        default: T,
    ) -> Result<Rc<FieldController<T>>> {
        let name = schema.name();
        let Some(kind) = schema.value_kind() else {
            return Err(FormError::NotBindable(name.to_string()));
        };

        if let Some(existing) = self.controllers.get(name) {
            return T::unwrap(existing).ok_or_else(|| {
                warn!(
                    field = name,
                    bound = %existing.kind(),
                    requested = %T::KIND,
                    "rebind with a different kind"
                );
                FormError::KindMismatch {
                    name: name.to_string(),
                    expected: T::KIND.as_str(),
                    found: existing.kind().as_str(),
                }
            });
        }

        if kind != T::KIND {
            return Err(FormError::KindMismatch {
                name: name.to_string(),
                expected: T::KIND.as_str(),
                found: kind.as_str(),
            });
        }

        let controller = Rc::new(FieldController::new(schema.clone(), default)?);
        debug!(field = name, kind = %kind, "field bound");
        self.controllers
            .insert(name.to_string(), T::wrap(Rc::clone(&controller)));
        Ok(controller)
    }

    /// Binds every value-holding field of `schema` with its zero default:
    /// empty text, or the checkbox's own `checked` state. Buttons are
    /// skipped and names already bound are kept.
    ///
    /// # Errors
    ///
    /// Same as [`bind`](Self::bind).
    pub fn bind_schema(&mut self, schema: &FormSchema) -> Result<()> {
        for field in &schema.fields {
            match field {
                FieldSchema::Text(_)
                | FieldSchema::TextArea(_)
                | FieldSchema::Number(_)
                | FieldSchema::Select(_)
                | FieldSchema::Date(_) => {
                    self.bind(field, String::new())?;
                }
                FieldSchema::Checkbox(checkbox) => {
                    self.bind(field, checkbox.checked)?;
                }
                FieldSchema::Button(_) => {}
            }
        }
        Ok(())
    }

    /// Validates every controller in bind order.
    ///
    /// Every controller is visited even after a failure, so all errors are
    /// populated. Returns whether all passed.
    pub fn validate(&self) -> bool {
        let mut all_valid = true;
        for controller in self.controllers.values() {
            if !controller.validate() {
                all_valid = false;
            }
        }
        debug!(valid = all_valid, fields = self.controllers.len(), "form validated");
        all_valid
    }

    /// Resets every controller to its default.
    pub fn reset_all_fields(&self) {
        for controller in self.controllers.values() {
            controller.reset();
        }
    }

    /// Returns the current typed values.
    #[must_use]
    pub fn typed_values(&self) -> FormValues {
        self.controllers
            .iter()
            .map(|(name, c)| (name.clone(), c.value()))
            .collect()
    }

    /// Returns the current values with booleans as `"true"` / `"false"`.
    #[must_use]
    pub fn all_values(&self) -> IndexMap<String, String> {
        self.typed_values().to_strings()
    }

    /// Collects the current controller errors in bind order.
    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (name, controller) in &self.controllers {
            if let Some(message) = controller.error() {
                errors.add(name, message);
            }
        }
        errors
    }

    /// Returns the controller bound under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnyController> {
        self.controllers.get(name)
    }

    /// Returns the text controller bound under `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<Rc<FieldController<String>>> {
        self.get(name).and_then(String::unwrap)
    }

    /// Returns the checkbox controller bound under `name`.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<Rc<FieldController<bool>>> {
        self.get(name).and_then(bool::unwrap)
    }

    /// Returns the bound names in bind order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    /// Returns the number of bound controllers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Returns whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
