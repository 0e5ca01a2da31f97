//! # oxide-schema-forms
//!
//! Schema-driven form state and validation.
//!
//! This crate provides:
//! - A declarative form schema, decodable from JSON or built in code
//! - Per-field controllers holding a live value and error
//! - Form-wide validate, reset and value snapshots
//! - Submit / reset / custom button actions with a submission status
//!
//! Rendering is left to the host: it reads and writes controller cells and
//! calls into the dispatcher when a button is pressed.
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_schema_forms::{
//!     ActionOutcome, Callbacks, FormSchema, SchemaForm, SubmitStatus,
//! };
//!
//! let schema = FormSchema::from_json(r#"{
//!     "type": "form",
//!     "title": "Registration",
//!     "fields": [
//!         { "type": "text", "label": "Name", "name": "name",
//!           "validation": { "required": true, "message": "Please enter a name" } },
//!         { "type": "checkbox", "label": "Accept terms", "name": "terms",
//!           "validation": { "requiredChecked": true } },
//!         { "type": "button", "label": "Submit", "name": "btn_submit", "action": "submit" }
//!     ]
//! }"#).unwrap();
//!
//! let form = SchemaForm::new(schema).unwrap();
//! let mut submitted = None;
//! let mut handler = Callbacks::new(|values| submitted = Some(values), |_: &str| {});
//!
//! // Nothing filled in: submit is blocked and every error is populated.
//! assert_eq!(form.press("btn_submit", &mut handler).unwrap(), ActionOutcome::Invalid);
//! assert_eq!(form.status(), SubmitStatus::Error);
//! assert_eq!(form.text("name").unwrap().error().as_deref(), Some("Please enter a name"));
//! assert_eq!(form.flag("terms").unwrap().error().as_deref(), Some("must be checked"));
//!
//! form.text("name").unwrap().set_field("Alice".to_string());
//! form.flag("terms").unwrap().set_field(true);
//! assert_eq!(form.press("btn_submit", &mut handler).unwrap(), ActionOutcome::Submitted);
//! drop(handler);
//!
//! let values = submitted.unwrap();
//! assert_eq!(values.get("name").and_then(|v| v.as_text()), Some("Alice"));
//! ```
//!
//! ## Binding Controllers Directly
//!
//! ```rust
//! use std::rc::Rc;
//! use oxide_schema_forms::{FormSchemaBuilder, FormState};
//!
//! let schema = FormSchemaBuilder::new("Profile")
//!     .textarea("Bio", "bio", Default::default())
//!     .build();
//! let bio_schema = schema.field("bio").unwrap();
//!
//! let mut state = FormState::new();
//! let bio = state.bind(bio_schema, String::new()).unwrap();
//! let again = state.bind(bio_schema, "ignored".to_string()).unwrap();
//! assert!(Rc::ptr_eq(&bio, &again));
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use oxide_schema_forms::{ValidationRule, FieldValueRef};
//! use oxide_schema_forms::validation::evaluate;
//!
//! let rule = ValidationRule::new().required().min_length(3).regex("[a-z]+");
//! assert_eq!(
//!     evaluate(FieldValueRef::Text("ab"), Some(&rule)).as_deref(),
//!     Some("minimum 3 characters")
//! );
//! assert_eq!(evaluate(FieldValueRef::Text("abc"), Some(&rule)), None);
//! ```

mod action;
mod builder;
mod controller;
mod error;
mod form;
pub mod input;
pub mod observable;
mod schema;
mod state;
pub mod validation;
mod value;

pub use action::{
    ActionDispatcher, ActionHandler, ActionOutcome, ButtonAction, Callbacks, SubmitStatus, RESET,
    SUBMIT,
};
pub use builder::{FormSchemaBuilder, TextAreaOptions};
pub use controller::{AnyController, EditPolicy, FieldController, FieldKind};
pub use error::{FormError, Result, ValidationErrors};
pub use form::SchemaForm;
pub use schema::{
    ButtonField, CheckboxField, DatePickerField, FieldSchema, FormKind, FormSchema, NumberField,
    SelectField, TextAreaField, TextField, ValidationRule, DEFAULT_MAX_LINES,
};
pub use state::{FormState, FormValues};
pub use value::{FieldValue, FieldValueRef, ValueKind};
