//! Button actions and the submission state machine.
//!
//! A button's `action` tag resolves to a [`ButtonAction`]. The
//! [`ActionDispatcher`] runs it against a [`FormState`] and reports results
//! through an [`ActionHandler`]:
//!
//! ```text
//! Idle --submit, valid--> Success
//! Idle --submit, invalid--> Error
//! any  --reset--> Idle
//! ```
//!
//! Custom actions never change the status.

use tracing::{debug, warn};

use crate::observable::StateCell;
use crate::schema::{ButtonField, FieldSchema};
use crate::state::{FormState, FormValues};

/// Tag of the built-in submit action.
pub const SUBMIT: &str = "submit";
/// Tag of the built-in reset action.
pub const RESET: &str = "reset";

/// What a button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Validate, then hand the values to the submit callback.
    Submit,
    /// Restore every field to its default.
    Reset,
    /// Pass the command to the host.
    Custom(String),
}

impl ButtonAction {
    /// Resolves an action tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            SUBMIT => Self::Submit,
            RESET => Self::Reset,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Returns the tag this action resolves from.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Submit => SUBMIT,
            Self::Reset => RESET,
            Self::Custom(command) => command,
        }
    }
}

impl ButtonField {
    /// Resolves this button's action tag.
    #[must_use]
    pub fn button_action(&self) -> ButtonAction {
        ButtonAction::from_tag(&self.action)
    }
}

/// Submission status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Nothing submitted since creation or the last reset.
    #[default]
    Idle,
    /// The last submit passed validation.
    Success,
    /// The last submit failed validation.
    Error,
}

/// Receives the external results of button actions.
pub trait ActionHandler {
    /// Called with the typed values after a successful submit.
    fn on_submit(&mut self, values: FormValues) {
        let _ = values;
    }

    /// Called with the raw command of a custom action.
    fn on_action(&mut self, command: &str) {
        let _ = command;
    }
}

/// Ignores every result.
impl ActionHandler for () {}

/// An [`ActionHandler`] built from a pair of closures.
pub struct Callbacks<S, C> {
    submit: S,
    action: C,
}

impl<S, C> Callbacks<S, C>
where
    S: FnMut(FormValues),
    C: FnMut(&str),
{
    /// Creates a handler from a submit and a custom-action closure.
    pub const fn new(submit: S, action: C) -> Self {
        Self { submit, action }
    }
}

impl<S, C> ActionHandler for Callbacks<S, C>
where
    S: FnMut(FormValues),
    C: FnMut(&str),
{
    fn on_submit(&mut self, values: FormValues) {
        (self.submit)(values);
    }

    fn on_action(&mut self, command: &str) {
        (self.action)(command);
    }
}

/// The result of dispatching one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Submit passed validation; the handler received the values.
    Submitted,
    /// Submit failed validation; errors are on the controllers.
    Invalid,
    /// All fields were reset.
    Reset,
    /// A custom command was handed to the handler.
    Custom(String),
    /// The field was not a button; nothing happened.
    Ignored,
}

/// Runs button actions against a form state and tracks submission status.
#[derive(Debug, Default)]
pub struct ActionDispatcher {
    status: StateCell<SubmitStatus>,
}

impl ActionDispatcher {
    /// Creates a dispatcher in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> SubmitStatus {
        self.status.get()
    }

    /// Calls `observer` on every status write.
    pub fn on_status_change(&self, observer: impl Fn(&SubmitStatus) + 'static) {
        self.status.subscribe(observer);
    }

    /// Performs the action of `field`.
    ///
    /// Only buttons carry actions; any other field is logged and ignored.
    pub fn perform<H>(
        &self,
        field: &FieldSchema,
        state: &FormState,
        handler: &mut H,
    ) -> ActionOutcome
    where
        H: ActionHandler + ?Sized,
    {
        match field {
            FieldSchema::Button(button) => self.perform_button(button, state, handler),
            FieldSchema::Text(_)
            | FieldSchema::TextArea(_)
            | FieldSchema::Number(_)
            | FieldSchema::Select(_)
            | FieldSchema::Checkbox(_)
            | FieldSchema::Date(_) => {
                warn!(
                    field = field.name(),
                    kind = field.type_tag(),
                    "unsupported field type for action"
                );
                ActionOutcome::Ignored
            }
        }
    }

    /// Performs the action of a button.
    pub fn perform_button<H>(
        &self,
        button: &ButtonField,
        state: &FormState,
        handler: &mut H,
    ) -> ActionOutcome
    where
        H: ActionHandler + ?Sized,
    {
        self.dispatch(&button.button_action(), state, handler)
    }

    /// Runs a resolved action.
    pub fn dispatch<H>(
        &self,
        action: &ButtonAction,
        state: &FormState,
        handler: &mut H,
    ) -> ActionOutcome
    where
        H: ActionHandler + ?Sized,
    {
        match action {
            ButtonAction::Submit => self.submit(state, handler),
            ButtonAction::Reset => {
                self.reset(state);
                ActionOutcome::Reset
            }
            ButtonAction::Custom(command) => {
                debug!(command = command.as_str(), "custom action");
                handler.on_action(command);
                ActionOutcome::Custom(command.clone())
            }
        }
    }

    /// Validates the whole form and records `Success` or `Error`.
    pub fn validate(&self, state: &FormState) -> bool {
        let valid = state.validate();
        self.status.set(if valid {
            SubmitStatus::Success
        } else {
            SubmitStatus::Error
        });
        valid
    }

    /// Validates and, if everything passes, hands the typed values to the
    /// handler.
    pub fn submit<H>(&self, state: &FormState, handler: &mut H) -> ActionOutcome
    where
        H: ActionHandler + ?Sized,
    {
        if !self.validate(state) {
            let errors = state.errors();
            debug!(first_invalid = errors.first_field(), "submit blocked by validation");
            return ActionOutcome::Invalid;
        }
        debug!(values = ?state.all_values(), "submit form");
        handler.on_submit(state.typed_values());
        ActionOutcome::Submitted
    }

    /// Resets every field and returns to `Idle`.
    pub fn reset(&self, state: &FormState) {
        state.reset_all_fields();
        self.status.set(SubmitStatus::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FormSchemaBuilder;
    use crate::schema::{FormSchema, ValidationRule};

    #[derive(Default)]
    struct Recorder {
        submits: Vec<FormValues>,
        commands: Vec<String>,
    }

    impl ActionHandler for Recorder {
        fn on_submit(&mut self, values: FormValues) {
            self.submits.push(values);
        }

        fn on_action(&mut self, command: &str) {
            self.commands.push(command.to_string());
        }
    }

    fn schema() -> FormSchema {
        FormSchemaBuilder::new("Contact")
            .text("Name", "name", Some(ValidationRule::new().required()))
            .text("Note", "note", None)
            .button("Send", "send", "submit")
            .button("Clear", "clear", "reset")
            .button("Archive", "archive", "archive")
            .build()
    }

    fn bound(schema: &FormSchema) -> FormState {
        let mut state = FormState::new();
        state.bind_schema(schema).unwrap();
        state
    }

    #[test]
    fn test_resolve_tags() {
        assert_eq!(ButtonAction::from_tag("submit"), ButtonAction::Submit);
        assert_eq!(ButtonAction::from_tag("reset"), ButtonAction::Reset);
        assert_eq!(
            ButtonAction::from_tag("archive"),
            ButtonAction::Custom("archive".to_string())
        );
        assert_eq!(
            ButtonAction::from_tag("Submit"),
            ButtonAction::Custom("Submit".to_string())
        );
        assert_eq!(ButtonAction::from_tag("archive").tag(), "archive");
    }

    #[test]
    fn test_submit_gating() {
        let schema = schema();
        let state = bound(&schema);
        let dispatcher = ActionDispatcher::new();
        let mut recorder = Recorder::default();
        let send = schema.field("send").unwrap();

        assert_eq!(dispatcher.status(), SubmitStatus::Idle);
        assert_eq!(
            dispatcher.perform(send, &state, &mut recorder),
            ActionOutcome::Invalid
        );
        assert_eq!(dispatcher.status(), SubmitStatus::Error);
        assert!(recorder.submits.is_empty());
        assert_eq!(state.text("name").unwrap().error().as_deref(), Some("value required"));

        state.text("name").unwrap().set_field("Alice".to_string());
        assert_eq!(
            dispatcher.perform(send, &state, &mut recorder),
            ActionOutcome::Submitted
        );
        assert_eq!(dispatcher.status(), SubmitStatus::Success);
        assert_eq!(recorder.submits.len(), 1);
        let values = &recorder.submits[0];
        assert!(values.contains("name") && values.contains("note"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let schema = schema();
        let state = bound(&schema);
        let dispatcher = ActionDispatcher::new();
        let mut recorder = Recorder::default();

        dispatcher.perform(schema.field("send").unwrap(), &state, &mut recorder);
        assert_eq!(dispatcher.status(), SubmitStatus::Error);
        state.text("note").unwrap().set_field("draft".to_string());

        let outcome = dispatcher.perform(schema.field("clear").unwrap(), &state, &mut recorder);
        assert_eq!(outcome, ActionOutcome::Reset);
        assert_eq!(dispatcher.status(), SubmitStatus::Idle);
        assert_eq!(state.text("note").unwrap().field(), "");
        assert!(state.errors().is_empty());
        assert!(recorder.submits.is_empty() && recorder.commands.is_empty());
    }

    #[test]
    fn test_custom_action() {
        let schema = schema();
        let state = bound(&schema);
        let dispatcher = ActionDispatcher::new();
        let mut recorder = Recorder::default();

        let outcome = dispatcher.perform(schema.field("archive").unwrap(), &state, &mut recorder);

        assert_eq!(outcome, ActionOutcome::Custom("archive".to_string()));
        assert_eq!(recorder.commands, vec!["archive".to_string()]);
        assert!(recorder.submits.is_empty());
        assert_eq!(dispatcher.status(), SubmitStatus::Idle);
        // Custom actions do not validate.
        assert_eq!(state.text("name").unwrap().error(), None);
    }

    #[test]
    fn test_non_button_is_ignored() {
        let schema = schema();
        let state = bound(&schema);
        let dispatcher = ActionDispatcher::new();
        let mut recorder = Recorder::default();

        let outcome = dispatcher.perform(schema.field("name").unwrap(), &state, &mut recorder);

        assert_eq!(outcome, ActionOutcome::Ignored);
        assert_eq!(dispatcher.status(), SubmitStatus::Idle);
        assert!(recorder.submits.is_empty() && recorder.commands.is_empty());
    }

    #[test]
    fn test_callbacks_and_status_observer() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let schema = schema();
        let state = bound(&schema);
        let dispatcher = ActionDispatcher::new();
        let statuses = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&statuses);
        dispatcher.on_status_change(move |s| log.borrow_mut().push(*s));

        let mut submitted = 0;
        let mut commands = Vec::new();
        {
            let mut handler = Callbacks::new(
                |_values| submitted += 1,
                |command: &str| commands.push(command.to_string()),
            );
            state.text("name").unwrap().set_field("Bob".to_string());
            dispatcher.dispatch(&ButtonAction::Submit, &state, &mut handler);
            dispatcher.dispatch(&ButtonAction::Custom("export".into()), &state, &mut handler);
            dispatcher.dispatch(&ButtonAction::Reset, &state, &mut handler);
        }

        assert_eq!(submitted, 1);
        assert_eq!(commands, vec!["export".to_string()]);
        assert_eq!(
            *statuses.borrow(),
            vec![SubmitStatus::Success, SubmitStatus::Idle]
        );
    }

    #[test]
    fn test_unit_handler() {
        let schema = schema();
        let state = bound(&schema);
        let outcome = ActionDispatcher::new().submit(&state, &mut ());
        assert_eq!(outcome, ActionOutcome::Invalid);
    }
}
