//! Tests for binding, validating and resetting a decoded form.

mod common;
use common::*;

use std::rc::Rc;

use oxide_schema_forms::{
    EditPolicy, FieldValue, FormError, FormSchemaBuilder, FormState, ValidationRule,
};

#[test]
fn binds_input_fields_in_schema_order() {
    let form = registration_form();
    let names: Vec<&str> = form.state().names().collect();
    assert_eq!(names, ["name", "age", "region", "bio", "birthday", "terms"]);
}

#[test]
fn validate_populates_every_error() {
    let form = registration_form();

    assert!(!form.state().validate());

    let errors = form.errors();
    assert_eq!(errors.get("name"), Some(&vec!["不能为空".to_string()]));
    assert_eq!(errors.get("region"), Some(&vec!["value required".to_string()]));
    assert_eq!(errors.get("bio"), Some(&vec!["value required".to_string()]));
    assert_eq!(errors.get("terms"), Some(&vec!["must be checked".to_string()]));
    assert!(errors.get("age").is_none());
    assert!(errors.get("birthday").is_none());
    assert_eq!(errors.first_field(), Some("name"));
}

#[test]
fn required_name_example() {
    let form = registration_form();
    let name = form.text("name").unwrap();

    name.set_field(String::new());
    assert!(!name.validate());
    assert_eq!(name.error().as_deref(), Some("不能为空"));

    name.set_field("Alice".to_string());
    assert!(name.validate());
    assert_eq!(name.error(), None);
}

#[test]
fn blank_text_is_rejected_for_every_text_like_kind() {
    let rule = ValidationRule::new().required();
    let schema = FormSchemaBuilder::new("Blank")
        .text("A", "a", Some(rule.clone()))
        .textarea("B", "b", oxide_schema_forms::TextAreaOptions::new().validation(rule.clone()))
        .number("C", "c", Some(rule.clone()))
        .select("D", "d", ["x"], Some(rule.clone()))
        .date("E", "e", Some(rule))
        .build();
    let mut state = FormState::new();
    state.bind_schema(&schema).unwrap();

    for blank in ["", " ", "\t \n"] {
        for name in ["a", "b", "c", "d", "e"] {
            let c = state.text(name).unwrap();
            c.set_field(blank.to_string());
            assert!(!c.validate(), "{name} accepted {blank:?}");
            assert_eq!(c.error().as_deref(), Some("value required"));
        }
    }
}

#[test]
fn textarea_min_length_boundary() {
    let form = registration_form();
    let bio = form.text("bio").unwrap();

    bio.set_field("123456789".to_string());
    assert!(!bio.validate());
    assert_eq!(bio.error().as_deref(), Some("minimum 10 characters"));

    bio.set_field("1234567890".to_string());
    assert!(bio.validate());
}

#[test]
fn edits_follow_field_input_policy() {
    let form = registration_form();

    let age = form.text("age").unwrap();
    assert!(age.edit("3a0", EditPolicy::Deferred));
    assert_eq!(age.field(), "30");

    let region = form.text("region").unwrap();
    assert!(!region.edit("深圳", EditPolicy::Deferred));
    assert_eq!(region.field(), "");
    assert!(region.edit("广州", EditPolicy::ValidateOnChange));
    assert_eq!(region.error(), None);

    let birthday = form.text("birthday").unwrap();
    let picked = oxide_schema_forms::input::format_timestamp_millis(1_754_352_000_000);
    assert!(birthday.edit(&picked, EditPolicy::Deferred));
    assert_eq!(birthday.field(), "08/05/2025");
}

#[test]
fn reset_restores_defaults_without_validating() {
    let form = registration_form();
    fill_valid(&form);
    form.text("name").unwrap().set_error(Some("stale".to_string()));

    form.state().reset_all_fields();

    let values = form.values();
    for name in ["name", "age", "region", "bio", "birthday"] {
        assert_eq!(values.get(name), Some(&FieldValue::Text(String::new())));
    }
    assert_eq!(values.get("terms"), Some(&FieldValue::Flag(false)));
    assert!(form.errors().is_empty());
}

#[test]
fn string_values_stringify_flags() {
    let form = registration_form();
    fill_valid(&form);

    let strings = form.state().all_values();
    assert_eq!(strings.len(), 6);
    assert_eq!(strings["terms"], "true");
    assert_eq!(strings["age"], "");
    assert_eq!(strings["region"], "上海");
}

#[test]
fn rebinding_returns_the_same_controller() {
    let schema = registration_schema();
    let mut state = FormState::new();
    state.bind_schema(&schema).unwrap();

    let name = schema.field("name").unwrap();
    let bound = state.text("name").unwrap();
    let rebound = state.bind(name, "different".to_string()).unwrap();
    assert!(Rc::ptr_eq(&bound, &rebound));
    assert_eq!(rebound.default_value(), "");

    let err = state.bind(name, true).unwrap_err();
    assert!(matches!(err, FormError::KindMismatch { .. }));
}

#[test]
fn duplicate_names_keep_first_binding() {
    let schema = FormSchemaBuilder::new("Dup")
        .text("First", "dup", Some(ValidationRule::new().required()))
        .text("Second", "dup", None)
        .build();
    let mut state = FormState::new();
    state.bind_schema(&schema).unwrap();

    assert_eq!(state.len(), 1);
    let dup = state.text("dup").unwrap();
    assert_eq!(dup.schema().label(), "First");
    assert!(!dup.validate());
}
