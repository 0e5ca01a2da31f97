#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use oxide_schema_forms::{ActionHandler, FormSchema, FormValues, SchemaForm};

pub const REGISTRATION: &str = r#"
{
  "type": "form",
  "title": "用户信息登记",
  "fields": [
    { "type": "text", "label": "姓名", "name": "name", "validation": { "required": true, "message": "不能为空" } },
    { "type": "number", "label": "年龄", "name": "age", "validation": { "required": false } },
    { "type": "select", "label": "地区", "name": "region", "options": ["北京", "上海", "广州"], "validation": { "required": true } },
    { "type": "textarea", "label": "自我介绍", "name": "bio", "validation": { "required": true, "minLength": 10 }, "maxLines": 4 },
    { "type": "date", "label": "生日", "name": "birthday" },
    { "type": "checkbox", "label": "接受条款", "name": "terms", "validation": { "requiredChecked": true } },
    { "type": "button", "label": "提交", "name": "btn_submit", "action": "submit" },
    { "type": "button", "label": "重置", "name": "btn_reset", "action": "reset" },
    { "type": "button", "label": "归档", "name": "btn_archive", "action": "archive" }
  ]
}
"#;

pub fn registration_schema() -> FormSchema {
    FormSchema::from_json(REGISTRATION)
        .unwrap_or_else(|e| panic!("Failed to decode sample schema: {e}"))
}

pub fn registration_form() -> SchemaForm {
    SchemaForm::new(registration_schema())
        .unwrap_or_else(|e| panic!("Failed to bind sample schema: {e}"))
}

/// Fills every field of the registration form with a valid value.
pub fn fill_valid(form: &SchemaForm) {
    form.text("name").unwrap().set_field("Alice".to_string());
    form.text("region").unwrap().set_field("上海".to_string());
    form.text("bio")
        .unwrap()
        .set_field("I like writing Rust code.".to_string());
    form.flag("terms").unwrap().set_field(true);
}

/// Records every callback it receives. Clones share the same log.
#[derive(Clone, Default)]
pub struct Recorder {
    pub submits: Rc<RefCell<Vec<FormValues>>>,
    pub commands: Rc<RefCell<Vec<String>>>,
}

impl ActionHandler for Recorder {
    fn on_submit(&mut self, values: FormValues) {
        self.submits.borrow_mut().push(values);
    }

    fn on_action(&mut self, command: &str) {
        self.commands.borrow_mut().push(command.to_string());
    }
}
