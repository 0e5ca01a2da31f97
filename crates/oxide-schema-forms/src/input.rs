//! Input sanitization for text-like fields.
//!
//! These are the edit-time policies a host applies before writing a value:
//! number fields keep digits only, select fields accept only their options,
//! and date fields store a `MM/dd/yyyy` string.

use chrono::{DateTime, NaiveDate, Utc};

use crate::schema::FieldSchema;

/// Stored format of date field values.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Keeps only the decimal digits of `input`.
#[must_use]
pub fn sanitize_number(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a date the way date fields store it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a picker selection given as milliseconds since the Unix epoch
/// (UTC). Returns an empty string for an out-of-range instant.
#[must_use]
pub fn format_timestamp_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| format_date(dt.date_naive()))
        .unwrap_or_default()
}

/// Parses a stored date value back into a date.
///
/// Only the canonical form is accepted: zero-padded month and day and a
/// four-digit year, so `1/5/2025` and `01/05/25` are both rejected.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| format_date(*date) == value)
}

/// Applies the field's input policy to a raw edit.
///
/// Returns the value to store, or `None` if the edit must be rejected and
/// the previous value kept.
#[must_use]
pub fn sanitize(schema: &FieldSchema, input: &str) -> Option<String> {
    match schema {
        FieldSchema::Text(_) | FieldSchema::TextArea(_) => Some(input.to_string()),
        FieldSchema::Number(_) => Some(sanitize_number(input)),
        FieldSchema::Select(select) => select.accepts(input).then(|| input.to_string()),
        FieldSchema::Date(_) => (input.is_empty() || parse_date(input).is_some())
            .then(|| input.to_string()),
        FieldSchema::Checkbox(_) | FieldSchema::Button(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DatePickerField, NumberField, SelectField, TextField};

    #[test]
    fn test_sanitize_number() {
        assert_eq!(sanitize_number("12a3"), "123");
        assert_eq!(sanitize_number("-4.5"), "45");
        assert_eq!(sanitize_number("abc"), "");
        assert_eq!(sanitize_number("٣"), "");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        assert_eq!(format_date(date), "08/05/2025");
        assert_eq!(parse_date("08/05/2025"), Some(date));
        assert_eq!(parse_date("2025-08-05"), None);
    }

    #[test]
    fn test_parse_date_is_strict() {
        assert_eq!(parse_date("1/5/2025"), None);
        assert_eq!(parse_date("01/05/25"), None);
        assert_eq!(parse_date("1/5/25"), None);
        assert_eq!(
            parse_date("01/05/0025"),
            NaiveDate::from_ymd_opt(25, 1, 5)
        );
    }

    #[test]
    fn test_format_timestamp_millis() {
        // 2025-08-05T00:00:00Z
        assert_eq!(format_timestamp_millis(1_754_352_000_000), "08/05/2025");
        assert_eq!(format_timestamp_millis(0), "01/01/1970");
        assert_eq!(format_timestamp_millis(i64::MAX), "");
    }

    #[test]
    fn test_sanitize_by_kind() {
        let text = FieldSchema::Text(TextField {
            label: "Name".into(),
            name: "name".into(),
            validation: None,
        });
        assert_eq!(sanitize(&text, " a1 "), Some(" a1 ".to_string()));

        let number = FieldSchema::Number(NumberField {
            label: "Age".into(),
            name: "age".into(),
            validation: None,
        });
        assert_eq!(sanitize(&number, "4x2"), Some("42".to_string()));

        let select = FieldSchema::Select(SelectField {
            label: "Region".into(),
            name: "region".into(),
            options: vec!["north".into(), "south".into()],
            validation: None,
        });
        assert_eq!(sanitize(&select, "south"), Some("south".to_string()));
        assert_eq!(sanitize(&select, ""), Some(String::new()));
        assert_eq!(sanitize(&select, "east"), None);

        let date = FieldSchema::Date(DatePickerField {
            label: "Day".into(),
            name: "day".into(),
            validation: None,
        });
        assert_eq!(sanitize(&date, "12/31/2024"), Some("12/31/2024".to_string()));
        assert_eq!(sanitize(&date, "tomorrow"), None);
        assert_eq!(sanitize(&date, "1/5/2025"), None);
        assert_eq!(sanitize(&date, "01/05/25"), None);
        assert_eq!(sanitize(&date, ""), Some(String::new()));
    }
}
