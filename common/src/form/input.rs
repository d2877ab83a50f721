//! How each field type is presented and what a well-formed value looks like.

use crate::model::field::{FieldDefinition, FieldType};
use crate::model::values::FieldValue;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("date pattern compiles")
});

/// Name fragments that turn a string field into a multi-line input.
const MULTI_LINE_HINTS: [&str; 3] = ["description", "notes", "address"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputKind {
    SingleLine,
    MultiLine,
}

/// Presentation and well-formedness rule of one `FieldType`.
#[derive(Debug)]
pub struct InputSpec {
    pub field_type: FieldType,
    /// `type` attribute of the HTML input.
    pub html_type: &'static str,
    /// Returns a message when a non-blank value is malformed for the type.
    pub check: fn(&FieldValue) -> Option<&'static str>,
}

static INPUT_SPECS: [InputSpec; 4] = [
    InputSpec {
        field_type: FieldType::String,
        html_type: "text",
        check: check_string,
    },
    InputSpec {
        field_type: FieldType::Number,
        html_type: "number",
        check: check_number,
    },
    InputSpec {
        field_type: FieldType::Date,
        html_type: "date",
        check: check_date,
    },
    InputSpec {
        field_type: FieldType::Email,
        html_type: "email",
        check: check_email,
    },
];

pub fn input_spec(field_type: FieldType) -> &'static InputSpec {
    match field_type {
        FieldType::String => &INPUT_SPECS[0],
        FieldType::Number => &INPUT_SPECS[1],
        FieldType::Date => &INPUT_SPECS[2],
        FieldType::Email => &INPUT_SPECS[3],
    }
}

pub fn input_kind(field: &FieldDefinition) -> InputKind {
    let name = field.name.to_lowercase();
    if field.field_type == FieldType::String
        && MULTI_LINE_HINTS.iter().any(|hint| name.contains(hint))
    {
        InputKind::MultiLine
    } else {
        InputKind::SingleLine
    }
}

fn check_string(_: &FieldValue) -> Option<&'static str> {
    None
}

fn check_number(value: &FieldValue) -> Option<&'static str> {
    match value {
        FieldValue::Number(_) => None,
        FieldValue::Text(_) => Some("must be a number"),
    }
}

fn check_date(value: &FieldValue) -> Option<&'static str> {
    match value {
        FieldValue::Text(s) if DATE_RE.is_match(s.trim()) => None,
        _ => Some("must be a date (YYYY-MM-DD)"),
    }
}

fn check_email(value: &FieldValue) -> Option<&'static str> {
    match value {
        FieldValue::Text(s) if EMAIL_RE.is_match(s.trim()) => None,
        _ => Some("must be a valid email address"),
    }
}
