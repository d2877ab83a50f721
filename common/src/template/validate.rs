//! Structural checks on a `FormSchema`.
//!
//! Schemas built by `build_schema` pass by construction; these checks exist
//! for schemas that are uploaded as JSON or edited by hand. Every check runs
//! and contributes its own message, nothing short-circuits.

use super::extract::is_identifier;
use crate::model::field::FieldDefinition;
use crate::model::schema::FormSchema;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of validating a schema.
///
/// `warnings` never affect `valid`; they flag templates that are legal but
/// probably not what the author meant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validates a schema value.
pub fn validate(schema: &FormSchema) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut root_names = HashSet::new();
    for field in &schema.fields {
        check_field(field, &field.name, &mut errors);
        if !root_names.insert(field.name.as_str()) {
            errors.push(format!("duplicate field name `{}` at root", field.name));
        }
    }

    for array in &schema.arrays {
        if !is_identifier(&array.name) {
            errors.push(format!("array field name `{}` is not a valid identifier", array.name));
        }
        if !root_names.insert(array.name.as_str()) {
            errors.push(format!("duplicate field name `{}` at root", array.name));
        }
        if array.items.is_empty() {
            errors.push(format!("array field `{}` has no item fields", array.name));
        }

        let mut item_names = HashSet::new();
        for item in &array.items {
            let path = format!("{}.{}", array.name, item.name);
            check_field(item, &path, &mut errors);
            if !item_names.insert(item.name.as_str()) {
                errors.push(format!(
                    "duplicate field name `{}` in array field `{}`",
                    item.name, array.name
                ));
            }
            if schema.field(&item.name).is_some() {
                warnings.push(format!(
                    "`{}` is used both as a root field and inside array field `{}`; they are unrelated fields",
                    item.name, array.name
                ));
            }
        }
    }

    debug!(
        "schema validation: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );
    ValidationReport::from_parts(errors, warnings)
}

fn check_field(field: &FieldDefinition, path: &str, errors: &mut Vec<String>) {
    if !is_identifier(&field.name) {
        errors.push(format!("field name `{}` is not a valid identifier", path));
    }
    let Some(rules) = &field.validation else {
        return;
    };
    if let Some(pattern) = &rules.pattern {
        if let Err(e) = Regex::new(pattern) {
            errors.push(format!("field `{}` has an invalid pattern: {}", path, e));
        }
    }
    if let (Some(min), Some(max)) = (rules.min, rules.max) {
        if min > max {
            errors.push(format!("field `{}` has min {} greater than max {}", path, min, max));
        }
    }
}

/// Validates a schema in its JSON interchange form.
///
/// Entries with unsupported types are reported next to the structural errors
/// of everything that did decode.
pub fn validate_json(json: &str) -> ValidationReport {
    match FormSchema::decode_lenient(json) {
        Ok((schema, mut decode_errors)) => {
            let report = validate(&schema);
            decode_errors.extend(report.errors);
            ValidationReport::from_parts(decode_errors, report.warnings)
        }
        Err(e) => ValidationReport::from_parts(vec![format!("schema is not valid JSON: {}", e)], Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{ArrayField, FieldType, FieldValidation};
    use crate::template::builder::schema_from_template;

    #[test]
    fn built_schema_is_valid() {
        let schema = schema_from_template(
            "{{name}} {{#each items}}{{description}} {{quantity}}{{/each}}",
        )
        .unwrap();
        let report = validate(&schema);
        assert!(report.valid, "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn empty_array_is_rejected() {
        let schema = FormSchema::new(Vec::new(), vec![ArrayField::new("items", Vec::new())]);
        let report = validate(&schema);
        assert!(!report.valid);
        assert!(!report.errors.is_empty());
    }

    #[test]
    fn reports_every_problem_at_once() {
        let schema = FormSchema::new(
            vec![
                FieldDefinition::new("bad name", FieldType::String),
                FieldDefinition::new("dup", FieldType::String),
                FieldDefinition::new("dup", FieldType::Number),
            ],
            vec![
                ArrayField::new(
                    "rows",
                    vec![
                        FieldDefinition::new("x", FieldType::Number),
                        FieldDefinition::new("x", FieldType::Number),
                    ],
                ),
                ArrayField::new("empty", Vec::new()),
            ],
        );
        let report = validate(&schema);
        assert_eq!(report.errors.len(), 4, "{:?}", report.errors);
    }

    #[test]
    fn array_name_clashing_with_root_field_is_a_duplicate() {
        let schema = FormSchema::new(
            vec![FieldDefinition::new("items", FieldType::String)],
            vec![ArrayField::new("items", vec![FieldDefinition::new("a", FieldType::String)])],
        );
        assert!(!validate(&schema).valid);
    }

    #[test]
    fn root_and_item_name_reuse_is_only_a_warning() {
        let schema = schema_from_template("{{total}}{{#each items}}{{total}}{{/each}}").unwrap();
        let report = validate(&schema);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn checks_validation_rules() {
        let schema = FormSchema::new(
            vec![
                FieldDefinition::new("code", FieldType::String).with_validation(FieldValidation {
                    pattern: Some("([a-z".into()),
                    ..Default::default()
                }),
                FieldDefinition::new("qty", FieldType::Number).with_validation(FieldValidation {
                    min: Some(10.0),
                    max: Some(1.0),
                    ..Default::default()
                }),
            ],
            Vec::new(),
        );
        assert_eq!(validate(&schema).errors.len(), 2);
    }

    #[test]
    fn json_round_trip_preserves_validity() {
        let valid = schema_from_template("{{a}}{{#each items}}{{qty}}{{/each}}").unwrap();
        let invalid = FormSchema::new(
            vec![
                FieldDefinition::new("a", FieldType::String),
                FieldDefinition::new("a", FieldType::Date),
            ],
            vec![ArrayField::new("items", Vec::new())],
        );
        for schema in [valid, invalid] {
            let json = serde_json::to_string(&schema).unwrap();
            assert_eq!(validate_json(&json).valid, validate(&schema).valid);
            assert_eq!(validate_json(&json).errors, validate(&schema).errors);
        }
    }

    #[test]
    fn json_with_unknown_type_is_invalid() {
        let report = validate_json(
            r#"{ "price": { "type": "currency", "label": "Price" }, "items": { "items": [] } }"#,
        );
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("unsupported type"));
    }

    #[test]
    fn unparseable_json_is_invalid() {
        let report = validate_json("[1, 2");
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }
}
