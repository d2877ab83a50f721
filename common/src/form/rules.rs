use super::input::input_spec;
use crate::model::field::FieldDefinition;
use crate::model::values::FieldValue;
use regex::Regex;

/// Runs a field's rules against its current value.
///
/// Order: required, then type well-formedness, then `min`/`max` for numbers
/// and `pattern` for text. A blank optional field passes. The pattern must
/// match the whole value. A custom `validation.message` replaces every
/// default message.
pub fn check_field(field: &FieldDefinition, value: Option<&FieldValue>) -> Vec<String> {
    let custom = field.validation.as_ref().and_then(|v| v.message.clone());
    let message = |default: String| custom.clone().unwrap_or(default);

    let value = match value {
        Some(v) if !v.is_blank() => v,
        _ if field.required => return vec![message(format!("{} is required", field.label))],
        _ => return Vec::new(),
    };

    if let Some(problem) = (input_spec(field.field_type).check)(value) {
        return vec![message(format!("{} {}", field.label, problem))];
    }

    let mut errors = Vec::new();
    let Some(rules) = &field.validation else {
        return errors;
    };

    if let Some(n) = value.as_number() {
        if let Some(min) = rules.min.filter(|min| n < *min) {
            errors.push(message(format!("{} must be at least {}", field.label, min)));
        }
        if let Some(max) = rules.max.filter(|max| n > *max) {
            errors.push(message(format!("{} must be at most {}", field.label, max)));
        }
    }

    if let (Some(pattern), FieldValue::Text(text)) = (&rules.pattern, value) {
        match Regex::new(&format!("^(?:{})$", pattern)) {
            Ok(re) if re.is_match(text) => {}
            Ok(_) => errors.push(message(format!(
                "{} does not match the expected format",
                field.label
            ))),
            Err(_) => errors.push(format!("{} has an unusable pattern", field.label)),
        }
    }

    errors
}
