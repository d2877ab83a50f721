use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic type of a form field.
///
/// The set is closed: every renderer and validator in `form::input` is keyed
/// by this enum, so adding a variant is a compile-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Date,
    Email,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Date,
        FieldType::Email,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Email => "email",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unsupported field type `{}`", s))
    }
}

/// Optional constraints checked when a form is submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression the whole value must match (string-like fields).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Replaces the default message of any failing rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One input of a form, either at the root or inside an array field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FieldDefinition {
    /// Creates a required field labelled with the humanized `name`.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            label: humanize(&name),
            name,
            field_type,
            required: true,
            placeholder: None,
            validation: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }
}

/// A repeating group: one `{{#each name}} ... {{/each}}` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayField {
    pub name: String,
    pub items: Vec<FieldDefinition>,
}

impl ArrayField {
    pub fn new(name: impl Into<String>, items: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn item(&self, name: &str) -> Option<&FieldDefinition> {
        self.items.iter().find(|f| f.name == name)
    }
}

/// Turns `unit_price` into `Unit Price`.
pub fn humanize(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_capitalizes_each_word() {
        assert_eq!(humanize("unit_price"), "Unit Price");
        assert_eq!(humanize("invoice_number"), "Invoice Number");
        assert_eq!(humanize("email"), "Email");
        assert_eq!(humanize("__odd__name_"), "Odd Name");
    }

    #[test]
    fn field_type_parses_only_known_names() {
        assert_eq!("date".parse::<FieldType>(), Ok(FieldType::Date));
        assert!("currency".parse::<FieldType>().is_err());
        assert!("Date".parse::<FieldType>().is_err());
    }

    #[test]
    fn new_field_defaults_to_required_with_label() {
        let field = FieldDefinition::new("customer_email", FieldType::Email);
        assert!(field.required);
        assert_eq!(field.label, "Customer Email");
        assert!(!field.optional().required);
    }
}
