use super::field::FieldType;
use super::schema::FormSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value entered into a form field.
///
/// Number fields hold `Number` once the input parses; anything else the user
/// typed is kept verbatim as `Text` so a failed validation never loses input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Initial value of a fresh field: `0` for numbers, `""` otherwise.
    pub fn empty_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Number => FieldValue::Number(0.0),
            FieldType::String | FieldType::Date | FieldType::Email => {
                FieldValue::Text(String::new())
            }
        }
    }

    /// Converts raw input text for a field of `field_type`.
    pub fn from_input(field_type: FieldType, raw: &str) -> Self {
        match field_type {
            FieldType::Number => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => FieldValue::Number(n),
                _ => FieldValue::Text(raw.to_string()),
            },
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(_) => false,
            FieldValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// One row of a repeating group, keyed by item field name.
pub type Row = IndexMap<String, FieldValue>;

/// Everything a user entered in one form session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmittedValueTree {
    #[serde(default)]
    pub fields: IndexMap<String, FieldValue>,
    #[serde(default)]
    pub arrays: IndexMap<String, Vec<Row>>,
    /// Sum of the `items` line totals, when the schema has them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<f64>,
}

impl SubmittedValueTree {
    /// Fresh tree for `schema`: initial root values and no rows.
    pub fn empty_for(schema: &FormSchema) -> Self {
        Self {
            fields: schema
                .fields
                .iter()
                .map(|f| (f.name.clone(), FieldValue::empty_for(f.field_type)))
                .collect(),
            arrays: schema
                .arrays
                .iter()
                .map(|a| (a.name.clone(), Vec::new()))
                .collect(),
            grand_total: None,
        }
    }

    pub fn rows(&self, array: &str) -> &[Row] {
        self.arrays.get(array).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{ArrayField, FieldDefinition};

    #[test]
    fn number_input_keeps_unparseable_text() {
        assert_eq!(
            FieldValue::from_input(FieldType::Number, " 2.5 "),
            FieldValue::Number(2.5)
        );
        assert_eq!(
            FieldValue::from_input(FieldType::Number, "two"),
            FieldValue::Text("two".into())
        );
        assert_eq!(
            FieldValue::from_input(FieldType::Email, "42"),
            FieldValue::Text("42".into())
        );
    }

    #[test]
    fn empty_tree_follows_schema() {
        let schema = FormSchema::new(
            vec![
                FieldDefinition::new("name", FieldType::String),
                FieldDefinition::new("count", FieldType::Number),
            ],
            vec![ArrayField::new(
                "items",
                vec![FieldDefinition::new("qty", FieldType::Number)],
            )],
        );
        let tree = SubmittedValueTree::empty_for(&schema);
        assert_eq!(tree.fields["name"], FieldValue::Text(String::new()));
        assert_eq!(tree.fields["count"], FieldValue::Number(0.0));
        assert!(tree.rows("items").is_empty());
        assert!(tree.rows("missing").is_empty());
    }

    #[test]
    fn values_serialize_as_plain_json() {
        let mut tree = SubmittedValueTree::default();
        tree.fields.insert("qty".into(), FieldValue::Number(3.0));
        tree.fields.insert("name".into(), FieldValue::Text("Ana".into()));
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["fields"]["qty"], 3.0);
        assert_eq!(json["fields"]["name"], "Ana");
        assert!(json.get("grand_total").is_none());
        let back: SubmittedValueTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }
}
