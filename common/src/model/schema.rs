//! The `FormSchema` aggregate and its JSON interchange format.
//!
//! On the wire a schema is a single JSON object: every root field appears as
//! `"name": FieldDefinition` and every repeating group as
//! `"name": { "name": ..., "items": [FieldDefinition, ...] }`, in schema order.
//! This is the shape users download, inspect and upload again to skip the
//! template parser.
//!
//! Decoding is lenient on purpose of reporting: unknown field types are
//! collected as diagnostics instead of aborting at the first one, so an upload
//! can be answered with every problem at once (see `template::validate`).

use super::field::{ArrayField, FieldDefinition, FieldType, FieldValidation, humanize};
use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Errors raised while decoding a schema from its interchange format.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema contains unsupported entries: {}", .0.join("; "))]
    Unsupported(Vec<String>),
}

/// Form description derived from a template (or uploaded directly).
///
/// Root fields and array fields are kept in first-seen order. Names are
/// expected to be unique per scope; `template::validate` checks it because
/// hand-authored schemas can break the rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    pub fields: Vec<FieldDefinition>,
    pub arrays: Vec<ArrayField>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldDefinition>, arrays: Vec<ArrayField>) -> Self {
        Self { fields, arrays }
    }

    /// Looks up a root field.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a repeating group.
    pub fn array(&self, name: &str) -> Option<&ArrayField> {
        self.arrays.iter().find(|a| a.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.arrays.is_empty()
    }

    /// Pretty JSON in the interchange format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Strict decode: any unsupported entry fails the whole schema.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let (schema, diagnostics) = Self::decode_lenient(json)?;
        if diagnostics.is_empty() {
            Ok(schema)
        } else {
            Err(SchemaError::Unsupported(diagnostics))
        }
    }

    /// Decodes every entry it can and returns the rest as diagnostics.
    ///
    /// Entries with an unknown `type` are left out of the returned schema.
    pub fn decode_lenient(json: &str) -> Result<(Self, Vec<String>), serde_json::Error> {
        let raw: RawEntries = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawEntries) -> (Self, Vec<String>) {
        let mut schema = FormSchema::default();
        let mut diagnostics = Vec::new();

        for (key, entry) in raw.0 {
            match entry {
                RawEntry::Array(array) => {
                    if let Some(declared) = array.name.as_deref() {
                        if declared != key {
                            diagnostics.push(format!(
                                "entry `{}` declares a different name `{}`",
                                key, declared
                            ));
                        }
                    }
                    let items = array
                        .items
                        .into_iter()
                        .filter_map(|item| {
                            let name = item.name.clone().unwrap_or_default();
                            let path = format!("{}.{}", key, name);
                            item.into_definition(name, &path, &mut diagnostics)
                        })
                        .collect();
                    schema.arrays.push(ArrayField::new(key, items));
                }
                RawEntry::Field(field) => {
                    if let Some(declared) = field.name.as_deref() {
                        if declared != key {
                            diagnostics.push(format!(
                                "entry `{}` declares a different name `{}`",
                                key, declared
                            ));
                        }
                    }
                    let path = key.clone();
                    if let Some(definition) = field.into_definition(key, &path, &mut diagnostics) {
                        schema.fields.push(definition);
                    }
                }
            }
        }

        (schema, diagnostics)
    }
}

impl Serialize for FormSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + self.arrays.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, field)?;
        }
        for array in &self.arrays {
            map.serialize_entry(&array.name, array)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEntries::deserialize(deserializer)?;
        let (schema, diagnostics) = FormSchema::from_raw(raw);
        match diagnostics.into_iter().next() {
            Some(first) => Err(D::Error::custom(first)),
            None => Ok(schema),
        }
    }
}

/// Object entries in document order, repeated keys included.
///
/// A map type would silently keep only the last of two equal keys and hide
/// a duplicate name from the validator.
struct RawEntries(Vec<(String, RawEntry)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of field and array definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawEntry>()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Array(RawArrayField),
    Field(RawFieldDefinition),
}

#[derive(Deserialize)]
struct RawArrayField {
    #[serde(default)]
    name: Option<String>,
    items: Vec<RawFieldDefinition>,
}

#[derive(Deserialize)]
struct RawFieldDefinition {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    validation: Option<FieldValidation>,
}

impl RawFieldDefinition {
    fn into_definition(
        self,
        name: String,
        path: &str,
        diagnostics: &mut Vec<String>,
    ) -> Option<FieldDefinition> {
        let field_type = match self.field_type.parse::<FieldType>() {
            Ok(t) => t,
            Err(_) => {
                diagnostics.push(format!(
                    "field `{}` has unsupported type `{}`",
                    path, self.field_type
                ));
                return None;
            }
        };
        Some(FieldDefinition {
            label: self.label.unwrap_or_else(|| humanize(&name)),
            name,
            field_type,
            required: self.required,
            placeholder: self.placeholder,
            validation: self.validation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice_schema() -> FormSchema {
        FormSchema::new(
            vec![
                FieldDefinition::new("invoice_number", FieldType::String),
                FieldDefinition::new("invoice_date", FieldType::Date),
            ],
            vec![ArrayField::new(
                "items",
                vec![
                    FieldDefinition::new("description", FieldType::String),
                    FieldDefinition::new("quantity", FieldType::Number),
                ],
            )],
        )
    }

    #[test]
    fn serializes_as_one_merged_object_in_order() {
        // A `Value` map sorts its keys, so order is checked on the text.
        let json = serde_json::to_string(&invoice_schema()).unwrap();
        let at = |key: &str| json.find(&format!("\"{}\":", key)).unwrap();
        assert_eq!(at("invoice_number"), 1);
        assert!(at("invoice_number") < at("invoice_date"));
        assert!(at("invoice_date") < at("items"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["invoice_date"]["type"], "date");
        assert_eq!(value["items"]["items"][1]["name"], "quantity");
    }

    #[test]
    fn json_round_trip_keeps_the_schema() {
        let schema = invoice_schema();
        let json = schema.to_json().unwrap();
        assert_eq!(FormSchema::from_json(&json).unwrap(), schema);
        let via_serde: FormSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(via_serde, schema);
    }

    #[test]
    fn unknown_types_are_collected_not_short_circuited() {
        let json = r#"{
            "amount": { "type": "currency", "label": "Amount" },
            "lines": { "items": [ { "name": "cost", "type": "money", "label": "Cost" } ] },
            "name": { "type": "string", "label": "Name" }
        }"#;
        let (schema, diagnostics) = FormSchema::decode_lenient(json).unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].contains("`amount`"));
        assert!(diagnostics[1].contains("`lines.cost`"));
        assert_eq!(schema.fields.len(), 1);
        assert!(schema.array("lines").unwrap().items.is_empty());
        assert!(matches!(
            FormSchema::from_json(json),
            Err(SchemaError::Unsupported(d)) if d.len() == 2
        ));
    }

    #[test]
    fn missing_label_is_humanized_and_mismatched_name_reported() {
        let json = r#"{ "due_date": { "name": "other", "type": "date" } }"#;
        let (schema, diagnostics) = FormSchema::decode_lenient(json).unwrap();
        assert_eq!(schema.field("due_date").unwrap().label, "Due Date");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn repeated_keys_survive_decoding() {
        let json = r#"{ "a": { "type": "string" }, "a": { "type": "number" } }"#;
        let (schema, diagnostics) = FormSchema::decode_lenient(json).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(schema.fields.len(), 2);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            FormSchema::from_json("{ not json"),
            Err(SchemaError::Json(_))
        ));
    }
}
