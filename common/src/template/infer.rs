//! Field type heuristics.
//!
//! Types are guessed from the placeholder name alone. The rules are tried in
//! order and the first match wins, so `email_date` is an email field.
//!
//! `number` only counts when it leads the name (`number`, `number_of_guests`):
//! a trailing `_number` names an identifier such as `invoice_number` or
//! `phone_number`, which is free text.

use crate::model::field::FieldType;

#[derive(Debug, Clone, Copy)]
enum Needle {
    /// Anywhere in the name.
    Contains(&'static str),
    /// The whole name, or its first `_`-separated word.
    Leading(&'static str),
}

impl Needle {
    fn matches(self, name: &str) -> bool {
        match self {
            Needle::Contains(needle) => name.contains(needle),
            Needle::Leading(needle) => name.split('_').next() == Some(needle),
        }
    }
}

/// Ordered `(type, needles)` rules over the lower-cased field name.
const RULES: &[(FieldType, &[Needle])] = &[
    (FieldType::Email, &[Needle::Contains("email")]),
    (FieldType::Date, &[Needle::Contains("date")]),
    (
        FieldType::Number,
        &[
            Needle::Contains("price"),
            Needle::Contains("amount"),
            Needle::Contains("total"),
            Needle::Contains("quantity"),
            Needle::Contains("qty"),
            Needle::Leading("number"),
            Needle::Contains("count"),
            Needle::Contains("rate"),
            Needle::Contains("hours"),
        ],
    ),
];

/// Infers the semantic type of a field from its name. Never fails.
pub fn infer_type(field_name: &str) -> FieldType {
    let name = field_name.to_lowercase();
    RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| needle.matches(&name)))
        .map(|(field_type, _)| *field_type)
        .unwrap_or(FieldType::String)
}
