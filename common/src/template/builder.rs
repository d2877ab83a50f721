//! Turns placeholder occurrences into a `FormSchema`.

use super::error::TemplateError;
use super::extract::{PlaceholderOccurrence, Scope, extract};
use super::infer::infer_type;
use crate::model::field::{ArrayField, FieldDefinition};
use crate::model::schema::FormSchema;
use indexmap::{IndexMap, IndexSet};
use log::debug;

/// Builds the schema for a list of occurrences.
///
/// Each scope is deduplicated by name keeping first-seen order. Every field
/// is typed by `infer_type` and marked required. Root fields and groups are
/// separate namespaces: a name used in both yields two unrelated fields.
pub fn build_schema(occurrences: &[PlaceholderOccurrence]) -> FormSchema {
    let mut root: IndexSet<&str> = IndexSet::new();
    let mut blocks: IndexMap<&str, IndexSet<&str>> = IndexMap::new();

    for occurrence in occurrences {
        match &occurrence.scope {
            Scope::Root => {
                root.insert(&occurrence.name);
            }
            Scope::Block(block) => {
                blocks.entry(block).or_default().insert(&occurrence.name);
            }
        }
    }

    let schema = FormSchema {
        fields: root.into_iter().map(definition).collect(),
        arrays: blocks
            .into_iter()
            .map(|(block, names)| {
                ArrayField::new(block, names.into_iter().map(definition).collect())
            })
            .collect(),
    };
    debug!(
        "built schema with {} root fields and {} array fields",
        schema.fields.len(),
        schema.arrays.len()
    );
    schema
}

fn definition(name: &str) -> FieldDefinition {
    FieldDefinition::new(name, infer_type(name))
}

/// `extract` followed by `build_schema`.
pub fn schema_from_template(template: &str) -> Result<FormSchema, TemplateError> {
    let occurrences = extract(template)?;
    Ok(build_schema(&occurrences))
}
