//! Fills a template with submitted values.
//!
//! Root placeholders take the root value of the same name; a `{{#each}}`
//! group is written once per row with its placeholders taken from that row.
//! Missing values render as empty text. `{{grand_total}}` falls back to the
//! computed grand total when the form has no field of that name.

use super::error::TemplateError;
use super::extract::{Segment, extract, scan};
use crate::model::values::{FieldValue, SubmittedValueTree};

const GRAND_TOTAL: &str = "grand_total";

pub fn render(template: &str, values: &SubmittedValueTree) -> Result<String, TemplateError> {
    // Same structural rules as schema extraction.
    extract(template)?;

    let mut out = String::with_capacity(template.len());
    let mut segments = scan(template).into_iter();

    while let Some(segment) = segments.next() {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder { name, .. } => match values.fields.get(name) {
                Some(value) => push_value(&mut out, value),
                None if name == GRAND_TOTAL => {
                    if let Some(total) = values.grand_total {
                        push_value(&mut out, &FieldValue::Number(total));
                    }
                }
                None => {}
            },
            Segment::BlockOpen { name, .. } => {
                let body: Vec<Segment<'_>> = segments
                    .by_ref()
                    .take_while(|s| !matches!(s, Segment::BlockClose { .. }))
                    .collect();
                for row in values.rows(name) {
                    for inner in &body {
                        match inner {
                            Segment::Text(text) => out.push_str(text),
                            Segment::Placeholder { name: field, .. } => {
                                if let Some(value) = row.get(*field) {
                                    push_value(&mut out, value);
                                }
                            }
                            Segment::BlockOpen { .. } | Segment::BlockClose { .. } => {}
                        }
                    }
                }
            }
            Segment::BlockClose { .. } => {}
        }
    }
    Ok(out)
}

fn push_value(out: &mut String, value: &FieldValue) {
    out.push_str(&value.to_string());
}
