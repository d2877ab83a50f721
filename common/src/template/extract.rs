//! Lexical scan of template text.
//!
//! `scan` splits a template into literal text and tags; `extract` walks the
//! tags, tracks the single open `{{#each}}` group and emits one
//! `PlaceholderOccurrence` per placeholder, duplicates included.

use super::error::TemplateError;
use super::position::{LineIndex, Position};
use log::trace;
use std::fmt;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Where a placeholder appeared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Root,
    /// Inside `{{#each name}}`.
    Block(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Root => f.write_str("root"),
            Scope::Block(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderOccurrence {
    pub name: String,
    pub scope: Scope,
    pub position: Position,
}

/// A piece of template text as seen by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Placeholder { name: &'a str, offset: usize },
    BlockOpen { name: &'a str, offset: usize },
    BlockClose { offset: usize },
}

/// Identifier grammar shared with the schema validator: letters, digits, `_`.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits `template` into text and recognised tags.
///
/// Tags whose content is neither an identifier nor a block tag stay literal
/// text, as does an unclosed `{{` at the end.
pub(crate) fn scan(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    // Start of the text not yet emitted.
    let mut cursor = 0;
    // Where to look for the next `{{`. Moves past an unrecognised `{{` only,
    // so a real tag nested in the rejected span is still found.
    let mut search = 0;

    while let Some(rel_open) = template[search..].find(OPEN) {
        let open = search + rel_open;
        let inner_start = open + OPEN.len();
        let Some(rel_close) = template[inner_start..].find(CLOSE) else {
            break;
        };
        let close = inner_start + rel_close;

        match classify(&template[inner_start..close], open) {
            Some(tag) => {
                if open > cursor {
                    segments.push(Segment::Text(&template[cursor..open]));
                }
                segments.push(tag);
                cursor = close + CLOSE.len();
                search = cursor;
            }
            None => search = inner_start,
        }
    }

    if cursor < template.len() {
        segments.push(Segment::Text(&template[cursor..]));
    }
    segments
}

fn classify(inner: &str, offset: usize) -> Option<Segment<'_>> {
    let inner = inner.trim();
    if let Some(directive) = inner.strip_prefix('#') {
        let rest = directive.strip_prefix("each")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.trim();
        return is_identifier(name).then_some(Segment::BlockOpen { name, offset });
    }
    if let Some(directive) = inner.strip_prefix('/') {
        return (directive.trim() == "each").then_some(Segment::BlockClose { offset });
    }
    is_identifier(inner).then_some(Segment::Placeholder { name: inner, offset })
}

/// Lists every placeholder of `template` in source order.
///
/// # Errors
/// - `NestedBlock` when a `{{#each}}` opens inside another one.
/// - `UnterminatedBlock` when the input ends with a group still open.
/// - `UnexpectedBlockClose` for a `{{/each}}` without an open group.
pub fn extract(template: &str) -> Result<Vec<PlaceholderOccurrence>, TemplateError> {
    let index = LineIndex::new(template);
    let mut occurrences = Vec::new();
    let mut open_block: Option<(&str, Position)> = None;

    for segment in scan(template) {
        match segment {
            Segment::Text(_) => {}
            Segment::BlockOpen { name, offset } => {
                let position = index.position_at(offset);
                if let Some((outer, _)) = open_block {
                    return Err(TemplateError::NestedBlock {
                        outer: outer.to_string(),
                        inner: name.to_string(),
                        position,
                    });
                }
                trace!("block `{}` opened at {}", name, position);
                open_block = Some((name, position));
            }
            Segment::BlockClose { offset } => {
                if open_block.take().is_none() {
                    return Err(TemplateError::UnexpectedBlockClose {
                        position: index.position_at(offset),
                    });
                }
            }
            Segment::Placeholder { name, offset } => {
                let scope = match open_block {
                    Some((block, _)) => Scope::Block(block.to_string()),
                    None => Scope::Root,
                };
                occurrences.push(PlaceholderOccurrence {
                    name: name.to_string(),
                    scope,
                    position: index.position_at(offset),
                });
            }
        }
    }

    if let Some((name, position)) = open_block {
        return Err(TemplateError::UnterminatedBlock {
            name: name.to_string(),
            position,
        });
    }
    Ok(occurrences)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(occurrences: &[PlaceholderOccurrence]) -> Vec<(String, String)> {
        occurrences
            .iter()
            .map(|o| (o.name.clone(), o.scope.to_string()))
            .collect()
    }

    #[test]
    fn tags_root_and_block_placeholders() {
        let found = extract(
            "Invoice {{invoice_number}}, Date {{invoice_date}}, \
             {{#each items}}{{description}} {{quantity}} {{unit_price}}{{/each}}",
        )
        .unwrap();
        assert_eq!(
            names(&found),
            [
                ("invoice_number".into(), "root".into()),
                ("invoice_date".into(), "root".into()),
                ("description".into(), "items".into()),
                ("quantity".into(), "items".into()),
                ("unit_price".into(), "items".into()),
            ]
        );
    }

    #[test]
    fn keeps_duplicates_and_trims_whitespace() {
        let found = extract("{{ name }} and {{name}} then {{#each  rows }}{{name}}{{/ each }}").unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[2].scope, Scope::Block("rows".into()));
    }

    #[test]
    fn non_identifier_tags_are_literal_text() {
        let found = extract("{{first name}} {{a-b}} {{}} {{#if x}} {{ok_1}} {{unclosed").unwrap();
        assert_eq!(names(&found), [("ok_1".into(), "root".into())]);
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        let found = extract("{{Name}}{{name}}").unwrap();
        assert_eq!(found[0].name, "Name");
        assert_eq!(found[1].name, "name");
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let err = extract("{{#each items}}{{description}}").unwrap_err();
        match err {
            TemplateError::UnterminatedBlock { name, position } => {
                assert_eq!(name, "items");
                assert_eq!((position.line, position.column), (1, 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nested_block_is_an_error() {
        let err = extract("{{#each a}}{{#each b}}{{x}}{{/each}}{{/each}}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::NestedBlock {
                outer: "a".into(),
                inner: "b".into(),
                position: Position { offset: 11, line: 1, column: 12 },
            }
        );
    }

    #[test]
    fn stray_close_is_an_error() {
        let err = extract("text\n{{/each}}").unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UnexpectedBlockClose { position } if position.line == 2
        ));
    }

    #[test]
    fn sequential_blocks_are_fine() {
        let found = extract("{{#each a}}{{x}}{{/each}}{{#each b}}{{y}}{{/each}}{{z}}").unwrap();
        assert_eq!(
            names(&found),
            [
                ("x".into(), "a".into()),
                ("y".into(), "b".into()),
                ("z".into(), "root".into()),
            ]
        );
    }

    #[test]
    fn scan_preserves_all_text() {
        let template = "Hi {{name}}, {{#each xs}}- {{x}}\n{{/each}}bye {{bad tag}}";
        let rebuilt: String = scan(template)
            .into_iter()
            .map(|s| match s {
                Segment::Text(t) => t.to_string(),
                Segment::Placeholder { name, .. } => format!("{{{{{}}}}}", name),
                Segment::BlockOpen { name, .. } => format!("{{{{#each {}}}}}", name),
                Segment::BlockClose { .. } => "{{/each}}".to_string(),
            })
            .collect();
        assert_eq!(rebuilt, template);
    }

    #[test]
    fn stray_open_does_not_hide_the_next_tag() {
        let found = extract("Use {{ then {{name}} here").unwrap();
        assert_eq!(names(&found), [("name".into(), "root".into())]);
        assert_eq!(found[0].position.column, 12);
    }

    #[test]
    fn stray_open_inside_a_block_keeps_the_close_tag() {
        let found = extract("{{#each items}}{{qty}} {{ {{/each}}{{after}}").unwrap();
        assert_eq!(
            names(&found),
            [
                ("qty".into(), "items".into()),
                ("after".into(), "root".into())
            ]
        );
    }

    #[test]
    fn stray_open_stays_in_the_text() {
        let segments = scan("a {{ b {{c}}");
        assert_eq!(
            segments,
            [
                Segment::Text("a {{ b "),
                Segment::Placeholder { name: "c", offset: 7 }
            ]
        );
    }
}
