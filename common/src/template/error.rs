use super::position::{Position, snippet};

/// Fatal problems in a template. No schema is produced when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `{{#each}}` opened while another group is still open.
    #[error("block `each {inner}` is nested inside block `each {outer}` at {position}")]
    NestedBlock {
        outer: String,
        inner: String,
        position: Position,
    },
    /// A `{{#each}}` never closed before the end of the template.
    #[error("block `each {name}` opened at {position} is never closed")]
    UnterminatedBlock { name: String, position: Position },
    /// A `{{/each}}` with no open group.
    #[error("`/each` at {position} closes no open block")]
    UnexpectedBlockClose { position: Position },
}

impl TemplateError {
    pub fn position(&self) -> &Position {
        match self {
            TemplateError::NestedBlock { position, .. }
            | TemplateError::UnterminatedBlock { position, .. }
            | TemplateError::UnexpectedBlockClose { position } => position,
        }
    }

    /// Message followed by the offending source line and a caret.
    pub fn diagnostic(&self, source: &str) -> String {
        format!("{}\n{}", self, snippet(source, self.position()))
    }
}
