//! Template front end: scanning `{{...}}` tags, inferring field types,
//! building and validating the form schema, and rendering filled documents.
//!
//! The template language is deliberately tiny:
//!
//! - `{{identifier}}` marks a value;
//! - `{{#each identifier}} ... {{/each}}` marks a repeating group whose inner
//!   placeholders describe one row.
//!
//! There is no escaping, no else-branch and no nesting of groups.

pub mod builder;
pub mod error;
pub mod extract;
pub mod infer;
pub mod position;
pub mod render;
pub mod samples;
pub mod validate;

pub use builder::{build_schema, schema_from_template};
pub use error::TemplateError;
pub use extract::{PlaceholderOccurrence, Scope, extract};
pub use infer::infer_type;
pub use position::Position;
pub use render::render;
pub use validate::{ValidationReport, validate, validate_json};
