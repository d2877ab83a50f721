//! Shared core of the review-forms product.
//!
//! Everything that both the backend and the browser client need lives here:
//!
//! - `model`: the schema (`FormSchema`, `FieldDefinition`, `ArrayField`) and
//!   value (`SubmittedValueTree`) types, plus their JSON interchange format.
//! - `template`: the `{{placeholder}}` / `{{#each}}` scanner, the field type
//!   heuristics, the schema builder and validator, and template rendering.
//! - `form`: the dynamic form engine that edits a value tree against a schema,
//!   keeps derived totals current and validates on submit.
//! - `requests`: payloads exchanged over HTTP.
//!
//! The pipeline is pure and synchronous:
//!
//! ```text
//! template text -> extract -> infer_type -> build_schema -> validate -> FormSession
//! ```

pub mod form;
pub mod model;
pub mod requests;
pub mod template;
