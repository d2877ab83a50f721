//! # Schema Service Module
//!
//! Routes under `/api/schemas`. Schemas are usually produced by
//! `/api/templates/extract`, but users may also edit and re-upload the JSON;
//! this is where such hand-made schemas are checked.

mod validate;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/schemas";

/// # Registered Routes:
///
/// *   **`POST /validate`**:
///     - **Handler**: `validate::process`
///     - **Description**: The body is the schema JSON itself. Always answers
///       `200` with a `ValidationReport`; malformed JSON, unsupported field
///       types and structural problems all end up in `errors`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/validate", post().to(validate::process))
}
