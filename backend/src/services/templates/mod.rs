//! # Template Service Module
//!
//! Routes under `/api/templates`: everything that turns template text into a
//! form schema.
//!
//! ## Sub-modules:
//! - `extract`: Parses pasted template text and answers with the derived schema.
//! - `upload`: Same as `extract`, for a `.txt`/`.html` file sent as multipart.
//! - `samples`: Lists and serves the built-in templates.

mod extract;
mod samples;
mod upload;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /extract`**:
///     - **Handler**: `extract::process`
///     - **Description**: Expects an `ExtractRequest` (`text` plus an optional
///       `format` of `text` or `html`). Answers `200` with an `ExtractResponse`
///       holding the flattened text, the inferred `FormSchema`, its
///       `ValidationReport` and the MD5 of the text. A template that does not
///       parse (nested or unterminated `{{#each}}`, stray `{{/each}}`) gets a
///       `422` with a `ParseErrorResponse` carrying line and column.
///
/// *   **`POST /upload`**:
///     - **Handler**: `upload::process`
///     - **Description**: Multipart form with a `file` part. The format comes
///       from the file extension. Answers like `/extract`; an unsupported file
///       is a `400`.
///
/// *   **`GET /samples`**:
///     - **Handler**: `samples::list`
///     - **Description**: Ids and titles of the built-in templates.
///
/// *   **`GET /samples/{sample_id}`**:
///     - **Handler**: `samples::get`
///     - **Description**: One built-in template with its schema, or `404`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/extract", post().to(extract::process))
        .route("/upload", post().to(upload::process))
        .route("/samples", get().to(samples::list))
        .route("/samples/{sample_id}", get().to(samples::get))
}
