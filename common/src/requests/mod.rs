//! Payloads exchanged between the browser client and the backend.

use crate::form::FieldError;
use crate::model::schema::FormSchema;
use crate::model::values::SubmittedValueTree;
use crate::template::{TemplateError, ValidationReport};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the template text was stored before extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    #[default]
    Text,
    Html,
}

impl SourceFormat {
    /// Picks the format of an uploaded template file from its extension.
    ///
    /// # Returns
    ///
    /// `Err` with a user-facing message for word-processor documents, which
    /// must be saved as text first, and for any other unsupported extension.
    pub fn for_filename(filename: &str) -> Result<Self, String> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => Ok(SourceFormat::Text),
            "html" | "htm" => Ok(SourceFormat::Html),
            "doc" | "docx" | "odt" | "rtf" => Err(format!(
                "{} es un documento de procesador de texto; guárdalo como .txt o .html antes de subirlo",
                filename
            )),
            _ => Err(format!("{}: solo se admiten archivos .txt, .html o .htm", filename)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Request payload for `POST /api/templates/extract`.
pub struct ExtractRequest {
    pub text: String,
    #[serde(default)]
    pub format: SourceFormat,
}

/// Schema derived from a template, with its validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Plain text the schema was extracted from.
    pub text: String,
    pub schema: FormSchema,
    pub report: ValidationReport,
    /// MD5 of `text`, used by clients to notice template changes.
    pub template_md5: String,
}

/// Body of a `422` answer to a template that does not parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseErrorResponse {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<&TemplateError> for ParseErrorResponse {
    fn from(err: &TemplateError) -> Self {
        Self {
            message: err.to_string(),
            line: err.position().line,
            column: err.position().column,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSummary {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleTemplate {
    pub id: String,
    pub title: String,
    pub text: String,
    pub schema: FormSchema,
}

/// Request payload for `POST /api/submissions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub schema: FormSchema,
    pub values: SubmittedValueTree,
    /// Template to render with the values before storing, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionAccepted {
    pub submission_id: String,
}

/// Body of a `422` answer to a submission that fails field rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRejected {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}
