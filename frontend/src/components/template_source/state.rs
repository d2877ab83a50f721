//! State of the template source panel.

use common::requests::{ParseErrorResponse, SampleSummary, SourceFormat};
use common::template::ValidationReport;
use yew::prelude::*;

/// Fields are `pub` because they are read by `view` and written by `update`.
pub struct TemplateSourceComponent {
    /// Template text as typed, loaded from a sample or read from a file.
    pub text: String,

    /// How `text` must be read by the backend.
    pub format: SourceFormat,

    /// Built-in templates offered by the backend.
    pub samples: Vec<SampleSummary>,

    /// Sample currently shown in the picker, if `text` came from one.
    pub selected_sample: Option<String>,

    /// Last structural error reported for `text`. Cleared on edit.
    pub parse_error: Option<ParseErrorResponse>,

    /// Outcome of validating the last extracted or uploaded schema.
    pub report: Option<ValidationReport>,

    /// A request to the backend is in flight.
    pub busy: bool,

    /// Guard for the one-time sample list request.
    pub loaded: bool,

    /// Hidden `<input type="file">` for template files.
    pub template_input_ref: NodeRef,

    /// Hidden `<input type="file">` for schema JSON files.
    pub schema_input_ref: NodeRef,
}

impl TemplateSourceComponent {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            format: SourceFormat::Text,
            samples: Vec::new(),
            selected_sample: None,
            parse_error: None,
            report: None,
            busy: false,
            loaded: false,
            template_input_ref: NodeRef::default(),
            schema_input_ref: NodeRef::default(),
        }
    }
}
