use common::model::schema::FormSchema;
use common::requests::ExtractResponse;
use yew::prelude::*;

/// Properties for the `TemplateSourceComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct TemplateSourceProps {
    /// Receives every template the backend parsed successfully.
    pub on_extracted: Callback<ExtractResponse>,

    /// Receives a schema loaded from a JSON file. No template text comes with
    /// it, so submissions made from such a schema are stored without a
    /// rendered document.
    pub on_schema_loaded: Callback<FormSchema>,
}
