use common::requests::{
    ExtractResponse, ParseErrorResponse, SampleSummary, SampleTemplate, SourceFormat,
};
use common::template::ValidationReport;

pub enum Msg {
    UpdateText(String),
    SetFormat(SourceFormat),
    SamplesLoaded(Vec<SampleSummary>),
    PickSample(String),
    SampleLoaded(SampleTemplate),
    Extract,
    Extracted(ExtractResponse),
    ExtractFailed(ParseErrorResponse),
    RequestFailed(String),
    OpenTemplateFile,
    TemplateFileSelected(web_sys::File),
    OpenSchemaFile,
    SchemaFileSelected(web_sys::File),
    SchemaChecked { json: String, report: ValidationReport },
}
