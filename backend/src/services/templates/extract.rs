use crate::intake;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{ExtractRequest, ExtractResponse, ParseErrorResponse, SourceFormat};
use common::template::{schema_from_template, validate, TemplateError};
use log::{debug, info};

pub async fn process(payload: web::Json<ExtractRequest>) -> impl Responder {
    let request = payload.into_inner();
    respond(&request.text, request.format)
}

/// Shared by `extract` and `upload`: runs the pipeline and maps the outcome to
/// a response.
pub(super) fn respond(source: &str, format: SourceFormat) -> HttpResponse {
    match extract_schema(source, format) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            info!("template rejected: {}", e);
            HttpResponse::UnprocessableEntity().json(ParseErrorResponse::from(&e))
        }
    }
}

/// Flattens `source`, builds its schema and validates it.
///
/// # Returns
///
/// The response body, or the first structural error in the template.
fn extract_schema(source: &str, format: SourceFormat) -> Result<ExtractResponse, TemplateError> {
    let text = intake::to_plain_text(source, format);
    let schema = schema_from_template(&text)?;
    let report = validate(&schema);
    debug!(
        "extracted {} fields and {} arrays ({} errors)",
        schema.fields.len(),
        schema.arrays.len(),
        report.errors.len()
    );

    Ok(ExtractResponse {
        template_md5: intake::template_md5(&text),
        text,
        schema,
        report,
    })
}
