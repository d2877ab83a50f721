use actix_web::{HttpResponse, Responder};
use common::template::validate_json;
use log::debug;

pub async fn process(body: String) -> impl Responder {
    let report = validate_json(&body);
    debug!(
        "schema validated: {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );
    HttpResponse::Ok().json(report)
}
