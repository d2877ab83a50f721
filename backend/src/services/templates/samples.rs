use actix_web::{web, HttpResponse, Responder};
use common::requests::{SampleSummary, SampleTemplate};
use common::template::samples::{sample, SAMPLES};
use common::template::schema_from_template;

pub async fn list() -> impl Responder {
    let summaries: Vec<SampleSummary> = SAMPLES
        .iter()
        .map(|s| SampleSummary {
            id: s.id.to_string(),
            title: s.title.to_string(),
        })
        .collect();
    HttpResponse::Ok().json(summaries)
}

pub async fn get(sample_id: web::Path<String>) -> impl Responder {
    match load_sample(&sample_id) {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => HttpResponse::NotFound().body(e),
    }
}

fn load_sample(id: &str) -> Result<SampleTemplate, String> {
    let found = sample(id).ok_or_else(|| format!("Plantilla de ejemplo no encontrada: {}", id))?;
    let schema = schema_from_template(found.text).map_err(|e| e.to_string())?;
    Ok(SampleTemplate {
        id: found.id.to_string(),
        title: found.title.to_string(),
        text: found.text.to_string(),
        schema,
    })
}
