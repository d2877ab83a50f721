use crate::storage::state::SubmissionsState;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(
    submission_id: web::Path<String>,
    state: web::Data<SubmissionsState>,
) -> impl Responder {
    match state.status_of(&submission_id).await {
        Ok(Some(status)) => HttpResponse::Ok().json(status),
        Ok(None) => HttpResponse::NotFound().body("Envío no encontrado"),
        Err(e) => HttpResponse::ServiceUnavailable().body(format!("Error: {}", e)),
    }
}
