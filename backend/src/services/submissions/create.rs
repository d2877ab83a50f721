use crate::storage::db::SubmissionRecord;
use crate::storage::state::SubmissionsState;
use actix_web::{web, HttpResponse, Responder};
use common::form::{FormError, FormSession};
use common::model::submission::SubmissionStatus;
use common::model::values::SubmittedValueTree;
use common::requests::{SubmissionAccepted, SubmissionRejected, SubmissionRequest};
use common::template::render;
use log::{info, warn};
use uuid::Uuid;

/// Why a submission was not queued.
enum Refusal {
    /// The client sent something the form engine refuses.
    Rejected(SubmissionRejected),
    /// The writer is gone; nothing the client can fix.
    Unavailable(String),
}

pub(crate) async fn process(
    state: web::Data<SubmissionsState>,
    payload: web::Json<SubmissionRequest>,
) -> impl Responder {
    match accept_submission(&state, payload.into_inner()).await {
        Ok(submission_id) => HttpResponse::Ok().json(SubmissionAccepted { submission_id }),
        Err(Refusal::Rejected(rejection)) => HttpResponse::UnprocessableEntity().json(rejection),
        Err(Refusal::Unavailable(e)) => HttpResponse::ServiceUnavailable()
            .body(format!("Error al guardar el envío: {}", e)),
    }
}

/// Re-validates the values against the schema, renders the template and
/// queues the record for the writer.
///
/// # Returns
///
/// The id under which the submission can be polled.
async fn accept_submission(
    state: &SubmissionsState,
    request: SubmissionRequest,
) -> Result<String, Refusal> {
    let mut session = FormSession::with_schema(request.schema.clone()).map_err(rejected)?;
    session.restore(request.values).map_err(rejected)?;

    let mut accepted: Option<SubmittedValueTree> = None;
    session
        .submit(&mut |values: SubmittedValueTree| accepted = Some(values))
        .map_err(rejected)?;
    let values = accepted.ok_or_else(|| Refusal::Unavailable("el formulario no devolvió valores".to_string()))?;

    let rendered_text = match &request.template {
        Some(template) => Some(render(template, &values).map_err(|e| {
            Refusal::Rejected(SubmissionRejected {
                message: e.to_string(),
                errors: Vec::new(),
            })
        })?),
        None => None,
    };

    let record = SubmissionRecord {
        id: Uuid::new_v4().to_string(),
        schema_json: serde_json::to_string(&request.schema)
            .map_err(|e| Refusal::Unavailable(e.to_string()))?,
        values_json: serde_json::to_string(&values)
            .map_err(|e| Refusal::Unavailable(e.to_string()))?,
        rendered_text,
    };
    let id = record.id.clone();

    state
        .statuses
        .write()
        .await
        .insert(id.clone(), SubmissionStatus::Pending);
    if let Err(e) = state.tx.send(record).await {
        warn!("submission writer is not running: {}", e);
        state.statuses.write().await.remove(&id);
        return Err(Refusal::Unavailable(e.to_string()));
    }

    info!("submission {} queued", id);
    Ok(id)
}

fn rejected(err: FormError) -> Refusal {
    let message = err.to_string();
    let errors = match err {
        FormError::Rejected(errors) => errors,
        _ => Vec::new(),
    };
    Refusal::Rejected(SubmissionRejected { message, errors })
}
