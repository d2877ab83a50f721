//! Update function for the dynamic form.
//!
//! Edits go straight to `FormSession`; only submission and status polling
//! talk to the backend.

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::form::FormError;
use common::model::submission::SubmissionStatus;
use common::model::values::SubmittedValueTree;
use common::requests::{SubmissionAccepted, SubmissionRejected, SubmissionRequest};

use super::helpers::download_text;
use super::messages::Msg;
use super::state::DynamicFormComponent;
use crate::components::toast::show_toast;

/// Status checks made after a submission is accepted.
const STATUS_POLLS: usize = 20;
const POLL_MILLIS: u32 = 300;

pub fn update(
    component: &mut DynamicFormComponent,
    ctx: &Context<DynamicFormComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::SetField { name, raw } => report(component.session.set_field_input(&name, &raw)),
        Msg::SetRowField {
            array,
            index,
            field,
            raw,
        } => report(
            component
                .session
                .set_row_field_input(&array, index, &field, &raw),
        ),
        Msg::AddRow(array) => report(component.session.add_row(&array).map(|_| ())),
        Msg::RemoveRow { array, index } => {
            report(component.session.remove_row(&array, index).map(|_| ()))
        }
        Msg::Submit => {
            let mut accepted: Option<SubmittedValueTree> = None;
            match component
                .session
                .submit(&mut |values: SubmittedValueTree| accepted = Some(values))
            {
                Ok(()) => {}
                Err(FormError::Rejected(errors)) => {
                    show_toast(&format!("Revisa el formulario: {} errores.", errors.len()));
                    return true;
                }
                Err(e) => {
                    show_toast(&e.to_string());
                    return true;
                }
            }
            let (Some(values), Some(schema)) = (accepted, component.session.schema().cloned())
            else {
                return true;
            };

            component.submitting = true;
            let request = SubmissionRequest {
                schema,
                values,
                template: ctx.props().template.clone(),
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(send_submission(&request).await);
            });
            true
        }
        Msg::Accepted(id) => {
            component.submitting = false;
            component.submission_status = Some(SubmissionStatus::Pending);
            component.submission_id = Some(id.clone());
            show_toast("Formulario enviado.");
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(poll_status(&id).await);
            });
            true
        }
        Msg::Rejected(rejection) => {
            component.submitting = false;
            reopen(component);
            let details: Vec<String> = rejection
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect();
            show_toast(&format!(
                "El servidor rechazó el envío: {}\n{}",
                rejection.message,
                details.join("\n")
            ));
            true
        }
        Msg::SubmitFailed(message) => {
            component.submitting = false;
            gloo_console::error!(message.clone());
            if component.submission_id.is_none() {
                reopen(component);
            }
            show_toast(&format!("Error al enviar el formulario: {}", message));
            true
        }
        Msg::StatusPolled(status) => {
            match &status {
                SubmissionStatus::Stored => show_toast("Envío guardado."),
                SubmissionStatus::Failed(e) => show_toast(&format!("No se pudo guardar el envío: {}", e)),
                SubmissionStatus::Pending => {}
            }
            component.submission_status = Some(status);
            true
        }
        Msg::DownloadSchema => {
            let Some(schema) = component.session.schema() else {
                return false;
            };
            let result = schema
                .to_json()
                .map_err(|e| e.to_string())
                .and_then(|json| {
                    download_text("schema.json", "application/json", &json)
                        .map_err(|e| format!("{:?}", e))
                });
            if let Err(e) = result {
                show_toast(&format!("No se pudo descargar el esquema: {}", e));
            }
            false
        }
        Msg::Reset => {
            let schema = component.session.schema().cloned();
            component.load(schema.as_ref());
            true
        }
    }
}

/// Toasts engine errors; these come from stale UI events and leave the
/// session unchanged.
fn report(result: Result<(), FormError>) -> bool {
    if let Err(e) = result {
        gloo_console::warn!(e.to_string());
        show_toast(&e.to_string());
    }
    true
}

/// Makes a submitted session editable again with the same values.
fn reopen(component: &mut DynamicFormComponent) {
    let Some(schema) = component.session.schema().cloned() else {
        return;
    };
    let values = component.session.values().clone();
    let result = component
        .session
        .load(schema)
        .and_then(|()| component.session.restore(values));
    if let Err(e) = result {
        component.schema_error = Some(e.to_string());
    }
}

async fn send_submission(request: &SubmissionRequest) -> Msg {
    let request = match Request::post("/api/submissions").json(request) {
        Ok(request) => request,
        Err(e) => return Msg::SubmitFailed(e.to_string()),
    };
    match request.send().await {
        Ok(resp) if resp.status() == 200 => match resp.json::<SubmissionAccepted>().await {
            Ok(body) => Msg::Accepted(body.submission_id),
            Err(e) => Msg::SubmitFailed(e.to_string()),
        },
        Ok(resp) if resp.status() == 422 => match resp.json::<SubmissionRejected>().await {
            Ok(body) => Msg::Rejected(body),
            Err(e) => Msg::SubmitFailed(e.to_string()),
        },
        Ok(resp) => Msg::SubmitFailed(resp.text().await.unwrap_or_default()),
        Err(e) => Msg::SubmitFailed(e.to_string()),
    }
}

/// Polls the stored status until it leaves `Pending` or the polls run out.
async fn poll_status(id: &str) -> Msg {
    for _ in 0..STATUS_POLLS {
        TimeoutFuture::new(POLL_MILLIS).await;
        match Request::get(&format!("/api/submissions/{}", id)).send().await {
            Ok(resp) if resp.status() == 200 => match resp.json::<SubmissionStatus>().await {
                Ok(SubmissionStatus::Pending) => continue,
                Ok(status) => return Msg::StatusPolled(status),
                Err(e) => return Msg::SubmitFailed(e.to_string()),
            },
            Ok(resp) => return Msg::SubmitFailed(resp.text().await.unwrap_or_default()),
            Err(e) => return Msg::SubmitFailed(e.to_string()),
        }
    }
    Msg::StatusPolled(SubmissionStatus::Pending)
}
