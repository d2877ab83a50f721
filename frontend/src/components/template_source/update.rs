//! Update function for the template source panel.
//!
//! Every backend call runs in `spawn_local` and reports back through a
//! message; user-facing outcomes are announced with toasts (in Spanish).

use gloo_file::futures::read_as_text;
use gloo_file::Blob;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::schema::FormSchema;
use common::requests::{
    ExtractRequest, ExtractResponse, ParseErrorResponse, SampleTemplate, SourceFormat,
};
use common::template::ValidationReport;

use super::messages::Msg;
use super::state::TemplateSourceComponent;
use crate::components::toast::show_toast;

pub fn update(
    component: &mut TemplateSourceComponent,
    ctx: &Context<TemplateSourceComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::UpdateText(text) => {
            if component.text == text {
                return false;
            }
            component.text = text;
            component.parse_error = None;
            component.selected_sample = None;
            true
        }
        Msg::SetFormat(format) => {
            component.format = format;
            true
        }
        Msg::SamplesLoaded(samples) => {
            component.samples = samples;
            true
        }
        Msg::PickSample(id) => {
            if id.is_empty() {
                return false;
            }
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let response = Request::get(&format!("/api/templates/samples/{}", id))
                    .send()
                    .await;
                match response {
                    Ok(resp) if resp.status() == 200 => match resp.json::<SampleTemplate>().await {
                        Ok(sample) => link.send_message(Msg::SampleLoaded(sample)),
                        Err(e) => link.send_message(Msg::RequestFailed(e.to_string())),
                    },
                    Ok(resp) => link.send_message(Msg::RequestFailed(
                        resp.text().await.unwrap_or_default(),
                    )),
                    Err(e) => link.send_message(Msg::RequestFailed(e.to_string())),
                }
            });
            true
        }
        Msg::SampleLoaded(sample) => {
            component.busy = false;
            component.text = sample.text;
            component.format = SourceFormat::Text;
            component.parse_error = None;
            component.selected_sample = Some(sample.id);
            ctx.link().send_message(Msg::Extract);
            true
        }
        Msg::Extract => {
            if component.text.trim().is_empty() {
                show_toast("Escribe o carga una plantilla primero.");
                return false;
            }
            component.busy = true;
            let request = ExtractRequest {
                text: component.text.clone(),
                format: component.format,
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(send_extract(&request).await);
            });
            true
        }
        Msg::Extracted(response) => {
            component.busy = false;
            component.parse_error = None;
            component.report = Some(response.report.clone());
            if response.report.valid {
                show_toast(&format!(
                    "Formulario generado: {} campos, {} listas.",
                    response.schema.fields.len(),
                    response.schema.arrays.len()
                ));
            } else {
                show_toast("La plantilla genera un esquema con errores.");
            }
            ctx.props().on_extracted.emit(response);
            true
        }
        Msg::ExtractFailed(error) => {
            component.busy = false;
            component.report = None;
            show_toast(&format!(
                "Error en la plantilla (línea {}, columna {}).",
                error.line, error.column
            ));
            component.parse_error = Some(error);
            true
        }
        Msg::RequestFailed(message) => {
            component.busy = false;
            gloo_console::error!(message.clone());
            show_toast(&format!("Error de comunicación con el servidor: {}", message));
            true
        }
        Msg::OpenTemplateFile => {
            if let Some(input) = component
                .template_input_ref
                .cast::<web_sys::HtmlInputElement>()
            {
                input.click();
            }
            false
        }
        Msg::TemplateFileSelected(file) => {
            let format = match SourceFormat::for_filename(&file.name()) {
                Ok(format) => format,
                Err(message) => {
                    show_toast(&message);
                    return false;
                }
            };
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                match read_as_text(&Blob::from(file)).await {
                    Ok(text) => link.send_message_batch(vec![
                        Msg::UpdateText(text),
                        Msg::SetFormat(format),
                        Msg::Extract,
                    ]),
                    Err(e) => link.send_message(Msg::RequestFailed(e.to_string())),
                }
            });
            true
        }
        Msg::OpenSchemaFile => {
            if let Some(input) = component
                .schema_input_ref
                .cast::<web_sys::HtmlInputElement>()
            {
                input.click();
            }
            false
        }
        Msg::SchemaFileSelected(file) => {
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let json = match read_as_text(&Blob::from(file)).await {
                    Ok(json) => json,
                    Err(e) => {
                        link.send_message(Msg::RequestFailed(e.to_string()));
                        return;
                    }
                };
                link.send_message(send_schema_check(json).await);
            });
            true
        }
        Msg::SchemaChecked { json, report } => {
            component.busy = false;
            component.parse_error = None;
            let loaded = if report.valid {
                FormSchema::from_json(&json).map_err(|e| e.to_string())
            } else {
                Err(report.errors.join("\n"))
            };
            component.report = Some(report);
            match loaded {
                Ok(schema) => {
                    show_toast("Esquema cargado correctamente.");
                    ctx.props().on_schema_loaded.emit(schema);
                }
                Err(errors) => show_toast(&format!("El esquema no es válido:\n{}", errors)),
            }
            true
        }
    }
}

/// Posts the template and maps every outcome to the message that reports it.
async fn send_extract(request: &ExtractRequest) -> Msg {
    let request = match Request::post("/api/templates/extract").json(request) {
        Ok(request) => request,
        Err(e) => return Msg::RequestFailed(e.to_string()),
    };
    match request.send().await {
        Ok(resp) if resp.status() == 200 => match resp.json::<ExtractResponse>().await {
            Ok(body) => Msg::Extracted(body),
            Err(e) => Msg::RequestFailed(e.to_string()),
        },
        Ok(resp) if resp.status() == 422 => match resp.json::<ParseErrorResponse>().await {
            Ok(body) => Msg::ExtractFailed(body),
            Err(e) => Msg::RequestFailed(e.to_string()),
        },
        Ok(resp) => Msg::RequestFailed(resp.text().await.unwrap_or_default()),
        Err(e) => Msg::RequestFailed(e.to_string()),
    }
}

async fn send_schema_check(json: String) -> Msg {
    let request = match Request::post("/api/schemas/validate")
        .header("Content-Type", "application/json")
        .body(json.clone())
    {
        Ok(request) => request,
        Err(e) => return Msg::RequestFailed(e.to_string()),
    };
    match request.send().await {
        Ok(resp) if resp.status() == 200 => match resp.json::<ValidationReport>().await {
            Ok(report) => Msg::SchemaChecked { json, report },
            Err(e) => Msg::RequestFailed(e.to_string()),
        },
        Ok(resp) => Msg::RequestFailed(resp.text().await.unwrap_or_default()),
        Err(e) => Msg::RequestFailed(e.to_string()),
    }
}
