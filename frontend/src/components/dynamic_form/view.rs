//! View for the dynamic form.
//!
//! Inputs commit on `change` (blur or Enter), not on every keystroke, so the
//! re-rendered value never fights the caret while a number is being typed.

use common::form::{input_kind, input_spec, InputKind, SessionState};
use common::model::field::{humanize, ArrayField, FieldDefinition, FieldType};
use common::model::submission::SubmissionStatus;
use common::model::values::FieldValue;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::format_amount;
use super::messages::Msg;
use super::state::DynamicFormComponent;

pub fn view(component: &DynamicFormComponent, ctx: &Context<DynamicFormComponent>) -> Html {
    let link = ctx.link();

    if let Some(error) = &component.schema_error {
        return html! {
            <div class="panel dynamic-form">
                <div class="parse-error">{ format!("No se puede generar el formulario: {}", error) }</div>
            </div>
        };
    }
    let Some(schema) = component.session.schema() else {
        return html! {
            <div class="panel dynamic-form">
                <p>{"Genera un formulario a partir de una plantilla o carga un esquema JSON."}</p>
            </div>
        };
    };

    let locked = component.submitting || component.session.state() == SessionState::Submitted;
    let show_grand_total = component.session.has_line_totals() && schema.field("grand_total").is_none();

    html! {
        <div class="panel dynamic-form">
            { build_toolbar(component, link) }
            { for schema.fields.iter().map(|field| build_root_field(component, link, field, locked)) }
            { for schema.arrays.iter().map(|array| build_array(component, link, array, locked)) }
            {
                if show_grand_total {
                    html! {
                        <div class="grand-total">
                            { format!("Total general: {}", format_amount(component.session.grand_total().unwrap_or(0.0))) }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <button class="icon-btn wide" onclick={link.callback(|_| Msg::Submit)} disabled={locked}>
                <i class="material-icons">{"send"}</i>
                <span class="icon-label">{"Enviar"}</span>
            </button>
            { build_submission_status(component) }
        </div>
    }
}

fn build_toolbar(component: &DynamicFormComponent, link: &Scope<DynamicFormComponent>) -> Html {
    html! {
        <div class="icon-toolbar">
            <button class="icon-btn" onclick={link.callback(|_| Msg::DownloadSchema)}>
                <i class="material-icons">{"download"}</i>
                <span class="icon-label">{"Esquema"}</span>
            </button>
            <button class="icon-btn" onclick={link.callback(|_| Msg::Reset)} disabled={component.submitting}>
                <i class="material-icons">{"restart_alt"}</i>
                <span class="icon-label">{"Nuevo"}</span>
            </button>
        </div>
    }
}

fn build_root_field(
    component: &DynamicFormComponent,
    link: &Scope<DynamicFormComponent>,
    field: &FieldDefinition,
    locked: bool,
) -> Html {
    let session = &component.session;
    let label = if field.required && !session.is_derived(None, &field.name) {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };

    let control = if session.is_derived(None, &field.name) {
        html! {
            <div class="derived">{ format_amount(session.grand_total().unwrap_or(0.0)) }</div>
        }
    } else {
        let name = field.name.clone();
        build_input(
            field,
            session.values().fields.get(&field.name),
            locked,
            link.callback(move |raw: String| Msg::SetField {
                name: name.clone(),
                raw,
            }),
        )
    };

    html! {
        <div class="form-field">
            <label>{ label }</label>
            { control }
            { build_errors(session.errors_for(&field.name)) }
        </div>
    }
}

fn build_array(
    component: &DynamicFormComponent,
    link: &Scope<DynamicFormComponent>,
    array: &ArrayField,
    locked: bool,
) -> Html {
    let session = &component.session;
    let rows = session.values().rows(&array.name);
    let add_name = array.name.clone();

    html! {
        <div class="form-field">
            <label>{ humanize(&array.name) }</label>
            <table class="rows-table">
                <thead>
                    <tr>
                        { for array.items.iter().map(|item| html! { <th>{ item.label.clone() }</th> }) }
                        <th />
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().enumerate().map(|(index, row)| {
                        let remove_name = array.name.clone();
                        html! {
                            <tr>
                                { for array.items.iter().map(|item| {
                                    let path = format!("{}[{}].{}", array.name, index, item.name);
                                    let cell = if session.is_derived(Some(&array.name), &item.name) {
                                        let total = row.get(&item.name).and_then(FieldValue::as_number).unwrap_or(0.0);
                                        html! { <div class="derived">{ format_amount(total) }</div> }
                                    } else {
                                        let array_name = array.name.clone();
                                        let field = item.name.clone();
                                        build_input(
                                            item,
                                            row.get(&item.name),
                                            locked,
                                            link.callback(move |raw: String| Msg::SetRowField {
                                                array: array_name.clone(),
                                                index,
                                                field: field.clone(),
                                                raw,
                                            }),
                                        )
                                    };
                                    html! {
                                        <td>
                                            { cell }
                                            { build_errors(session.errors_for(&path)) }
                                        </td>
                                    }
                                }) }
                                <td>
                                    <button
                                        class="icon-btn"
                                        title="Quitar fila"
                                        disabled={locked}
                                        onclick={link.callback(move |_| Msg::RemoveRow { array: remove_name.clone(), index })}
                                    >
                                        <i class="material-icons">{"delete"}</i>
                                    </button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            <button
                class="icon-btn"
                disabled={locked}
                onclick={link.callback(move |_| Msg::AddRow(add_name.clone()))}
            >
                <i class="material-icons">{"add"}</i>
                <span class="icon-label">{"Añadir fila"}</span>
            </button>
        </div>
    }
}

/// Text input or text area for one field, depending on `input_kind`.
fn build_input(
    field: &FieldDefinition,
    value: Option<&FieldValue>,
    locked: bool,
    on_change: Callback<String>,
) -> Html {
    let value = value.map(ToString::to_string).unwrap_or_default();
    let placeholder = field.placeholder.clone().unwrap_or_default();

    match input_kind(field) {
        InputKind::MultiLine => html! {
            <textarea
                rows="3"
                value={value}
                placeholder={placeholder}
                disabled={locked}
                onchange={on_change.reform(|e: Event| e.target_unchecked_into::<HtmlTextAreaElement>().value())}
            />
        },
        InputKind::SingleLine => html! {
            <input
                type={input_spec(field.field_type).html_type}
                step={(field.field_type == FieldType::Number).then_some("any")}
                value={value}
                placeholder={placeholder}
                disabled={locked}
                onchange={on_change.reform(|e: Event| e.target_unchecked_into::<HtmlInputElement>().value())}
            />
        },
    }
}

fn build_errors<'a>(errors: impl Iterator<Item = &'a str>) -> Html {
    errors
        .map(|message| html! { <div class="field-error">{ message.to_string() }</div> })
        .collect()
}

fn build_submission_status(component: &DynamicFormComponent) -> Html {
    let Some(id) = &component.submission_id else {
        return html! {};
    };
    let status = match &component.submission_status {
        Some(SubmissionStatus::Stored) => "guardado".to_string(),
        Some(SubmissionStatus::Failed(e)) => format!("error: {}", e),
        Some(SubmissionStatus::Pending) | None => "pendiente".to_string(),
    };
    html! {
        <div class="submission-status">{ format!("Envío {}: {}", id, status) }</div>
    }
}
