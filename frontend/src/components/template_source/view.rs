//! View for the template source panel: toolbar, sample and format pickers,
//! the template text area and the diagnostics of the last extraction.

use common::requests::SourceFormat;
use common::template::position::{snippet, Position};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::TemplateSourceComponent;

pub fn view(component: &TemplateSourceComponent, ctx: &Context<TemplateSourceComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="panel template-source">
            { build_toolbar(component, link) }
            { build_pickers(component, link) }
            <textarea
                class="template-textarea"
                value={component.text.clone()}
                spellcheck="false"
                placeholder="Hola {{customer_name}}, ..."
                oninput={link.callback(|e: InputEvent| {
                    Msg::UpdateText(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                })}
            />
            { build_parse_error(component) }
            { build_report(component) }
            { build_file_inputs(component, link) }
        </div>
    }
}

fn build_toolbar(component: &TemplateSourceComponent, link: &Scope<TemplateSourceComponent>) -> Html {
    html! {
        <div class="icon-toolbar">
            { icon_button("upload_file", "Plantilla", link.callback(|_| Msg::OpenTemplateFile), component.busy) }
            { icon_button("data_object", "Esquema JSON", link.callback(|_| Msg::OpenSchemaFile), component.busy) }
            { icon_button("play_arrow", "Generar", link.callback(|_| Msg::Extract), component.busy) }
        </div>
    }
}

fn build_pickers(component: &TemplateSourceComponent, link: &Scope<TemplateSourceComponent>) -> Html {
    let selected = component.selected_sample.clone().unwrap_or_default();
    html! {
        <div class="icon-toolbar">
            <select
                onchange={link.callback(|e: Event| {
                    Msg::PickSample(e.target_unchecked_into::<HtmlSelectElement>().value())
                })}
            >
                <option value="" selected={selected.is_empty()}>{"Plantillas de ejemplo…"}</option>
                { for component.samples.iter().map(|sample| html! {
                    <option value={sample.id.clone()} selected={sample.id == selected}>
                        { sample.title.clone() }
                    </option>
                }) }
            </select>
            <select
                onchange={link.callback(|e: Event| {
                    let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                    Msg::SetFormat(if value == "html" { SourceFormat::Html } else { SourceFormat::Text })
                })}
            >
                <option value="text" selected={component.format == SourceFormat::Text}>{"Texto"}</option>
                <option value="html" selected={component.format == SourceFormat::Html}>{"HTML"}</option>
            </select>
        </div>
    }
}

/// The offending line with a caret under the reported column.
fn build_parse_error(component: &TemplateSourceComponent) -> Html {
    let Some(error) = &component.parse_error else {
        return html! {};
    };
    let position = Position {
        offset: 0,
        line: error.line,
        column: error.column,
    };
    html! {
        <div class="parse-error">
            <div>{ error.message.clone() }</div>
            <pre>{ snippet(&component.text, &position) }</pre>
        </div>
    }
}

fn build_report(component: &TemplateSourceComponent) -> Html {
    let Some(report) = &component.report else {
        return html! {};
    };
    html! {
        <div>
            { for report.errors.iter().map(|e| html! { <div class="parse-error">{ e.clone() }</div> }) }
            { for report.warnings.iter().map(|w| html! { <div class="report-warning">{ w.clone() }</div> }) }
        </div>
    }
}

fn build_file_inputs(component: &TemplateSourceComponent, link: &Scope<TemplateSourceComponent>) -> Html {
    html! {
        <>
            <input
                type="file"
                accept=".txt,.html,.htm"
                style="display: none;"
                ref={component.template_input_ref.clone()}
                onchange={link.batch_callback(|e: Event| take_file(e).map(Msg::TemplateFileSelected))}
            />
            <input
                type="file"
                accept=".json,application/json"
                style="display: none;"
                ref={component.schema_input_ref.clone()}
                onchange={link.batch_callback(|e: Event| take_file(e).map(Msg::SchemaFileSelected))}
            />
        </>
    }
}

/// First file of a file input change event. The input is cleared so that
/// picking the same file again fires another change.
fn take_file(e: Event) -> Option<web_sys::File> {
    let input = e.target_unchecked_into::<HtmlInputElement>();
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

fn icon_button(icon_name: &str, label: &str, on_click: Callback<MouseEvent>, disabled: bool) -> Html {
    html! {
        <button class="icon-btn" onclick={on_click} disabled={disabled}>
            <i class="material-icons">{icon_name.to_string()}</i>
            <span class="icon-label">{label.to_string()}</span>
        </button>
    }
}
