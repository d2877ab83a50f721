//! Template source panel: where the user provides the template a form is
//! generated from.
//!
//! Responsibilities
//! - Let the user type a template, pick a built-in sample or read a `.txt` /
//!   `.html` file.
//! - Send it to `/api/templates/extract` and hand the resulting schema to the
//!   parent through `on_extracted`.
//! - Alternatively read a schema JSON file, check it with
//!   `/api/schemas/validate` and hand it over through `on_schema_loaded`.
//! - Show parse errors with their line and column, and validation errors and
//!   warnings of the generated schema.

use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

use crate::components::toast::show_toast;
use common::requests::SampleSummary;
pub use messages::Msg;
pub use props::TemplateSourceProps;
pub use state::TemplateSourceComponent;

impl Component for TemplateSourceComponent {
    type Message = Msg;
    type Properties = TemplateSourceProps;

    fn create(_ctx: &Context<Self>) -> Self {
        TemplateSourceComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            let link = ctx.link().clone();
            spawn_local(async move {
                let response = Request::get("/api/templates/samples").send().await;
                match response {
                    Ok(resp) if resp.status() == 200 => {
                        match resp.json::<Vec<SampleSummary>>().await {
                            Ok(samples) => link.send_message(Msg::SamplesLoaded(samples)),
                            Err(e) => {
                                gloo_console::error!(format!("samples: {}", e));
                            }
                        }
                    }
                    _ => show_toast("No se pudieron cargar las plantillas de ejemplo."),
                }
            });
        }
    }
}
