use crate::components::dynamic_form::DynamicFormComponent;
use crate::components::template_source::TemplateSourceComponent;
use common::model::schema::FormSchema;
use common::requests::ExtractResponse;
use yew::{html, Component, Context, Html};

pub enum Msg {
    Extracted(ExtractResponse),
    SchemaLoaded(FormSchema),
}

/// Two panels side by side: the template source on the left, the form it
/// generates on the right.
pub struct App {
    schema: Option<FormSchema>,
    template: Option<String>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            schema: None,
            template: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Extracted(response) => {
                self.schema = Some(response.schema);
                self.template = Some(response.text);
            }
            Msg::SchemaLoaded(schema) => {
                self.schema = Some(schema);
                self.template = None;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="app-root">
                <TemplateSourceComponent
                    on_extracted={link.callback(Msg::Extracted)}
                    on_schema_loaded={link.callback(Msg::SchemaLoaded)}
                />
                <DynamicFormComponent
                    schema={self.schema.clone()}
                    template={self.template.clone()}
                />
            </div>
        }
    }
}
