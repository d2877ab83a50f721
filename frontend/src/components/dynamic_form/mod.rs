//! Dynamic form: the editable form generated from a `FormSchema`.
//!
//! Root fields are rendered first, then one table per array field with
//! add/remove row buttons. Line totals and the grand total of an `items`
//! table are computed by `FormSession` and shown read-only. Submitting
//! validates locally, then posts to `/api/submissions` and follows the
//! stored status of the accepted submission.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::DynamicFormProps;
pub use state::DynamicFormComponent;

impl Component for DynamicFormComponent {
    type Message = Msg;
    type Properties = DynamicFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        DynamicFormComponent::new(ctx.props().schema.as_ref())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().schema != old_props.schema {
            self.load(ctx.props().schema.as_ref());
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
