use common::model::schema::FormSchema;
use yew::prelude::*;

/// Properties for the `DynamicFormComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct DynamicFormProps {
    /// Schema to build the form from. `None` shows an empty placeholder.
    /// A different schema discards the values entered so far.
    #[prop_or_default]
    pub schema: Option<FormSchema>,

    /// Template text sent along with a submission so the backend can store
    /// the filled document.
    #[prop_or_default]
    pub template: Option<String>,
}
