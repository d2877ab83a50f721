pub mod dynamic_form;
pub mod template_source;
pub mod toast;
