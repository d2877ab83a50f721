pub mod schemas;
pub mod submissions;
pub mod templates;
