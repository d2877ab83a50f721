pub mod field;
pub mod schema;
pub mod submission;
pub mod values;
