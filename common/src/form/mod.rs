//! Dynamic form engine.
//!
//! A `FormSession` owns one validated schema and the values typed against it.
//! Every edit runs to completion (store value, recompute derived totals)
//! before returning, so the session is always consistent between calls.

pub mod engine;
pub mod input;
pub mod rules;

pub use engine::{FieldError, FormError, FormSession, SessionState, SubmissionSink};
pub use input::{InputKind, InputSpec, input_kind, input_spec};
pub use rules::check_field;
