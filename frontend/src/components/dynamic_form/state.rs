use common::form::FormSession;
use common::model::schema::FormSchema;
use common::model::submission::SubmissionStatus;

/// Runtime state of the dynamic form.
///
/// All form semantics (values, rows, derived totals, field errors, the
/// submit lifecycle) live in `session`; the component only adds what the
/// round trip to the backend needs.
pub struct DynamicFormComponent {
    pub session: FormSession,

    /// Why the current schema could not be loaded, if it could not.
    pub schema_error: Option<String>,

    /// A submission is on its way to the backend.
    pub submitting: bool,

    /// Id handed out by the backend for the last accepted submission.
    pub submission_id: Option<String>,

    /// Last known storage status of `submission_id`.
    pub submission_status: Option<SubmissionStatus>,
}

impl DynamicFormComponent {
    pub fn new(schema: Option<&FormSchema>) -> Self {
        let mut component = Self {
            session: FormSession::new(),
            schema_error: None,
            submitting: false,
            submission_id: None,
            submission_status: None,
        };
        component.load(schema);
        component
    }

    /// Starts over with `schema`, dropping values and submission state.
    pub fn load(&mut self, schema: Option<&FormSchema>) {
        self.submitting = false;
        self.submission_id = None;
        self.submission_status = None;
        self.schema_error = match schema {
            Some(schema) => self.session.load(schema.clone()).err().map(|e| e.to_string()),
            None => {
                self.session.reset();
                None
            }
        };
    }
}
