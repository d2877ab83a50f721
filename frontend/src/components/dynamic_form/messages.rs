use common::model::submission::SubmissionStatus;
use common::requests::SubmissionRejected;

pub enum Msg {
    SetField { name: String, raw: String },
    SetRowField { array: String, index: usize, field: String, raw: String },
    AddRow(String),
    RemoveRow { array: String, index: usize },
    Submit,
    Accepted(String),
    Rejected(SubmissionRejected),
    SubmitFailed(String),
    StatusPolled(SubmissionStatus),
    DownloadSchema,
    Reset,
}
