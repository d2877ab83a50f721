//! # Submission Service Module
//!
//! Routes under `/api/submissions`. A submission carries the schema the form
//! was built from and the filled value tree; the server checks it again with
//! the same engine the client used, so a tampered or stale client cannot store
//! values that break the field rules.
//!
//! ## Sub-modules:
//! - `create`: Validates and queues a submission for storage.
//! - `get_status`: Reports whether a queued submission has been stored.

mod create;
mod get_status;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/submissions";

/// Configures and returns the Actix `Scope` for the submission routes.
///
/// # Registered Routes:
///
/// *   **`POST ""`**:
///     - **Handler**: `create::process`
///     - **Description**: Expects a `SubmissionRequest`. Answers `200` with a
///       `SubmissionAccepted` holding the new id; the record is stored in the
///       background. Values that fail the field rules, or that do not match
///       the schema, get a `422` with a `SubmissionRejected`.
///
/// *   **`GET /{submission_id}`**:
///     - **Handler**: `get_status::process`
///     - **Description**: The `SubmissionStatus` of an id, or `404`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{submission_id}", get().to(get_status::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::db;
    use crate::storage::state::{start_submission_writer, SubmissionsState};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::submission::SubmissionStatus;
    use common::requests::{SubmissionAccepted, SubmissionRejected};
    use common::template::schema_from_template;
    use serde_json::json;
    use std::time::Duration;

    const TEMPLATE: &str =
        "Bill {{customer_name}}\n{{#each items}}{{description}} {{quantity}} x {{unit_price}} = {{total}}\n{{/each}}Total: {{grand_total}}";

    fn request(quantity: serde_json::Value) -> serde_json::Value {
        let schema = schema_from_template(TEMPLATE).unwrap();
        json!({
            "schema": schema,
            "values": {
                "fields": { "customer_name": "Ada" },
                "arrays": {
                    "items": [
                        { "description": "Widget", "quantity": quantity, "unit_price": 2.5 }
                    ]
                }
            },
            "template": TEMPLATE
        })
    }

    #[actix_web::test]
    async fn accepted_submissions_are_stored() {
        let dir = tempfile::tempdir().unwrap();
        let (state, rx) = SubmissionsState::new(dir.path().join("forms.sqlite"), 8);
        actix_web::rt::spawn(start_submission_writer(state.clone(), rx));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(configure_routes()),
        )
            .await;

        let req = test::TestRequest::post()
            .uri("/api/submissions")
            .set_json(request(json!(4)))
            .to_request();
        let accepted: SubmissionAccepted = test::call_and_read_body_json(&app, req).await;

        let mut status = SubmissionStatus::Pending;
        for _ in 0..100 {
            let req = test::TestRequest::get()
                .uri(&format!("/api/submissions/{}", accepted.submission_id))
                .to_request();
            status = test::call_and_read_body_json(&app, req).await;
            if status != SubmissionStatus::Pending {
                break;
            }
            actix_web::rt::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(status, SubmissionStatus::Stored);

        let record = db::find_submission(&state.database, &accepted.submission_id)
            .unwrap()
            .unwrap();
        let rendered = record.rendered_text.unwrap();
        assert!(rendered.contains("Widget 4 x 2.5 = 10"), "{}", rendered);
        assert!(rendered.ends_with("Total: 10"), "{}", rendered);
    }

    #[actix_web::test]
    async fn invalid_values_are_rejected_with_field_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _rx) = SubmissionsState::new(dir.path().join("forms.sqlite"), 8);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(configure_routes()),
        )
            .await;

        let req = test::TestRequest::post()
            .uri("/api/submissions")
            .set_json(request(json!("lots")))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: SubmissionRejected = test::read_body_json(resp).await;
        assert!(body.errors.iter().any(|e| e.path == "items[0].quantity"));
        assert!(state.statuses.read().await.is_empty());
    }

    #[actix_web::test]
    async fn unknown_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _rx) = SubmissionsState::new(dir.path().join("forms.sqlite"), 8);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
            .await;

        let req = test::TestRequest::get().uri("/api/submissions/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
