use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use tracing::debug;

use crate::into_http::HttpError;
use crate::startup::AppState;
use crate::validation::RequestKind;

/// Lists the documents filed under `matter_id`.
///
/// Only served in development and testing; any other environment answers
/// `501 Not Implemented` without touching the document logic.
#[tracing::instrument(name = "documents.index", skip(app))]
pub async fn list_documents(
    Path(matter_id): Path<String>,
    State(app): State<AppState>,
) -> Result<Json<Value>, HttpError> {
    if !app.environment.is_development_or_testing() {
        return Err(HttpError::not_implemented(format!(
            "Listing documents is not available in {}.",
            app.environment
        )));
    }

    let documents = app
        .logic
        .get_index(&matter_id)
        .map_err(HttpError::from_report)?;
    debug!(count = documents.len());

    let payload = serde_json::to_value(documents)?;
    app.validator
        .check_valid_output_format(&payload, RequestKind::GetIndex)?;

    Ok(Json(payload))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::startup::{AppState, build_router};
    use crate::validation::{OutputValidator, RequestKind, ShapeValidator, ValidationError};
    use crate::{Document, DocumentLogic, Environment};

    #[derive(Default)]
    struct RecordingLogic {
        documents: Vec<Document>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingLogic {
        fn returning(documents: Vec<Document>) -> Arc<Self> {
            Arc::new(Self {
                documents,
                calls: Mutex::default(),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DocumentLogic for RecordingLogic {
        fn get_index(&self, matter_id: &str) -> eyre::Result<Vec<Document>> {
            self.calls.lock().unwrap().push(matter_id.to_owned());
            Ok(self.documents.clone())
        }
    }

    struct FailingLogic;

    impl DocumentLogic for FailingLogic {
        fn get_index(&self, _matter_id: &str) -> eyre::Result<Vec<Document>> {
            Err(eyre::eyre!("document store unreachable"))
        }
    }

    struct RejectEverything;

    impl OutputValidator for RejectEverything {
        fn check_valid_output_format(
            &self,
            _payload: &Value,
            kind: RequestKind,
        ) -> Result<(), ValidationError> {
            Err(ValidationError::NotAList {
                kind,
                found: "a rejected payload",
            })
        }
    }

    fn router(
        environment: Environment,
        logic: Arc<dyn DocumentLogic>,
        validator: Arc<dyn OutputValidator>,
    ) -> Router {
        build_router(AppState {
            environment,
            logic,
            validator,
        })
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn production_is_not_implemented_and_skips_the_logic() {
        let logic = RecordingLogic::returning(vec![Document::new("d1", "123")]);
        let app = router(
            Environment::Production,
            logic.clone(),
            Arc::new(ShapeValidator::default()),
        );

        let (status, body) = get(app, "/api/matters/123/documents").await;

        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["type"], "not_implemented");
        assert!(logic.calls().is_empty());
    }

    #[tokio::test]
    async fn development_returns_an_empty_list() {
        let logic = RecordingLogic::returning(Vec::new());
        let app = router(
            Environment::Development,
            logic.clone(),
            Arc::new(ShapeValidator::default()),
        );

        let (status, body) = get(app, "/api/matters/123/documents").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn testing_returns_documents_in_delegate_order() {
        let logic = RecordingLogic::returning(vec![
            Document::new("c", "42").with_attribute("title", "Complaint"),
            Document::new("a", "42").with_attribute("title", "Answer"),
            Document::new("b", "42"),
        ]);
        let app = router(
            Environment::Testing,
            logic,
            Arc::new(ShapeValidator::default()),
        );

        let (status, body) = get(app, "/api/matters/42/documents").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "id": "c", "matter_id": "42", "title": "Complaint" },
                { "id": "a", "matter_id": "42", "title": "Answer" },
                { "id": "b", "matter_id": "42" },
            ])
        );
    }

    #[tokio::test]
    async fn forwards_the_callers_matter_id() {
        let logic = RecordingLogic::returning(Vec::new());
        let app = router(
            Environment::Development,
            logic.clone(),
            Arc::new(ShapeValidator::default()),
        );

        let (status, _) = get(app, "/api/matters/123/documents").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(logic.calls(), ["123"]);
    }

    #[tokio::test]
    async fn rejected_output_is_not_a_success() {
        let logic = RecordingLogic::returning(vec![Document::new("d1", "123")]);
        let app = router(Environment::Testing, logic, Arc::new(RejectEverything));

        let (status, body) = get(app, "/api/matters/123/documents").await;

        assert!(!status.is_success());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["type"], "invalid_output");
    }

    #[tokio::test]
    async fn malformed_documents_fail_shape_validation() {
        let logic = RecordingLogic::returning(vec![Document::new("", "123")]);
        let app = router(
            Environment::Development,
            logic,
            Arc::new(ShapeValidator::default()),
        );

        let (status, body) = get(app, "/api/matters/123/documents").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["err"], "entry 0 has an empty required field `id`");
    }

    #[tokio::test]
    async fn logic_failures_are_internal_errors() {
        let app = router(
            Environment::Development,
            Arc::new(FailingLogic),
            Arc::new(ShapeValidator::default()),
        );

        let (status, body) = get(app, "/api/matters/9/documents").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["err"], "document store unreachable");
    }

    #[tokio::test]
    async fn health_check_is_always_up() {
        let app = router(
            Environment::Production,
            Arc::new(FailingLogic),
            Arc::new(ShapeValidator::default()),
        );

        let (status, _) = get(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
