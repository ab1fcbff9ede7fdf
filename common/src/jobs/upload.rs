//! Upload orchestration.
//!
//! ## Workflow:
//!
//! 1.  **Gate**: [`UploadOrchestrator::can_submit`] is true when at least one
//!     category is ready and nothing is in flight. The view disables the upload
//!     control otherwise.
//!
//! 2.  **Submit**: [`UploadOrchestrator::submit`] feeds `UploadEvent::Submit` to
//!     the reducer. Only the `→ InFlight` edge yields an [`HttpRequest`]; a
//!     trigger while a request is in flight returns `None` and sends nothing.
//!     Entering `InFlight` drops any previous results.
//!
//! 3.  **Dispatch**: [`dispatch`] sends the request once and classifies the
//!     reply with [`classify_reply`].
//!
//! 4.  **Finish**: the outcome is fed back as `UploadEvent::Finished`, landing in
//!     `Succeeded` or `Failed`.

use log::{info, warn};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::UploadError;
use crate::model::analytics::Analytics;
use crate::model::file_set::FileSet;
use crate::model::recommendation::{ModelId, RecommendationMap};
use crate::model::upload::{DebugInfo, UploadState, UploadSuccess};
use crate::normalizer::{
    recommendation_source, resolve_analytics, resolve_model_id, resolve_recommendations,
};
use crate::requests::{HttpRequest, upload_request};
use crate::transport::{HttpReply, Transport};

/// Message shown when the backend rejects an upload without an `error` field.
pub const UPLOAD_FAILED: &str = "Upload failed";

#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// The operator asked to upload; `ready` is the file set's enablement check.
    Submit { ready: bool },
    Finished(Result<UploadSuccess, UploadError>),
    /// Page/session reset.
    Reset,
}

/// The upload state machine.
///
/// - `Submit` moves any non-`InFlight` state to `InFlight` when files are ready.
/// - `Finished` moves `InFlight` to `Succeeded` or `Failed`; it is ignored in
///   any other state.
/// - `Reset` returns to `Idle`, except while a request is in flight.
pub fn transition(state: &UploadState, event: UploadEvent) -> UploadState {
    match (state, event) {
        (UploadState::InFlight, UploadEvent::Submit { .. }) => UploadState::InFlight,
        (_, UploadEvent::Submit { ready: true }) => UploadState::InFlight,
        (current, UploadEvent::Submit { ready: false }) => current.clone(),
        (UploadState::InFlight, UploadEvent::Finished(Ok(success))) => UploadState::Succeeded(success),
        (UploadState::InFlight, UploadEvent::Finished(Err(error))) => {
            UploadState::Failed(error.to_string())
        }
        (current, UploadEvent::Finished(_)) => current.clone(),
        (UploadState::InFlight, UploadEvent::Reset) => UploadState::InFlight,
        (_, UploadEvent::Reset) => UploadState::Idle,
    }
}

/// Owns the upload state and the protocol configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOrchestrator {
    config: ClientConfig,
    state: UploadState,
}

impl UploadOrchestrator {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            state: UploadState::Idle,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    pub fn can_submit<F>(&self, files: &FileSet<F>) -> bool {
        files.any_ready() && !self.is_in_flight()
    }

    /// Applies one event and returns the new state.
    pub fn apply(&mut self, event: UploadEvent) -> &UploadState {
        self.state = transition(&self.state, event);
        &self.state
    }

    /// Handles an upload trigger. Returns the request to dispatch when this
    /// call started a new attempt, `None` otherwise.
    ///
    /// A request that cannot be built (for instance a JSON upload whose file is
    /// still being read) fails the attempt immediately.
    pub fn submit<F: Clone>(&mut self, files: &FileSet<F>) -> Option<HttpRequest<F>> {
        if self.is_in_flight() {
            return None;
        }
        self.apply(UploadEvent::Submit {
            ready: files.any_ready(),
        });
        if !self.is_in_flight() {
            return None;
        }

        match upload_request(&self.config, files) {
            Ok(request) => {
                info!(
                    "submitting {} file(s) to {}",
                    files.ready().count(),
                    request.path
                );
                Some(request)
            }
            Err(err) => {
                warn!("upload request could not be built: {}", err);
                self.apply(UploadEvent::Finished(Err(err)));
                None
            }
        }
    }

    pub fn finish(&mut self, outcome: Result<UploadSuccess, UploadError>) -> &UploadState {
        self.apply(UploadEvent::Finished(outcome))
    }

    pub fn reset(&mut self) {
        self.apply(UploadEvent::Reset);
    }

    pub fn success(&self) -> Option<&UploadSuccess> {
        self.state.success()
    }

    pub fn analytics(&self) -> Option<&Analytics> {
        self.success().and_then(|s| s.analytics.as_ref())
    }

    pub fn recommendations(&self) -> Option<&RecommendationMap> {
        self.success().map(|s| &s.recommendations)
    }

    pub fn model_id(&self) -> Option<&ModelId> {
        self.success().and_then(|s| s.model_id.as_ref())
    }
}

/// Sends the upload once and classifies the outcome.
pub async fn dispatch<T: Transport>(
    transport: &T,
    request: HttpRequest<T::File>,
) -> Result<UploadSuccess, UploadError> {
    let reply = transport.send(request).await.map_err(|err| {
        warn!("upload transport failure: {}", err);
        UploadError::from(err)
    })?;
    let outcome = classify_reply(&reply);
    match &outcome {
        Ok(success) => info!(
            "upload succeeded: {} ({} customers with recommendations)",
            success.message,
            success.recommendations.len()
        ),
        Err(err) => warn!("upload failed: {}", err),
    }
    outcome
}

/// Classifies an upload reply.
///
/// - non-2xx: `HTTP error` with the body text.
/// - 2xx with a body that is not a JSON object: malformed response.
/// - `status != "success"`: the backend's `error` field verbatim.
/// - `status == "success"`: message, debug info and normalized results.
pub fn classify_reply(reply: &HttpReply) -> Result<UploadSuccess, UploadError> {
    if !reply.is_success() {
        return Err(UploadError::Http {
            status: reply.status,
            body: reply.body.clone(),
        });
    }

    let body: Value = serde_json::from_str(&reply.body)
        .ok()
        .filter(Value::is_object)
        .ok_or_else(|| UploadError::MalformedResponse {
            status: reply.status,
            body: reply.body.clone(),
        })?;

    if body.get("status").and_then(Value::as_str) != Some("success") {
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or(UPLOAD_FAILED);
        return Err(UploadError::Rejected(error.to_string()));
    }

    Ok(UploadSuccess {
        message: body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        debug_info: body
            .get("debug_info")
            .filter(|v| !v.is_null())
            .and_then(|v| serde_json::from_value::<DebugInfo>(v.clone()).ok()),
        analytics: resolve_analytics(&body),
        recommendations: resolve_recommendations(recommendation_source(&body)),
        model_id: resolve_model_id(&body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::category::Category;
    use crate::model::file_set::CategoryFile;

    fn ready_files() -> FileSet<()> {
        let mut files = FileSet::new();
        files.set(
            Category::Customers,
            CategoryFile::with_text("c.csv", (), "id,age\n1,20".into()),
        );
        files
    }

    fn success() -> UploadSuccess {
        UploadSuccess {
            message: "ok".into(),
            debug_info: None,
            analytics: None,
            recommendations: RecommendationMap::new(),
            model_id: Some("m1".into()),
        }
    }

    #[test]
    fn reducer_gates_submission() {
        let idle = UploadState::Idle;
        assert_eq!(transition(&idle, UploadEvent::Submit { ready: false }), UploadState::Idle);
        assert_eq!(transition(&idle, UploadEvent::Submit { ready: true }), UploadState::InFlight);

        let failed = UploadState::Failed("boom".into());
        assert_eq!(transition(&failed, UploadEvent::Submit { ready: true }), UploadState::InFlight);

        let done = UploadState::Succeeded(success());
        assert_eq!(transition(&done, UploadEvent::Submit { ready: true }), UploadState::InFlight);
    }

    #[test]
    fn reducer_ignores_stray_completion() {
        let idle = UploadState::Idle;
        assert_eq!(transition(&idle, UploadEvent::Finished(Ok(success()))), UploadState::Idle);
        assert_eq!(transition(&UploadState::InFlight, UploadEvent::Reset), UploadState::InFlight);
    }

    #[test]
    fn second_trigger_while_in_flight_is_a_no_op() {
        let mut orchestrator = UploadOrchestrator::new(ClientConfig::default());
        let files = ready_files();

        let dispatched = [orchestrator.submit(&files), orchestrator.submit(&files)]
            .into_iter()
            .flatten()
            .count();

        assert_eq!(dispatched, 1);
        assert!(orchestrator.is_in_flight());
        assert!(!orchestrator.can_submit(&files));
    }

    #[test]
    fn new_submission_discards_previous_results() {
        let mut orchestrator = UploadOrchestrator::new(ClientConfig::default());
        let files = ready_files();
        orchestrator.submit(&files);
        orchestrator.finish(Ok(success()));
        assert_eq!(orchestrator.model_id().map(String::as_str), Some("m1"));

        assert!(orchestrator.submit(&files).is_some());
        assert!(orchestrator.success().is_none());
        assert!(orchestrator.model_id().is_none());
        assert!(orchestrator.recommendations().is_none());
    }

    #[test]
    fn unbuildable_request_fails_the_attempt() {
        let mut orchestrator = UploadOrchestrator::new(ClientConfig::default());
        let mut files: FileSet<()> = FileSet::new();
        files.set(Category::Products, CategoryFile::without_text("p.csv", ()));

        assert!(orchestrator.submit(&files).is_none());
        assert_eq!(
            orchestrator.state().error(),
            Some(UploadError::MissingText(Category::Products).to_string().as_str())
        );
    }

    #[test]
    fn nothing_ready_keeps_idle() {
        let mut orchestrator = UploadOrchestrator::new(ClientConfig::default());
        let files: FileSet<()> = FileSet::new();
        assert!(orchestrator.submit(&files).is_none());
        assert_eq!(orchestrator.state(), &UploadState::Idle);
    }

    #[test]
    fn classifies_http_errors() {
        let err = classify_reply(&HttpReply::new(500, "Internal Server Error")).unwrap_err();
        assert_eq!(err.to_string(), "HTTP error: 500: Internal Server Error");
    }

    #[test]
    fn classifies_non_json_success_as_malformed() {
        let err = classify_reply(&HttpReply::new(200, "<html>")).unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse { status: 200, .. }));
    }

    #[test]
    fn classifies_backend_rejection() {
        let err = classify_reply(&HttpReply::new(
            200,
            r#"{"status":"error","error":"customers.csv has no user_id column"}"#,
        ))
        .unwrap_err();
        assert_eq!(err, UploadError::Rejected("customers.csv has no user_id column".into()));

        let err = classify_reply(&HttpReply::new(200, r#"{"status":"pending"}"#)).unwrap_err();
        assert_eq!(err, UploadError::Rejected(UPLOAD_FAILED.into()));
    }

    #[test]
    fn classifies_success_payload() {
        let reply = HttpReply::new(
            200,
            r#"{
                "status": "success",
                "message": "Data processed",
                "debug_info": {
                    "customers_headers": ["user_id", "email"],
                    "columns_auto_created": "age"
                },
                "analytics": { "data_loaded": { "customers": true } },
                "recommended_rewards": {
                    "model_id": "m-7",
                    "recommendations": {
                        "1": { "email": "a@example.com", "rewards": ["10% off P1 <AAAAA>"] }
                    }
                }
            }"#,
        );

        let success = classify_reply(&reply).unwrap();
        assert_eq!(success.message, "Data processed");
        let debug = success.debug_info.unwrap();
        assert_eq!(
            debug.headers(Category::Customers),
            Some(&["user_id".to_string(), "email".to_string()][..])
        );
        assert_eq!(debug.columns_auto_created.as_deref(), Some("age"));
        assert!(success.analytics.unwrap().data_loaded(Category::Customers));
        assert_eq!(success.recommendations["1"].rewards.len(), 1);
        assert_eq!(success.model_id.as_deref(), Some("m-7"));
    }
}
