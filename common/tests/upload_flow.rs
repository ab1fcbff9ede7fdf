use std::cell::{Cell, RefCell};

use common::config::{ClientConfig, TransportKind};
use common::error::{CampaignError, TransportError, UploadError};
use common::export::{export_csv, export_json};
use common::intake::FileIntake;
use common::jobs::campaign::{self, CampaignDispatcher, CampaignState};
use common::jobs::upload::{self, UploadOrchestrator};
use common::model::category::Category;
use common::model::recommendation::RecommendationMap;
use common::model::upload::UploadState;
use common::requests::{HttpRequest, RequestBody};
use common::transport::{HttpReply, Transport};
use futures::executor::block_on;

/// In-memory backend: answers every request with a canned reply and records
/// what it received.
struct FakeBackend {
    reply: Result<HttpReply, TransportError>,
    calls: Cell<usize>,
    seen: RefCell<Vec<HttpRequest<&'static str>>>,
}

impl FakeBackend {
    fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(HttpReply::new(status, body)),
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn unreachable(message: &str) -> Self {
        Self {
            reply: Err(TransportError::new(message)),
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for FakeBackend {
    type File = &'static str;

    async fn send(&self, request: HttpRequest<&'static str>) -> Result<HttpReply, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().push(request);
        self.reply.clone()
    }
}

fn customers_only() -> FileIntake<&'static str> {
    let mut intake = FileIntake::new();
    let ticket = intake.begin_read(Category::Customers);
    intake.finish_read(ticket, "customers.csv", "customers-file", Ok("id,age\n1,20".into()));
    intake
}

#[test]
fn end_to_end_upload_succeeds() {
    let intake = customers_only();
    let mut orchestrator = UploadOrchestrator::new(ClientConfig::default());
    assert!(orchestrator.can_submit(intake.files()));

    let backend = FakeBackend::replying(
        200,
        r#"{
            "status": "success",
            "message": "ok",
            "analytics": { "data_loaded": { "customers": true, "products": false, "interactions": false } },
            "recommended_rewards": {}
        }"#,
    );

    let request = orchestrator.submit(intake.files()).expect("first trigger dispatches");
    assert!(orchestrator.submit(intake.files()).is_none());

    let outcome = block_on(upload::dispatch(&backend, request));
    orchestrator.finish(outcome);

    assert_eq!(backend.calls.get(), 1);
    let UploadState::Succeeded(success) = orchestrator.state() else {
        panic!("expected success, got {:?}", orchestrator.state());
    };
    assert_eq!(success.message, "ok");
    let analytics = orchestrator.analytics().expect("analytics present");
    assert!(analytics.data_loaded(Category::Customers));
    assert!(!analytics.data_loaded(Category::Products));
    assert_eq!(orchestrator.recommendations(), Some(&RecommendationMap::new()));

    let seen = backend.seen.borrow();
    assert_eq!(seen[0].path, "/upload_data");
    let RequestBody::Json(body) = &seen[0].body else {
        panic!("expected a JSON body");
    };
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body["customers"], "id,age\n1,20");
    assert!(body["products"].is_null());
}

#[test]
fn multipart_upload_sends_original_files() {
    let mut intake: FileIntake<&'static str> = FileIntake::new();
    intake.attach(Category::Products, "products.csv", "products-file");
    intake.attach(Category::Interactions, "interactions.csv", "interactions-file");

    let config = ClientConfig {
        transport: TransportKind::Multipart,
        upload_multipart_path: "/upload-csv".into(),
        ..ClientConfig::default()
    };
    let mut orchestrator = UploadOrchestrator::new(config);
    let backend = FakeBackend::replying(
        200,
        r#"{
            "status": "success",
            "message": "trained",
            "recommended_rewards": {
                "model_id": "model-1",
                "recommendations": {
                    "7": { "email": "x@example.com", "rewards": ["25% off P3 <K9K9K>"] }
                }
            }
        }"#,
    );

    let request = orchestrator.submit(intake.files()).unwrap();
    let outcome = block_on(upload::dispatch(&backend, request));
    orchestrator.finish(outcome);

    let seen = backend.seen.borrow();
    assert_eq!(seen[0].path, "/upload-csv");
    let RequestBody::Multipart(parts) = &seen[0].body else {
        panic!("expected a multipart body");
    };
    let fields: Vec<_> = parts.iter().map(|p| (p.field_name(), p.file)).collect();
    assert_eq!(
        fields,
        vec![("products", "products-file"), ("interactions", "interactions-file")]
    );

    assert_eq!(orchestrator.model_id().map(String::as_str), Some("model-1"));
    let map = orchestrator.recommendations().unwrap();
    assert!(export_csv(map).contains(r#""7","x@example.com","25% off P3 <K9K9K>",25,P3,K9K9K"#));
    let json = export_json(map).unwrap();
    assert_eq!(serde_json::from_str::<RecommendationMap>(&json).unwrap(), *map);
}

#[test]
fn transport_failure_lands_in_failed_and_allows_retry() {
    let intake = customers_only();
    let mut orchestrator = UploadOrchestrator::new(ClientConfig::default());
    let backend = FakeBackend::unreachable("Failed to fetch");

    let request = orchestrator.submit(intake.files()).unwrap();
    orchestrator.finish(block_on(upload::dispatch(&backend, request)));
    assert_eq!(orchestrator.state(), &UploadState::Failed("Failed to fetch".into()));

    assert!(orchestrator.can_submit(intake.files()));
    assert!(orchestrator.submit(intake.files()).is_some());
}

#[test]
fn backend_rejection_is_surfaced_verbatim() {
    let intake = customers_only();
    let mut orchestrator = UploadOrchestrator::new(ClientConfig::default());
    let backend = FakeBackend::replying(200, r#"{"status":"error","error":"No valid user_id column"}"#);

    let request = orchestrator.submit(intake.files()).unwrap();
    let outcome = block_on(upload::dispatch(&backend, request));
    assert_eq!(outcome, Err(UploadError::Rejected("No valid user_id column".into())));
    orchestrator.finish(outcome);
    assert_eq!(orchestrator.state().error(), Some("No valid user_id column"));
}

#[test]
fn campaign_uses_recorded_model_id() {
    let backend = FakeBackend::replying(200, r#"{"sent_count": 4}"#);
    let mut dispatcher = CampaignDispatcher::new(ClientConfig::default());

    let request = dispatcher.send("model-1").unwrap();
    let outcome = block_on(campaign::dispatch(&backend, request));
    dispatcher.finish(outcome);

    assert_eq!(dispatcher.state(), &CampaignState::Sent(4));
    assert_eq!(backend.seen.borrow()[0].path, "/send_rewards/model-1");
}

#[test]
fn campaign_transport_failure_reports_message() {
    let backend = FakeBackend::unreachable("DNS lookup failed");
    let request = CampaignDispatcher::new(ClientConfig::default())
        .send("model-1")
        .unwrap();
    assert_eq!(
        block_on(campaign::dispatch(&backend, request)),
        Err(CampaignError::Transport(TransportError::new("DNS lookup failed")))
    );
}
