//! Integration tests for the Twilio webhook.
//!
//! Each test spins up an Axum server on a random port backed by a real
//! libSQL file database and a scripted LLM, then posts form data with reqwest.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::time::timeout;

use query_bridge::channels::create_router;
use query_bridge::error::LlmError;
use query_bridge::llm::provider::{
    CompletionRequest, CompletionResponse, FinishReason, LlmProvider,
};
use query_bridge::pipeline::prompts::{
    DEFAULT_ORG_SUMMARY, NO_DETAILS_REPLY, UNCLASSIFIED_REPLY,
};
use query_bridge::pipeline::{IntentClassifier, QueryProcessor, ResponseGenerator};
use query_bridge::store::{LibSqlBackend, PhoneRecord, RecordStore};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Scripted LLM: answers classification with a fixed token and records the
/// context of every generation request.
struct ScriptedLlm {
    classification: String,
    contexts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    fn new(classification: &str) -> Arc<Self> {
        Arc::new(Self {
            classification: classification.to_string(),
            contexts: Mutex::new(Vec::new()),
        })
    }

    fn contexts(&self) -> Vec<String> {
        self.contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let last = request.messages.last().unwrap().content.clone();
        let content = if last.starts_with("Classify the following query") {
            self.classification.clone()
        } else {
            let context = last.split("\nContext: ").nth(1).unwrap_or_default().to_string();
            self.contexts.lock().unwrap().push(context);
            "Generated reply".to_string()
        };
        Ok(CompletionResponse {
            content,
            input_tokens: 0,
            output_tokens: 0,
            finish_reason: FinishReason::Stop,
        })
    }
}

struct TestServer {
    base: String,
    _tmp: tempfile::TempDir,
}

/// Start the webhook server with one provisioned record.
async fn start_server(llm: Arc<ScriptedLlm>) -> TestServer {
    let tmp = tempfile::tempdir().unwrap();
    let db = LibSqlBackend::new_local(&tmp.path().join("phone.db"))
        .await
        .unwrap();
    db.insert_record(&PhoneRecord::new(
        "+1000000001",
        "Employee ID 42, department Sales",
    ))
    .await
    .unwrap();
    let store: Arc<dyn RecordStore> = Arc::new(db);

    let provider: Arc<dyn LlmProvider> = llm;
    let processor = QueryProcessor::new(
        IntentClassifier::new(Arc::clone(&provider)),
        ResponseGenerator::new(provider),
        store,
    );
    let app = create_router(Arc::new(processor));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://127.0.0.1:{port}"),
        _tmp: tmp,
    }
}

/// POST the form and return (status, content-type, body).
async fn post_webhook(server: &TestServer, fields: &[(&str, &str)]) -> (u16, String, String) {
    let response = reqwest::Client::new()
        .post(format!("{}/twilio_webhook", server.base))
        .form(fields)
        .send()
        .await
        .expect("webhook request failed");
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = response.text().await.unwrap();
    (status, content_type, body)
}

fn envelope(text: &str) -> String {
    format!("<Response><Message>{text}</Message></Response>")
}

#[tokio::test]
async fn details_query_passes_stored_record_as_context() {
    timeout(TEST_TIMEOUT, async {
        let llm = ScriptedLlm::new("1");
        let server = start_server(Arc::clone(&llm)).await;

        let (status, content_type, body) = post_webhook(
            &server,
            &[
                ("From", "whatsapp:+1000000001"),
                ("Body", "what is my employee id"),
            ],
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(content_type, "application/xml");
        assert_eq!(body, envelope("Generated reply"));
        assert_eq!(llm.contexts(), vec!["Employee ID 42, department Sales"]);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn details_query_for_unknown_number() {
    timeout(TEST_TIMEOUT, async {
        let llm = ScriptedLlm::new("1");
        let server = start_server(Arc::clone(&llm)).await;

        let (status, _, body) =
            post_webhook(&server, &[("From", "+1999999999"), ("Body", "my details")]).await;

        assert_eq!(status, 200);
        assert_eq!(body, envelope(NO_DETAILS_REPLY));
        assert!(llm.contexts().is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn information_query_uses_org_summary() {
    timeout(TEST_TIMEOUT, async {
        let llm = ScriptedLlm::new("2");
        let server = start_server(Arc::clone(&llm)).await;

        let (status, _, body) = post_webhook(
            &server,
            &[("From", "+1999999999"), ("Body", "what loans are offered")],
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body, envelope("Generated reply"));
        assert_eq!(llm.contexts(), vec![DEFAULT_ORG_SUMMARY.to_string()]);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unclassified_query_gets_fixed_reply() {
    timeout(TEST_TIMEOUT, async {
        let llm = ScriptedLlm::new("I cannot tell");
        let server = start_server(Arc::clone(&llm)).await;

        let (status, _, body) =
            post_webhook(&server, &[("From", "+1000000001"), ("Body", "hello")]).await;

        assert_eq!(status, 200);
        assert_eq!(body, envelope(UNCLASSIFIED_REPLY));
        assert!(llm.contexts().is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn missing_fields_return_400_envelope() {
    timeout(TEST_TIMEOUT, async {
        let llm = ScriptedLlm::new("1");
        let server = start_server(llm).await;
        let expected = envelope("Error: Phone number and message are required.");

        for fields in [
            vec![("Body", "hello")],
            vec![("From", "+1000000001")],
            vec![("From", ""), ("Body", "")],
        ] {
            let (status, content_type, body) = post_webhook(&server, &fields).await;
            assert_eq!(status, 400, "fields {fields:?}");
            assert_eq!(content_type, "application/xml");
            assert_eq!(body, expected);
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn repeated_requests_build_identical_context() {
    timeout(TEST_TIMEOUT, async {
        let llm = ScriptedLlm::new("1");
        let server = start_server(Arc::clone(&llm)).await;

        for _ in 0..3 {
            post_webhook(
                &server,
                &[("From", "whatsapp:+1000000001"), ("Body", "my department?")],
            )
            .await;
        }

        let contexts = llm.contexts();
        assert_eq!(contexts.len(), 3);
        assert!(contexts.iter().all(|c| c == &contexts[0]));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn health_endpoint_responds() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server(ScriptedLlm::new("1")).await;
        let response = reqwest::get(format!("{}/health", server.base)).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), "ok");
    })
    .await
    .expect("test timed out");
}
