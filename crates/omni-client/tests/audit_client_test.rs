//! Contract tests for AuditClient against the compliance service.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/audit` | `run_*` |

use omni_client::{OmniApiConfig, OmniApiError, OmniClient};
use omni_core::{AuditQuery, ComplianceService, Confidence, Intent, PolicyId, ServiceError, VerdictStatus};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> OmniClient {
    let config = OmniApiConfig::new(&mock_server.uri()).unwrap();
    OmniClient::new(&config).unwrap()
}

fn pass_verdict() -> serde_json::Value {
    serde_json::json!({
        "status": "PASS",
        "confidence": "HIGH",
        "reasoning": "Section 4 mandates yearly review.",
        "citations": ["HR-4.2"],
        "intent": "COMPLIANCE_AUDIT"
    })
}

#[tokio::test]
async fn run_sends_scoped_query_and_returns_verdict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audit"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "query": "Does this require annual testing?",
            "policy_id": "p1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(pass_verdict()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let query = AuditQuery::new(
        "Does this require annual testing?",
        Some(PolicyId::new("p1").unwrap()),
    )
    .unwrap();

    let result = client.audit().run(&query).await.unwrap();
    assert_eq!(result.status, VerdictStatus::Pass);
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.reasoning, "Section 4 mandates yearly review.");
    assert_eq!(result.citations, vec!["HR-4.2".to_string()]);
    assert_eq!(result.intent, Intent::ComplianceAudit);
}

#[tokio::test]
async fn run_sends_null_policy_id_when_unscoped() {
    let mock_server = MockServer::start().await;

    // body_json is an exact match: a missing key or "" would not match.
    Mock::given(method("POST"))
        .and(path("/audit"))
        .and(body_json(serde_json::json!({
            "query": "What is the retention period?",
            "policy_id": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(pass_verdict()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let query = AuditQuery::new("What is the retention period?", None).unwrap();
    client.audit().run(&query).await.unwrap();
}

#[tokio::test]
async fn run_preserves_citation_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "FAIL",
            "confidence": "MEDIUM",
            "reasoning": "Testing is biennial, regulation requires annual.",
            "citations": ["REG-9.1", "HR-4.2", "HR-1.0"],
            "intent": "COMPLIANCE_AUDIT"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let query = AuditQuery::new("q", None).unwrap();
    let result = client.audit().run(&query).await.unwrap();
    assert_eq!(result.citations, vec!["REG-9.1", "HR-4.2", "HR-1.0"]);
}

#[tokio::test]
async fn run_accepts_reject_intent_as_verdict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "INCONCLUSIVE",
            "confidence": "LOW",
            "reasoning": "This query appears unrelated to banking compliance. Access denied.",
            "citations": [],
            "intent": "REJECT"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let query = AuditQuery::new("What's the weather?", None).unwrap();
    let result = client.audit().run(&query).await.unwrap();
    assert_eq!(result.status, VerdictStatus::Inconclusive);
    assert_eq!(result.intent, Intent::Reject);
    assert!(result.citations.is_empty());
}

#[tokio::test]
async fn run_keeps_unrecognized_intent() {
    let mock_server = MockServer::start().await;

    let mut verdict = pass_verdict();
    verdict["intent"] = serde_json::json!("POLICY_DIFF");
    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verdict))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .audit()
        .run(&AuditQuery::new("q", None).unwrap())
        .await
        .unwrap();
    assert_eq!(result.intent, Intent::Other("POLICY_DIFF".into()));
}

#[tokio::test]
async fn run_503_without_body_carries_status_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let query = AuditQuery::new("q", None).unwrap();
    let err = client.run_audit(&query).await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::Status {
            code: 503,
            status_text: "Service Unavailable".into()
        }
    );
    assert!(err.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn run_schema_mismatch_is_distinguished() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "COMPLIANT",
            "confidence": "HIGH",
            "reasoning": "",
            "citations": []
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let query = AuditQuery::new("q", None).unwrap();

    let err = client.audit().run(&query).await.unwrap_err();
    assert!(matches!(err, OmniApiError::Deserialization { .. }), "got: {err:?}");

    let err: ServiceError = client.run_audit(&query).await.unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("unexpected response shape"));
}

#[tokio::test]
async fn run_non_json_body_is_schema_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .run_audit(&AuditQuery::new("q", None).unwrap())
        .await
        .unwrap_err();
    assert!(err.is_schema());
}

#[tokio::test]
async fn run_sends_exactly_one_request_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let _ = client.audit().run(&AuditQuery::new("q", None).unwrap()).await;
    // The `expect(1)` is verified when the mock server drops.
}

/// Serve one raw HTTP/1.1 response, verbatim, to the first connection.
fn serve_raw_once(response: &'static str) -> String {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        // Drain the request head and its JSON body before answering.
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn run_non_2xx_carries_server_reason_phrase() {
    let base = serve_raw_once(
        "HTTP/1.1 503 Down For Maintenance\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    );
    let client = OmniClient::new(&OmniApiConfig::new(&base).unwrap()).unwrap();

    let err = client
        .run_audit(&AuditQuery::new("q", None).unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::Status {
            code: 503,
            status_text: "Down For Maintenance".into(),
        }
    );
    assert_eq!(err.to_string(), "Server Error: Down For Maintenance");
}

#[tokio::test]
async fn run_non_2xx_keeps_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audit"))
        .respond_with(ResponseTemplate::new(500).set_body_string("retriever offline"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .audit()
        .run(&AuditQuery::new("q", None).unwrap())
        .await
        .unwrap_err();
    match err {
        OmniApiError::ApiError {
            status,
            status_text,
            body,
            ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "retriever offline");
        }
        other => panic!("expected ApiError, got: {other:?}"),
    }
}
