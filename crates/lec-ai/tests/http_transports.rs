//! Real HTTP round trips against a one-shot `tiny_http` server on a random
//! local port.

use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use lec_ai::{AiError, AnyTransport, DirectClient, RemoteAiClient};
use lec_config::{AiConfig, AiTransport};
use lec_core::enums::Provenance;
use lec_core::requests::LessonPlanRequest;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

struct Captured {
    method: String,
    url: String,
    headers: Vec<(String, String)>,
    body: Value,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

struct Reply {
    status: u16,
    body: String,
    headers: Vec<(&'static str, String)>,
    delay: Duration,
}

impl Reply {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            headers: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: Vec::new(),
            delay: Duration::ZERO,
        }
    }
}

/// Serve exactly one request, report it on the channel, and answer with `reply`.
fn serve_once(reply: Reply) -> (String, mpsc::Receiver<Captured>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok(Some(mut request)) = server.recv_timeout(Duration::from_secs(10)) else {
            return;
        };
        let mut raw = String::new();
        request.as_reader().read_to_string(&mut raw).unwrap();
        let captured = Captured {
            method: request.method().as_str().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|h| (h.field.as_str().as_str().to_string(), h.value.as_str().to_string()))
                .collect(),
            body: serde_json::from_str(&raw).unwrap_or(Value::Null),
        };
        let _ = tx.send(captured);

        thread::sleep(reply.delay);
        let mut response = tiny_http::Response::from_string(reply.body)
            .with_status_code(reply.status)
            .with_header(
                tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
            );
        for (name, value) in reply.headers {
            response = response.with_header(tiny_http::Header::from_bytes(name, value).unwrap());
        }
        let _ = request.respond(response);
    });

    (format!("http://{addr}"), rx)
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn direct_config(base: &str) -> AiConfig {
    AiConfig {
        enabled: true,
        api_key: "sk-test".into(),
        base_url: format!("{base}/v1"),
        referer: Some("https://school.example".into()),
        timeout_secs: 5,
        ..AiConfig::default()
    }
}

fn lesson_request() -> LessonPlanRequest {
    LessonPlanRequest {
        subject: "Mathematics".into(),
        topic: "Fractions".into(),
        grade_level: 5,
        duration_minutes: 40,
        objectives: Vec::new(),
        context: None,
    }
}

#[tokio::test]
async fn direct_client_sends_model_sampling_and_credentials() {
    let (base, seen) = serve_once(Reply::ok(completion(
        r#"{"title": "Fractions in the market", "homework": "Price three items in halves"}"#,
    )));
    let client = RemoteAiClient::new(DirectClient::new(&direct_config(&base)).unwrap());

    let plan = client.generate_lesson_plan(&lesson_request()).await.unwrap();
    assert_eq!(plan.title, "Fractions in the market");
    assert_eq!(plan.provenance, Provenance::RemoteAi);

    let request = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "/v1/chat/completions");
    assert_eq!(request.header("Authorization"), Some("Bearer sk-test"));
    assert_eq!(request.header("X-Title"), Some("Lectern"));
    assert_eq!(request.header("HTTP-Referer"), Some("https://school.example"));
    assert_eq!(request.body["model"], "openai/gpt-4o-mini");
    assert_eq!(request.body["messages"].as_array().unwrap().len(), 2);
    assert_eq!(request.body["messages"][0]["role"], "system");
    assert_eq!(request.body["max_tokens"], 2000);
    assert!(request.body.get("frequency_penalty").is_some());
}

#[tokio::test]
async fn rate_limit_reports_retry_after() {
    let (base, _seen) = serve_once(Reply {
        headers: vec![("Retry-After", "7".to_string())],
        ..Reply::status(429, r#"{"error":"slow down"}"#)
    });
    let client = RemoteAiClient::new(DirectClient::new(&direct_config(&base)).unwrap());
    let err = client.generate_lesson_plan(&lesson_request()).await.unwrap_err();
    assert!(matches!(err, AiError::RateLimited { retry_after_secs: 7 }));
}

#[tokio::test]
async fn server_error_carries_status() {
    let (base, _seen) = serve_once(Reply::status(502, "bad gateway"));
    let client = RemoteAiClient::new(DirectClient::new(&direct_config(&base)).unwrap());
    let err = client.generate_lesson_plan(&lesson_request()).await.unwrap_err();
    assert!(matches!(err, AiError::Api { status: 502, .. }));
}

#[tokio::test]
async fn non_json_envelope_is_parse_error() {
    let (base, _seen) = serve_once(Reply::status(200, "<html>captive portal</html>"));
    let client = RemoteAiClient::new(DirectClient::new(&direct_config(&base)).unwrap());
    let err = client.generate_lesson_plan(&lesson_request()).await.unwrap_err();
    assert!(matches!(err, AiError::Parse(_)));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let (base, _seen) = serve_once(Reply {
        delay: Duration::from_secs(3),
        ..Reply::ok(completion("{}"))
    });
    let config = AiConfig {
        timeout_secs: 1,
        ..direct_config(&base)
    };
    let client = RemoteAiClient::new(DirectClient::new(&config).unwrap());
    let err = client.generate_lesson_plan(&lesson_request()).await.unwrap_err();
    match err {
        AiError::Http(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn refused_connection_is_http_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = RemoteAiClient::new(
        DirectClient::new(&direct_config(&format!("http://127.0.0.1:{port}"))).unwrap(),
    );
    let err = client.generate_lesson_plan(&lesson_request()).await.unwrap_err();
    assert!(matches!(err, AiError::Http(_)));
}

#[tokio::test]
async fn proxy_client_sends_messages_and_format_only() {
    let (base, seen) = serve_once(Reply::ok(completion(
        r#"{"objectives": ["Compare fractions with like denominators"]}"#,
    )));
    let config = AiConfig {
        enabled: true,
        transport: AiTransport::Proxy,
        proxy_url: format!("{base}/api/openai-proxy"),
        ..AiConfig::default()
    };
    let transport = AnyTransport::from_config(&config).unwrap();
    assert!(matches!(transport, AnyTransport::Proxy(_)));
    let client = RemoteAiClient::new(transport);

    let plan = client.generate_lesson_plan(&lesson_request()).await.unwrap();
    assert_eq!(
        plan.objectives,
        vec!["Compare fractions with like denominators".to_string()]
    );

    let request = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.url, "/api/openai-proxy");
    assert_eq!(request.header("Authorization"), None);
    let keys: Vec<&String> = request.body.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["messages", "response_format"]);
    assert_eq!(request.body["response_format"], json!({"type": "json_object"}));
}
