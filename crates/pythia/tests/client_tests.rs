use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pythia::client::{build_user_prompt, SYSTEM_INSTRUCTION};
use pythia::gemini::{GenerateContentRequest, GenerateContentResponse};
use pythia::{
    Credentials, GeminiConfig, GenerativeBackend, InterpretationClient, InterpretationError,
    InterpretationFailure, RecoveryKind, ReportType,
};
use std::sync::Mutex;
use urania::{compute_chart, Chart, ChartError, FixedPositionProvider, PlanetId};

/// Backend returning a canned result and recording every call
struct CannedBackend {
    reply: Result<GenerateContentResponse, InterpretationError>,
    calls: Mutex<Vec<(String, String, GenerateContentRequest)>>,
}

impl CannedBackend {
    fn replying(reply: Result<GenerateContentResponse, InterpretationError>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn text(text: &str, finish_reason: &str) -> Self {
        Self::replying(Ok(GenerateContentResponse::with_text(text, finish_reason)))
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeBackend for CannedBackend {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, InterpretationError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), api_key.to_string(), request.clone()));
        self.reply.clone()
    }
}

async fn chart() -> Chart {
    let provider: FixedPositionProvider = [
        (PlanetId::Sun, 280.37),
        (PlanetId::Moon, 223.32),
        (PlanetId::Mercury, 271.89),
        (PlanetId::Venus, 241.57),
        (PlanetId::Mars, 327.96),
        (PlanetId::Jupiter, 25.25),
        (PlanetId::Saturn, 40.40),
    ]
    .into_iter()
    .collect();
    let at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    compute_chart(&provider, at, 0.0, 0.0).await.unwrap()
}

fn client(backend: CannedBackend) -> InterpretationClient<CannedBackend> {
    InterpretationClient::with_backend(GeminiConfig::default(), Credentials::new("test-key"), backend)
}

#[tokio::test]
async fn test_interpret_success() {
    let client = client(CannedBackend::text(
        "```json\n{\"s\":\"ok\",\"a\":[\"x\",\"y\",\"z\"],\"k\":[\"p\",\"q\"]}\n```",
        "STOP",
    ));
    let result = client.interpret(&chart().await, "daily").await.unwrap();

    assert!(result.success);
    assert_eq!(result.report_type, ReportType::Daily);
    assert_eq!(result.recovery, RecoveryKind::Direct);
    assert_eq!(result.interpretation.summary(), "ok");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["reportType"], "daily");
    assert_eq!(json["interpretation"]["s"], "ok");
    assert_eq!(json["interpretation"]["a"][2], "z");
    assert_eq!(json["interpretation"]["k"][1], "q");
}

#[tokio::test]
async fn test_request_contents() {
    let chart = chart().await;
    let client = client(CannedBackend::text(r#"{"s":"ok"}"#, "STOP"));
    client.interpret(&chart, "Yearly").await.unwrap();

    let calls = client_calls(&client);
    assert_eq!(calls.len(), 1);
    let (model, key, request) = &calls[0];
    assert_eq!(model, "gemini-2.5-flash-lite");
    assert_eq!(key, "test-key");

    let prompt = request.prompt().unwrap();
    assert!(prompt.starts_with("연간 운세 분석:"));
    assert!(prompt.contains("Sun:Capricorn(10deg)"));
    assert!(prompt.contains("Asc:Aries(0deg)"));
    assert_eq!(prompt, build_user_prompt(&chart, &ReportType::Yearly));

    assert_eq!(
        request.system_instruction.parts[0].text.as_deref(),
        Some(SYSTEM_INSTRUCTION)
    );
    let generation = &request.generation_config;
    assert_eq!(generation.temperature, 0.7);
    assert_eq!(generation.top_k, 40);
    assert_eq!(generation.top_p, 0.95);
    assert_eq!(generation.max_output_tokens, 1024);
}

fn client_calls(
    client: &InterpretationClient<CannedBackend>,
) -> Vec<(String, String, GenerateContentRequest)> {
    client.backend().calls.lock().unwrap().clone()
}

#[tokio::test]
async fn test_configured_parameters_are_used() {
    let config = GeminiConfig {
        model: "gemini-custom".to_string(),
        temperature: 0.2,
        max_output_tokens: 256,
        ..GeminiConfig::default()
    };
    let client = InterpretationClient::with_backend(
        config,
        Credentials::new("k"),
        CannedBackend::text(r#"{"s":"ok"}"#, "STOP"),
    );
    client.interpret(&chart().await, "daily").await.unwrap();

    let calls = client_calls(&client);
    assert_eq!(calls[0].0, "gemini-custom");
    assert_eq!(calls[0].2.generation_config.temperature, 0.2);
    assert_eq!(calls[0].2.generation_config.max_output_tokens, 256);
}

#[tokio::test]
async fn test_missing_credentials_makes_no_call() {
    let client = InterpretationClient::with_backend(
        GeminiConfig::default(),
        Credentials::none(),
        CannedBackend::text(r#"{"s":"ok"}"#, "STOP"),
    );
    let err = client.interpret(&chart().await, "daily").await.unwrap_err();

    assert_eq!(err, InterpretationError::MissingCredentials("GEMINI_API_KEY"));
    assert_eq!(client.backend().call_count(), 0);
}

#[tokio::test]
async fn test_chart_error_is_rejected_without_call() {
    let client = client(CannedBackend::text(r#"{"s":"ok"}"#, "STOP"));
    let outcome: Result<Chart, ChartError> = Err(ChartError::invalid_input("bad latitude"));
    let err = client.interpret_outcome(&outcome, "daily").await.unwrap_err();

    assert!(matches!(err, InterpretationError::InvalidInput(_)));
    assert_eq!(client.backend().call_count(), 0);
}

#[tokio::test]
async fn test_blank_report_type_is_rejected_without_call() {
    let client = client(CannedBackend::text(r#"{"s":"ok"}"#, "STOP"));
    let err = client.interpret(&chart().await, "  ").await.unwrap_err();

    assert!(matches!(err, InterpretationError::InvalidInput(_)));
    assert_eq!(client.backend().call_count(), 0);
}

#[tokio::test]
async fn test_unknown_report_type_is_accepted() {
    let client = client(CannedBackend::text(r#"{"s":"ok"}"#, "STOP"));
    let result = client.interpret(&chart().await, "career").await.unwrap();

    assert_eq!(result.report_type, ReportType::Other("career".to_string()));
    let prompt = client_calls(&client)[0].2.prompt().unwrap().to_string();
    assert!(prompt.starts_with("career 운세 분석:"));
}

#[tokio::test]
async fn test_transport_failure_is_surfaced_once() {
    let client = client(CannedBackend::replying(Err(InterpretationError::Transport {
        status: Some(503),
        message: "Service Unavailable. overloaded".to_string(),
    })));
    let err = client.interpret(&chart().await, "daily").await.unwrap_err();

    assert_eq!(err.http_status(), Some(503));
    assert_eq!(client.backend().call_count(), 1);

    let payload = serde_json::to_value(InterpretationFailure::from(&err)).unwrap();
    assert_eq!(payload["success"], false);
    assert_eq!(payload["httpStatus"], 503);
}

#[tokio::test]
async fn test_truncated_response_is_repaired() {
    let client = client(CannedBackend::text(r#"{"s":"cut short","a":["x","y""#, "MAX_TOKENS"));
    let result = client.interpret(&chart().await, "daily").await.unwrap();

    assert!(result.truncated);
    assert_eq!(result.recovery, RecoveryKind::Repaired);
    assert_eq!(result.interpretation.summary(), "cut short");
}

#[tokio::test]
async fn test_garbage_text_still_succeeds() {
    let client = client(CannedBackend::text("I am not JSON", "STOP"));
    let result = client.interpret(&chart().await, "daily").await.unwrap();

    assert!(result.success);
    assert_eq!(result.recovery, RecoveryKind::Fallback);
    assert_eq!(result.interpretation.summary(), "I am not JSON");
}

#[tokio::test]
async fn test_blocked_response_is_an_error() {
    let client = client(CannedBackend::text(r#"{"s":"ok"}"#, "SAFETY"));
    let err = client.interpret(&chart().await, "daily").await.unwrap_err();
    assert!(matches!(err, InterpretationError::Envelope(_)));
}
