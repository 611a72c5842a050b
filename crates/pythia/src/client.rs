use crate::compress::compress;
use crate::error::InterpretationError;
use crate::gemini::config::API_KEY_ENV;
use crate::gemini::{
    Content, Credentials, GeminiConfig, GenerateContentRequest, GenerationConfig, GenerativeBackend,
    HttpBackend,
};
use crate::recovery::{recover, Interpretation, RecoveryKind};
use crate::report::ReportType;
use serde::Serialize;
use urania::{Chart, ChartError};

/// Fixed instruction: JSON only, summary within 150 characters, three
/// noun-phrase actions, two or three keywords.
pub const SYSTEM_INSTRUCTION: &str = "점성술 분석가. JSON만 출력. s(요약):공백포함150자이내 핵심만. a(행동):명사형 짧은 문장 3개. k(키워드):2-3개.";

const RESPONSE_FORMAT: &str = r#"{"s":"요약150자이내","a":["행동1","행동2","행동3"],"k":["키워드1","키워드2"]}"#;

/// Successful interpretation: `{success: true, reportType, interpretation: {s, a, k}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationResult {
    pub success: bool,
    pub report_type: ReportType,
    pub interpretation: Interpretation,
    #[serde(skip)]
    pub recovery: RecoveryKind,
    #[serde(skip)]
    pub truncated: bool,
}

/// User prompt: report label, compressed chart, expected response shape
pub fn build_user_prompt(chart: &Chart, report_type: &ReportType) -> String {
    format!(
        "{} 분석:\n\n{}\n\n응답 형식 (JSON만, 마크다운 없음):\n{}",
        report_type.label(),
        compress(chart),
        RESPONSE_FORMAT
    )
}

/// Builds the generation request for a chart and performs the single call
pub struct InterpretationClient<B = HttpBackend> {
    config: GeminiConfig,
    credentials: Credentials,
    backend: B,
}

impl InterpretationClient<HttpBackend> {
    /// Client talking HTTP to `config.base_url`
    pub fn new(config: GeminiConfig, credentials: Credentials) -> Self {
        let backend = HttpBackend::new(config.base_url.clone());
        Self::with_backend(config, credentials, backend)
    }
}

impl<B: GenerativeBackend> InterpretationClient<B> {
    pub fn with_backend(config: GeminiConfig, credentials: Credentials, backend: B) -> Self {
        Self {
            config,
            credentials,
            backend,
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn build_request(&self, chart: &Chart, report_type: &ReportType) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::from_text(build_user_prompt(chart, report_type))],
            system_instruction: Content::from_text(SYSTEM_INSTRUCTION),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }

    /// Interpret a chart.
    ///
    /// Input and credential problems are reported before any network call.
    pub async fn interpret(
        &self,
        chart: &Chart,
        report_type: &str,
    ) -> Result<InterpretationResult, InterpretationError> {
        if report_type.trim().is_empty() {
            return Err(InterpretationError::InvalidInput(
                "Invalid reportType: must be a non-empty string.".to_string(),
            ));
        }
        let report_type = ReportType::parse(report_type);

        let api_key = self
            .credentials
            .api_key()
            .ok_or(InterpretationError::MissingCredentials(API_KEY_ENV))?;

        let request = self.build_request(chart, &report_type);
        log::debug!(
            "interpretation request: model {}, prompt {:?}",
            self.config.model,
            request.prompt()
        );

        let response = self
            .backend
            .generate_content(&self.config.model, api_key, &request)
            .await?;
        let recovered = recover(&response)?;

        Ok(InterpretationResult {
            success: true,
            report_type,
            interpretation: recovered.interpretation,
            recovery: recovered.kind,
            truncated: recovered.truncated,
        })
    }

    /// Interpret the outcome of chart computation; a failed chart is
    /// rejected without contacting the service.
    pub async fn interpret_outcome(
        &self,
        chart: &Result<Chart, ChartError>,
        report_type: &str,
    ) -> Result<InterpretationResult, InterpretationError> {
        match chart {
            Ok(chart) => self.interpret(chart, report_type).await,
            Err(err) => Err(InterpretationError::InvalidInput(format!(
                "Invalid chartData: must be a valid chart calculation result object. ({})",
                err
            ))),
        }
    }
}
