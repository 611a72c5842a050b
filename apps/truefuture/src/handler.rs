use crate::request::CalculateRequest;
use pythia::{GenerativeBackend, Interpretation, InterpretationClient, InterpretationFailure};
use serde::Serialize;
use serde_json::Value;
use urania::{compute_chart, parse_birth_date, BigThree, Chart, ChartFailure, PositionProvider};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateSuccess {
    pub success: bool,
    pub chart: Chart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_three: Option<BigThree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Interpretation>,
    pub report_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateFailure {
    pub success: bool,
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// 400 for rejected input, 500 for downstream failures
    #[serde(skip)]
    pub status: u16,
}

impl CalculateFailure {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: true,
            message: message.into(),
            details: None,
            http_status: None,
            status,
        }
    }
}

impl From<ChartFailure> for CalculateFailure {
    fn from(failure: ChartFailure) -> Self {
        Self {
            details: Some(failure.details),
            ..Self::new(500, format!("Chart calculation failed: {}", failure.message))
        }
    }
}

impl From<InterpretationFailure> for CalculateFailure {
    fn from(failure: InterpretationFailure) -> Self {
        Self {
            details: Some(failure.details),
            http_status: failure.http_status,
            ..Self::new(500, format!("AI interpretation failed: {}", failure.message))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculateResponse {
    Success(Box<CalculateSuccess>),
    Failure(CalculateFailure),
}

impl CalculateResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Validate a request body, compute the chart and, unless `chart_only`,
/// interpret it. Every failure is folded into a failure payload.
pub async fn calculate<P, B>(
    provider: &P,
    client: &InterpretationClient<B>,
    body: &Value,
    chart_only: bool,
) -> CalculateResponse
where
    P: PositionProvider + ?Sized,
    B: GenerativeBackend,
{
    let request = match CalculateRequest::from_json(body) {
        Ok(request) => request,
        Err(e) => return CalculateResponse::Failure(CalculateFailure::new(400, e.to_string())),
    };

    let at = match parse_birth_date(&request.birth_date) {
        Ok(at) => at,
        Err(e) => return CalculateResponse::Failure(CalculateFailure::new(400, e.to_string())),
    };

    let chart = match compute_chart(provider, at, request.lat, request.lng).await {
        Ok(chart) => chart,
        Err(e) => {
            log::error!("Chart calculation failed: {}", e);
            return CalculateResponse::Failure(ChartFailure::from(&e).into());
        }
    };
    log::info!(
        "Chart computed for {} at ({}, {})",
        chart.timestamp(),
        request.lat,
        request.lng
    );

    let interpretation = if chart_only {
        None
    } else {
        match client.interpret(&chart, &request.report_type).await {
            Ok(result) => {
                log::info!(
                    "Interpretation ready ({:?}, report type {})",
                    result.recovery,
                    result.report_type
                );
                Some(result.interpretation)
            }
            Err(e) => {
                log::error!("AI interpretation failed: {}", e);
                return CalculateResponse::Failure(InterpretationFailure::from(&e).into());
            }
        }
    };

    CalculateResponse::Success(Box::new(CalculateSuccess {
        success: true,
        big_three: chart.big_three(),
        chart,
        interpretation,
        report_type: request.report_type,
    }))
}
