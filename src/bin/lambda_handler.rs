//! AWS Lambda handler for property evaluations
//!
//! Accepts an assumptions document as JSON and returns the rounded result
//! bundle plus key insights. Fields missing from the request take their
//! reference-scenario values.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use rental_evaluation::assumptions::loader;
use rental_evaluation::{
    Assumptions, ConfigError, EvaluationEngine, EvaluationError, KeyInsights, ResultBundle,
};
use serde::Serialize;

/// Output from an evaluation
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub bundle: ResultBundle,
    pub insights: KeyInsights,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn response(status: i64, body: Option<String>) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = LambdaFunctionUrlResponse {
        status_code: status,
        headers: Default::default(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

fn error_response(status: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message })?;
    response(status, Some(body))
}

/// HTTP status for a failed evaluation
fn status_for(err: &EvaluationError) -> i64 {
    match err {
        EvaluationError::InvalidInput { .. } => 400,
        EvaluationError::UndefinedIrr { .. } | EvaluationError::ArithmeticDegenerate { .. } => 422,
    }
}

/// Assumptions carried by a request body; an absent or blank body means defaults
fn parse_assumptions(body: Option<&str>) -> Result<Assumptions, ConfigError> {
    match body.map(str::trim) {
        None | Some("") => Ok(Assumptions::default_scenario()),
        Some(json) => loader::from_json_reader(json.as_bytes()),
    }
}

/// Route one HTTP request to a response
fn respond(
    method: Option<&str>,
    is_base64_encoded: bool,
    body: Option<&str>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if method == Some("OPTIONS") {
        return response(200, None);
    }

    if is_base64_encoded {
        return error_response(400, "base64-encoded bodies are not supported");
    }

    let assumptions = match parse_assumptions(body) {
        Ok(a) => a,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let evaluation = match EvaluationEngine::default().evaluate(&assumptions) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            log::warn!("Evaluation rejected: {}", e);
            return error_response(status_for(&e), &e.to_string());
        }
    };

    let body = EvaluationResponse {
        bundle: evaluation.to_bundle(),
        insights: KeyInsights::from_evaluation(&assumptions, &evaluation).rounded(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };
    log::info!(
        "Evaluated property at {:.0} in {} ms",
        assumptions.purchase_price,
        body.execution_time_ms
    );

    response(200, Some(serde_json::to_string(&body)?))
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let request = event.payload;
    respond(
        request.request_context.http.method.as_deref(),
        request.is_base64_encoded,
        request.body.as_deref(),
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = EvaluationError::InvalidInput {
            field: "purchase_price",
            value: -1.0,
            reason: "must be a positive amount",
        };
        assert_eq!(status_for(&invalid), 400);

        let undefined = EvaluationError::UndefinedIrr {
            reason: "cashflows never change sign".to_string(),
        };
        assert_eq!(status_for(&undefined), 422);
    }

    #[test]
    fn test_reference_response_serializes() {
        let assumptions = Assumptions::default_scenario();
        let evaluation = EvaluationEngine::default().evaluate(&assumptions).unwrap();
        let body = EvaluationResponse {
            bundle: evaluation.to_bundle(),
            insights: KeyInsights::from_evaluation(&assumptions, &evaluation).rounded(),
            execution_time_ms: 0,
        };

        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["bundle"]["initial_outlay"], 76_800.0);
        assert_eq!(json["bundle"]["full_cashflow_sequence"].as_array().unwrap().len(), 11);
    }

    #[test]
    fn test_blank_body_uses_reference_scenario() {
        let reference = Assumptions::default_scenario();
        assert_eq!(parse_assumptions(None).unwrap(), reference);
        assert_eq!(parse_assumptions(Some("")).unwrap(), reference);
        assert_eq!(parse_assumptions(Some("  \n")).unwrap(), reference);

        let response = respond(Some("POST"), false, Some("")).unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_partial_body_overrides_defaults() {
        let assumptions = parse_assumptions(Some(r#"{"daily_rate": 300.0}"#)).unwrap();
        assert_eq!(assumptions.daily_rate, 300.0);
        assert_eq!(assumptions.purchase_price, 320_000.0);
    }

    #[test]
    fn test_preflight_has_no_body() {
        let response = respond(Some("OPTIONS"), false, Some("not json")).unwrap();
        assert_eq!(response.status_code, 200);
        assert!(response.body.is_none());
    }

    #[test]
    fn test_request_errors() {
        let bad_json = respond(Some("POST"), false, Some("{daily_rate")).unwrap();
        assert_eq!(bad_json.status_code, 400);
        assert!(bad_json.body.unwrap().contains("Invalid JSON"));

        let base64 = respond(Some("POST"), true, Some("e30=")).unwrap();
        assert_eq!(base64.status_code, 400);

        let invalid = respond(Some("POST"), false, Some(r#"{"occupancy_rate": 1.5}"#)).unwrap();
        assert_eq!(invalid.status_code, 400);

        let no_outlay = r#"{"down_payment_fraction": 0.0, "closing_cost_fraction": 0.0}"#;
        let undefined = respond(Some("POST"), false, Some(no_outlay)).unwrap();
        assert_eq!(undefined.status_code, 422);
    }
}
