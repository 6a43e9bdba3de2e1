//! AWS Lambda handler for warranty goal seeks
//!
//! Accepts scenario parameters as JSON and returns the solved warranty rate,
//! or the yearly run-out schedule at a fixed rate.
//!
//! Supports Lambda Function URLs for direct HTTP access:
//!   POST /goalseek  -> optimal rate, iterations, baseline and final profit
//!   POST /runout    -> yearly cash flows at `rate` (defaults to initialRate)

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use serde_json::json;
use warranty_goalseek::{goal_seek_raw, runout, ParameterSet, RawParameters, SolverConfig};

/// Body of a goal seek request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalSeekRequest {
    #[serde(flatten)]
    params: RawParameters,

    /// Override the convergence tolerance
    #[serde(default)]
    tolerance: Option<f64>,

    /// Override the iteration budget
    #[serde(default)]
    max_iterations: Option<u32>,
}

/// Body of a run-out request
#[derive(Debug, Deserialize)]
struct RunoutRequest {
    #[serde(flatten)]
    params: RawParameters,

    /// Rate to run at (defaults to initialRate)
    #[serde(default)]
    rate: Option<f64>,
}

/// Status code and JSON body, before wrapping for the runtime
#[derive(Debug)]
struct Reply {
    status: u16,
    body: String,
}

impl Reply {
    fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }).to_string(),
        }
    }
}

fn goalseek(body: &str, base_config: &SolverConfig) -> Reply {
    let request: GoalSeekRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Reply::error(400, &format!("Invalid JSON: {}", e)),
    };

    let config = base_config.with_overrides(request.tolerance, request.max_iterations);
    match goal_seek_raw(&request.params, &config) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(body) => Reply::ok(body),
            Err(e) => Reply::error(500, &e.to_string()),
        },
        Err(e) if e.is_caller_error() => Reply::error(400, &e.to_string()),
        Err(e) => Reply::error(500, &e.to_string()),
    }
}

fn runout_schedule(body: &str) -> Reply {
    let request: RunoutRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Reply::error(400, &format!("Invalid JSON: {}", e)),
    };

    let params = match ParameterSet::validate(&request.params) {
        Ok(p) => p,
        Err(e) => return Reply::error(400, &e.to_string()),
    };

    let rate = request.rate.unwrap_or(params.initial_rate());
    match runout(rate, &params) {
        Ok(schedule) => {
            let body = json!({
                "schedule": schedule,
                "summary": schedule.summary(),
            });
            Reply::ok(body.to_string())
        }
        Err(e) => Reply::error(500, &e.to_string()),
    }
}

/// Route a request by method and path
fn route(method: &str, path: &str, body: &str, config: &SolverConfig) -> Reply {
    match (method, path.trim_end_matches('/')) {
        ("OPTIONS", _) => Reply { status: 200, body: String::new() },
        ("POST", "/goalseek") => goalseek(body, config),
        ("POST", "/runout") => runout_schedule(body),
        (_, "/goalseek") | (_, "/runout") => Reply::error(405, "Method not allowed"),
        _ => Reply::error(404, "Not found"),
    }
}

fn build_response(reply: Reply) -> LambdaFunctionUrlResponse {
    let mut response = LambdaFunctionUrlResponse {
        status_code: i64::from(reply.status),
        headers: Default::default(),
        body: Some(reply.body),
        is_base64_encoded: false,
        cookies: Vec::new(),
    };

    let headers = [
        ("content-type", "application/json"),
        ("access-control-allow-origin", "*"),
        ("access-control-allow-methods", "POST, OPTIONS"),
        ("access-control-allow-headers", "Content-Type"),
    ];
    for (name, value) in headers {
        if let Ok(value) = value.parse() {
            response.headers.insert(name, value);
        }
    }

    response
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let request = event.payload;
    let method = request.request_context.http.method.clone().unwrap_or_default();
    let path = request.raw_path.clone().unwrap_or_default();

    let reply = if request.is_base64_encoded {
        Reply::error(400, "Base64-encoded bodies are not supported")
    } else {
        let body = request.body.as_deref().unwrap_or("{}");
        route(&method, &path, body, &SolverConfig::from_env())
    };

    log::info!("{} {} -> {}", method, path, reply.status);
    Ok(build_response(reply))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "numYears": 10, "auHours": 450, "initialTSN": 100, "rateEscalation": 5,
        "aic": 10, "hsiTSN": 1000, "overhaulTSN": 3000, "hsiCost": 50000,
        "overhaulCost": 100000, "targetProfit": 3000000, "initialRate": 320
    }"#;

    fn body_json(reply: &Reply) -> serde_json::Value {
        serde_json::from_str(&reply.body).unwrap()
    }

    #[test]
    fn test_goalseek_ok() {
        let reply = route("POST", "/goalseek", VALID, &SolverConfig::default());
        assert_eq!(reply.status, 200);

        let body = body_json(&reply);
        let rate = body["optimalWarrantyRate"].as_f64().unwrap();
        assert!((rate - 505.93820432563325).abs() < 1e-6);
        assert_eq!(body["iterations"], 3);
    }

    #[test]
    fn test_goalseek_zero_num_years() {
        let payload = VALID.replace("\"numYears\": 10", "\"numYears\": 0");
        let reply = route("POST", "/goalseek", &payload, &SolverConfig::default());
        assert_eq!(reply.status, 400);
        assert_eq!(body_json(&reply)["error"], "numYears must be positive");
    }

    #[test]
    fn test_goalseek_zero_target_profit() {
        let payload = VALID.replace("\"targetProfit\": 3000000", "\"targetProfit\": 0");
        let reply = route("POST", "/goalseek", &payload, &SolverConfig::default());
        assert_eq!(reply.status, 400);
        assert_eq!(body_json(&reply)["error"], "targetProfit must be positive");
    }

    #[test]
    fn test_goalseek_bad_json() {
        let reply = route("POST", "/goalseek", "{not json", &SolverConfig::default());
        assert_eq!(reply.status, 400);
        assert!(body_json(&reply)["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_goalseek_non_convergence_is_server_error() {
        let payload = VALID.replace("\"initialRate\": 320", "\"initialRate\": 320, \"maxIterations\": 1");
        let reply = route("POST", "/goalseek", &payload, &SolverConfig::default());
        assert_eq!(reply.status, 500);
    }

    #[test]
    fn test_runout() {
        let payload = VALID.replace("\"initialRate\": 320", "\"initialRate\": 320, \"rate\": 400");
        let reply = route("POST", "/runout/", &payload, &SolverConfig::default());
        assert_eq!(reply.status, 200);

        let body = body_json(&reply);
        assert_eq!(body["schedule"]["rate"], 400.0);
        assert_eq!(body["schedule"]["years"].as_array().unwrap().len(), 10);
        assert_eq!(body["summary"]["hsiYear"], 2);
    }

    #[test]
    fn test_routing() {
        let config = SolverConfig::default();
        assert_eq!(route("OPTIONS", "/goalseek", "", &config).status, 200);
        assert_eq!(route("GET", "/goalseek", "", &config).status, 405);
        assert_eq!(route("POST", "/unknown", "{}", &config).status, 404);
    }

    #[test]
    fn test_response_headers() {
        let response = build_response(Reply::ok("{}".to_string()));
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers.get("content-type").unwrap(), "application/json");
        assert_eq!(response.body.as_deref(), Some("{}"));
    }
}
