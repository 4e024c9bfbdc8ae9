//! HTTP client wrapper - executes test calls and normalizes the results

use std::time::{Duration, Instant};

use reqwest::StatusCode;

use crate::builder::{assemble_headers, ResolvedRequest};
use crate::constants::{CREDITS_PATH, TRANSPORT_HINT};
use crate::messages::NetworkResponse;
use crate::models::{
    CredentialContext, CreditState, Header, HttpMethod, Outcome, ResponseBody, ResponseRecord,
};

fn request_builder(client: &reqwest::Client, method: HttpMethod, url: &str) -> reqwest::RequestBuilder {
    match method {
        HttpMethod::GET => client.get(url),
        HttpMethod::POST => client.post(url),
        HttpMethod::PUT => client.put(url),
        HttpMethod::PATCH => client.patch(url),
        HttpMethod::DELETE => client.delete(url),
    }
}

fn build_request(client: &reqwest::Client, request: &ResolvedRequest) -> reqwest::RequestBuilder {
    let mut req_builder = request_builder(client, request.method, &request.url);

    for header in &request.headers {
        req_builder = req_builder.header(&header.key, &header.value);
    }

    if let Some(body) = &request.body {
        req_builder = req_builder.body(body.clone());
    }

    req_builder
}

/// Execute one test call. Exactly one attempt is made.
pub async fn execute_test(
    client: &reqwest::Client,
    request: ResolvedRequest,
    request_id: u64,
    epoch: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let result = build_request(client, &request).send().await;

    let outcome = match result {
        Ok(resp) => {
            let status = resp.status();
            if status == StatusCode::UNAUTHORIZED {
                tracing::warn!(id = request_id, url = %request.url, "Backend rejected session");
                return NetworkResponse::SessionExpired {
                    id: Some(request_id),
                    epoch,
                };
            }

            let headers: Vec<Header> = resp
                .headers()
                .iter()
                .map(|(k, v)| Header::new(k.as_str(), v.to_str().unwrap_or("<binary>")))
                .collect();
            let is_json = resp
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));

            match resp.text().await {
                Ok(text) => {
                    let body = parse_body(text, is_json);
                    Outcome::Completed {
                        status: status.as_u16(),
                        status_text: status.canonical_reason().unwrap_or_default().to_string(),
                        headers,
                        body_size: body.serialized().len(),
                        body,
                    }
                }
                Err(e) => transport_failure("Error reading body", &e),
            }
        }
        Err(e) => transport_failure(classify(&e), &e),
    };

    let record = ResponseRecord {
        url: request.url.clone(),
        timing_ms: elapsed_ms(start),
        outcome,
        request: request.snapshot(),
    };
    NetworkResponse::TestFinished {
        id: request_id,
        record,
    }
}

/// JSON if the content type says so and it parses, text otherwise
fn parse_body(text: String, is_json: bool) -> ResponseBody {
    if is_json {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
            return ResponseBody::Json(value);
        }
    }
    ResponseBody::Text(text)
}

fn classify(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "Request timed out"
    } else if e.is_connect() {
        "Connection failed"
    } else if e.is_builder() {
        "Invalid request"
    } else if e.is_redirect() {
        "Too many redirects"
    } else {
        "Network error"
    }
}

fn transport_failure(reason: &str, e: &reqwest::Error) -> Outcome {
    Outcome::TransportFailed {
        reason: reason.to_string(),
        message: e.to_string(),
        hint: TRANSPORT_HINT.to_string(),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Fetch the current credit state from the backend
pub async fn fetch_credits(
    client: &reqwest::Client,
    base_url: Option<&str>,
    credentials: &CredentialContext,
    epoch: u64,
) -> NetworkResponse {
    let Some(base) = base_url else {
        return NetworkResponse::CreditsFailed {
            epoch,
            message: String::from("API base URL is not configured"),
        };
    };
    let url = format!("{}{}", base.trim_end_matches('/'), CREDITS_PATH);

    let mut req_builder = client.get(&url);
    for header in assemble_headers(&[Header::new("Accept", "application/json")], credentials) {
        req_builder = req_builder.header(header.key, header.value);
    }

    let resp = match req_builder.send().await {
        Ok(resp) => resp,
        Err(e) => {
            return NetworkResponse::CreditsFailed {
                epoch,
                message: format!("{}: {}", classify(&e), e),
            }
        }
    };

    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!(%url, "Credit refresh rejected session");
        return NetworkResponse::SessionExpired { id: None, epoch };
    }
    if !status.is_success() {
        return NetworkResponse::CreditsFailed {
            epoch,
            message: format!("Credit refresh returned {}", status.as_u16()),
        };
    }

    match resp.json::<serde_json::Value>().await {
        Ok(value) => match parse_credits(value) {
            Some(credits) => NetworkResponse::Credits { epoch, credits },
            None => NetworkResponse::CreditsFailed {
                epoch,
                message: String::from("Unexpected credit payload"),
            },
        },
        Err(e) => NetworkResponse::CreditsFailed {
            epoch,
            message: format!("Invalid credit payload: {}", e),
        },
    }
}

/// Accepts the credit object bare or wrapped in `{"data": ...}`
fn parse_credits(value: serde_json::Value) -> Option<CreditState> {
    let inner = match value.get("data") {
        Some(data) if data.is_object() => data.clone(),
        _ => value,
    };
    serde_json::from_value(inner).ok()
}

/// Create an HTTP client; without an explicit timeout reqwest's defaults apply
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Param, ParamLocation};
    use serde_json::json;

    fn request(method: HttpMethod, url: String) -> ResolvedRequest {
        ResolvedRequest {
            method,
            url,
            headers: vec![Header::new("x-auth-token", "H")],
            body: None,
            params: vec![Param::new("id", "1", ParamLocation::Path)],
            unresolved: Vec::new(),
        }
    }

    fn finished(resp: NetworkResponse) -> ResponseRecord {
        match resp {
            NetworkResponse::TestFinished { record, .. } => record,
            other => panic!("expected TestFinished, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_json_response_is_parsed() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/items/1")
            .match_header("x-auth-token", "H")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"a":1}"#)
            .create_async()
            .await;

        let client = create_client(None);
        let resp = execute_test(&client, request(HttpMethod::GET, format!("{}/v1/items/1", server.url())), 7, 0).await;
        assert_eq!(resp.test_id(), Some(7));

        let record = finished(resp);
        assert!(!record.is_error());
        assert_eq!(record.status_code(), Some(200));
        assert_eq!(record.status_text(), "OK");
        assert_eq!(record.data(), ResponseBody::Json(json!({"a": 1})));
        assert_eq!(record.body_size(), r#"{"a":1}"#.len());
        assert_eq!(record.request.params[0].value, "1");
    }

    #[tokio::test]
    async fn test_error_status_is_a_completed_exchange() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/fail")
            .with_status(500)
            .with_header("content-type", "text/plain")
            .with_body("boom")
            .create_async()
            .await;

        let mut req = request(HttpMethod::POST, format!("{}/fail", server.url()));
        req.body = Some("{}".to_string());
        let record = finished(execute_test(&create_client(None), req, 1, 0).await);
        assert!(!record.is_error());
        assert_eq!(record.status_label(), "500");
        assert_eq!(record.data(), ResponseBody::Text("boom".to_string()));
        assert_eq!(record.body_size(), 4);
    }

    #[tokio::test]
    async fn test_invalid_json_falls_back_to_text() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{not json")
            .create_async()
            .await;

        let record = finished(execute_test(&create_client(None), request(HttpMethod::GET, format!("{}/broken", server.url())), 1, 0).await);
        assert_eq!(record.data(), ResponseBody::Text("{not json".to_string()));
    }

    #[tokio::test]
    async fn test_unauthorized_expires_session() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/private")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let resp = execute_test(&create_client(None), request(HttpMethod::GET, format!("{}/private", server.url())), 3, 0).await;
        assert!(matches!(
            resp,
            NetworkResponse::SessionExpired { id: Some(3), epoch: 0 }
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        // Bind then drop a listener to get a port nobody is listening on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let record = finished(
            execute_test(&create_client(None), request(HttpMethod::GET, format!("http://127.0.0.1:{}/x", port)), 1, 0).await,
        );
        assert!(record.is_error());
        assert_eq!(record.status_label(), "Error");
        assert_eq!(record.status_text(), "Connection failed");
        assert!(record.data().as_json().unwrap()["hint"].is_string());
    }

    #[tokio::test]
    async fn test_relative_url_fails_at_transport() {
        let record = finished(execute_test(&create_client(None), request(HttpMethod::GET, "/v1/ping".to_string()), 1, 0).await);
        assert!(record.is_error());
        assert_eq!(record.status_text(), "Invalid request");
    }

    #[tokio::test]
    async fn test_fetch_credits_unwraps_data() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", CREDITS_PATH)
            .match_header("authorization", "Bearer T")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"remainingCredits":5,"totalCredits":100,"remainingCalls":5,"totalCalls":100}}"#)
            .create_async()
            .await;

        let creds = CredentialContext {
            bearer_token: Some("T".to_string()),
            auth_hash: None,
        };
        let base = server.url();
        match fetch_credits(&create_client(None), Some(&base), &creds, 4).await {
            NetworkResponse::Credits { epoch, credits } => {
                assert_eq!(epoch, 4);
                assert_eq!(credits.remaining_credits, Some(5.0));
                assert_eq!(credits.total_calls, Some(100.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_credits_without_base_url() {
        let resp = fetch_credits(&create_client(None), None, &CredentialContext::default(), 1).await;
        assert!(matches!(resp, NetworkResponse::CreditsFailed { epoch: 1, .. }));
    }
}
