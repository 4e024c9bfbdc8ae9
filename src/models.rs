use serde::{Deserialize, Serialize};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    /// Every verb except GET forwards the editable body.
    pub fn sends_body(&self) -> bool {
        !matches!(self, HttpMethod::GET)
    }
}

/// Where a descriptor parameter is placed in the final request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
}

impl ParamLocation {
    pub fn as_str(&self) -> &str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
        }
    }
}

/// A path or query parameter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub description: String,
    pub location: ParamLocation,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<String>, location: ParamLocation) -> Self {
        Param {
            key: key.into(),
            value: value.into(),
            description: String::new(),
            location,
        }
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

/// HTTP Header
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
    }
}

/// One documented field of a request payload. Never enforced at call time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// Descriptive auth metadata shown alongside an endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthInfo {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub details: String,
}

/// Static description of one callable endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub request_schema: Vec<SchemaField>,
    #[serde(default)]
    pub auth: AuthInfo,
}

impl EndpointDescriptor {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.slug
        } else {
            &self.name
        }
    }
}

/// A named group of descriptors
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Working copy of a descriptor's params, headers and body.
///
/// Owns its data outright, so edits never reach the catalog or another view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditableRequest {
    pub params: Vec<Param>,
    pub headers: Vec<Header>,
    pub body: String,
}

impl EditableRequest {
    pub fn from_descriptor(descriptor: &EndpointDescriptor) -> Self {
        EditableRequest {
            params: descriptor.params.clone(),
            headers: descriptor.headers.clone(),
            body: descriptor.body.clone().unwrap_or_default(),
        }
    }
}

/// Credentials injected into every outgoing test request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CredentialContext {
    pub bearer_token: Option<String>,
    pub auth_hash: Option<String>,
}

/// Usage quota as reported by the backend
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditState {
    #[serde(default)]
    pub remaining_credits: Option<f64>,
    #[serde(default)]
    pub total_credits: Option<f64>,
    #[serde(default)]
    pub remaining_calls: Option<f64>,
    #[serde(default)]
    pub total_calls: Option<f64>,
}

/// Parsed response payload
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// Compact serialization, the form the body size is computed from
    pub fn serialized(&self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text.clone(),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

/// How a single test exchange ended
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// An HTTP response arrived, whatever its status
    Completed {
        status: u16,
        status_text: String,
        headers: Vec<Header>,
        body: ResponseBody,
        body_size: usize,
    },
    /// No response was received
    TransportFailed {
        reason: String,
        message: String,
        hint: String,
    },
}

/// What was actually sent, captured at send time
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestSnapshot {
    pub method: Option<HttpMethod>,
    pub params: Vec<Param>,
    pub headers: Vec<Header>,
    pub body: Option<String>,
}

/// Normalized result of one test execution. Built once, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseRecord {
    pub url: String,
    pub timing_ms: u64,
    pub outcome: Outcome,
    pub request: RequestSnapshot,
}

impl ResponseRecord {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::TransportFailed { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match &self.outcome {
            Outcome::Completed { status, .. } => Some(*status),
            Outcome::TransportFailed { .. } => None,
        }
    }

    /// Numeric status, or `"Error"` for a transport failure
    pub fn status_label(&self) -> String {
        match &self.outcome {
            Outcome::Completed { status, .. } => status.to_string(),
            Outcome::TransportFailed { .. } => String::from("Error"),
        }
    }

    pub fn status_text(&self) -> &str {
        match &self.outcome {
            Outcome::Completed { status_text, .. } => status_text,
            Outcome::TransportFailed { reason, .. } => reason,
        }
    }

    pub fn body_size(&self) -> usize {
        match &self.outcome {
            Outcome::Completed { body_size, .. } => *body_size,
            Outcome::TransportFailed { .. } => 0,
        }
    }

    /// Response data: parsed body, or the error payload for a transport failure
    pub fn data(&self) -> ResponseBody {
        match &self.outcome {
            Outcome::Completed { body, .. } => body.clone(),
            Outcome::TransportFailed { message, hint, .. } => ResponseBody::Json(serde_json::json!({
                "error": message,
                "hint": hint,
            })),
        }
    }

    pub fn response_headers(&self) -> &[Header] {
        match &self.outcome {
            Outcome::Completed { headers, .. } => headers,
            Outcome::TransportFailed { .. } => &[],
        }
    }
}

/// History entry
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub slug: String,
    pub record: ResponseRecord,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
