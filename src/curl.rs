use crate::models::{HttpMethod, RequestSnapshot};

/// Format a sent request as a cURL command
pub fn to_curl(url: &str, request: &RequestSnapshot) -> String {
    let mut parts = vec!["curl".to_string()];

    // Method
    if let Some(method) = request.method {
        if method != HttpMethod::GET {
            parts.push(format!("-X {}", method.as_str()));
        }
    }

    // URL
    parts.push(format!("'{}'", escape(url)));

    // Headers
    for header in &request.headers {
        parts.push(format!("-H '{}: {}'", escape(&header.key), escape(&header.value)));
    }

    // Body
    if let Some(body) = request.body.as_deref().filter(|b| !b.is_empty()) {
        parts.push(format!("-d '{}'", escape(body)));
    }

    parts.join(" \\\n  ")
}

fn escape(s: &str) -> String {
    s.replace('\'', "'\\''")
}
