//! Request builder - turns a descriptor plus user edits into a concrete request

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::constants::{AUTHORIZATION_HEADER, AUTH_HASH_HEADER};
use crate::models::{
    CredentialContext, EditableRequest, EndpointDescriptor, Header, HttpMethod, Param,
    ParamLocation, RequestSnapshot,
};

/// A fully resolved request, ready to hand to the executor
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Option<String>,
    /// Params as they were at build time, for display
    pub params: Vec<Param>,
    /// `{key}` placeholders left in the URL because no value was supplied
    pub unresolved: Vec<String>,
}

impl ResolvedRequest {
    /// First header named Content-Type, in header order
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.is_named("content-type"))
            .map(|h| h.value.as_str())
    }

    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            method: Some(self.method),
            params: self.params.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

/// Build the request for `descriptor` from the current edits and credentials.
///
/// Missing path values are not an error: the placeholder stays in the URL and
/// is reported in [`ResolvedRequest::unresolved`].
pub fn build_request(
    descriptor: &EndpointDescriptor,
    edit: &EditableRequest,
    credentials: &CredentialContext,
    base_url: Option<&str>,
) -> ResolvedRequest {
    let path = substitute_path_params(&descriptor.url, &edit.params);
    let unresolved = unresolved_placeholders(&descriptor.url, &edit.params);
    let mut url = join_base(base_url, &path);

    let query = build_query(&edit.params);
    if !query.is_empty() {
        let separator = if url.contains('?') { '&' } else { '?' };
        url.push(separator);
        url.push_str(&query);
    }

    let body = if descriptor.method.sends_body() {
        Some(edit.body.clone())
    } else {
        None
    };

    ResolvedRequest {
        method: descriptor.method,
        url,
        headers: assemble_headers(&edit.headers, credentials),
        body,
        params: edit.params.clone(),
        unresolved,
    }
}

/// Replace `{key}` with the unescaped value of every non-empty path param.
///
/// Substitution is a single pass over the template, so a value that itself
/// contains `{other}` is inserted as-is.
pub fn substitute_path_params(template: &str, params: &[Param]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| match path_value(params, &caps[1]) {
            Some(value) => urlencoding::decode(value)
                .unwrap_or(Cow::Borrowed(value))
                .into_owned(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn path_value<'a>(params: &'a [Param], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|p| p.location == ParamLocation::Path && p.key == key && p.has_value())
        .map(|p| p.value.as_str())
}

/// `key=value` pairs for every non-empty query param, URL-encoded and `&`-joined
pub fn build_query(params: &[Param]) -> String {
    params
        .iter()
        .filter(|p| p.location == ParamLocation::Query && p.has_value())
        .map(|p| {
            format!(
                "{}={}",
                urlencoding::encode(&p.key),
                urlencoding::encode(&p.value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Edited headers followed by the credential overlays.
///
/// A present credential replaces any same-named header (case-insensitive).
pub fn assemble_headers(headers: &[Header], credentials: &CredentialContext) -> Vec<Header> {
    let hash = credentials.auth_hash.as_deref().filter(|h| !h.is_empty());
    let token = credentials.bearer_token.as_deref().filter(|t| !t.is_empty());

    let mut assembled: Vec<Header> = headers
        .iter()
        .filter(|h| !h.key.trim().is_empty())
        .filter(|h| !(hash.is_some() && h.is_named(AUTH_HASH_HEADER)))
        .filter(|h| !(token.is_some() && h.is_named(AUTHORIZATION_HEADER)))
        .cloned()
        .collect();

    if let Some(hash) = hash {
        assembled.push(Header::new(AUTH_HASH_HEADER, hash));
    }
    if let Some(token) = token {
        assembled.push(Header::new(AUTHORIZATION_HEADER, format!("Bearer {}", token)));
    }
    assembled
}

fn join_base(base_url: Option<&str>, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    match base_url {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => path.to_string(),
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}/?&=]+)\}").unwrap())
}

/// Placeholders in the template that no non-empty path param fills
fn unresolved_placeholders(template: &str, params: &[Param]) -> Vec<String> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|key| path_value(params, key).is_none())
        .map(str::to_string)
        .collect()
}
