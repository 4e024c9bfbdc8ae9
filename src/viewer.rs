//! Response viewer - tab selection over a single response record

use crate::curl;
use crate::models::{
    Header, HistoryEntry, ParamLocation, RequestSnapshot, ResponseBody, ResponseRecord,
};

/// Top-level viewer tab
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewTab {
    #[default]
    Response,
    Request,
    Info,
}

impl ViewTab {
    pub const ALL: [ViewTab; 3] = [ViewTab::Response, ViewTab::Request, ViewTab::Info];

    pub fn title(&self) -> &'static str {
        match self {
            ViewTab::Response => "Response",
            ViewTab::Request => "Request",
            ViewTab::Info => "Info",
        }
    }
}

/// Sub-tab of the Response tab
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseView {
    #[default]
    Pretty,
    Raw,
    Headers,
}

impl ResponseView {
    pub const ALL: [ResponseView; 3] = [ResponseView::Pretty, ResponseView::Raw, ResponseView::Headers];

    pub fn title(&self) -> &'static str {
        match self {
            ResponseView::Pretty => "Pretty",
            ResponseView::Raw => "Raw",
            ResponseView::Headers => "Headers",
        }
    }
}

/// Sub-tab of the Request tab
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestView {
    #[default]
    Params,
    Headers,
    Body,
}

impl RequestView {
    pub const ALL: [RequestView; 3] = [RequestView::Params, RequestView::Headers, RequestView::Body];

    pub fn title(&self) -> &'static str {
        match self {
            RequestView::Params => "Params",
            RequestView::Headers => "Headers",
            RequestView::Body => "Body",
        }
    }

    /// Params if any has a value, else Body if one was sent, else Headers
    pub fn default_for(request: &RequestSnapshot) -> RequestView {
        if request.params.iter().any(|p| p.has_value()) {
            RequestView::Params
        } else if request.body.as_deref().is_some_and(|b| !b.trim().is_empty()) {
            RequestView::Body
        } else {
            RequestView::Headers
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub tab: ViewTab,
    pub response_view: ResponseView,
    pub request_view: RequestView,
    pub scroll: u16,
}

impl ViewerState {
    /// Defaults for a freshly arrived record
    pub fn for_record(record: &ResponseRecord) -> Self {
        ViewerState {
            tab: ViewTab::Response,
            response_view: ResponseView::Pretty,
            request_view: RequestView::default_for(&record.request),
            scroll: 0,
        }
    }

    pub fn reset_for(&mut self, record: &ResponseRecord) {
        *self = Self::for_record(record);
    }

    pub fn select_tab(&mut self, tab: ViewTab) {
        if self.tab != tab {
            self.tab = tab;
            self.scroll = 0;
        }
    }

    /// Pick a sub-tab within whichever top-level tab is active
    pub fn select_response_view(&mut self, view: ResponseView) {
        self.tab = ViewTab::Response;
        self.response_view = view;
        self.scroll = 0;
    }

    pub fn select_request_view(&mut self, view: RequestView) {
        self.tab = ViewTab::Request;
        self.request_view = view;
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Text shown for the current selection
    pub fn content(&self, record: &ResponseRecord) -> String {
        match self.tab {
            ViewTab::Response => match self.response_view {
                ResponseView::Pretty => pretty_body(&record.data()),
                ResponseView::Raw => record.data().serialized(),
                ResponseView::Headers => header_lines(record.response_headers()),
            },
            ViewTab::Request => match self.request_view {
                RequestView::Params => param_lines(&record.request),
                RequestView::Headers => header_lines(&record.request.headers),
                RequestView::Body => match record.request.body.as_deref() {
                    Some(body) if !body.is_empty() => pretty_text(body),
                    _ => String::from("(no body)"),
                },
            },
            ViewTab::Info => info_text(record),
        }
    }
}

pub fn pretty_body(body: &ResponseBody) -> String {
    match body {
        ResponseBody::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        ResponseBody::Text(text) => text.clone(),
    }
}

/// Pretty-print text that happens to be JSON, otherwise return it unchanged
fn pretty_text(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| text.to_string()),
        Err(_) => text.to_string(),
    }
}

pub fn header_lines(headers: &[Header]) -> String {
    if headers.is_empty() {
        return String::from("(no headers)");
    }
    headers
        .iter()
        .map(|h| format!("{}: {}", h.key, h.value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn param_lines(request: &RequestSnapshot) -> String {
    let lines: Vec<String> = request
        .params
        .iter()
        .filter(|p| p.has_value())
        .map(|p| format!("[{}] {} = {}", p.location.as_str(), p.key, p.value))
        .collect();
    if lines.is_empty() {
        String::from("(no params)")
    } else {
        lines.join("\n")
    }
}

pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// Recent calls, newest first, one line each
pub fn history_lines<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> String {
    let lines: Vec<String> = entries
        .into_iter()
        .map(|e| {
            format!(
                "{}  {:<4} {:<28} {} ms",
                e.timestamp.format("%H:%M:%S"),
                e.record.status_label(),
                e.slug,
                e.record.timing_ms
            )
        })
        .collect();
    if lines.is_empty() {
        String::from("(no calls yet)")
    } else {
        lines.join("\n")
    }
}

fn info_text(record: &ResponseRecord) -> String {
    let method = record
        .request
        .method
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let path_params = record
        .request
        .params
        .iter()
        .filter(|p| p.location == ParamLocation::Path && p.has_value())
        .count();

    let mut lines = vec![
        format!("Status:      {} {}", record.status_label(), record.status_text()),
        format!("Method:      {}", method),
        format!("URL:         {}", record.url),
        format!("Time:        {} ms", record.timing_ms),
        format!("Size:        {}", format_size(record.body_size())),
        format!("Path params: {}", path_params),
    ];
    lines.push(String::new());
    lines.push(String::from("cURL:"));
    lines.push(curl::to_curl(&record.url, &record.request));
    lines.join("\n")
}
