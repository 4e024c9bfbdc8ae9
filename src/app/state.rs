//! App state - pure data structure with no I/O logic

use crate::catalog::Catalog;
use crate::config::Config;
use crate::editor::{EditField, EditSession};
use crate::messages::render::CatalogEntry;
use crate::messages::ui_events::{HeaderField, InputMode, Panel, SignInField};
use crate::messages::RenderState;
use crate::models::{CreditState, EndpointDescriptor, ResponseRecord};
use crate::session::SessionContext;
use crate::storage::Storage;
use crate::viewer::{self, ViewTab, ViewerState};

/// History lines shown under the Info tab
const RECENT_CALLS: usize = 10;

/// Lifecycle of the test call for the current view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Sending { id: u64 },
    Succeeded,
    Failed,
    /// The call hit a 401 and was abandoned
    Unauthorized,
}

impl RequestPhase {
    pub fn as_str(&self) -> &str {
        match self {
            RequestPhase::Idle => "Idle",
            RequestPhase::Sending { .. } => "Sending",
            RequestPhase::Succeeded => "Done",
            RequestPhase::Failed => "Failed",
            RequestPhase::Unauthorized => "Unauthorized",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Inline toast shown in the status bar
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Catalog
    pub catalog: Catalog,
    pub selected_endpoint: usize,
    pub descriptor: Option<EndpointDescriptor>,

    // Editable request for the current view
    pub edit: EditSession,
    pub selected_param: usize,
    pub selected_header: usize,
    pub header_field: HeaderField,
    pub cursor_position: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,

    // Test lifecycle
    pub phase: RequestPhase,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Response
    pub response: Option<ResponseRecord>,
    pub viewer: ViewerState,

    // Session and credits
    pub session: SessionContext,
    pub credits: Option<CreditState>,
    pub api_base_url: Option<String>,
    pub upgrade_url: Option<String>,

    // Storage (persisted data + history)
    pub storage: Storage,

    // Feedback
    pub notice: Option<Notice>,

    // Popups
    pub show_help: bool,
    pub show_upgrade: bool,
    pub show_sign_in: bool,
    pub sign_in_field: SignInField,
    pub sign_in_token: String,
    pub sign_in_hash: String,
}

impl AppState {
    /// Build the state and open the default view
    pub fn new(catalog: Catalog, config: &Config, storage: Storage) -> Self {
        let session = SessionContext::restore(&storage);
        let mut state = AppState {
            catalog,
            selected_endpoint: 0,
            descriptor: None,
            edit: EditSession::default(),
            selected_param: 0,
            selected_header: 0,
            header_field: HeaderField::Value,
            cursor_position: 0,
            active_panel: Panel::Catalog,
            input_mode: InputMode::Normal,
            phase: RequestPhase::Idle,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            response: None,
            viewer: ViewerState::default(),
            session,
            credits: None,
            api_base_url: config.api_base_url.clone(),
            upgrade_url: config.upgrade_url.clone(),
            storage,
            notice: None,
            show_help: false,
            show_upgrade: false,
            show_sign_in: false,
            sign_in_field: SignInField::Token,
            sign_in_token: String::new(),
            sign_in_hash: String::new(),
        };
        let default_slug = state.catalog.default_slug().to_string();
        state.navigate(&default_slug);
        state
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Field the cursor is in, given the focused panel
    pub fn current_field(&self) -> Option<EditField> {
        match self.active_panel {
            Panel::Params => Some(EditField::ParamValue(self.selected_param)),
            Panel::Headers => Some(match self.header_field {
                HeaderField::Key => EditField::HeaderKey(self.selected_header),
                HeaderField::Value => EditField::HeaderValue(self.selected_header),
            }),
            Panel::Body => Some(EditField::Body),
            Panel::Catalog | Panel::Response => None,
        }
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        self.current_field()
            .and_then(|f| self.edit.field(f))
            .unwrap_or("")
    }

    /// Get mutable reference to current input field (edit mode only)
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        let field = self.current_field()?;
        self.edit.field_mut(field)
    }

    /// Viewer text for the current record. The Info tab also lists recent calls.
    pub fn response_text(&self) -> String {
        let Some(record) = &self.response else {
            return String::new();
        };
        let mut text = self.viewer.content(record);
        if self.viewer.tab == ViewTab::Info {
            let recent = (0..self.storage.history_len().min(RECENT_CALLS))
                .filter_map(|i| self.storage.get_history(i));
            text.push_str("\n\nRecent calls:\n");
            text.push_str(&viewer::history_lines(recent));
        }
        text
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let catalog = self
            .catalog
            .collections()
            .iter()
            .flat_map(|c| {
                c.endpoints.iter().map(move |e| CatalogEntry {
                    collection: c.name.clone(),
                    slug: e.slug.clone(),
                    name: e.display_name().to_string(),
                    method: e.method,
                })
            })
            .collect();

        RenderState {
            catalog,
            selected_endpoint: self.selected_endpoint,
            descriptor: self.descriptor.clone(),
            request: self.edit.current().clone(),
            edit_mode: self.edit.is_editing(),
            selected_param: self.selected_param,
            selected_header: self.selected_header,
            header_field: self.header_field,
            cursor_position: self.cursor_position,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            phase: self.phase,
            is_loading: self.is_loading,
            response_text: self.response_text(),
            response: self.response.clone(),
            viewer: self.viewer,
            authenticated: self.session.is_authenticated(),
            account_label: self
                .session
                .profile()
                .and_then(|p| p.email.clone().or_else(|| p.name.clone())),
            credits: self.credits.clone(),
            notice: self.notice.clone(),
            show_help: self.show_help,
            show_upgrade: self.show_upgrade,
            upgrade_url: self.upgrade_url.clone(),
            show_sign_in: self.show_sign_in,
            sign_in_field: self.sign_in_field,
            sign_in_token: self.sign_in_token.clone(),
            sign_in_hash: self.sign_in_hash.clone(),
        }
    }
}
