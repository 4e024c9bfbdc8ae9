//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{Notice, RequestPhase};
use crate::messages::ui_events::{HeaderField, InputMode, KeyContext, Panel, SignInField};
use crate::models::{CreditState, EditableRequest, EndpointDescriptor, HttpMethod, ResponseRecord};
use crate::viewer::ViewerState;

/// One row of the catalog list
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub collection: String,
    pub slug: String,
    pub name: String,
    pub method: HttpMethod,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Catalog
    pub catalog: Vec<CatalogEntry>,
    pub selected_endpoint: usize,
    pub descriptor: Option<EndpointDescriptor>,

    // Editable request
    pub request: EditableRequest,
    pub edit_mode: bool,
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

    // Response
    pub response: Option<ResponseRecord>,
    pub viewer: ViewerState,
    /// Text of the active viewer tab
    pub response_text: String,

    // Session and credits
    pub authenticated: bool,
    pub account_label: Option<String>,
    pub credits: Option<CreditState>,

    // Feedback
    pub notice: Option<Notice>,

    // Popups
    pub show_help: bool,
    pub show_upgrade: bool,
    pub upgrade_url: Option<String>,
    pub show_sign_in: bool,
    pub sign_in_field: SignInField,
    pub sign_in_token: String,
    pub sign_in_hash: String,
}

impl RenderState {
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            edit_mode: self.edit_mode,
            show_help: self.show_help,
            show_sign_in: self.show_sign_in,
            show_upgrade: self.show_upgrade,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            catalog: Vec::new(),
            selected_endpoint: 0,
            descriptor: None,
            request: EditableRequest::default(),
            edit_mode: false,
            selected_param: 0,
            selected_header: 0,
            header_field: HeaderField::Value,
            cursor_position: 0,
            active_panel: Panel::Catalog,
            input_mode: InputMode::Normal,
            phase: RequestPhase::Idle,
            is_loading: false,
            response: None,
            viewer: ViewerState::default(),
            response_text: String::new(),
            authenticated: false,
            account_label: None,
            credits: None,
            notice: None,
            show_help: false,
            show_upgrade: false,
            upgrade_url: None,
            show_sign_in: false,
            sign_in_field: SignInField::Token,
            sign_in_token: String::new(),
            sign_in_hash: String::new(),
        }
    }
}
