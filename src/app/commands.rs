//! Command handlers - business logic for processing UI events

use tracing::{debug, error, info, warn};

use crate::app::state::{Notice, RequestPhase};
use crate::app::AppState;
use crate::builder;
use crate::catalog::Lookup;
use crate::editor::EditSession;
use crate::gate::{self, GateDecision};
use crate::messages::ui_events::{HeaderField, InputMode, Panel, SignInField};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{HistoryEntry, ResponseRecord};
use crate::session::Profile;
use crate::viewer::{RequestView, ResponseView, ViewTab, ViewerState};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.input_mode = InputMode::Normal;
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.input_mode = InputMode::Normal;
        self.active_panel = self.active_panel.prev();
    }

    pub fn scroll_up(&mut self) {
        self.viewer.scroll_up();
    }

    pub fn scroll_down(&mut self) {
        self.viewer.scroll_down();
    }

    // ========================
    // Catalog
    // ========================

    pub fn next_endpoint(&mut self) {
        if !self.catalog.is_empty() {
            self.selected_endpoint = (self.selected_endpoint + 1) % self.catalog.len();
        }
    }

    pub fn prev_endpoint(&mut self) {
        if !self.catalog.is_empty() {
            self.selected_endpoint = self
                .selected_endpoint
                .checked_sub(1)
                .unwrap_or(self.catalog.len() - 1);
        }
    }

    pub fn open_selected_endpoint(&mut self) {
        let slug = self
            .catalog
            .get(self.selected_endpoint)
            .map(|e| e.slug.clone());

        if let Some(slug) = slug {
            self.open_endpoint(&slug);
            self.active_panel = Panel::Params;
        }
    }

    /// Open `slug`, redirecting to the default view when it is unknown
    pub fn navigate(&mut self, slug: &str) {
        let target = match self.catalog.lookup(slug) {
            Lookup::Found(descriptor) => descriptor.slug.clone(),
            Lookup::Redirect(default) => {
                warn!(slug, redirect = default, "Unknown endpoint, redirecting");
                self.notice = Some(Notice::warning(format!(
                    "No endpoint named '{}', showing the default view",
                    slug
                )));
                default.to_string()
            }
        };
        self.open_endpoint(&target);
    }

    /// Switch the view to `slug`. Everything tied to the previous view is
    /// dropped, including any in-flight test. Reopening the current view
    /// keeps its edits and pending test.
    pub fn open_endpoint(&mut self, slug: &str) -> bool {
        if self.descriptor.as_ref().map(|d| d.slug.as_str()) == Some(slug) {
            self.selected_endpoint = self.catalog.position(slug).unwrap_or(self.selected_endpoint);
            return true;
        }

        let descriptor = match self.catalog.find(slug) {
            Some(d) => d.clone(),
            None => return false,
        };

        if let Some(id) = self.pending_request_id.take() {
            debug!(id, "Abandoning in-flight test on view switch");
        }

        self.edit = EditSession::new(&descriptor);
        self.selected_endpoint = self.catalog.position(slug).unwrap_or(0);
        self.descriptor = Some(descriptor);

        self.selected_param = 0;
        self.selected_header = 0;
        self.header_field = HeaderField::Value;
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;

        self.phase = RequestPhase::Idle;
        self.is_loading = false;
        self.response = None;
        self.viewer = ViewerState::default();
        true
    }

    // ========================
    // Edit mode
    // ========================

    pub fn begin_edit(&mut self) {
        if self.descriptor.is_some() {
            self.edit.begin();
        }
    }

    /// Keep the draft for this view (memory only)
    pub fn save_edits(&mut self) {
        if self.edit.is_editing() {
            self.edit.save();
            self.input_mode = InputMode::Normal;
            self.notice = Some(Notice::info("Edits kept for this session"));
        }
    }

    pub fn cancel_edits(&mut self) {
        self.edit.cancel();
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_typing(&mut self) {
        if !self.edit.is_editing() || !self.active_panel.is_editable() {
            return;
        }
        if self.current_input_mut().is_some() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_typing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Params / headers
    // ========================

    pub fn next_param(&mut self) {
        let len = self.edit.current().params.len();
        if len > 0 {
            self.selected_param = (self.selected_param + 1) % len;
        }
    }

    pub fn prev_param(&mut self) {
        let len = self.edit.current().params.len();
        if len > 0 {
            self.selected_param = self.selected_param.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn next_header(&mut self) {
        let len = self.edit.current().headers.len();
        if len > 0 {
            self.selected_header = (self.selected_header + 1) % len;
        }
    }

    pub fn prev_header(&mut self) {
        let len = self.edit.current().headers.len();
        if len > 0 {
            self.selected_header = self.selected_header.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn next_header_field(&mut self) {
        self.header_field = match self.header_field {
            HeaderField::Key => HeaderField::Value,
            HeaderField::Value => HeaderField::Key,
        };
        self.cursor_position = self.current_input().len();
    }

    pub fn add_header(&mut self) {
        if let Some(index) = self.edit.add_header() {
            self.selected_header = index;
            self.header_field = HeaderField::Key;
        }
    }

    pub fn delete_header(&mut self) {
        if self.edit.delete_header(self.selected_header) && self.selected_header > 0 {
            self.selected_header -= 1;
        }
    }

    fn clamp_selection(&mut self) {
        let current = self.edit.current();
        self.selected_param = self.selected_param.min(current.params.len().saturating_sub(1));
        self.selected_header = self.selected_header.min(current.headers.len().saturating_sub(1));
    }

    // ========================
    // Test execution
    // ========================

    /// Build the test call for the current view.
    ///
    /// Returns `None` while a call is in flight or when the credit gate
    /// refuses, so no command reaches the network layer.
    pub fn prepare_test(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            debug!("Test already in flight, ignoring send");
            return None;
        }
        let descriptor = self.descriptor.as_ref()?;

        if let GateDecision::UpgradeRequired { remaining } = gate::check(self.credits.as_ref()) {
            info!(remaining, "Credit gate refused test call");
            self.show_upgrade = true;
            self.notice = Some(Notice::warning("No credits left. Upgrade to keep testing."));
            return None;
        }

        let request = builder::build_request(
            descriptor,
            self.edit.current(),
            &self.session.credentials(),
            self.api_base_url.as_deref(),
        );

        if !request.unresolved.is_empty() {
            let names = request.unresolved.join(", ");
            warn!(slug = %descriptor.slug, missing = %names, "Sending with unresolved path parameters");
            self.notice = Some(Notice::warning(format!("Unresolved path parameters: {}", names)));
        }

        self.input_mode = InputMode::Normal;
        let id = self.next_id();
        self.pending_request_id = Some(id);
        self.is_loading = true;
        self.phase = RequestPhase::Sending { id };

        Some(NetworkCommand::ExecuteTest {
            id,
            epoch: self.session.epoch(),
            request,
        })
    }

    /// Credit refresh for the current session, if there is one
    pub fn credit_refresh_command(&self) -> Option<NetworkCommand> {
        if !self.session.is_authenticated() {
            return None;
        }
        Some(NetworkCommand::RefreshCredits {
            epoch: self.session.epoch(),
            credentials: self.session.credentials(),
        })
    }

    /// Manual refresh from the UI
    pub fn refresh_credits(&mut self) -> Option<NetworkCommand> {
        let command = self.credit_refresh_command();
        if command.is_none() {
            self.notice = Some(Notice::info("Sign in to see your credits"));
        }
        command
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network result. May return a follow-up command.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match response {
            NetworkResponse::TestFinished { id, record } => {
                if self.pending_request_id != Some(id) {
                    debug!(id, "Discarding stale test result");
                    return None;
                }
                self.finish_test(record)
            }
            NetworkResponse::SessionExpired { id, epoch } => {
                let was_pending = id.is_some() && id == self.pending_request_id;
                if was_pending {
                    self.pending_request_id = None;
                    self.is_loading = false;
                    self.phase = RequestPhase::Unauthorized;
                    self.response = None;
                }
                if epoch == self.session.epoch() {
                    self.expire_session();
                } else {
                    debug!(epoch, current = self.session.epoch(), "Ignoring 401 from an older session");
                    if was_pending {
                        self.notice = Some(Notice::warning(
                            "Test call was rejected as unauthorized. Send it again.",
                        ));
                    }
                }
                None
            }
            NetworkResponse::Credits { epoch, credits } => {
                if epoch == self.session.epoch() {
                    self.credits = Some(credits);
                } else {
                    debug!(epoch, "Discarding credits from an older session");
                }
                None
            }
            NetworkResponse::CreditsFailed { epoch, message } => {
                if epoch == self.session.epoch() {
                    self.notice = Some(Notice::warning(format!("Could not refresh credits: {}", message)));
                }
                None
            }
        }
    }

    fn finish_test(&mut self, record: ResponseRecord) -> Option<NetworkCommand> {
        self.pending_request_id = None;
        self.is_loading = false;
        self.viewer.reset_for(&record);

        let follow_up = if record.is_error() {
            self.phase = RequestPhase::Failed;
            self.notice = Some(Notice::error(format!("{}: {}", record.status_text(), record.url)));
            None
        } else {
            self.phase = RequestPhase::Succeeded;
            self.credit_refresh_command()
        };

        if let Some(descriptor) = &self.descriptor {
            self.storage.add_to_history(HistoryEntry {
                slug: descriptor.slug.clone(),
                record: record.clone(),
                timestamp: chrono::Utc::now(),
            });
        }
        self.response = Some(record);
        follow_up
    }

    /// 401 from the backend: the session is gone everywhere
    pub fn expire_session(&mut self) {
        warn!("Backend answered 401, signing out");
        if let Err(e) = self.session.clear_session(&mut self.storage) {
            error!(error = %e, "Failed to clear persisted session");
        }
        self.credits = None;
        self.notice = Some(Notice::warning("Session expired. Please sign in again."));
    }

    // ========================
    // Session
    // ========================

    pub fn open_sign_in(&mut self) {
        self.show_sign_in = true;
        self.sign_in_field = SignInField::Token;
        self.sign_in_token.clear();
        self.sign_in_hash.clear();
    }

    pub fn sign_in_char(&mut self, c: char) {
        match self.sign_in_field {
            SignInField::Token => self.sign_in_token.push(c),
            SignInField::Hash => self.sign_in_hash.push(c),
        }
    }

    pub fn sign_in_backspace(&mut self) {
        match self.sign_in_field {
            SignInField::Token => self.sign_in_token.pop(),
            SignInField::Hash => self.sign_in_hash.pop(),
        };
    }

    pub fn sign_in_next_field(&mut self) {
        self.sign_in_field = match self.sign_in_field {
            SignInField::Token => SignInField::Hash,
            SignInField::Hash => SignInField::Token,
        };
    }

    /// Store the pasted credentials and fetch credits for them
    pub fn submit_sign_in(&mut self) -> Option<NetworkCommand> {
        let token = self.sign_in_token.trim().to_string();
        if token.is_empty() {
            self.notice = Some(Notice::error("A session token is required"));
            return None;
        }

        let hash = self.sign_in_hash.trim();
        let profile = Profile {
            auth_hash: Some(hash.to_string()).filter(|h| !h.is_empty()),
            ..Profile::default()
        };

        self.show_sign_in = false;
        self.sign_in_token.clear();
        self.sign_in_hash.clear();
        self.credits = None;

        if let Err(e) = self.session.set_session(&mut self.storage, token, profile) {
            error!(error = %e, "Failed to persist session");
            self.notice = Some(Notice::warning("Signed in, but the session could not be saved"));
        } else {
            info!("Session set");
            self.notice = Some(Notice::info("Signed in"));
        }
        self.credit_refresh_command()
    }

    pub fn cancel_sign_in(&mut self) {
        self.show_sign_in = false;
        self.sign_in_token.clear();
        self.sign_in_hash.clear();
    }

    pub fn sign_out(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }
        if let Err(e) = self.session.clear_session(&mut self.storage) {
            error!(error = %e, "Failed to clear persisted session");
        }
        self.credits = None;
        self.notice = Some(Notice::info("Signed out"));
    }

    // ========================
    // Response viewer
    // ========================

    pub fn select_tab(&mut self, tab: ViewTab) {
        self.viewer.select_tab(tab);
    }

    pub fn select_response_view(&mut self, view: ResponseView) {
        self.viewer.select_response_view(view);
    }

    pub fn select_request_view(&mut self, view: RequestView) {
        self.viewer.select_request_view(view);
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_upgrade(&mut self) {
        self.show_upgrade = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::NoticeLevel;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::constants::SESSION_TOKEN_KEY;
    use crate::editor::EditField;
    use crate::models::{CreditState, Outcome, RequestSnapshot, ResponseBody};
    use crate::storage::Storage;

    fn state() -> AppState {
        let config = Config {
            api_base_url: Some("https://api.example.com".to_string()),
            ..Config::default()
        };
        AppState::new(Catalog::builtin().unwrap(), &config, Storage::in_memory())
    }

    fn signed_in() -> AppState {
        let mut state = state();
        let profile = Profile {
            auth_hash: Some("H".to_string()),
            ..Profile::default()
        };
        state.session.set_session(&mut state.storage, "T", profile).unwrap();
        state
    }

    fn completed(body: &str) -> ResponseRecord {
        ResponseRecord {
            url: "https://api.example.com/v1/account/profile".to_string(),
            timing_ms: 12,
            outcome: Outcome::Completed {
                status: 200,
                status_text: "OK".to_string(),
                headers: Vec::new(),
                body: ResponseBody::Text(body.to_string()),
                body_size: body.len(),
            },
            request: RequestSnapshot::default(),
        }
    }

    fn test_id(command: Option<NetworkCommand>) -> u64 {
        match command {
            Some(NetworkCommand::ExecuteTest { id, .. }) => id,
            other => panic!("expected a test command, got {:?}", other),
        }
    }

    #[test]
    fn test_opens_default_view() {
        let state = state();
        assert_eq!(state.descriptor.as_ref().unwrap().slug, "get-profile");
        assert_eq!(state.phase, RequestPhase::Idle);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_unknown_slug_redirects_with_notice() {
        let mut state = state();
        state.navigate("get-usage");
        state.navigate("nope");
        assert_eq!(state.descriptor.as_ref().unwrap().slug, "get-profile");
        assert!(state.notice.as_ref().unwrap().message.contains("nope"));
    }

    #[test]
    fn test_second_send_while_busy_is_noop() {
        let mut state = state();
        assert!(state.prepare_test().is_some());
        assert!(state.is_loading);
        assert!(state.prepare_test().is_none());
        assert_eq!(state.next_request_id, 2);
    }

    #[test]
    fn test_exhausted_credits_show_upgrade() {
        let mut state = state();
        state.credits = Some(CreditState {
            remaining_credits: Some(0.0),
            ..CreditState::default()
        });

        assert!(state.prepare_test().is_none());
        assert!(state.show_upgrade);
        assert!(!state.is_loading);
        assert!(state.pending_request_id.is_none());
    }

    #[test]
    fn test_request_carries_session_credentials() {
        let mut state = signed_in();
        match state.prepare_test() {
            Some(NetworkCommand::ExecuteTest { epoch, request, .. }) => {
                assert_eq!(epoch, state.session.epoch());
                assert_eq!(request.url, "https://api.example.com/v1/account/profile");
                assert!(request.headers.iter().any(|h| h.key == "Authorization" && h.value == "Bearer T"));
                assert!(request.headers.iter().any(|h| h.key == "x-auth-token" && h.value == "H"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_path_param_warns_but_sends() {
        let mut state = state();
        state.navigate("update-webhook");
        match state.prepare_test() {
            Some(NetworkCommand::ExecuteTest { request, .. }) => {
                assert!(request.url.contains("{fenceId}"));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(state.notice.as_ref().unwrap().message.contains("fenceId"));
    }

    #[test]
    fn test_result_for_abandoned_view_is_discarded() {
        let mut state = state();
        let id = test_id(state.prepare_test());
        state.navigate("get-usage");
        assert!(!state.is_loading);

        let follow_up = state.handle_response(NetworkResponse::TestFinished {
            id,
            record: completed("{}"),
        });
        assert!(follow_up.is_none());
        assert!(state.response.is_none());
        assert_eq!(state.phase, RequestPhase::Idle);
    }

    #[test]
    fn test_success_records_and_refreshes_credits() {
        let mut state = signed_in();
        let id = test_id(state.prepare_test());
        state.viewer.select_tab(ViewTab::Info);

        let follow_up = state.handle_response(NetworkResponse::TestFinished {
            id,
            record: completed("ok"),
        });
        assert!(matches!(follow_up, Some(NetworkCommand::RefreshCredits { .. })));
        assert_eq!(state.phase, RequestPhase::Succeeded);
        assert_eq!(state.viewer.tab, ViewTab::Response);
        assert_eq!(state.storage.history_len(), 1);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_unauthorized_clears_session_without_record() {
        let mut state = signed_in();
        let id = test_id(state.prepare_test());
        let epoch = state.session.epoch();

        state.handle_response(NetworkResponse::SessionExpired { id: Some(id), epoch });
        assert!(!state.session.is_authenticated());
        assert!(state.storage.get_str(SESSION_TOKEN_KEY).is_none());
        assert!(state.response.is_none());
        assert_eq!(state.phase, RequestPhase::Unauthorized);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_unauthorized_from_older_session_is_ignored() {
        let mut state = signed_in();
        let old_epoch = state.session.epoch();
        state.sign_out();
        state.open_sign_in();
        "NEW".chars().for_each(|c| state.sign_in_char(c));
        assert!(state.submit_sign_in().is_some());

        state.handle_response(NetworkResponse::SessionExpired { id: None, epoch: old_epoch });
        assert_eq!(state.session.token(), Some("NEW"));
    }

    #[test]
    fn test_older_session_unauthorized_test_shows_notice() {
        let mut state = signed_in();
        let id = test_id(state.prepare_test());
        let old_epoch = state.session.epoch();
        state.sign_out();
        state.open_sign_in();
        "NEW".chars().for_each(|c| state.sign_in_char(c));
        state.submit_sign_in();

        state.handle_response(NetworkResponse::SessionExpired { id: Some(id), epoch: old_epoch });
        assert_eq!(state.session.token(), Some("NEW"));
        assert_eq!(state.phase, RequestPhase::Unauthorized);
        assert!(!state.is_loading);
        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("unauthorized"));
    }

    #[test]
    fn test_credit_refresh_unauthorized_signs_out() {
        let mut state = signed_in();
        let epoch = state.session.epoch();
        state.credits = Some(CreditState::default());

        let follow_up = state.handle_response(NetworkResponse::SessionExpired { id: None, epoch });
        assert!(follow_up.is_none());
        assert!(!state.session.is_authenticated());
        assert!(state.storage.get_str(SESSION_TOKEN_KEY).is_none());
        assert!(state.credits.is_none());
        assert_eq!(state.phase, RequestPhase::Idle);
    }

    #[test]
    fn test_reopening_current_view_keeps_pending_test() {
        let mut state = state();
        let id = test_id(state.prepare_test());
        state.selected_endpoint = state.catalog.position("get-profile").unwrap();
        state.open_selected_endpoint();

        assert!(state.is_loading);
        assert_eq!(state.pending_request_id, Some(id));
        assert!(state.prepare_test().is_none());

        state.handle_response(NetworkResponse::TestFinished { id, record: completed("{}") });
        assert_eq!(state.phase, RequestPhase::Succeeded);
        assert!(state.response.is_some());
    }

    #[test]
    fn test_reopening_current_view_keeps_saved_edits() {
        let mut state = state();
        state.navigate("validate-email");
        state.begin_edit();
        state.active_panel = Panel::Params;
        state.start_typing();
        for _ in 0..state.current_input().len() {
            state.delete_char();
        }
        "x@y.z".chars().for_each(|c| state.enter_char(c));
        state.save_edits();

        state.selected_endpoint = state.catalog.position("validate-email").unwrap();
        state.open_selected_endpoint();
        assert_eq!(state.edit.current().params[0].value, "x@y.z");

        state.navigate("get-usage");
        state.navigate("validate-email");
        assert_eq!(state.edit.current().params[0].value, "jane.doe@example.com");
    }

    #[test]
    fn test_info_tab_lists_recent_calls() {
        let mut state = state();
        let id = test_id(state.prepare_test());
        state.handle_response(NetworkResponse::TestFinished { id, record: completed("{}") });

        assert!(!state.response_text().contains("Recent calls:"));
        state.select_tab(ViewTab::Info);
        let text = state.response_text();
        assert!(text.contains("Recent calls:"));
        assert!(text.contains("get-profile"));
        assert_eq!(state.to_render_state().response_text, text);
    }

    #[test]
    fn test_stale_credits_are_dropped() {
        let mut state = signed_in();
        let epoch = state.session.epoch();
        state.sign_out();

        let credits = CreditState {
            remaining_credits: Some(10.0),
            ..CreditState::default()
        };
        state.handle_response(NetworkResponse::Credits { epoch, credits });
        assert!(state.credits.is_none());
    }

    #[test]
    fn test_cancelled_edits_are_not_sent() {
        let mut state = state();
        state.navigate("validate-email");
        state.begin_edit();
        state.active_panel = Panel::Params;
        state.start_typing();
        assert_eq!(state.input_mode, InputMode::Editing);
        state.delete_char();
        state.enter_char('g');
        assert_eq!(state.edit.field(EditField::ParamValue(0)), Some("jane.doe@example.cog"));

        state.cancel_edits();
        match state.prepare_test() {
            Some(NetworkCommand::ExecuteTest { request, .. }) => {
                assert!(request.url.contains("jane.doe@example.com"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_typing_requires_edit_mode() {
        let mut state = state();
        state.active_panel = Panel::Body;
        state.start_typing();
        assert_eq!(state.input_mode, InputMode::Normal);
        state.enter_char('x');
        assert_eq!(state.edit.current().body, "");
    }

    #[test]
    fn test_sign_in_requires_token() {
        let mut state = state();
        state.open_sign_in();
        assert!(state.submit_sign_in().is_none());
        assert!(state.show_sign_in);
        assert!(!state.session.is_authenticated());
    }
}
