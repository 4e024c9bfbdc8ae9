//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Credits for a session restored from disk
        let startup = self.state.credit_refresh_command();
        self.send(startup);

        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.send(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, command: Option<NetworkCommand>) {
        if let Some(cmd) = command {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        // Notices last until the next key press
        self.state.notice = None;

        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Catalog
            UiEvent::NextEndpoint => self.state.next_endpoint(),
            UiEvent::PrevEndpoint => self.state.prev_endpoint(),
            UiEvent::OpenSelectedEndpoint => self.state.open_selected_endpoint(),
            UiEvent::Navigate(slug) => self.state.navigate(&slug),

            // Edit mode
            UiEvent::BeginEdit => self.state.begin_edit(),
            UiEvent::SaveEdits => self.state.save_edits(),
            UiEvent::CancelEdits => self.state.cancel_edits(),

            // Field input
            UiEvent::StartTyping => self.state.start_typing(),
            UiEvent::StopTyping => self.state.stop_typing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Params / headers
            UiEvent::NextParam => self.state.next_param(),
            UiEvent::PrevParam => self.state.prev_param(),
            UiEvent::NextHeader => self.state.next_header(),
            UiEvent::PrevHeader => self.state.prev_header(),
            UiEvent::NextHeaderField => self.state.next_header_field(),
            UiEvent::AddHeader => self.state.add_header(),
            UiEvent::DeleteHeader => self.state.delete_header(),

            // Test execution
            UiEvent::SendTest => {
                let cmd = self.state.prepare_test();
                self.send(cmd);
            }
            UiEvent::RefreshCredits => {
                let cmd = self.state.refresh_credits();
                self.send(cmd);
            }

            // Response viewer
            UiEvent::SelectTab(tab) => self.state.select_tab(tab),
            UiEvent::SelectResponseView(view) => self.state.select_response_view(view),
            UiEvent::SelectRequestView(view) => self.state.select_request_view(view),

            // Session
            UiEvent::OpenSignIn => self.state.open_sign_in(),
            UiEvent::SignInChar(c) => self.state.sign_in_char(c),
            UiEvent::SignInBackspace => self.state.sign_in_backspace(),
            UiEvent::SignInNextField => self.state.sign_in_next_field(),
            UiEvent::SubmitSignIn => {
                let cmd = self.state.submit_sign_in();
                self.send(cmd);
            }
            UiEvent::CancelSignIn => self.state.cancel_sign_in(),
            UiEvent::SignOut => self.state.sign_out(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissUpgrade => self.state.dismiss_upgrade(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
