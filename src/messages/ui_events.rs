//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::viewer::{RequestView, ResponseView, ViewTab};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Catalog
    NextEndpoint,
    PrevEndpoint,
    OpenSelectedEndpoint,
    /// Open an endpoint by slug, falling back to the default view
    Navigate(String),

    // Edit mode
    BeginEdit,
    SaveEdits,
    CancelEdits,

    // Field input
    StartTyping,
    StopTyping,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Params / headers
    NextParam,
    PrevParam,
    NextHeader,
    PrevHeader,
    NextHeaderField,
    AddHeader,
    DeleteHeader,

    // Test execution
    SendTest,
    RefreshCredits,

    // Response viewer
    SelectTab(ViewTab),
    SelectResponseView(ResponseView),
    SelectRequestView(RequestView),

    // Session
    OpenSignIn,
    SignInChar(char),
    SignInBackspace,
    SignInNextField,
    SubmitSignIn,
    CancelSignIn,
    SignOut,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissUpgrade,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Catalog,
    Params,
    Headers,
    Body,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Catalog => Panel::Params,
            Panel::Params => Panel::Headers,
            Panel::Headers => Panel::Body,
            Panel::Body => Panel::Response,
            Panel::Response => Panel::Catalog,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Catalog => Panel::Response,
            Panel::Params => Panel::Catalog,
            Panel::Headers => Panel::Params,
            Panel::Body => Panel::Headers,
            Panel::Response => Panel::Body,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Panel::Params | Panel::Headers | Panel::Body)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Field being typed into in the sign-in popup
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SignInField {
    Token,
    Hash,
}

/// Which half of a header is being typed into
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeaderField {
    Key,
    Value,
}

/// UI context needed to map a key press
#[derive(Clone, Copy, Debug)]
pub struct KeyContext {
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub edit_mode: bool,
    pub show_help: bool,
    pub show_sign_in: bool,
    pub show_upgrade: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') if ctx.edit_mode && !ctx.show_sign_in => {
                return Some(UiEvent::SaveEdits)
            }
            _ => {}
        }
    }

    // Popups first
    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }

    if ctx.show_upgrade {
        return Some(UiEvent::DismissUpgrade);
    }

    if ctx.show_sign_in {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelSignIn),
            KeyCode::Enter => Some(UiEvent::SubmitSignIn),
            KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::SignInNextField),
            KeyCode::Backspace => Some(UiEvent::SignInBackspace),
            KeyCode::Char(c) => Some(UiEvent::SignInChar(c)),
            _ => None,
        };
    }

    match ctx.input_mode {
        InputMode::Editing => handle_typing_keys(key, ctx.active_panel),
        InputMode::Normal => handle_normal_keys(key, ctx),
    }
}

fn handle_typing_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopTyping),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab if active_panel == Panel::Headers => Some(UiEvent::NextHeaderField),
        KeyCode::Enter if active_panel == Panel::Body => Some(UiEvent::CharInput('\n')),
        KeyCode::Enter => Some(UiEvent::StopTyping),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_normal_keys(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    let panel = ctx.active_panel;
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char('s') => Some(UiEvent::SendTest),
        KeyCode::Char('r') => Some(UiEvent::RefreshCredits),
        KeyCode::Char('l') => Some(UiEvent::OpenSignIn),
        KeyCode::Char('L') => Some(UiEvent::SignOut),

        // Viewer tabs
        KeyCode::Char('1') => Some(UiEvent::SelectTab(ViewTab::Response)),
        KeyCode::Char('2') => Some(UiEvent::SelectTab(ViewTab::Request)),
        KeyCode::Char('3') => Some(UiEvent::SelectTab(ViewTab::Info)),
        KeyCode::Char('p') => Some(UiEvent::SelectResponseView(ResponseView::Pretty)),
        KeyCode::Char('w') => Some(UiEvent::SelectResponseView(ResponseView::Raw)),
        KeyCode::Char('h') => Some(UiEvent::SelectResponseView(ResponseView::Headers)),
        KeyCode::Char('P') => Some(UiEvent::SelectRequestView(RequestView::Params)),
        KeyCode::Char('H') => Some(UiEvent::SelectRequestView(RequestView::Headers)),
        KeyCode::Char('B') => Some(UiEvent::SelectRequestView(RequestView::Body)),

        // Edit mode
        KeyCode::Char('e') if !ctx.edit_mode => Some(UiEvent::BeginEdit),
        KeyCode::Esc if ctx.edit_mode => Some(UiEvent::CancelEdits),
        KeyCode::Char('a') if ctx.edit_mode && panel == Panel::Headers => Some(UiEvent::AddHeader),
        KeyCode::Char('d') if ctx.edit_mode && panel == Panel::Headers => Some(UiEvent::DeleteHeader),

        KeyCode::Enter => match panel {
            Panel::Catalog => Some(UiEvent::OpenSelectedEndpoint),
            Panel::Params | Panel::Headers | Panel::Body if ctx.edit_mode => {
                Some(UiEvent::StartTyping)
            }
            _ => None,
        },
        KeyCode::Up => match panel {
            Panel::Catalog => Some(UiEvent::PrevEndpoint),
            Panel::Params => Some(UiEvent::PrevParam),
            Panel::Headers => Some(UiEvent::PrevHeader),
            Panel::Body | Panel::Response => Some(UiEvent::ScrollUp),
        },
        KeyCode::Down => match panel {
            Panel::Catalog => Some(UiEvent::NextEndpoint),
            Panel::Params => Some(UiEvent::NextParam),
            Panel::Headers => Some(UiEvent::NextHeader),
            Panel::Body | Panel::Response => Some(UiEvent::ScrollDown),
        },
        _ => None,
    }
}
