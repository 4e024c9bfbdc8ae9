//! API Console - Actor-based terminal console for trying catalog endpoints
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use apiconsole_tui::app::{AppActor, AppState, RequestPhase};
use apiconsole_tui::catalog::Catalog;
use apiconsole_tui::config::Config;
use apiconsole_tui::constants::{APP_NAME, LOG_FILE_NAME};
use apiconsole_tui::messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
use apiconsole_tui::messages::ui_events::{key_to_ui_event, HeaderField, InputMode, Panel, SignInField};
use apiconsole_tui::network::NetworkActor;
use apiconsole_tui::storage::Storage;
use apiconsole_tui::ui::{self, credits_label, highlight_json, method_color, notice_color, status_color};
use apiconsole_tui::viewer::{RequestView, ResponseView, ViewTab};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    std::fs::create_dir_all(&config.data_dir)?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(&config.data_dir, LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(
        data_dir = %config.data_dir.display(),
        base_url = ?config.api_base_url,
        "Starting console"
    );
    if config.api_base_url.is_none() {
        tracing::warn!("API_BASE_URL is not set; relative endpoint URLs will fail to send");
    }

    let storage = Storage::open(&config.data_dir);
    let catalog = match Catalog::load(&config.collections_dir()) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring user collections");
            Catalog::builtin()?
        }
    };
    let state = AppState::new(catalog, &config, storage);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx, &config);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Optional endpoint slug to open first
    if let Some(slug) = std::env::args().nth(1) {
        let _ = ui_tx.send(UiEvent::Navigate(slug));
    }

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.key_context()) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(main_chunks[1]);

    draw_catalog(f, state, content[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Descriptor
            Constraint::Length(10), // Params / Headers / Body
            Constraint::Min(5),     // Response
        ])
        .split(content[1]);

    draw_descriptor(f, state, right[0]);
    draw_request_panels(f, state, right[1]);
    draw_response(f, state, right[2]);

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }

    if state.show_sign_in {
        draw_sign_in_popup(f, state, area);
    }

    if state.show_upgrade {
        draw_upgrade_popup(f, state, area);
    }
}

fn focus_style(state: &RenderState, panel: Panel) -> Style {
    let is_focused = state.active_panel == panel;
    if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let session = match (&state.account_label, state.authenticated) {
        (Some(label), true) => Span::styled(format!(" {} ", label), Style::default().fg(Color::Green)),
        (None, true) => Span::styled(" signed in ", Style::default().fg(Color::Green)),
        (_, false) => Span::styled(" signed out (l:sign in) ", Style::default().fg(Color::DarkGray)),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::raw(" "),
        session,
        Span::raw("| "),
        Span::styled(credits_label(state.credits.as_ref()), Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_catalog(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut last_collection: Option<&str> = None;

    for (i, entry) in state.catalog.iter().enumerate() {
        if last_collection != Some(entry.collection.as_str()) {
            items.push(ListItem::new(Line::from(Span::styled(
                entry.collection.clone(),
                Style::default().fg(Color::DarkGray).bold(),
            ))));
            last_collection = Some(entry.collection.as_str());
        }
        if i == state.selected_endpoint {
            selected_row = Some(items.len());
        }

        let is_open = state.descriptor.as_ref().map(|d| d.slug == entry.slug).unwrap_or(false);
        let marker = if is_open { "*" } else { " " };
        items.push(ListItem::new(Line::from(vec![
            Span::raw(format!("{} ", marker)),
            Span::styled(
                format!("{:6}", entry.method.as_str()),
                Style::default().fg(method_color(entry.method)).bold(),
            ),
            Span::raw(format!(" {}", entry.name)),
        ])));
    }

    let highlight_style = if state.active_panel == Panel::Catalog {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().bold()
    };

    let list = List::new(items)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(state, Panel::Catalog))
            .title(format!(" Endpoints ({}) ", state.catalog.len())))
        .highlight_style(highlight_style);

    let mut list_state = ListState::default();
    list_state.select(selected_row);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_descriptor(f: &mut Frame, state: &RenderState, area: Rect) {
    let descriptor = match &state.descriptor {
        Some(d) => d,
        None => {
            f.render_widget(Paragraph::new("No endpoint selected").block(Block::default().borders(Borders::ALL)), area);
            return;
        }
    };

    let loading = if state.is_loading { " [...]" } else { "" };
    let editing = if state.edit_mode { " [editing]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {}{}{} ", descriptor.method.as_str(), descriptor.display_name(), loading, editing))
        .title_style(Style::default().fg(method_color(descriptor.method)).bold());

    let mut lines = vec![Line::from(descriptor.url.clone())];
    let mut detail = descriptor.description.clone();
    if !descriptor.auth.kind.is_empty() {
        detail.push_str(&format!("  [auth: {}]", descriptor.auth.kind));
    }
    lines.push(Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_request_panels(f: &mut Frame, state: &RenderState, area: Rect) {
    let tabs_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    // Catalog and Response focus keep showing the params
    let shown = match state.active_panel {
        Panel::Headers => Panel::Headers,
        Panel::Body => Panel::Body,
        _ => Panel::Params,
    };
    let selected_tab = match shown {
        Panel::Headers => 1,
        Panel::Body => 2,
        _ => 0,
    };

    let tabs = ui::render_tabs(&["Params", "Headers", "Body"], selected_tab);
    f.render_widget(tabs, tabs_area[0]);

    match shown {
        Panel::Headers => draw_headers_panel(f, state, tabs_area[1]),
        Panel::Body => draw_body_panel(f, state, tabs_area[1]),
        _ => draw_params_panel(f, state, tabs_area[1]),
    }
}

/// Put the terminal cursor inside a bordered row
fn set_row_cursor(f: &mut Frame, area: Rect, row: usize, prefix: &str, value: &str, cursor: usize) {
    let typed = value.get(..cursor).unwrap_or(value).chars().count();
    let offset = (prefix.chars().count() + typed) as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    let cursor_x = (area.x + 1 + offset).min(max_x);
    let cursor_y = (area.y + 1 + row as u16).min(area.y + area.height.saturating_sub(2));
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

fn draw_params_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Params;
    let params = &state.request.params;

    let items: Vec<ListItem> = if params.is_empty() {
        vec![ListItem::new(Span::styled("(no parameters)", Style::default().fg(Color::DarkGray)))]
    } else {
        params.iter()
            .enumerate()
            .map(|(i, p)| {
                let style = if is_focused && i == state.selected_param {
                    Style::default().fg(Color::Yellow).bold()
                } else {
                    Style::default()
                };
                let value = if p.value.is_empty() { "<empty>" } else { p.value.as_str() };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:5} ", p.location.as_str()), Style::default().fg(Color::DarkGray)),
                    Span::styled(format!("{} = {}", p.key, value), style),
                    Span::styled(format!("  {}", p.description), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect()
    };

    let title = if state.edit_mode {
        " Params (Enter:type) "
    } else {
        " Params (e:edit) "
    };
    let list = List::new(items)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(state, Panel::Params))
            .title(title));
    f.render_widget(list, area);

    if is_focused && state.input_mode == InputMode::Editing {
        if let Some(p) = params.get(state.selected_param) {
            let prefix = format!("{:5} {} = ", p.location.as_str(), p.key);
            set_row_cursor(f, area, state.selected_param, &prefix, &p.value, state.cursor_position);
        }
    }
}

fn draw_headers_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Headers;

    let items: Vec<ListItem> = state.request.headers.iter()
        .enumerate()
        .map(|(i, h)| {
            let style = if is_focused && i == state.selected_header {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            ListItem::new(format!("{}: {}", h.key, h.value)).style(style)
        })
        .collect();

    let title = if state.edit_mode {
        " Headers (a:add d:del Enter:type Tab:key/value) "
    } else {
        " Headers (e:edit) "
    };
    let list = List::new(items)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(state, Panel::Headers))
            .title(title));
    f.render_widget(list, area);

    if is_focused && state.input_mode == InputMode::Editing {
        if let Some(h) = state.request.headers.get(state.selected_header) {
            match state.header_field {
                HeaderField::Key => set_row_cursor(f, area, state.selected_header, "", &h.key, state.cursor_position),
                HeaderField::Value => {
                    let prefix = format!("{}: ", h.key);
                    set_row_cursor(f, area, state.selected_header, &prefix, &h.value, state.cursor_position);
                }
            }
        }
    }
}

fn draw_body_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Body;
    let sends_body = state.descriptor.as_ref().map(|d| d.method.sends_body()).unwrap_or(false);

    let title = if !sends_body {
        " Body (not sent for GET) "
    } else if state.edit_mode {
        " Body (Enter:type) "
    } else {
        " Body (e:edit) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Body))
        .title(title);

    let mut lines = highlight_json(&state.request.body);
    if let Some(descriptor) = &state.descriptor {
        if !descriptor.request_schema.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Schema:", Style::default().fg(Color::DarkGray))));
            for field in &descriptor.request_schema {
                let required = if field.required { "required" } else { "optional" };
                lines.push(Line::from(Span::styled(
                    format!("  {} ({}, {}) {}", field.field, field.field_type, required, field.description),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    let body = Paragraph::new(lines).block(block);
    f.render_widget(body, area);

    if is_focused && state.input_mode == InputMode::Editing {
        let before = state.request.body.get(..state.cursor_position).unwrap_or(state.request.body.as_str());
        let row = before.matches('\n').count();
        let last_line = before.rsplit('\n').next().unwrap_or("");
        set_row_cursor(f, area, row, "", last_line, last_line.len());
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let border_style = focus_style(state, Panel::Response);

    let record = match &state.response {
        Some(record) => record,
        None => {
            let message = match state.phase {
                RequestPhase::Sending { .. } => "Sending...",
                RequestPhase::Unauthorized => "Session expired. Press 'l' to sign in again.",
                _ => "Press 's' to send a test call.",
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" Response [{}] ", state.phase.as_str()));
            f.render_widget(Paragraph::new(message).block(block), area);
            return;
        }
    };

    let status_text = match record.status_code() {
        Some(code) => Span::styled(
            format!(" {} {} ", code, record.status_text()),
            Style::default().fg(status_color(code)).bold(),
        ),
        None => Span::styled(
            format!(" {} - {} ", record.status_label(), record.status_text()),
            Style::default().fg(Color::Red).bold(),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(status_text)
        .title_bottom(Line::from(format!(
            " {}ms | {} ",
            record.timing_ms,
            apiconsole_tui::viewer::format_size(record.body_size())
        )).right_aligned());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    // Top-level tab plus its sub-tabs on one row
    let tab_titles: Vec<&str> = ViewTab::ALL.iter().map(|t| t.title()).collect();
    let tab_index = ViewTab::ALL.iter().position(|t| *t == state.viewer.tab).unwrap_or(0);
    let sub_tabs = match state.viewer.tab {
        ViewTab::Response => {
            let titles: Vec<&str> = ResponseView::ALL.iter().map(|v| v.title()).collect();
            let index = ResponseView::ALL.iter().position(|v| *v == state.viewer.response_view).unwrap_or(0);
            Some((titles, index))
        }
        ViewTab::Request => {
            let titles: Vec<&str> = RequestView::ALL.iter().map(|v| v.title()).collect();
            let index = RequestView::ALL.iter().position(|v| *v == state.viewer.request_view).unwrap_or(0);
            Some((titles, index))
        }
        ViewTab::Info => None,
    };

    let tab_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(parts[0]);
    f.render_widget(ui::render_tabs(&tab_titles, tab_index), tab_row[0]);
    if let Some((titles, index)) = sub_tabs {
        f.render_widget(ui::render_tabs(&titles, index), tab_row[1]);
    }

    let highlighted = matches!(
        (state.viewer.tab, state.viewer.response_view),
        (ViewTab::Response, ResponseView::Pretty) | (ViewTab::Response, ResponseView::Raw)
    ) || (state.viewer.tab == ViewTab::Request && state.viewer.request_view == RequestView::Body);

    let lines = if highlighted {
        highlight_json(&state.response_text)
    } else {
        state.response_text.lines().map(|l| Line::from(l.to_string())).collect()
    };
    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.viewer.scroll, 0));
    f.render_widget(content, parts[1]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(notice) = &state.notice {
        let bar = Paragraph::new(format!(" {} ", notice.message))
            .style(Style::default().fg(notice_color(notice.level)));
        f.render_widget(bar, area);
        return;
    }

    let status = if state.is_loading {
        " Sending... "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop typing | arrows:move | Ctrl+S:keep edits "
    } else if state.edit_mode {
        " Enter:type | Ctrl+S:keep edits | Esc:discard edits | s:send "
    } else {
        " Tab:panel | Enter:open | e:edit | s:send | r:credits | ?:help | q:quit "
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 75, area);

    let help_text = r#"
 API CONSOLE - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Move selection / scroll response
   Enter              Open endpoint (catalog)

 REQUEST
   e                  Edit params, headers and body
   Enter              Type into the selected field
   Ctrl+S             Keep edits
   Esc                Discard edits
   a / d              Add / delete header (edit mode)
   s                  Send test call

 RESPONSE
   1 / 2 / 3          Response / Request / Info tab
   p / w / h          Pretty / Raw / Headers
   P / H / B          Request params / headers / body

 ACCOUNT
   l                  Sign in with a session token
   L                  Sign out
   r                  Refresh credits

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_sign_in_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(70, 30, area);

    let field_style = |field: SignInField| {
        if state.sign_in_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    let masked = "*".repeat(state.sign_in_token.chars().count());

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" Session token: ", field_style(SignInField::Token)),
            Span::raw(masked),
        ]),
        Line::from(vec![
            Span::styled(" Auth hash:     ", field_style(SignInField::Hash)),
            Span::raw(state.sign_in_hash.clone()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Tab:switch field | Enter:sign in | Esc:cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sign in ")
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn draw_upgrade_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 30, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(" You have used all of your credits."),
        Line::from(" Upgrade your plan to keep testing endpoints."),
        Line::from(""),
    ];
    if let Some(url) = &state.upgrade_url {
        lines.push(Line::from(Span::styled(format!(" {}", url), Style::default().fg(Color::Cyan))));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(" Press any key to close", Style::default().fg(Color::DarkGray))));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Upgrade required ")
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
