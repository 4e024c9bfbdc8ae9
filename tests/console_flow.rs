//! End-to-end flows through the app state and the HTTP client against a mock backend

use apiconsole_tui::app::{AppState, RequestPhase};
use apiconsole_tui::catalog::Catalog;
use apiconsole_tui::config::Config;
use apiconsole_tui::messages::{NetworkCommand, NetworkResponse};
use apiconsole_tui::network::client::{create_client, execute_test, fetch_credits};
use apiconsole_tui::session::{Profile, SessionContext};
use apiconsole_tui::storage::Storage;
use apiconsole_tui::viewer::{RequestView, ViewTab};

fn console(base_url: String, storage: Storage) -> AppState {
    let config = Config {
        api_base_url: Some(base_url),
        ..Config::default()
    };
    AppState::new(Catalog::builtin().unwrap(), &config, storage)
}

fn sign_in(state: &mut AppState) {
    let profile = Profile {
        auth_hash: Some("H".to_string()),
        email: Some("dev@example.com".to_string()),
        name: None,
    };
    state.session.set_session(&mut state.storage, "T", profile).unwrap();
}

/// Run a command the way the network actor would
async fn run(command: NetworkCommand, base_url: &str) -> NetworkResponse {
    let client = create_client(None);
    match command {
        NetworkCommand::ExecuteTest { id, epoch, request } => execute_test(&client, request, id, epoch).await,
        NetworkCommand::RefreshCredits { epoch, credentials } => {
            fetch_credits(&client, Some(base_url), &credentials, epoch).await
        }
        NetworkCommand::Shutdown => panic!("unexpected shutdown"),
    }
}

#[tokio::test]
async fn test_rapid_double_send_makes_one_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/account/profile")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"email":"dev@example.com"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut state = console(server.url(), Storage::in_memory());
    let first = state.prepare_test();
    let second = state.prepare_test();
    assert!(second.is_none());

    let response = run(first.unwrap(), &server.url()).await;
    // Signed out: no credit refresh follows
    assert!(state.handle_response(response).is_none());

    mock.assert_async().await;
    assert_eq!(state.phase, RequestPhase::Succeeded);
    let record = state.response.as_ref().unwrap();
    assert_eq!(record.status_code(), Some(200));
    assert_eq!(state.viewer.tab, ViewTab::Response);
}

#[tokio::test]
async fn test_success_refreshes_credits_then_gate_blocks() {
    let mut server = mockito::Server::new_async().await;
    let call = server
        .mock("GET", "/v1/validate/email/jane.doe@example.com")
        .match_query(mockito::Matcher::UrlEncoded("smtp".into(), "true".into()))
        .match_header("authorization", "Bearer T")
        .match_header("x-auth-token", "H")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"valid":true}"#)
        .expect(1)
        .create_async()
        .await;
    let _credits = server
        .mock("GET", "/user/credits")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"remainingCredits":0,"totalCredits":100}"#)
        .create_async()
        .await;

    let mut state = console(server.url(), Storage::in_memory());
    sign_in(&mut state);
    state.navigate("validate-email");

    let response = run(state.prepare_test().unwrap(), &server.url()).await;
    let refresh = state.handle_response(response).expect("credit refresh after success");
    assert_eq!(state.viewer.request_view, RequestView::Params);

    let credits = run(refresh, &server.url()).await;
    assert!(state.handle_response(credits).is_none());
    assert_eq!(state.credits.as_ref().unwrap().remaining_credits, Some(0.0));

    // Quota gone: nothing is sent
    assert!(state.prepare_test().is_none());
    assert!(state.show_upgrade);
    call.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_signs_out_and_forgets_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/v1/account/profile")
        .with_status(401)
        .with_body(r#"{"message":"expired"}"#)
        .create_async()
        .await;

    let mut state = console(server.url(), Storage::open(dir.path()));
    sign_in(&mut state);
    assert!(SessionContext::restore(&Storage::open(dir.path())).is_authenticated());

    let response = run(state.prepare_test().unwrap(), &server.url()).await;
    assert!(matches!(response, NetworkResponse::SessionExpired { id: Some(_), .. }));
    assert!(state.handle_response(response).is_none());

    assert!(!state.session.is_authenticated());
    assert!(state.response.is_none());
    assert_eq!(state.phase, RequestPhase::Unauthorized);
    assert_eq!(state.storage.history_len(), 0);

    // A fresh process sees no session either
    assert!(!SessionContext::restore(&Storage::open(dir.path())).is_authenticated());
}

#[tokio::test]
async fn test_credit_refresh_unauthorized_signs_out() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    let credits = server
        .mock("GET", "/user/credits")
        .match_header("authorization", "Bearer T")
        .with_status(401)
        .with_body(r#"{"message":"expired"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut state = console(server.url(), Storage::open(dir.path()));
    sign_in(&mut state);

    let response = run(state.credit_refresh_command().unwrap(), &server.url()).await;
    assert!(matches!(response, NetworkResponse::SessionExpired { id: None, .. }));
    assert!(state.handle_response(response).is_none());
    credits.assert_async().await;

    assert!(!state.session.is_authenticated());
    assert!(state.credits.is_none());
    assert!(state.credit_refresh_command().is_none());
    assert!(!SessionContext::restore(&Storage::open(dir.path())).is_authenticated());
}

#[tokio::test]
async fn test_transport_failure_is_shown_as_error_record() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base = format!("http://127.0.0.1:{}", port);

    let mut state = console(base.clone(), Storage::in_memory());
    sign_in(&mut state);

    let response = run(state.prepare_test().unwrap(), &base).await;
    // No credit refresh after a transport failure
    assert!(state.handle_response(response).is_none());

    assert_eq!(state.phase, RequestPhase::Failed);
    let record = state.response.as_ref().unwrap();
    assert!(record.is_error());
    assert_eq!(record.status_label(), "Error");
    assert!(state.session.is_authenticated());
}
