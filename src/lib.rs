//! # API Console TUI
//!
//! A terminal console for trying the endpoints of a hosted REST API.
//!
//! ## Features
//! - Endpoint catalog grouped into collections (built in, plus YAML files)
//! - Editable params, headers and body per endpoint, kept in memory only
//! - Session token and auth hash injected into every test call
//! - Credit gate with an upgrade prompt when the quota is exhausted
//! - Response viewer with Pretty/Raw/Headers, request snapshot and cURL
//! - JSON syntax highlighting
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod error;
pub mod config;
pub mod models;
pub mod catalog;
pub mod builder;
pub mod gate;
pub mod storage;
pub mod session;
pub mod editor;
pub mod viewer;
pub mod curl;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{EndpointDescriptor, HttpMethod, Header, Param, ParamLocation, Collection, ResponseRecord, Outcome};
pub use catalog::{Catalog, Lookup};
pub use builder::{build_request, ResolvedRequest};
pub use config::Config;
pub use session::SessionContext;
pub use curl::to_curl;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
