//! Messages exchanged between the UI, App and Network layers.
//!
//! UI events flow into the App actor, network commands flow out of it, and
//! every state change is published back to the UI as a render snapshot.

pub mod ui_events;
pub mod network;
pub mod render;

pub use ui_events::{key_to_ui_event, KeyContext, UiEvent};
pub use network::{NetworkCommand, NetworkResponse};
pub use render::{CatalogEntry, RenderState};
