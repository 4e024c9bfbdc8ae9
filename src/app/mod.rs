//! App layer - owns the console state
//!
//! The App actor applies UI events and network results one at a time and
//! decides which network commands to issue.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::{AppState, Notice, NoticeLevel, RequestPhase};
pub use actor::AppActor;
