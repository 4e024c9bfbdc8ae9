//! Network layer - HTTP execution of test calls and credit refreshes
//!
//! The Network actor receives commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
