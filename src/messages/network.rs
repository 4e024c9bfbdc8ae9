//! Network messages - communication between App and Network layers

use crate::builder::ResolvedRequest;
use crate::models::{CredentialContext, CreditState, ResponseRecord};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute one test call against a catalog endpoint
    ExecuteTest {
        id: u64,
        /// Session epoch the credentials were taken from
        epoch: u64,
        request: ResolvedRequest,
    },
    /// Re-fetch the caller's credit state
    RefreshCredits {
        epoch: u64,
        credentials: CredentialContext,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// The exchange finished, either with an HTTP response or a transport failure
    TestFinished {
        id: u64,
        record: ResponseRecord,
    },
    /// The backend answered 401; the session must be dropped
    SessionExpired {
        /// Test id, or `None` when a credit refresh triggered it
        id: Option<u64>,
        epoch: u64,
    },
    /// Fresh credit state
    Credits {
        epoch: u64,
        credits: CreditState,
    },
    /// Credit refresh failed; display data stays as it was
    CreditsFailed {
        epoch: u64,
        message: String,
    },
}

impl NetworkResponse {
    /// Test id this response belongs to, if any
    pub fn test_id(&self) -> Option<u64> {
        match self {
            NetworkResponse::TestFinished { id, .. } => Some(*id),
            NetworkResponse::SessionExpired { id, .. } => *id,
            NetworkResponse::Credits { .. } | NetworkResponse::CreditsFailed { .. } => None,
        }
    }
}
