//! Credit gate - advisory pre-flight quota check
//!
//! The backend remains the authority on quota; this only avoids sending calls
//! that are certain to be refused.

use crate::models::CreditState;

#[derive(Clone, Debug, PartialEq)]
pub enum GateDecision {
    Allow,
    /// Quota exhausted; show the upgrade prompt instead of sending
    UpgradeRequired { remaining: f64 },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}

/// Block only when the remaining credits are a known, finite number `<= 0`.
/// Unknown credit state lets the call through.
pub fn check(credits: Option<&CreditState>) -> GateDecision {
    match credits.and_then(|c| c.remaining_credits) {
        Some(remaining) if remaining.is_finite() && remaining <= 0.0 => {
            GateDecision::UpgradeRequired { remaining }
        }
        _ => GateDecision::Allow,
    }
}
