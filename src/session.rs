//! Session context - the bearer token and per-account auth hash
//!
//! Owned by the app actor and passed explicitly to whatever needs credentials.
//! Every mutation bumps an epoch so late results from an older session can be
//! recognized and dropped.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::constants::{SESSION_PROFILE_KEY, SESSION_TOKEN_KEY};
use crate::models::CredentialContext;
use crate::storage::Storage;

/// Minimal profile persisted next to the token
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub auth_hash: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    token: Option<String>,
    profile: Option<Profile>,
    epoch: u64,
}

impl SessionContext {
    /// Restore the session persisted by a previous run
    pub fn restore(storage: &Storage) -> Self {
        let token = storage
            .get_str(SESSION_TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let profile = storage
            .get(SESSION_PROFILE_KEY)
            .and_then(|v| serde_json::from_value::<Profile>(v.clone()).ok());

        SessionContext {
            token,
            profile,
            epoch: 0,
        }
    }

    pub fn set_session(
        &mut self,
        storage: &mut Storage,
        token: impl Into<String>,
        profile: Profile,
    ) -> Result<()> {
        let token = token.into();
        self.token = Some(token.clone()).filter(|t| !t.is_empty());
        self.profile = Some(profile.clone());
        self.epoch += 1;

        storage.set(SESSION_TOKEN_KEY, serde_json::Value::String(token))?;
        storage.set(SESSION_PROFILE_KEY, serde_json::to_value(profile)?)?;
        Ok(())
    }

    /// Forget the session in memory first, then on disk
    pub fn clear_session(&mut self, storage: &mut Storage) -> Result<()> {
        self.token = None;
        self.profile = None;
        self.epoch += 1;

        storage.remove(SESSION_TOKEN_KEY)?;
        storage.remove(SESSION_PROFILE_KEY)?;
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn credentials(&self) -> CredentialContext {
        CredentialContext {
            bearer_token: self.token.clone(),
            auth_hash: self
                .profile
                .as_ref()
                .and_then(|p| p.auth_hash.clone())
                .filter(|h| !h.is_empty()),
        }
    }
}
