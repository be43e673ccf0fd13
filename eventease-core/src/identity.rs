//! Credential exchange.
//!
//! An `IdentityProvider` turns credentials into a user profile plus a session
//! token. `MockIdentityProvider` accepts anything: it never checks or keeps the
//! password.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EventEaseResult;
use crate::user::{User, UserRole};

/// An issued session token, cached locally until it expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token: String,
    /// None for tokens that never expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionToken {
    /// Parse a persisted token entry.
    ///
    /// Accepts the JSON form written by `to_entry`, and falls back to treating
    /// any other non-empty string as a token without expiry.
    pub fn from_entry(raw: &str) -> Option<Self> {
        if let Ok(token) = serde_json::from_str::<SessionToken>(raw) {
            return Some(token);
        }

        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        Some(SessionToken {
            token: raw.to_string(),
            expires_at: None,
        })
    }

    pub fn to_entry(&self) -> EventEaseResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// What a successful login or registration hands back.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub token: SessionToken,
}

pub trait IdentityProvider {
    fn login(&self, email: &str, password: &str) -> EventEaseResult<Credentials>;

    fn register(&self, email: &str, password: &str, name: &str) -> EventEaseResult<Credentials>;
}

/// Accepts every login. Names are taken from the email's local part and every
/// user is an event owner.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    ttl: Duration,
}

impl MockIdentityProvider {
    pub fn new(ttl: Duration) -> Self {
        MockIdentityProvider { ttl }
    }

    fn issue(&self, email: &str, name: String) -> Credentials {
        let now = Utc::now();

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name,
            role: UserRole::EventOwner,
            created_at: now,
        };

        let token = SessionToken {
            token: format!("mock_{}", Uuid::new_v4().simple()),
            expires_at: Some(now + self.ttl),
        };

        Credentials { user, token }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        MockIdentityProvider::new(Duration::days(7))
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn login(&self, email: &str, _password: &str) -> EventEaseResult<Credentials> {
        Ok(self.issue(email, User::name_from_email(email)))
    }

    fn register(&self, email: &str, _password: &str, name: &str) -> EventEaseResult<Credentials> {
        Ok(self.issue(email, name.to_string()))
    }
}
