//! Users and roles.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user, as cached in the session store.
///
/// Serialized with the keys `id, email, name, role, createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    #[default]
    EventOwner,
}

impl User {
    /// Display name derived from an email address: everything before the first `@`.
    pub fn name_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or_default().to_string()
    }

    /// First character of the name, uppercased (used as an avatar).
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Admin => "Administrator",
            UserRole::Staff => "Staff",
            UserRole::EventOwner => "Event owner",
        };
        f.write_str(label)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
