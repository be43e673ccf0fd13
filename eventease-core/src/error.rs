//! Error types for EventEase.

use thiserror::Error;

/// Errors that can occur in EventEase operations.
#[derive(Error, Debug)]
pub enum EventEaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Login failed")]
    LoginFailed(#[source] Box<EventEaseError>),

    #[error("Registration failed")]
    RegistrationFailed(#[source] Box<EventEaseError>),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("{0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for EventEase operations.
pub type EventEaseResult<T> = Result<T, EventEaseError>;
