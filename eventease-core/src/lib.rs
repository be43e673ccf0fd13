//! Core types for EventEase.
//!
//! This crate holds everything the `eventease` binary renders:
//! - `event` and `user` for the data model
//! - `session` for the persisted login session (backed by a `storage::Storage`)
//! - `query` for searching, filtering and sorting event lists
//! - `draft` for validating new events before they are submitted

pub mod config;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod event;
pub mod identity;
pub mod query;
pub mod sample;
pub mod session;
pub mod storage;
pub mod user;

pub use error::{EventEaseError, EventEaseResult};
pub use event::{CustomField, Event, EventStatus, FieldType};
pub use user::{User, UserRole};
