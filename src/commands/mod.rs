pub mod auth;
pub mod dashboard;
pub mod events;
pub mod new;
pub mod show;
