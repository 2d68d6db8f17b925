//! HTTP request handlers.

pub mod auth;
pub mod comments;
pub mod health;
pub mod issues;
pub mod projects;
pub mod users;
