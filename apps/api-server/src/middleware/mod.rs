//! Middleware modules: request authentication and error rendering.

pub mod auth;
pub mod error;
