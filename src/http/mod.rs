//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the health, language listing and transcript routes
//! - JSON error responses
//! - Port selection at startup
//! - CORS and request tracing middleware

pub mod handlers;
pub mod listener;
pub mod routes;

pub use listener::bind_first_free;
pub use routes::create_router;
