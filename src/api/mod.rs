//! API Module
//!
//! HTTP handlers and routing for the balance proxy.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Read-through cache statistics
//! - any other path - Balance lookup for the 8-digit account number it contains

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
