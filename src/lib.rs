//! Balance Proxy - a read-through caching proxy for account balances
//!
//! Extracts an 8-digit account number from each request, serves a cached
//! balance for up to two minutes, and otherwise asks the upstream lookup
//! service, answering with 200, 404 or 503.

pub mod account;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod outcome;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use service::{BalanceService, BALANCE_TTL};
pub use tasks::spawn_cleanup_task;
