//! Shortlink Cache - a URL shortener with a popularity-ranked cache
//!
//! Resolves short codes through a bounded in-memory cache that evicts the
//! least accessed links, backed by an authoritative durable store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{LinkError, Result};
pub use service::LinkService;
pub use tasks::Scheduler;
