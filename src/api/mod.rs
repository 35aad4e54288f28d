//! API Module
//!
//! HTTP handlers and routing for the link service REST API.
//!
//! # Endpoints
//! - `POST /links/shorten` - Create a short link
//! - `GET /links/:code` - Redirect to the destination URL
//! - `PUT /links/:code` - Change a short code
//! - `DELETE /links/:code` - Delete a link
//! - `GET /links/:code/stats` - Per-link access statistics
//! - `GET /stats` - Popularity cache statistics
//! - `POST /admin/sweep` - Run an expiration sweep now
//! - `POST /admin/cache-check` - Run a cache-size guard pass now
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
