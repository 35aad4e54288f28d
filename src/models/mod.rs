//! Request and Response models for the link API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{RenameRequest, ShortenRequest};
pub use responses::{
    CacheCheckResponse, CacheStatsResponse, DeleteResponse, HealthResponse, LinkStatsResponse,
    RenameResponse, ShortenResponse, SweepResponse,
};
