//! Link Service Module
//!
//! Ties the popularity cache to the durable store: lookup with fallback,
//! access accounting, cache maintenance hooks and the sweep/guard passes.

mod links;
mod shortcode;

pub use links::LinkService;
pub use shortcode::{generate_short_code, validate_short_code};

// == Public Constants ==
/// Maximum allowed short code length in characters
pub const MAX_SHORT_CODE_LENGTH: usize = 64;

/// Length of generated short codes
pub const GENERATED_CODE_LENGTH: usize = 8;

/// Attempts at generating an unused short code before giving up
pub const MAX_GENERATION_ATTEMPTS: usize = 5;
