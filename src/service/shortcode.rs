//! Short code generation and validation.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::{LinkError, Result};
use crate::service::{GENERATED_CODE_LENGTH, MAX_SHORT_CODE_LENGTH};

/// Generates a random alphanumeric short code.
pub fn generate_short_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Checks that a user-supplied short code is usable in a URL path.
pub fn validate_short_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(LinkError::InvalidRequest(
            "Short code cannot be empty".to_string(),
        ));
    }
    if code.len() > MAX_SHORT_CODE_LENGTH {
        return Err(LinkError::InvalidRequest(format!(
            "Short code exceeds maximum length of {} characters",
            MAX_SHORT_CODE_LENGTH
        )));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LinkError::InvalidRequest(format!(
            "Short code '{}' may only contain letters, digits, '-' and '_'",
            code
        )));
    }
    Ok(())
}
