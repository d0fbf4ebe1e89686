//! Input sanitization
//!
//! User-supplied query fields are reduced to a safe whitelist before they are
//! forwarded to NCBI or used to name directories.

/// Return a copy of `input` containing only ASCII letters, digits,
/// underscore, and space. All other characters are removed.
///
/// Sanitizing is idempotent; the empty string is a valid output and callers
/// must check it for required fields.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ' ')
        .collect()
}
