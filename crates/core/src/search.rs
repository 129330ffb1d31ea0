//! Global search input rules.

use crate::error::CoreError;

/// Minimum query length, counted in characters after trimming.
pub const MIN_QUERY_CHARS: usize = 2;

/// Validate the `q` parameter and return it trimmed.
///
/// Absent or blank input is a missing parameter; anything shorter than
/// [`MIN_QUERY_CHARS`] after trimming is invalid.
pub fn validate_query(q: Option<&str>) -> Result<&str, CoreError> {
    let trimmed = match q.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => return Err(CoreError::MissingParameter("q")),
    };

    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(CoreError::invalid_param(
            "q",
            format!("must be at least {MIN_QUERY_CHARS} characters"),
        ));
    }

    Ok(trimmed)
}
