//! Validation utilities for incoming place lookups

/// Longest accepted city or country name
pub const MAX_PLACE_NAME_LENGTH: usize = 100;

/// Trim an optional field, treating blank values as absent
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate a city or country name
pub fn validate_place_name(name: &str) -> Result<(), &'static str> {
    if name.chars().count() > MAX_PLACE_NAME_LENGTH {
        return Err("Place name must be at most 100 characters");
    }
    if name.chars().any(char::is_control) {
        return Err("Place name must not contain control characters");
    }
    Ok(())
}
