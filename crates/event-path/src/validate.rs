//! Validation functions for map keys embedded in field paths.

use crate::types::{FieldPath, Segment};
use crate::PathError;

/// Characters that carry structure in one of the two key forms.
pub const RESERVED_CHARS: [char; 3] = ['.', '[', ']'];

/// Validate a single map key.
///
/// Map keys are inserted into rendered keys without escaping, so a key
/// holding a reserved character renders fine but does not parse back to
/// the same path.
///
/// # Example
///
/// ```
/// use event_path::validate_key;
///
/// validate_key("version").unwrap();
/// validate_key("").unwrap();
/// validate_key("a.b").unwrap_err();
/// validate_key("tags[0]").unwrap_err();
/// ```
pub fn validate_key(key: &str) -> Result<(), PathError> {
    match key.chars().find(|c| RESERVED_CHARS.contains(c)) {
        Some(c) => Err(PathError::ReservedCharacter(c)),
        None => Ok(()),
    }
}

/// Validate every map key of a path.
pub fn validate_path(path: &FieldPath) -> Result<(), PathError> {
    for segment in path.segments() {
        if let Segment::Key(key) = segment {
            validate_key(key)?;
        }
    }
    Ok(())
}
