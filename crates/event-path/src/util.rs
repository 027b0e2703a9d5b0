use crate::types::ROOT;
use crate::PathError;

/// Strip the `event.` root from a rendered key.
///
/// Returns `None` when the key belongs to some other namespace.
pub fn strip_root(key: &str) -> Option<&str> {
    key.strip_prefix(ROOT)?.strip_prefix('.')
}

/// Check if a string is a sequence index: one or more ASCII digits.
///
/// Leading zeros are tolerated, overflow is left to the caller's `parse`.
pub fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Split a root-stripped propagation path into its segments.
///
/// Every `.` is a separator, so an empty map key shows up as an empty segment.
pub fn split_propagation_path(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// Parse a full propagation key (`event.subscriptions.0.id`).
pub fn parse_propagation_key(key: &str) -> Result<Vec<&str>, PathError> {
    let path = strip_root(key).ok_or(PathError::MissingRoot)?;
    Ok(split_propagation_path(path))
}

/// Parse a root-stripped attribute path into the same segment list the
/// propagation form produces.
///
/// `subscriptions[0].id` becomes `["subscriptions", "0", "id"]`; several
/// bracket groups may follow one name (`a[0][1]`).
pub fn parse_attribute_path(path: &str) -> Result<Vec<String>, PathError> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (head, mut tail) = match part.find('[') {
            Some(at) => part.split_at(at),
            None => (part, ""),
        };
        if head.contains(']') {
            return Err(PathError::UnbalancedBracket);
        }
        if head.is_empty() && !tail.is_empty() {
            return Err(PathError::DetachedIndex);
        }
        segments.push(head.to_string());

        while !tail.is_empty() {
            let rest = tail
                .strip_prefix('[')
                .ok_or(PathError::UnbalancedBracket)?;
            let close = rest.find(']').ok_or(PathError::UnbalancedBracket)?;
            let index = &rest[..close];
            if !is_index(index) {
                return Err(PathError::InvalidIndex(index.to_string()));
            }
            segments.push(index.to_string());
            tail = &rest[close + 1..];
        }
    }
    Ok(segments)
}

/// Parse a full attribute key (`event.subscriptions[0].id`).
pub fn parse_attribute_key(key: &str) -> Result<Vec<String>, PathError> {
    let path = strip_root(key).ok_or(PathError::MissingRoot)?;
    parse_attribute_path(path)
}
