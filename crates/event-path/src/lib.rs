//! Event field path utilities.
//!
//! A field path is an ordered list of segments (vocabulary field, map key,
//! sequence index) rooted at the literal `event`. It has two renderings:
//!
//! - attribute form, for span attributes: `event.subscriptions[0].id`
//! - propagation form, for context carriers whose keys may only hold token
//!   characters: `event.subscriptions.0.id`
//!
//! Map keys are inserted verbatim. Keys holding `.`, `[` or `]` are not
//! escaped and will not parse back; see [`validate_key`].
//!
//! # Example
//!
//! ```
//! use event_path::{parse_attribute_key, vocab, FieldPath};
//!
//! let path = FieldPath::root()
//!     .field(vocab::SUBSCRIPTIONS)
//!     .index(0)
//!     .field(vocab::ID);
//! assert_eq!(path.to_attribute_key(), "event.subscriptions[0].id");
//! assert_eq!(path.to_propagation_key(), "event.subscriptions.0.id");
//!
//! let segments = parse_attribute_key("event.subscriptions[0].id").unwrap();
//! assert_eq!(segments, vec!["subscriptions", "0", "id"]);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{FieldPath, KeyForm, Segment, ROOT};

pub mod util;
pub use util::{
    is_index, parse_attribute_key, parse_attribute_path, parse_propagation_key,
    split_propagation_path, strip_root,
};

pub mod validate;
pub use validate::{validate_key, validate_path, RESERVED_CHARS};

pub mod vocab;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Key is not rooted at `event.`")]
    MissingRoot,
    #[error("Unbalanced bracket")]
    UnbalancedBracket,
    #[error("Index must follow a field or key")]
    DetachedIndex,
    #[error("Invalid index: {0:?}")]
    InvalidIndex(String),
    #[error("Reserved character {0:?} in map key")]
    ReservedCharacter(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_keys_parse_back() {
        let paths = [
            FieldPath::root().field(vocab::NAME),
            FieldPath::root().field(vocab::META).key("hello"),
            FieldPath::root().field(vocab::META).key(""),
            FieldPath::root().field(vocab::PARAMS).key("query").index(1),
            FieldPath::root()
                .field(vocab::SUBSCRIPTIONS)
                .index(10)
                .field(vocab::METADATA)
                .key("version"),
        ];

        for path in paths {
            let from_attribute = parse_attribute_key(&path.to_attribute_key()).unwrap();
            let propagation_key = path.to_propagation_key();
            let from_propagation = parse_propagation_key(&propagation_key).unwrap();
            assert_eq!(
                from_attribute, from_propagation,
                "forms disagree for {path}"
            );
            assert_eq!(from_attribute.len(), path.len());
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PathError::InvalidIndex("x".to_string()).to_string(),
            "Invalid index: \"x\""
        );
        assert_eq!(
            PathError::ReservedCharacter('.').to_string(),
            "Reserved character '.' in map key"
        );
    }
}
