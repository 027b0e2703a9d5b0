//! Type definitions for event field paths.

use std::fmt;

/// Literal root every rendered key starts with.
pub const ROOT: &str = "event";

/// One atomic component of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A field name from the fixed leaf vocabulary.
    Field(&'static str),
    /// A map key taken verbatim from `meta`, `metadata` or `params`.
    Key(String),
    /// A position inside a repeated field.
    Index(usize),
}

/// The two textual renderings of a [`FieldPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyForm {
    /// Dot-joined, indices appended as `[i]`: `event.subscriptions[0].id`.
    ///
    /// Used for attributes attached to a local span.
    Attribute,
    /// Dot-joined only, indices as bare numbers: `event.subscriptions.0.id`.
    ///
    /// Used for propagation carriers whose keys must be token characters.
    Propagation,
}

/// A logical path to a field of an event, rooted at [`ROOT`].
///
/// The root itself is implicit and never stored as a segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The empty path, rendering as just `event`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Append a vocabulary field.
    pub fn field(mut self, name: &'static str) -> Self {
        self.segments.push(Segment::Field(name));
        self
    }

    /// Append a verbatim map key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    /// Append a sequence position.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render the path in the requested form.
    pub fn render(&self, form: KeyForm) -> String {
        let mut out = String::with_capacity(ROOT.len() + self.segments.len() * 12);
        out.push_str(ROOT);
        for segment in &self.segments {
            match (segment, form) {
                (Segment::Field(name), _) => {
                    out.push('.');
                    out.push_str(name);
                }
                (Segment::Key(key), _) => {
                    out.push('.');
                    out.push_str(key);
                }
                (Segment::Index(index), KeyForm::Attribute) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
                (Segment::Index(index), KeyForm::Propagation) => {
                    out.push('.');
                    out.push_str(&index.to_string());
                }
            }
        }
        out
    }

    /// Shorthand for `render(KeyForm::Attribute)`.
    pub fn to_attribute_key(&self) -> String {
        self.render(KeyForm::Attribute)
    }

    /// Shorthand for `render(KeyForm::Propagation)`.
    pub fn to_propagation_key(&self) -> String {
        self.render(KeyForm::Propagation)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_attribute_key())
    }
}
