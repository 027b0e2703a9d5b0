//! Incremental event reconstruction, one `(path, value)` pair at a time.
//!
//! Pairs may arrive in any order; applying the pairs of one encoded event in
//! any permutation yields the same event. Nothing here returns an error:
//! every pair that cannot be applied is dropped, and the reason is reported
//! as a [`DecodeOutcome`].

use std::fmt;

use event_path::{is_index, parse_attribute_path, split_propagation_path, vocab, KeyForm};

use crate::model::{Event, Subscription};

/// Longest sequence a single pair may grow `subscriptions` or a `params`
/// value list to, by default.
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 1024;

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// An index at or past this bound is dropped instead of materializing
    /// placeholder elements up to it.
    pub max_sequence_len: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }
}

/// What happened to one decoded pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeOutcome {
    /// A field was set.
    Applied,
    /// The subscription slot was materialized, but the remainder of the path
    /// named no known subscription field.
    SlotOnly,
    /// The path names nothing this decoder knows.
    UnknownField,
    /// `increment_by` did not parse as a finite 64-bit float.
    MalformedNumber,
    /// `is_anonymous` was neither `true` nor `false`.
    MalformedBool,
    /// A sequence index was not a non-negative integer.
    MalformedIndex,
    /// A sequence index reached [`DecodeOptions::max_sequence_len`].
    IndexOutOfRange,
    /// An attribute-form path did not parse.
    MalformedPath,
}

impl DecodeOutcome {
    pub fn is_applied(self) -> bool {
        self == DecodeOutcome::Applied
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DecodeOutcome::Applied => "applied",
            DecodeOutcome::SlotOnly => "slot_only",
            DecodeOutcome::UnknownField => "unknown_field",
            DecodeOutcome::MalformedNumber => "malformed_number",
            DecodeOutcome::MalformedBool => "malformed_bool",
            DecodeOutcome::MalformedIndex => "malformed_index",
            DecodeOutcome::IndexOutOfRange => "index_out_of_range",
            DecodeOutcome::MalformedPath => "malformed_path",
        }
    }
}

impl fmt::Display for DecodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies root-stripped paths to an event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Apply one propagation-form pair (`subscriptions.0.id`).
    ///
    /// Recognizes `name`, `meta.<key>` and `subscriptions.<i>[.<rest>]`.
    pub fn apply(&self, event: &mut Event, path: &str, value: &str) -> DecodeOutcome {
        let segments = split_propagation_path(path);
        let outcome = self.apply_segments(event, &segments, value, KeyForm::Propagation);
        trace_outcome(path, outcome);
        outcome
    }

    /// Apply one attribute-form pair (`subscriptions[0].id`).
    ///
    /// Recognizes everything [`Decoder::apply`] does, plus
    /// `params.<key>[<i>]` and `is_anonymous`.
    pub fn apply_attribute(&self, event: &mut Event, path: &str, value: &str) -> DecodeOutcome {
        let outcome = match parse_attribute_path(path) {
            Ok(owned) => {
                let segments: Vec<&str> = owned.iter().map(String::as_str).collect();
                self.apply_segments(event, &segments, value, KeyForm::Attribute)
            }
            Err(_) => DecodeOutcome::MalformedPath,
        };
        trace_outcome(path, outcome);
        outcome
    }

    fn apply_segments(
        &self,
        event: &mut Event,
        segments: &[&str],
        value: &str,
        form: KeyForm,
    ) -> DecodeOutcome {
        match segments {
            [vocab::NAME] => {
                event.name = value.to_string();
                DecodeOutcome::Applied
            }
            [vocab::META, key] => {
                event.meta.insert((*key).to_string(), value.to_string());
                DecodeOutcome::Applied
            }
            [vocab::SUBSCRIPTIONS, index, rest @ ..] => {
                self.apply_subscription(&mut event.subscriptions, index, rest, value)
            }
            [vocab::PARAMS, key, index] if form == KeyForm::Attribute => {
                let position = match self.parse_index(index) {
                    Ok(position) => position,
                    Err(outcome) => return outcome,
                };
                let values = event.params.entry((*key).to_string()).or_default();
                if values.len() <= position {
                    values.resize(position + 1, String::new());
                }
                values[position] = value.to_string();
                DecodeOutcome::Applied
            }
            [vocab::IS_ANONYMOUS] if form == KeyForm::Attribute => match value.parse::<bool>() {
                Ok(flag) => {
                    event.is_anonymous = flag;
                    DecodeOutcome::Applied
                }
                Err(_) => DecodeOutcome::MalformedBool,
            },
            _ => DecodeOutcome::UnknownField,
        }
    }

    fn apply_subscription(
        &self,
        subscriptions: &mut Vec<Subscription>,
        index: &str,
        rest: &[&str],
        value: &str,
    ) -> DecodeOutcome {
        let position = match self.parse_index(index) {
            Ok(position) => position,
            Err(outcome) => return outcome,
        };
        if subscriptions.len() <= position {
            subscriptions.resize_with(position + 1, Subscription::default);
        }
        let subscription = &mut subscriptions[position];

        match rest {
            [vocab::INCREMENT_BY] => match value.parse::<f64>() {
                Ok(increment_by) if increment_by.is_finite() => {
                    subscription.increment_by = increment_by;
                    DecodeOutcome::Applied
                }
                _ => DecodeOutcome::MalformedNumber,
            },
            [vocab::METADATA, key] => {
                subscription
                    .metadata
                    .insert((*key).to_string(), value.to_string());
                DecodeOutcome::Applied
            }
            [field] => match subscription.string_field_mut(field) {
                Some(slot) => {
                    *slot = value.to_string();
                    DecodeOutcome::Applied
                }
                None => DecodeOutcome::SlotOnly,
            },
            _ => DecodeOutcome::SlotOnly,
        }
    }

    fn parse_index(&self, index: &str) -> Result<usize, DecodeOutcome> {
        if !is_index(index) {
            return Err(DecodeOutcome::MalformedIndex);
        }
        // All digits, so a parse failure can only be overflow.
        let position = index
            .parse::<usize>()
            .map_err(|_| DecodeOutcome::IndexOutOfRange)?;
        if position >= self.options.max_sequence_len {
            return Err(DecodeOutcome::IndexOutOfRange);
        }
        Ok(position)
    }
}

fn trace_outcome(path: &str, outcome: DecodeOutcome) {
    if !outcome.is_applied() {
        tracing::trace!(path, reason = outcome.as_str(), "event member not applied");
    }
}

/// Apply one propagation-form pair with default options.
///
/// A `subscriptions` index at or past [`DEFAULT_MAX_SEQUENCE_LEN`] is dropped
/// as [`DecodeOutcome::IndexOutOfRange`]; use [`Decoder::with_options`] to
/// raise the bound.
pub fn apply_event_from_baggage_member(
    path: &str,
    value: &str,
    event: &mut Event,
) -> DecodeOutcome {
    Decoder::default().apply(event, path, value)
}
