//! Event extraction from whole carriers.
//!
//! A carrier is any iterable of string pairs. Pairs outside the `event.`
//! namespace are skipped; everything else goes through the [`Decoder`] into
//! one shared accumulator.

use event_path::strip_root;

use crate::decode::Decoder;
use crate::model::Event;

/// Per-carrier counters, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Pairs that set a field.
    pub applied: usize,
    /// `event.` pairs that set no field.
    pub ignored: usize,
    /// Pairs from other namespaces.
    pub foreign: usize,
}

impl Decoder {
    /// Rebuild an event from propagation carrier members.
    pub fn extract<I, K, V>(&self, carrier: I) -> (Event, ExtractStats)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.extract_with(carrier, |event, path, value| {
            self.apply(event, path, value).is_applied()
        })
    }

    /// Rebuild an event from span attributes.
    pub fn extract_attributes<I, K, V>(&self, attributes: I) -> (Event, ExtractStats)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.extract_with(attributes, |event, path, value| {
            self.apply_attribute(event, path, value).is_applied()
        })
    }

    fn extract_with<I, K, V, F>(&self, pairs: I, mut apply: F) -> (Event, ExtractStats)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
        F: FnMut(&mut Event, &str, &str) -> bool,
    {
        let mut event = Event::default();
        let mut stats = ExtractStats::default();

        for (key, value) in pairs {
            let Some(path) = strip_root(key.as_ref()) else {
                stats.foreign += 1;
                continue;
            };
            if apply(&mut event, path, value.as_ref()) {
                stats.applied += 1;
            } else {
                stats.ignored += 1;
            }
        }

        tracing::debug!(
            applied = stats.applied,
            ignored = stats.ignored,
            foreign = stats.foreign,
            "extracted event"
        );
        (event, stats)
    }
}

/// Rebuild an event from a propagation carrier with default options.
///
/// Never fails; a carrier without `event.` members yields the empty event.
/// Members indexing `subscriptions` at or past
/// [`DEFAULT_MAX_SEQUENCE_LEN`](crate::DEFAULT_MAX_SEQUENCE_LEN)
/// are dropped; use [`Decoder::extract`] with raised options for more.
pub fn extract_event_from_baggage<I, K, V>(carrier: I) -> Event
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Decoder::default().extract(carrier).0
}

/// Rebuild an event from span attributes with default options.
pub fn extract_event_from_flat_map<I, K, V>(attributes: I) -> Event
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Decoder::default().extract_attributes(attributes).0
}
