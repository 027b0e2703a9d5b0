//! Event flattening into string-keyed maps.
//!
//! Both encoders write into any `Extend<(String, String)>` target and leave
//! entries they do not produce untouched. Scalar fields holding their zero
//! value are omitted; map entries are always written, empty values included.

use event_path::{vocab, FieldPath, KeyForm};

use crate::model::Event;
use crate::subscription::flatten_subscriptions;

/// Render an increment with exactly six fractional digits (`1` is `1.000000`).
///
/// Precision below a millionth is lost. Non-finite values render as `NaN`
/// or `inf` and are rejected by the decoder.
pub fn format_increment_by(value: f64) -> String {
    format!("{value:.6}")
}

/// Flatten an event into span attributes (`event.subscriptions[0].id`).
///
/// Every field is written, including `params` and `is_anonymous`.
pub fn inject_event_to_flat_map<E>(event: &Event, target: &mut E)
where
    E: Extend<(String, String)>,
{
    flatten_event(event, KeyForm::Attribute, target);
}

/// Flatten an event into propagation carrier members
/// (`event.subscriptions.0.id`).
///
/// Only the fields a receiving side can rebuild are written: `name`, `meta`
/// and `subscriptions`.
pub fn inject_event_to_baggage<E>(event: &Event, target: &mut E)
where
    E: Extend<(String, String)>,
{
    flatten_event(event, KeyForm::Propagation, target);
}

pub(crate) fn flatten_event<E>(event: &Event, form: KeyForm, target: &mut E)
where
    E: Extend<(String, String)>,
{
    let mut entries = Vec::new();

    if !event.name.is_empty() {
        let path = FieldPath::root().field(vocab::NAME);
        entries.push((path.render(form), event.name.clone()));
    }

    for (key, value) in &event.meta {
        let path = FieldPath::root().field(vocab::META).key(key.as_str());
        entries.push((path.render(form), value.clone()));
    }

    if form == KeyForm::Attribute {
        for (key, values) in &event.params {
            for (index, value) in values.iter().enumerate() {
                let path = FieldPath::root()
                    .field(vocab::PARAMS)
                    .key(key.as_str())
                    .index(index);
                entries.push((path.render(form), value.clone()));
            }
        }

        if event.is_anonymous {
            let path = FieldPath::root().field(vocab::IS_ANONYMOUS);
            entries.push((path.render(form), true.to_string()));
        }
    }

    target.extend(entries);
    flatten_subscriptions(&event.subscriptions, form, target);
}
