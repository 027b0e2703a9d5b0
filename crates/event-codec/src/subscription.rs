//! Subscription flattening: one block of entries per subscription position.

use event_path::{vocab, FieldPath, KeyForm};

use crate::encode::format_increment_by;
use crate::model::Subscription;

/// Flatten subscriptions into span attributes
/// (`event.subscriptions[i].<field>`, `event.subscriptions[i].metadata.<key>`).
pub fn inject_event_subscriptions_to_flat_map<E>(subscriptions: &[Subscription], target: &mut E)
where
    E: Extend<(String, String)>,
{
    flatten_subscriptions(subscriptions, KeyForm::Attribute, target);
}

pub(crate) fn flatten_subscriptions<E>(
    subscriptions: &[Subscription],
    form: KeyForm,
    target: &mut E,
) where
    E: Extend<(String, String)>,
{
    for (index, subscription) in subscriptions.iter().enumerate() {
        let base = FieldPath::root().field(vocab::SUBSCRIPTIONS).index(index);
        target.extend(subscription_entries(subscription, &base, form));
    }
}

fn subscription_entries(
    subscription: &Subscription,
    base: &FieldPath,
    form: KeyForm,
) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    for (field, value) in subscription.string_fields() {
        if !value.is_empty() {
            let path = base.clone().field(field);
            entries.push((path.render(form), value.to_string()));
        }
    }

    if subscription.increment_by != 0.0 {
        let path = base.clone().field(vocab::INCREMENT_BY);
        entries.push((
            path.render(form),
            format_increment_by(subscription.increment_by),
        ));
    }

    for (key, value) in &subscription.metadata {
        let path = base.clone().field(vocab::METADATA).key(key.as_str());
        entries.push((path.render(form), value.clone()));
    }

    entries
}
